// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use crate::common::Error;
use crate::serde_utils::is_default;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Search terms used when none are given.
pub const DEFAULT_QUERY: &str = "청약";
/// Number of results requested when none is given.
pub const DEFAULT_MAX_RESULTS: u32 = 8;
/// Upper bound the provider accepts for `maxResults`.
pub const MAX_RESULTS_LIMIT: u32 = 50;

/// Video ID assigned by the provider. Unique within one search response.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct VideoId(pub String);
crate::impl_wrapper_str!(VideoId);

/// Video search.
#[async_trait]
pub trait VideoSearch {
    /// Search for videos matching `query`, returning at most `max_results`
    /// records in provider order.
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<Video>, Error>;
}

/// Video record.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Video {
    /// Provider video ID.
    pub id: VideoId,
    /// Video title.
    pub title: String,
    /// Video description.
    pub description: String,
    /// URL of the medium resolution thumbnail.
    pub thumbnail: String,
    /// ISO-8601 upload timestamp, as reported by the provider.
    pub upload_date: String,
    /// Whether this is a short-form video. Unknown unless a source fills it in.
    #[serde(default, rename = "isShorts", skip_serializing_if = "is_default")]
    pub is_shorts: Option<bool>,
}

impl Video {
    /// Build a record with just an ID.
    pub fn new(id: impl Into<VideoId>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Build title.
    pub fn title(mut self, value: String) -> Self {
        self.title = value;
        self
    }

    /// Build short-form flag.
    pub fn shorts(mut self, value: bool) -> Self {
        self.is_shorts = Some(value);
        self
    }
}
