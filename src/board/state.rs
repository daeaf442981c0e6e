// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use crate::videos::{Video, VideoId};
use std::collections::HashSet;

/// Short-form filter over the scrap list.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum VideoFilter {
    /// Every video.
    #[default]
    All,
    /// Videos known to be short-form.
    Shorts,
    /// Videos known not to be short-form.
    Regular,
}

impl VideoFilter {
    /// Whether `video` passes. Videos of unknown form only pass `All`.
    pub fn accepts(&self, video: &Video) -> bool {
        match self {
            VideoFilter::All => true,
            VideoFilter::Shorts => video.is_shorts == Some(true),
            VideoFilter::Regular => video.is_shorts == Some(false),
        }
    }
}

/// Variables of one board session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoardState {
    /// Current search terms.
    pub query: String,
    /// A search is in flight.
    pub loading: bool,
    /// Only show scrapped videos.
    pub show_scrapped_only: bool,
    /// Short-form filter.
    pub filter: VideoFilter,
    /// Result of the last successful search, newest diff baseline.
    pub last_search_result: Vec<Video>,
    /// The admin notify action is offered.
    pub show_notify_button: bool,
    /// A notification is in flight.
    pub notifying: bool,
}

/// Snapshot handed to whatever draws the board.
#[derive(Clone, Debug, PartialEq)]
pub struct BoardView {
    /// Current search terms.
    pub query: String,
    /// A search is in flight.
    pub loading: bool,
    /// Only scrapped videos are listed.
    pub show_scrapped_only: bool,
    /// The admin notify action is offered.
    pub show_notify_button: bool,
    /// The notify action is disabled while a notification is in flight.
    pub notifying: bool,
    /// Nothing was found (and nothing is loading).
    pub no_results: bool,
    /// IDs for the list renderer, in order. `None` while loading.
    pub filter_ids: Option<Vec<VideoId>>,
}

impl BoardView {
    /// Label of the current view mode.
    pub fn mode_label(&self) -> &'static str {
        if self.show_scrapped_only {
            "scrapped only"
        } else {
            "all videos"
        }
    }
}

/// Whether `videos` contains an ID absent from `previous`. Only identity is
/// compared, never content.
pub fn has_new_videos(previous: &[Video], videos: &[Video]) -> bool {
    let previous_ids: HashSet<&VideoId> = previous.iter().map(|v| &v.id).collect();
    videos.iter().any(|v| !previous_ids.contains(&v.id))
}

/// IDs of `scraps` that pass `filter` and, with `scrapped_only`, are in
/// `scrapped_ids`. Order is preserved and `scraps` is never modified.
pub(crate) fn visible_ids(
    scraps: &[Video],
    filter: VideoFilter,
    scrapped_only: bool,
    scrapped_ids: &HashSet<VideoId>,
) -> Vec<VideoId> {
    scraps
        .iter()
        .filter(|v| filter.accepts(v))
        .filter(|v| !scrapped_only || scrapped_ids.contains(&v.id))
        .map(|v| v.id.clone())
        .collect()
}
