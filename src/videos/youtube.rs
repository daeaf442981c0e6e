// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::{Video, VideoId, VideoSearch, DEFAULT_QUERY, MAX_RESULTS_LIMIT};
use crate::common::{Error, ScrapConfig};
use crate::log::DiagnosticLog;
use async_trait::async_trait;
use hyper::StatusCode;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";
const THUMBNAIL_SIZE: &str = "medium";

/// Youtube Data API search.
pub struct YoutubeVideos {
    api_key: String,
    base_url: String,
    client: Client,
    logger: DiagnosticLog,
}

impl YoutubeVideos {
    const TIMEOUT_SECS: u64 = 5;

    /// Create a `VideoSearch` for Youtube from the `[youtube]` section.
    pub fn new(scrap_config: &ScrapConfig) -> Result<Self, Error> {
        #[derive(Deserialize)]
        struct YoutubeConfig {
            api_key: String,
            base_url: Option<String>,
            timeout_secs: Option<u64>,
        }
        #[derive(Deserialize)]
        struct ConfigToml {
            youtube: YoutubeConfig,
        }
        let ConfigToml {
            youtube:
                YoutubeConfig {
                    api_key,
                    base_url,
                    timeout_secs,
                },
        } = scrap_config.get()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(
                timeout_secs.unwrap_or(Self::TIMEOUT_SECS),
            ))
            .http1_only()
            .build()
            .map_err(|e| Error::from_reqwest("youtube client", e))?;

        Ok(Self {
            api_key,
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            client,
            logger: DiagnosticLog::new(scrap_config.debug()),
        })
    }

    /// Diagnostic log of requests made by this client.
    pub fn logger(&self) -> &DiagnosticLog {
        &self.logger
    }

    fn map_error(e: reqwest::Error) -> Error {
        Error::from_reqwest("youtube search", e)
    }

    /// Builds the search URL. `max_results` is clamped into the provider's bounds
    /// and a blank query searches `DEFAULT_QUERY`.
    pub(crate) fn search_url(&self, query: &str, max_results: u32) -> String {
        let query = if query.trim().is_empty() {
            DEFAULT_QUERY
        } else {
            query
        };
        let max_results = max_results.clamp(1, MAX_RESULTS_LIMIT).to_string();
        let parameters: Vec<_> = vec![
            ("part", "snippet"),
            ("type", "video"),
            ("maxResults", max_results.as_str()),
            ("q", query),
            ("key", self.api_key.as_str()),
        ]
        .into_iter()
        .map(|(name, value)| format!("{name}={}", urlencoding::encode(value)))
        .collect();
        format!("{}/search?{}", self.base_url, parameters.join("&"))
    }

    /// Parses a provider error body, falling back to the raw text.
    fn parse_error(status: StatusCode, text: &str) -> Error {
        #[derive(Deserialize)]
        struct YoutubeReason {
            message: String,
        }
        #[derive(Deserialize)]
        struct YoutubeError {
            error: YoutubeReason,
        }
        match serde_json::from_str(text) {
            Ok(YoutubeError {
                error: YoutubeReason { message },
            }) => Error::Http(status, format!("youtube error: {message}")),
            Err(_) => Error::Http(status, format!("youtube error: {text}")),
        }
    }

    /// Maps a search response body into video records, preserving order.
    pub(crate) fn parse_videos(text: &str) -> Result<Vec<Video>, Error> {
        let response: YoutubeResponse = serde_json::from_str(text)?;
        Ok(response
            .items
            .into_iter()
            .map(
                |YoutubeItem {
                     id: YoutubeItemId { video_id },
                     snippet:
                         YoutubeSnippet {
                             description,
                             published_at,
                             mut thumbnails,
                             title,
                         },
                 }| Video {
                    id: VideoId(video_id),
                    title,
                    description,
                    thumbnail: thumbnails
                        .remove(THUMBNAIL_SIZE)
                        .map(|YoutubeThumbnail { url }| url)
                        .unwrap_or_default(),
                    upload_date: published_at,
                    is_shorts: None,
                },
            )
            .collect())
    }
}

#[async_trait]
impl VideoSearch for YoutubeVideos {
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<Video>, Error> {
        let url = self.search_url(query, max_results);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(Self::map_error)?;
        let status = response.status();
        let text = response.text().await.map_err(Self::map_error)?;
        if !status.is_success() {
            return Err(Self::parse_error(status, &text));
        }
        self.logger
            .call(format!("youtube search q={query:?}"), Self::parse_videos(&text))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YoutubeItem {
    id: YoutubeItemId,
    snippet: YoutubeSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YoutubeItemId {
    video_id: String,
}

#[derive(Debug, Deserialize)]
struct YoutubeResponse {
    #[serde(default)]
    items: Vec<YoutubeItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YoutubeSnippet {
    #[serde(default)]
    description: String,
    published_at: String,
    #[serde(default)]
    thumbnails: HashMap<String, YoutubeThumbnail>,
    title: String,
}

#[derive(Debug, Deserialize)]
struct YoutubeThumbnail {
    // height: usize,
    // width: usize,
    url: String,
}
