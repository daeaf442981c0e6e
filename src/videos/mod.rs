// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

/// Video search trait and video record.
mod video_search;

/// Support for Youtube.
mod youtube;

/// Unit tests
mod tests;

pub use self::video_search::{
    Video, VideoId, VideoSearch, DEFAULT_MAX_RESULTS, DEFAULT_QUERY, MAX_RESULTS_LIMIT,
};
pub use self::youtube::YoutubeVideos;
