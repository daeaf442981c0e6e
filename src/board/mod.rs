// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

/// Search, diff, notify.
mod controller;
/// Page-session state and the derived view.
mod state;

pub use self::controller::{
    BoardEvent, ScrapBoard, DEFAULT_BOARD_QUERY, NOTIFY_FAILED, NOTIFY_SENT,
};
pub use self::state::{has_new_videos, BoardState, BoardView, VideoFilter};
