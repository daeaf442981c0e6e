// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

#![warn(missing_docs)]
//! Search housing-subscription (청약) videos on Youtube, scrap the ones worth
//! keeping, and let admins announce newly found videos.

/// The scrap board controller.
pub mod board;
pub use board::*;

/// Types common to multiple modules.
pub mod common;
pub use common::*;

/// Thread-safe logging.
pub mod log;
pub use log::*;

/// New-video notifications.
pub mod notify;
pub use notify::*;

/// Shared scrap list and its persistence.
pub mod scraps;
pub use scraps::*;

/// Macros used with `serde` serialization and deserialization.
pub mod serde_utils;
pub use serde_utils::*;

/// Session marker storage and the auth gate.
pub mod session;
pub use session::*;

/// Video search.
pub mod videos;
pub use videos::*;
