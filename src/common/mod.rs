// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

/// Signed in user and role.
mod auth;
mod config;
/// An enum that encapsulates a variety of error types.
mod error;

pub use self::auth::{AuthStore, Role, UserId, UserSession};
pub use self::config::{ScrapConfig, ScrapConfigBuilder};
pub use self::error::Error;
