// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

/// Redirects visitors without a session marker.
mod gate;
#[cfg(feature = "jwt")]
/// JWT session validation.
mod jwt;
/// Where the session marker lives.
mod storage;
/// Session unit tests.
mod tests;
/// Session marker validation.
mod validate;

pub use self::gate::{AuthGate, GateOutcome, Redirect, DEFAULT_LOGIN_PATH, DEFAULT_SESSION_KEY};
#[cfg(feature = "jwt")]
pub use self::jwt::JwtValidator;
pub use self::storage::{FileSessionStorage, MemorySessionStorage, SessionStorage};
pub use self::validate::{PresenceValidator, SessionToken, SessionValidator};
