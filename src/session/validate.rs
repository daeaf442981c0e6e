// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use crate::common::Error;
use serde::{Deserialize, Serialize};

/// Opaque session marker written by the login flow, for example an invite code.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct SessionToken(pub String);
crate::impl_wrapper_str!(SessionToken);

/// Decides whether a stored session marker admits the visitor.
pub trait SessionValidator {
    /// Returns `Ok(())` if `token` admits the visitor.
    fn validate(&self, token: &SessionToken) -> Result<(), Error>;
}

/// Admits any non-empty marker. The marker is never checked against a server,
/// so this only steers navigation and must not be relied on for authorization.
#[derive(Clone, Copy, Debug, Default)]
pub struct PresenceValidator;

impl SessionValidator for PresenceValidator {
    fn validate(&self, token: &SessionToken) -> Result<(), Error> {
        if token.is_empty() {
            Err(Error::String("empty session marker".to_string()))
        } else {
            Ok(())
        }
    }
}
