// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use crate::serde_utils::FromStrVisitor;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::{Arc, RwLock};

#[derive(Clone, Debug, Default, Eq, Hash, PartialEq, Deserialize, Serialize)]
/// Identifier of a signed in user, as issued by the auth provider.
pub struct UserId(pub String);
crate::impl_wrapper_str!(UserId);

/// Role of a signed in user. Only `Admin` may broadcast new-video notifications.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Role {
    /// Administrator, spelled `admin`.
    Admin,
    /// Regular member, spelled `user`.
    #[default]
    User,
    /// Any other role string.
    Other(String),
}
crate::serde_str!(Role);

impl Role {
    /// Returns `true` for `Role::Admin`.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => f.write_str("admin"),
            Role::User => f.write_str("user"),
            Role::Other(role) => f.write_str(role),
        }
    }
}

impl FromStr for Role {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "admin" => Role::Admin,
            "user" => Role::User,
            other => Role::Other(other.to_string()),
        })
    }
}

/// The signed in user, as reported by the auth provider.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct UserSession {
    /// The user ID.
    pub id: UserId,
    /// The user role.
    pub role: Role,
}

/// Shared, read-mostly holder of the current `UserSession`.
///
/// Clones share the same session.
#[derive(Clone, Debug, Default)]
pub struct AuthStore {
    user: Arc<RwLock<Option<UserSession>>>,
}

impl AuthStore {
    /// Creates a store with a signed in user.
    pub fn with_user(user: UserSession) -> Self {
        let store = Self::default();
        store.sign_in(user);
        store
    }

    /// Returns `true` if the current user is an administrator.
    pub fn is_admin(&self) -> bool {
        self.user()
            .map(|UserSession { role, .. }| role.is_admin())
            .unwrap_or(false)
    }

    /// Replaces the current user.
    pub fn sign_in(&self, user: UserSession) {
        if let Ok(mut current) = self.user.write() {
            *current = Some(user);
        }
    }

    /// Forgets the current user.
    pub fn sign_out(&self) {
        if let Ok(mut current) = self.user.write() {
            *current = None;
        }
    }

    /// Returns the current user, if any.
    pub fn user(&self) -> Option<UserSession> {
        self.user.read().ok().and_then(|user| user.clone())
    }

    /// Returns the ID of the current user, if any.
    pub fn user_id(&self) -> Option<UserId> {
        self.user().map(|UserSession { id, .. }| id)
    }
}
