// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::{PresenceValidator, SessionStorage, SessionToken, SessionValidator};
use crate::common::{Error, ScrapConfig};
use crate::log::DiagnosticLog;
use serde::Deserialize;
use std::sync::Arc;

/// Storage key of the session marker.
pub const DEFAULT_SESSION_KEY: &str = "invite_code";
/// Where visitors without a session are sent.
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// One-way navigation to `to`. With `replace`, the current location is replaced
/// in history rather than pushed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Redirect {
    /// Destination path.
    pub to: String,
    /// Replace the current history entry.
    pub replace: bool,
}

/// What the gate decided to show.
#[derive(Debug, Eq, PartialEq)]
pub enum GateOutcome<T> {
    /// Show the children unchanged.
    Render(T),
    /// Navigate away instead.
    Redirect(Redirect),
}

impl<T> GateOutcome<T> {
    /// The children, if they are to be rendered.
    pub fn into_children(self) -> Option<T> {
        match self {
            GateOutcome::Render(children) => Some(children),
            GateOutcome::Redirect(_) => None,
        }
    }
}

/// Routing guard that redirects visitors without a session marker.
///
/// The marker is only checked by the configured `SessionValidator`, which by
/// default trusts mere presence. Treat the gate as navigation, not security.
pub struct AuthGate {
    key: String,
    logger: DiagnosticLog,
    login_path: String,
    storage: Arc<dyn SessionStorage + Send + Sync>,
    validator: Box<dyn SessionValidator + Send + Sync>,
}

impl AuthGate {
    /// A gate with the default key, login path and presence-only validation.
    pub fn new(storage: Arc<dyn SessionStorage + Send + Sync>) -> Self {
        Self {
            key: DEFAULT_SESSION_KEY.to_string(),
            logger: DiagnosticLog::default(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            storage,
            validator: Box::new(PresenceValidator),
        }
    }

    /// A gate configured from the optional `[session]` section.
    pub fn from_config(
        scrap_config: &ScrapConfig,
        storage: Arc<dyn SessionStorage + Send + Sync>,
    ) -> Result<Self, Error> {
        #[derive(Default, Deserialize)]
        struct SessionConfig {
            key: Option<String>,
            login_path: Option<String>,
        }
        #[derive(Deserialize)]
        struct ConfigToml {
            #[serde(default)]
            session: SessionConfig,
        }
        let ConfigToml {
            session: SessionConfig { key, login_path },
        } = scrap_config.get()?;
        let mut gate = Self::new(storage);
        if let Some(key) = key {
            gate.key = key;
        }
        if let Some(login_path) = login_path {
            gate.login_path = login_path;
        }
        gate.logger = DiagnosticLog::new(scrap_config.debug());
        Ok(gate)
    }

    /// Replace the validator.
    pub fn with_validator(
        mut self,
        validator: impl SessionValidator + Send + Sync + 'static,
    ) -> Self {
        self.validator = Box::new(validator);
        self
    }

    /// Render `children` if a valid session marker is stored, otherwise redirect
    /// to the login path.
    pub fn guard<T>(&self, children: T) -> GateOutcome<T> {
        match self.session_token() {
            Some(token) => match self.validator.validate(&token) {
                Ok(()) => GateOutcome::Render(children),
                Err(e) => {
                    self.logger.warn(format!("session marker rejected: {e}"));
                    self.redirect()
                }
            },
            None => self.redirect(),
        }
    }

    /// Diagnostic log of this gate.
    pub fn logger(&self) -> &DiagnosticLog {
        &self.logger
    }

    /// Login destination.
    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// The stored marker. Missing, empty and unreadable markers are all `None`.
    pub fn session_token(&self) -> Option<SessionToken> {
        match self.storage.get_item(&self.key) {
            Ok(value) => value.filter(|v| !v.is_empty()).map(SessionToken),
            Err(e) => {
                self.logger.warn(format!("cannot read session marker: {e}"));
                None
            }
        }
    }

    /// Store the marker. Called by the login flow.
    pub fn sign_in(&self, token: &SessionToken) -> Result<(), Error> {
        self.logger.call(
            "store session marker".to_string(),
            self.storage.set_item(&self.key, token.as_str()),
        )
    }

    /// Forget the marker.
    pub fn sign_out(&self) -> Result<(), Error> {
        self.logger.call(
            "remove session marker".to_string(),
            self.storage.remove_item(&self.key),
        )
    }

    fn redirect<T>(&self) -> GateOutcome<T> {
        GateOutcome::Redirect(Redirect {
            to: self.login_path.clone(),
            replace: true,
        })
    }
}
