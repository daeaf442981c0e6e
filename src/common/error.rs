// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use hyper::StatusCode;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
/// An enum that encapsulates a variety of error types.
///
/// # Example
///
/// Error::Http(StatusCode::FAILED_DEPENDENCY, format!("youtube search: {e}"))
pub enum Error {
    /// HTTP (transport or provider) error
    Http(StatusCode, String),
    /// Serde (serialization or deserialization) error
    Serde(serde_json::Error),
    /// String error.
    String(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Error::Http(status_code, mesg) => Display::fmt(&format!("{status_code}: {mesg}"), f),
            Error::Serde(e) => Display::fmt(&format!("serde: {e}"), f),
            Error::String(s) => Display::fmt(&s, f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Serde(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serde(e)
    }
}

impl Error {
    /// Map a `reqwest` transport failure to `Error`. The request URL is
    /// dropped because it may carry credentials such as `key=`.
    pub fn from_reqwest(context: &str, e: reqwest::Error) -> Self {
        let status = e.status().unwrap_or(StatusCode::FAILED_DEPENDENCY);
        let e = e.without_url();
        Error::Http(status, format!("{context}: {e}"))
    }

    /// Map `String` to `Error`.
    pub fn from_string(s: String) -> Self {
        Error::String(s)
    }
}
