// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::Error;
use serde::de::DeserializeOwned;
#[allow(deprecated)]
use std::env::home_dir;
use std::fs::read_to_string;

/// Configuration parameters for the YouTube, Supabase, notification and session
/// sections. Each client deserializes only the section it needs.
#[derive(Debug)]
pub struct ScrapConfig {
    debug_enabled: bool,
    toml: String,
}

impl ScrapConfig {
    /// Creates a configuration builder.
    pub fn builder() -> ScrapConfigBuilder {
        ScrapConfigBuilder {
            scrap_config: None,
            debug_enabled: false,
            error: None,
        }
    }

    /// Returns `true` if debug is enabled.
    pub fn debug(&self) -> bool {
        self.debug_enabled
    }

    /// Returns configuration parameters.
    pub fn get<T: DeserializeOwned>(&self) -> Result<T, Error> {
        toml::from_str(&self.toml).map_err(|e: toml::de::Error| Error::String(format!("toml: {e}")))
    }
}

/// Builds a `ScrapConfig` from a TOML file or string.
pub struct ScrapConfigBuilder {
    scrap_config: Option<ScrapConfig>,
    debug_enabled: bool,
    error: Option<Error>,
}

impl ScrapConfigBuilder {
    /// Returns the configuration, or the first error encountered while loading it.
    pub fn build(self) -> Result<ScrapConfig, Error> {
        if let Some(error) = self.error {
            Err(error)
        } else if let Some(scrap_config) = self.scrap_config {
            Ok(scrap_config)
        } else {
            Err(Error::String("config not set".to_string()))
        }
    }

    /// Enables or disables debug output. Must precede `toml_*` to take effect.
    pub fn debug(self, debug_enabled: bool) -> Self {
        Self {
            scrap_config: self.scrap_config.map(|c| ScrapConfig {
                debug_enabled,
                toml: c.toml,
            }),
            debug_enabled,
            error: self.error,
        }
    }

    /// Reads `file_name` from the home directory, falling back to the current directory.
    pub fn toml_file(self, file_name: &str) -> Self {
        let debug_enabled = self.debug_enabled;
        #[allow(deprecated)]
        let home_path = home_dir().and_then(|pathbuf| {
            pathbuf
                .to_str()
                .map(|path| format!("{path}/{file_name}"))
        });
        let local_path = format!("./{file_name}");
        let from_home = home_path.and_then(|path| read_to_string(path).ok());
        match from_home
            .map(Ok)
            .unwrap_or_else(|| read_to_string(&local_path))
        {
            Ok(toml) => Self {
                scrap_config: Some(ScrapConfig {
                    debug_enabled,
                    toml,
                }),
                debug_enabled,
                error: None,
            },
            Err(_) => Self {
                scrap_config: None,
                debug_enabled,
                error: Some(Error::String(format!("{local_path}: cannot read"))),
            },
        }
    }

    /// Uses the given TOML text.
    pub fn toml_str(self, toml: &str) -> Self {
        self.toml_string(toml.to_string())
    }

    /// Uses the given TOML text.
    pub fn toml_string(self, toml: String) -> Self {
        Self {
            scrap_config: Some(ScrapConfig {
                debug_enabled: self.debug_enabled,
                toml,
            }),
            debug_enabled: self.debug_enabled,
            error: None,
        }
    }
}
