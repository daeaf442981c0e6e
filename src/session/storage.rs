// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use crate::common::{Error, ScrapConfig};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::{read_to_string, write};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

/// Persistent key/value storage for the session marker.
pub trait SessionStorage {
    /// Returns the value stored under `key`, if any.
    fn get_item(&self, key: &str) -> Result<Option<String>, Error>;

    /// Stores `value` under `key`.
    fn set_item(&self, key: &str, value: &str) -> Result<(), Error>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<(), Error>;
}

/// Storage that lives as long as the process.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemorySessionStorage {
    fn lock_error() -> Error {
        Error::String("session storage lock poisoned".to_string())
    }
}

impl SessionStorage for MemorySessionStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, Error> {
        let items = self.items.lock().map_err(|_| Self::lock_error())?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), Error> {
        let mut items = self.items.lock().map_err(|_| Self::lock_error())?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), Error> {
        let mut items = self.items.lock().map_err(|_| Self::lock_error())?;
        items.remove(key);
        Ok(())
    }
}

/// Storage kept in a JSON object file, so the marker survives restarts.
#[derive(Debug)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    const DEFAULT_PATH: &'static str = ".scrapboard-session.json";

    /// Storage backed by `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage at `[session] storage_path`, defaulting to `DEFAULT_PATH`.
    pub fn from_config(scrap_config: &ScrapConfig) -> Result<Self, Error> {
        #[derive(Default, Deserialize)]
        struct SessionConfig {
            storage_path: Option<PathBuf>,
        }
        #[derive(Deserialize)]
        struct ConfigToml {
            #[serde(default)]
            session: SessionConfig,
        }
        let ConfigToml {
            session: SessionConfig { storage_path },
        } = scrap_config.get()?;
        Ok(Self::new(
            storage_path.unwrap_or_else(|| PathBuf::from(Self::DEFAULT_PATH)),
        ))
    }

    fn read(&self) -> Result<HashMap<String, String>, Error> {
        match read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(HashMap::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(Error::String(format!(
                "{}: cannot read: {e}",
                self.path.display()
            ))),
        }
    }

    fn write(&self, items: &HashMap<String, String>) -> Result<(), Error> {
        let text = serde_json::to_string_pretty(items)?;
        write(&self.path, text)
            .map_err(|e| Error::String(format!("{}: cannot write: {e}", self.path.display())))
    }
}

impl SessionStorage for FileSessionStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.read()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), Error> {
        let mut items = self.read()?;
        items.insert(key.to_string(), value.to_string());
        self.write(&items)
    }

    fn remove_item(&self, key: &str) -> Result<(), Error> {
        let mut items = self.read()?;
        if items.remove(key).is_some() {
            self.write(&items)
        } else {
            Ok(())
        }
    }
}
