// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::ScrapPersistence;
use crate::common::Error;
use crate::log::DiagnosticLog;
use crate::videos::{Video, VideoId};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Default)]
struct ScrapState {
    scraps: Vec<Video>,
    scrapped: Vec<Video>,
}

/// Shared scrap list (the videos on display) and the set of scrapped videos.
///
/// Clones share state. The lock is never held across an `.await`.
#[derive(Clone)]
pub struct ScrapStore {
    logger: DiagnosticLog,
    persistence: Arc<dyn ScrapPersistence + Send + Sync>,
    state: Arc<Mutex<ScrapState>>,
}

impl ScrapStore {
    /// Create a store backed by `persistence`.
    pub fn new(
        persistence: Arc<dyn ScrapPersistence + Send + Sync>,
        logger: DiagnosticLog,
    ) -> Self {
        Self {
            logger,
            persistence,
            state: Default::default(),
        }
    }

    fn state(&self) -> Result<MutexGuard<'_, ScrapState>, Error> {
        self.state
            .lock()
            .map_err(|_| Error::String("scrap store lock poisoned".to_string()))
    }

    /// Hydrate the scrapped videos from persistence. Failures are logged and
    /// leave the current scrapped set untouched.
    pub async fn load_persisted(&self) {
        let result = self.persistence.load().await;
        if let Ok(videos) = self.logger.call("load persisted scraps".to_string(), result) {
            if let Ok(mut state) = self.state() {
                state.scrapped = videos;
            }
        }
    }

    /// Returns `true` if `id` is scrapped.
    pub fn is_scrapped(&self, id: &str) -> bool {
        self.state()
            .map(|state| state.scrapped.iter().any(|v| v.id.as_str() == id))
            .unwrap_or(false)
    }

    /// Diagnostic log of this store.
    pub fn logger(&self) -> &DiagnosticLog {
        &self.logger
    }

    /// The videos on display, in order.
    pub fn scraps(&self) -> Vec<Video> {
        self.state()
            .map(|state| state.scraps.clone())
            .unwrap_or_default()
    }

    /// The scrapped videos.
    pub fn scrapped(&self) -> Vec<Video> {
        self.state()
            .map(|state| state.scrapped.clone())
            .unwrap_or_default()
    }

    /// IDs of the scrapped videos.
    pub fn scrapped_ids(&self) -> HashSet<VideoId> {
        self.state()
            .map(|state| state.scrapped.iter().map(|v| v.id.clone()).collect())
            .unwrap_or_default()
    }

    /// Replace the videos on display.
    pub fn set_scraps(&self, scraps: Vec<Video>) {
        if let Ok(mut state) = self.state() {
            state.scraps = scraps;
        }
    }

    /// Scrap `video`, or unscrap it if already scrapped. Persistence is updated
    /// first; the local set only changes if that succeeds. Returns whether the
    /// video is now scrapped.
    pub async fn toggle_scrap(&self, video: &Video) -> Result<bool, Error> {
        if self.is_scrapped(&video.id) {
            let result = self.persistence.remove(&video.id).await;
            self.logger.call(format!("unscrap {}", video.id), result)?;
            self.state()?.scrapped.retain(|v| v.id != video.id);
            Ok(false)
        } else {
            let result = self.persistence.save(video).await;
            self.logger.call(format!("scrap {}", video.id), result)?;
            let mut state = self.state()?;
            if !state.scrapped.iter().any(|v| v.id == video.id) {
                state.scrapped.push(video.clone());
            }
            Ok(true)
        }
    }
}
