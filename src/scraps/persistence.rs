// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use crate::common::Error;
use crate::videos::{Video, VideoId};
use async_trait::async_trait;
use std::sync::Mutex;

/// Remote storage of scrapped videos.
#[async_trait]
pub trait ScrapPersistence {
    /// List every scrapped video.
    async fn load(&self) -> Result<Vec<Video>, Error>;

    /// Persist a newly scrapped video.
    async fn save(&self, video: &Video) -> Result<(), Error>;

    /// Forget a scrapped video.
    async fn remove(&self, id: &VideoId) -> Result<(), Error>;
}

/// Persistence that lives as long as the process.
#[derive(Debug, Default)]
pub struct MemoryScraps {
    videos: Mutex<Vec<Video>>,
}

impl MemoryScraps {
    /// Starts with `videos` already scrapped.
    pub fn with_videos(videos: Vec<Video>) -> Self {
        Self {
            videos: Mutex::new(videos),
        }
    }

    fn lock_error() -> Error {
        Error::String("scrap persistence lock poisoned".to_string())
    }
}

#[async_trait]
impl ScrapPersistence for MemoryScraps {
    async fn load(&self) -> Result<Vec<Video>, Error> {
        Ok(self.videos.lock().map_err(|_| Self::lock_error())?.clone())
    }

    async fn save(&self, video: &Video) -> Result<(), Error> {
        let mut videos = self.videos.lock().map_err(|_| Self::lock_error())?;
        if !videos.iter().any(|v| v.id == video.id) {
            videos.push(video.clone());
        }
        Ok(())
    }

    async fn remove(&self, id: &VideoId) -> Result<(), Error> {
        let mut videos = self.videos.lock().map_err(|_| Self::lock_error())?;
        videos.retain(|v| &v.id != id);
        Ok(())
    }
}
