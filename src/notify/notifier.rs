// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use crate::common::{Error, UserId};
use crate::videos::Video;
use async_trait::async_trait;
use serde::Serialize;

/// Body of a new-video notification.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVideoNotification<'a> {
    /// The newest video.
    pub video: &'a Video,
    /// Who triggered the notification.
    pub user_id: Option<&'a UserId>,
}

/// Broadcasts new-video alerts.
#[async_trait]
pub trait Notifier {
    /// Announce `video` on behalf of `user_id`.
    async fn send_new_video(&self, video: &Video, user_id: Option<&UserId>) -> Result<(), Error>;
}
