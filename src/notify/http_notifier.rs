// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::{NewVideoNotification, Notifier};
use crate::common::{Error, ScrapConfig, UserId};
use crate::videos::Video;
use async_trait::async_trait;
use hyper::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Posts new-video notifications as JSON to a configured endpoint.
pub struct HttpNotifier {
    client: Client,
    endpoint: String,
}

impl HttpNotifier {
    const TIMEOUT_SECS: u64 = 20;

    /// Create a notifier from the `[notifications]` section.
    pub fn new(scrap_config: &ScrapConfig) -> Result<Self, Error> {
        #[derive(Deserialize)]
        struct NotificationsConfig {
            api_key: Option<String>,
            endpoint: String,
        }
        #[derive(Deserialize)]
        struct ConfigToml {
            notifications: NotificationsConfig,
        }
        let ConfigToml {
            notifications: NotificationsConfig { api_key, endpoint },
        } = scrap_config.get()?;

        let mut default_headers = HeaderMap::new();
        if let Some(api_key) = api_key {
            let mut auth_header = HeaderValue::from_str(&format!("Bearer {api_key}"))
                .map_err(|e| Error::String(format!("notifications api_key: {e}")))?;
            auth_header.set_sensitive(true);
            default_headers.insert(reqwest::header::AUTHORIZATION, auth_header);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(Self::TIMEOUT_SECS))
            .default_headers(default_headers)
            .build()
            .map_err(|e| Error::from_reqwest("notification client", e))?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn send_new_video(&self, video: &Video, user_id: Option<&UserId>) -> Result<(), Error> {
        let body = NewVideoNotification { video, user_id };
        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::from_reqwest("notification", e))?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            match response.text().await {
                Ok(body) => Err(Error::Http(status, format!("notification: {body}"))),
                Err(e) => Err(Error::Http(status, format!("notification: {e}"))),
            }
        }
    }
}
