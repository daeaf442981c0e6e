// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::ScrapPersistence;
use crate::common::{Error, ScrapConfig};
use crate::videos::{Video, VideoId};
use async_trait::async_trait;
use hyper::header::{HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_TABLE: &str = "scraps";

/// Scraps kept in a Supabase table through its PostgREST endpoint.
pub struct SupabaseScraps {
    client: Client,
    table_url: String,
}

impl SupabaseScraps {
    const TIMEOUT_SECS: u64 = 10;

    /// Create Supabase persistence from the `[supabase]` section.
    pub fn new(scrap_config: &ScrapConfig) -> Result<Self, Error> {
        #[derive(Deserialize)]
        struct SupabaseConfig {
            anon_key: String,
            table: Option<String>,
            url: String,
        }
        #[derive(Deserialize)]
        struct ConfigToml {
            supabase: SupabaseConfig,
        }
        let ConfigToml {
            supabase:
                SupabaseConfig {
                    anon_key,
                    table,
                    url,
                },
        } = scrap_config.get()?;

        let header = |value: String| {
            HeaderValue::from_str(&value)
                .map(|mut value| {
                    value.set_sensitive(true);
                    value
                })
                .map_err(|e| Error::String(format!("supabase anon_key: {e}")))
        };
        let mut default_headers = HeaderMap::new();
        default_headers.insert("apikey", header(anon_key.clone())?);
        default_headers.insert(
            reqwest::header::AUTHORIZATION,
            header(format!("Bearer {anon_key}"))?,
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(Self::TIMEOUT_SECS))
            .default_headers(default_headers)
            .build()
            .map_err(|e| Error::from_reqwest("supabase client", e))?;
        Ok(Self {
            client,
            table_url: format!(
                "{}/rest/v1/{}",
                url.trim_end_matches('/'),
                table.as_deref().unwrap_or(DEFAULT_TABLE)
            ),
        })
    }

    /// Send `request`, turning transport failures and non-2xx statuses into errors.
    async fn execute(&self, what: &str, request: RequestBuilder) -> Result<Response, Error> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::from_reqwest(what, e))?;
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            match response.text().await {
                Ok(body) => Err(Error::Http(status, format!("{what}: {body}"))),
                Err(e) => Err(Error::Http(status, format!("{what}: {e}"))),
            }
        }
    }
}

#[async_trait]
impl ScrapPersistence for SupabaseScraps {
    async fn load(&self) -> Result<Vec<Video>, Error> {
        let request = self
            .client
            .get(&self.table_url)
            .query(&[("select", "*")]);
        let response = self.execute("supabase select", request).await?;
        response
            .json()
            .await
            .map_err(|e| Error::from_reqwest("supabase JSON", e))
    }

    async fn save(&self, video: &Video) -> Result<(), Error> {
        let request = self
            .client
            .post(&self.table_url)
            .header("Prefer", "return=minimal")
            .json(video);
        self.execute("supabase insert", request).await.map(|_| ())
    }

    async fn remove(&self, id: &VideoId) -> Result<(), Error> {
        let request = self
            .client
            .delete(&self.table_url)
            .query(&[("id", format!("eq.{id}"))]);
        self.execute("supabase delete", request).await.map(|_| ())
    }
}
