// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::{SessionToken, SessionValidator};
use crate::common::{Error, ScrapConfig};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use serde_json::Value;
use std::str::FromStr;

// HS256 is symmetric, RS256 is asymmetric.
const DEFAULT_ALGORITHM: &str = "HS256";

/// Admits session markers that are JWTs signed by the configured key and not
/// yet expired. Opt in with `AuthGate::with_validator`.
pub struct JwtValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtValidator {
    /// Creates a validator from the `[jwt]` section, which holds either a
    /// shared `secret` or a `public_key_pem`.
    pub fn new(scrap_config: &ScrapConfig) -> Result<Self, Error> {
        #[derive(Deserialize)]
        struct JwtConfig {
            #[serde(default)]
            algorithm: Option<String>,
            #[serde(default)]
            public_key_pem: Option<String>,
            #[serde(default)]
            secret: Option<String>,
        }
        #[derive(Deserialize)]
        struct ConfigToml {
            jwt: JwtConfig,
        }
        let ConfigToml {
            jwt:
                JwtConfig {
                    algorithm,
                    public_key_pem,
                    secret,
                },
        } = scrap_config.get()?;

        let algorithm = algorithm.unwrap_or_else(|| DEFAULT_ALGORITHM.to_string());
        let algorithm = Algorithm::from_str(&algorithm).map_err(|_| {
            Error::String(format!(
                "{algorithm}: cannot validate JWT with this algorithm"
            ))
        })?;
        let decoding_key = match (public_key_pem, secret) {
            (Some(pem), _) => DecodingKey::from_rsa_pem(pem.as_bytes())
                .map_err(|e| Error::String(format!("cannot parse public key: {e:?}")))?,
            (None, Some(secret)) => DecodingKey::from_secret(secret.as_bytes()),
            (None, None) => {
                return Err(Error::String(
                    "cannot validate JWT without a secret or public key".to_string(),
                ))
            }
        };
        Ok(Self {
            decoding_key,
            validation: Validation::new(algorithm),
        })
    }
}

impl SessionValidator for JwtValidator {
    fn validate(&self, token: &SessionToken) -> Result<(), Error> {
        decode::<Value>(token.as_str(), &self.decoding_key, &self.validation)
            .map(|_| ())
            .map_err(|e| Error::String(format!("cannot validate JWT token: {e:?}")))
    }
}
