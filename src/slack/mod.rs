//! Slack Web API client for workspace member lookups.

use std::time::Duration;

use serde::Deserialize;

use crate::errors::AppError;

/// HTTP client for the Slack Web API.
#[derive(Clone)]
pub struct SlackClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

/// A workspace member as returned by `users.lookupByEmail`.
#[derive(Debug, Clone, Deserialize)]
pub struct SlackUser {
    pub id: String,
    #[serde(default)]
    pub real_name: String,
}

/// Response envelope of `users.lookupByEmail`.
///
/// `ok: true` comes with `user` set; `ok: false` comes with an `error`
/// slug such as `users_not_found`. Anything else is a malformed envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SlackLookupEnvelope {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub user: Option<SlackUser>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A lookup that reached the API and produced a body.
#[derive(Debug, Clone)]
pub struct SlackLookup {
    pub envelope: SlackLookupEnvelope,
    /// Raw response body, kept for diagnostics on malformed envelopes.
    pub raw: String,
}

impl SlackClient {
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Look up a workspace member by email.
    ///
    /// Returns `Err` only for transport-level failures (unreachable host,
    /// timeout, non-2xx status); an unparseable body is folded into a
    /// default envelope so the caller can report it with the raw payload.
    pub async fn lookup_by_email(&self, email: &str) -> Result<SlackLookup, AppError> {
        let Some(token) = &self.token else {
            return Err(AppError::ExternalService(
                "No Slack token configured.".to_string(),
            ));
        };

        let url = format!("{}/users.lookupByEmail", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("email", email)])
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await
            .map_err(|err| {
                tracing::warn!("Slack lookup failed: {}", err);
                AppError::ExternalService(format!("Slack API unreachable: {}", err))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::ExternalService(format!(
                "Slack API returned status {}",
                status
            )));
        }

        let raw = response.text().await.map_err(|err| {
            AppError::ExternalService(format!("Failed to read Slack response: {}", err))
        })?;

        let envelope = serde_json::from_str(&raw).unwrap_or_default();

        Ok(SlackLookup { envelope, raw })
    }
}
