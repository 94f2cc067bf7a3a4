//! Outbound form relay (web3forms).
//!
//! The relay receives the form fields as a JSON object with the site's
//! access key appended and answers with `{"success": bool, "message": str}`.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "https://api.web3forms.com/submit";

/// Message used when the relay answers with something other than the
/// expected JSON object.
pub const UNEXPECTED_REPLY: &str = "Unexpected response from the form relay.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no form relay access key configured (set FOLIO_WEB3FORMS_KEY or pass --access-key)")]
    MissingAccessKey,
    #[error("relay endpoint must be an http(s) URL, got '{0}'")]
    BadEndpoint(String),
}

#[derive(Debug, Error)]
pub enum RelayError {
    /// The request never produced a response.
    #[error("{0}")]
    Transport(String),
    #[error("could not build HTTP client: {0}")]
    Client(String),
}

/// Access credential for the relay.  Never empty.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessKey(String);

impl AccessKey {
    pub fn new(raw: Option<&str>) -> Result<Self, ConfigError> {
        match raw.map(str::trim) {
            Some(k) if !k.is_empty() => Ok(Self(k.to_string())),
            _ => Err(ConfigError::MissingAccessKey),
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessKey(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub endpoint: String,
    pub access_key: AccessKey,
}

impl RelayConfig {
    pub fn new(endpoint: &str, access_key: Option<&str>) -> Result<Self, ConfigError> {
        if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
            return Err(ConfigError::BadEndpoint(endpoint.to_string()));
        }
        Ok(Self {
            endpoint: endpoint.to_string(),
            access_key: AccessKey::new(access_key)?,
        })
    }
}

/// Field set handed to the relay, in form order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPayload {
    pub subject: String,
    pub fields: Vec<(String, String)>,
}

impl FormPayload {
    /// JSON body with `access_key` appended after the fields.
    pub fn to_json(&self, access_key: &AccessKey) -> Value {
        let mut body = Map::new();
        for (name, value) in &self.fields {
            body.insert(name.clone(), Value::String(value.clone()));
        }
        body.insert("subject".into(), Value::String(self.subject.clone()));
        body.insert("access_key".into(), Value::String(access_key.expose().to_string()));
        Value::Object(body)
    }
}

/// What the relay said.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RelayReply {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

impl RelayReply {
    /// Parse a response body.  Anything but a JSON object with a boolean
    /// `success` is reported as a failed reply.
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<RelayReply>(body) {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!("unparseable relay reply: {e}");
                RelayReply {
                    success: false,
                    message: UNEXPECTED_REPLY.to_string(),
                }
            }
        }
    }
}

#[async_trait]
pub trait FormRelay: Send + Sync {
    async fn send(&self, payload: &FormPayload) -> Result<RelayReply, RelayError>;
}

// ───────────────────────────────────────── web3forms ─────────

pub struct Web3FormsRelay {
    client: reqwest::Client,
    config: RelayConfig,
}

impl Web3FormsRelay {
    pub fn new(config: RelayConfig) -> Result<Self, RelayError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RelayError::Client(e.to_string()))?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl FormRelay for Web3FormsRelay {
    async fn send(&self, payload: &FormPayload) -> Result<RelayReply, RelayError> {
        tracing::info!(endpoint = %self.config.endpoint, subject = %payload.subject, "submitting form");
        let response = self
            .client
            .post(&self.config.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&payload.to_json(&self.config.access_key))
            .send()
            .await
            .map_err(|e| RelayError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RelayError::Transport(e.to_string()))?;
        let reply = RelayReply::from_body(&body);
        tracing::info!(%status, success = reply.success, "relay replied");
        Ok(reply)
    }
}
