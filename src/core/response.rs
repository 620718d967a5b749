//! Response-shape normalization for the store's two KV read formats.
//!
//! A v1 engine returns the secret payload directly under `data`; a v2
//! engine wraps it one level deeper under `data.data` to carry version
//! and lease metadata alongside it. Both normalize to the same flat map.

use serde::Deserialize;

use crate::error::{ConfigError, ParseError};

/// Flat key/value payload extracted from a read response.
pub type SecretPayload = serde_json::Map<String, serde_json::Value>;

/// KV storage engine schema version, which determines both the request
/// path shape and the response envelope shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KvVersion {
    V1,
    V2,
}

impl KvVersion {
    /// Parse the `kv-version` input value.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnsupportedKvVersion` for anything but
    /// `"1"` or `"2"`.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.trim() {
            "1" => Ok(Self::V1),
            "2" => Ok(Self::V2),
            other => Err(ConfigError::UnsupportedKvVersion(other.to_string())),
        }
    }

    /// Path prefix the engine expects between `/v1/` and the secret path.
    pub fn mount_prefix(self) -> &'static str {
        match self {
            Self::V1 => "",
            Self::V2 => "data/",
        }
    }
}

/// KV v1 read envelope.
#[derive(Deserialize)]
struct V1Envelope {
    data: SecretPayload,
}

/// KV v2 read envelope: payload nested under `data.data`.
#[derive(Deserialize)]
struct V2Envelope {
    data: V2Data,
}

#[derive(Deserialize)]
struct V2Data {
    data: SecretPayload,
}

/// Extract the flat secret payload from a raw read response body.
///
/// # Errors
///
/// Returns `ParseError::Response` if the body is not valid JSON or does
/// not carry the envelope shape declared by `version`. The message
/// includes a bounded excerpt of the body.
pub fn parse_response(body: &str, version: KvVersion) -> Result<SecretPayload, ParseError> {
    let payload = match version {
        KvVersion::V1 => serde_json::from_str::<V1Envelope>(body).map(|e| e.data),
        KvVersion::V2 => serde_json::from_str::<V2Envelope>(body).map(|e| e.data.data),
    };

    payload.map_err(|source| ParseError::Response {
        snippet: snippet(body),
        source,
    })
}

/// Bounded excerpt of a response body for error messages.
fn snippet(body: &str) -> String {
    const MAX: usize = 120;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &body[..end])
}
