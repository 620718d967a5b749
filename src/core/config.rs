//! Run configuration.
//!
//! The CLI layer assembles one `Config` per run and hands it to the
//! orchestrator, keeping the parsers and the normalizer free of ambient
//! process state.

use std::path::PathBuf;

/// Configuration for one fetch-and-publish run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base address of the secret store, e.g. `https://vault.example.com:8200`.
    pub url: String,
    /// Static bearer token sent as `X-Vault-Token`.
    pub token: String,
    /// Raw selector mini-language string.
    pub secrets: String,
    /// Declared KV engine version, `"1"` or `"2"`.
    pub kv_version: String,
    /// Raw newline-delimited `Name: value` extra headers, if any.
    pub extra_headers: Option<String>,
    /// Optional store namespace, sent as `X-Vault-Namespace`.
    pub namespace: Option<String>,
    /// Skip TLS certificate verification (self-signed dev stores).
    pub tls_skip_verify: bool,
    /// Additional PEM root certificate to trust.
    pub ca_cert: Option<PathBuf>,
}
