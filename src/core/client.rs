//! HTTP read client for the Vault-compatible secret store.

use std::collections::BTreeMap;
use std::time::Duration;

use tracing::debug;

use crate::core::config::Config;
use crate::core::response::KvVersion;
use crate::error::{FetchError, Result};

/// Read-only client for the store's KV HTTP API.
#[derive(Debug, Clone)]
pub struct VaultClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    namespace: Option<String>,
    extra_headers: BTreeMap<String, String>,
}

impl VaultClient {
    /// Build a client from run configuration and parsed extra headers.
    ///
    /// # Errors
    ///
    /// Fails if the CA certificate cannot be read or the HTTP client
    /// cannot be constructed.
    pub fn new(config: &Config, extra_headers: BTreeMap<String, String>) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("ferret/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30));

        if config.tls_skip_verify {
            builder = builder.danger_accept_invalid_certs(true);
        }
        if let Some(path) = &config.ca_cert {
            let pem = std::fs::read(path)?;
            let cert = reqwest::Certificate::from_pem(&pem).map_err(FetchError::Client)?;
            builder = builder.add_root_certificate(cert);
        }

        let http = builder.build().map_err(FetchError::Client)?;

        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            namespace: config.namespace.clone(),
            extra_headers,
        })
    }

    /// URL for one secret path read.
    ///
    /// KV v2 engines expect a `data/` prefix between the API version and
    /// the secret path; v1 engines take the path as-is.
    fn request_url(&self, path: &str, version: KvVersion) -> String {
        format!(
            "{}/v1/{}{}",
            self.base_url,
            version.mount_prefix(),
            path.trim_matches('/')
        )
    }

    /// Fetch the raw response body for one secret path.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` on transport failure or a non-2xx status.
    pub async fn read_raw(&self, path: &str, version: KvVersion) -> Result<String> {
        let url = self.request_url(path, version);
        debug!(%url, "reading secret path");

        let mut request = self
            .http
            .get(&url)
            .header("X-Vault-Token", &self.token)
            .header("Accept", "application/json");
        if let Some(namespace) = &self.namespace {
            request = request.header("X-Vault-Namespace", namespace);
        }
        for (name, value) in &self.extra_headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            }
            .into());
        }

        let body = response
            .text()
            .await
            .map_err(|source| FetchError::Transport { url, source })?;
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(url: &str) -> VaultClient {
        let config = Config {
            url: url.to_string(),
            token: "t".to_string(),
            secrets: String::new(),
            kv_version: "2".to_string(),
            extra_headers: None,
            namespace: None,
            tls_skip_verify: false,
            ca_cert: None,
        };
        VaultClient::new(&config, BTreeMap::new()).unwrap()
    }

    #[test]
    fn v1_url_takes_path_as_is() {
        let client = client("http://vault:8200");
        assert_eq!(
            client.request_url("ci/npm", KvVersion::V1),
            "http://vault:8200/v1/ci/npm"
        );
    }

    #[test]
    fn v2_url_prefixes_data() {
        let client = client("http://vault:8200");
        assert_eq!(
            client.request_url("ci/npm", KvVersion::V2),
            "http://vault:8200/v1/data/ci/npm"
        );
    }

    #[test]
    fn trailing_slashes_are_normalized() {
        let client = client("http://vault:8200/");
        assert_eq!(
            client.request_url("/ci/npm/", KvVersion::V1),
            "http://vault:8200/v1/ci/npm"
        );
    }
}
