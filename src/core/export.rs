//! Orchestration of a full fetch-and-publish run.

use tracing::{debug, info};

use crate::core::client::VaultClient;
use crate::core::config::Config;
use crate::core::fieldpath;
use crate::core::headers::parse_headers_input;
use crate::core::publish::Publish;
use crate::core::response::{parse_response, KvVersion};
use crate::core::selectors::{parse_secrets_input, SecretRequest};
use crate::error::{LookupError, Result};

/// Outcome of a successful run.
#[derive(Debug, Default)]
pub struct ExportSummary {
    /// Output names published, in input order.
    pub published: Vec<String>,
}

/// Fetch every secret named by the configuration and publish each value
/// as an environment variable and an output value.
///
/// Requests sharing a secret path are served by a single read, issued
/// one at a time in first-appearance order. The first failure of any
/// kind aborts the run; values already published stay published, but no
/// further work is attempted.
///
/// # Errors
///
/// `ConfigError` for an unsupported kv-version, `ParseError` for
/// malformed inputs or response bodies, `FetchError` for HTTP failures,
/// `LookupError` when a requested key is absent from a payload.
pub async fn export_secrets(config: &Config, publisher: &mut dyn Publish) -> Result<ExportSummary> {
    let version = KvVersion::parse(&config.kv_version)?;
    let requests = parse_secrets_input(&config.secrets)?;
    let headers = parse_headers_input(config.extra_headers.as_deref())?;
    let client = VaultClient::new(config, headers)?;

    let mut summary = ExportSummary::default();
    for (path, group) in group_by_path(&requests) {
        debug!(path, requests = group.len(), "fetching secret path");
        let body = client.read_raw(path, version).await?;
        let payload = serde_json::Value::Object(parse_response(&body, version)?);

        for request in group {
            let value = select_value(&payload, request)?;
            publisher.export_variable(&request.env_var_name, &value)?;
            publisher.set_output(&request.output_var_name, &value)?;
            info!(
                path,
                selector = request.secret_selector.as_str(),
                env = request.env_var_name.as_str(),
                "published secret"
            );
            summary.published.push(request.output_var_name.clone());
        }
    }

    Ok(summary)
}

/// Group requests by secret path, preserving first-appearance order.
fn group_by_path(requests: &[SecretRequest]) -> Vec<(&str, Vec<&SecretRequest>)> {
    let mut groups: Vec<(&str, Vec<&SecretRequest>)> = Vec::new();
    for request in requests {
        match groups
            .iter_mut()
            .find(|(path, _)| *path == request.secret_path)
        {
            Some((_, group)) => group.push(request),
            None => groups.push((request.secret_path.as_str(), vec![request])),
        }
    }
    groups
}

/// Pull the field named by a request out of a normalized payload.
fn select_value(payload: &serde_json::Value, request: &SecretRequest) -> Result<String> {
    let found = if request.is_json_path {
        fieldpath::evaluate(payload, &request.secret_selector)?
    } else {
        payload.get(&request.secret_selector)
    };

    match found {
        Some(value) => Ok(render_value(value)),
        None => Err(LookupError::KeyMissing {
            selector: request.secret_selector.clone(),
            path: request.secret_path.clone(),
        }
        .into()),
    }
}

/// String form of a payload value as published to the pipeline.
///
/// Strings are published verbatim; everything else renders as compact
/// JSON (numbers and booleans in their plain form, `null` as `null`).
fn render_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
