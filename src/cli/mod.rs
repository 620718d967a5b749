//! Command-line interface.

pub mod output;

use std::path::PathBuf;

use clap::Parser;

use crate::core::config::Config;
use crate::core::export;
use crate::core::publish::PipelineFiles;
use crate::error::Result;

/// Ferret - pull secrets from a Vault-compatible KV store into your pipeline.
///
/// Every argument can also be supplied through the pipeline input
/// convention (`INPUT_URL`, `INPUT_TOKEN`, ...), so a workflow step can
/// drive ferret without building a command line.
#[derive(Parser, Debug)]
#[command(
    name = "ferret",
    about = "Pull secrets from a Vault-compatible KV store into pipeline env vars and outputs",
    version
)]
pub struct Cli {
    /// Base address of the secret store (e.g. https://vault.example.com:8200)
    #[arg(long, env = "INPUT_URL")]
    pub url: String,

    /// Token used to authenticate against the store
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Secrets to fetch, e.g. "ci/npm token; ci/deploy key | DEPLOY_KEY"
    #[arg(long, env = "INPUT_SECRETS")]
    pub secrets: String,

    /// KV engine version of the store ("1" or "2")
    #[arg(long, env = "INPUT_KV_VERSION", default_value = "2")]
    pub kv_version: String,

    /// Extra request headers, one "Name: value" per line
    #[arg(long, env = "INPUT_EXTRAHEADERS")]
    pub extra_headers: Option<String>,

    /// Store namespace (sent as X-Vault-Namespace)
    #[arg(long, env = "INPUT_NAMESPACE")]
    pub namespace: Option<String>,

    /// Skip TLS certificate verification (self-signed dev stores)
    #[arg(long, env = "INPUT_TLS_SKIP_VERIFY")]
    pub tls_skip_verify: bool,

    /// Additional PEM root certificate to trust
    #[arg(long, env = "INPUT_CA_CERT")]
    pub ca_cert: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Convert parsed arguments into the orchestrator configuration.
    pub fn into_config(self) -> Config {
        Config {
            url: self.url,
            token: self.token,
            secrets: self.secrets,
            kv_version: self.kv_version,
            extra_headers: self.extra_headers,
            namespace: self.namespace,
            tls_skip_verify: self.tls_skip_verify,
            ca_cert: self.ca_cert,
        }
    }
}

/// Run a full fetch-and-publish cycle.
///
/// # Errors
///
/// Returns the first error raised by publisher setup or the run itself.
pub async fn run(cli: Cli) -> Result<()> {
    let config = cli.into_config();
    let mut publisher = PipelineFiles::from_env()?;
    let summary = export::export_secrets(&config, &mut publisher).await?;

    if summary.published.is_empty() {
        output::dimmed("nothing to publish");
    } else {
        output::success(&format!("{} secrets published", summary.published.len()));
        for name in &summary.published {
            output::list_item(name);
        }
    }

    Ok(())
}
