//! Ferret - pull secrets from a Vault-compatible KV store into your pipeline.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ferret::cli::output;
use ferret::cli::{run, Cli};
use ferret::error::{ConfigError, Error};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("FERRET_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("ferret=debug")
        } else {
            EnvFilter::new("ferret=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).without_time())
        .init();

    if let Err(e) = run(cli).await {
        let suggestion = match &e {
            Error::Config(ConfigError::MissingPipelineFile(_)) => {
                Some("point GITHUB_ENV and GITHUB_OUTPUT at writable files")
            }
            Error::Config(ConfigError::UnsupportedKvVersion(_)) => {
                Some("pass --kv-version 1 for a legacy KV engine")
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
