//! Publishing fetched values to the automation pipeline.
//!
//! A pipeline step communicates through two append-only files named by
//! `GITHUB_ENV` and `GITHUB_OUTPUT`: one `name=value` line (or heredoc
//! block, for multiline values) per published entry.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ConfigError, Result};

/// Sink for the two kinds of published values.
///
/// The orchestrator only talks to this trait, so tests can capture
/// published values without touching the filesystem or the process
/// environment.
pub trait Publish {
    /// Export `name=value` into the step's environment.
    fn export_variable(&mut self, name: &str, value: &str) -> Result<()>;

    /// Publish `name=value` as a named output for later steps.
    fn set_output(&mut self, name: &str, value: &str) -> Result<()>;
}

/// Heredoc delimiter for multiline entries.
const EOF_MARKER: &str = "__FERRET_EOF__";

/// Publisher appending to the pipeline's env and output files.
#[derive(Debug)]
pub struct PipelineFiles {
    env_path: PathBuf,
    output_path: PathBuf,
}

impl PipelineFiles {
    /// Locate the pipeline files from `GITHUB_ENV` and `GITHUB_OUTPUT`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingPipelineFile` if either variable is
    /// unset: outside a pipeline step there is nowhere to publish to.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            env_path: pipeline_file("GITHUB_ENV")?,
            output_path: pipeline_file("GITHUB_OUTPUT")?,
        })
    }

    /// Build a publisher over explicit file paths.
    pub fn new(env_path: PathBuf, output_path: PathBuf) -> Self {
        Self {
            env_path,
            output_path,
        }
    }
}

impl Publish for PipelineFiles {
    fn export_variable(&mut self, name: &str, value: &str) -> Result<()> {
        append_entry(&self.env_path, name, value)?;
        // Also visible to anything else this process spawns.
        std::env::set_var(name, value);
        debug!(name, "exported environment variable");
        Ok(())
    }

    fn set_output(&mut self, name: &str, value: &str) -> Result<()> {
        append_entry(&self.output_path, name, value)?;
        debug!(name, "set output value");
        Ok(())
    }
}

fn pipeline_file(var: &'static str) -> Result<PathBuf> {
    match std::env::var_os(var) {
        Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
        _ => Err(ConfigError::MissingPipelineFile(var).into()),
    }
}

/// Append one entry, using the heredoc form when the value spans lines.
fn append_entry(path: &Path, name: &str, value: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    if value.contains('\n') {
        if value.contains(EOF_MARKER) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("value of {name} contains the heredoc delimiter"),
            ));
        }
        writeln!(file, "{name}<<{EOF_MARKER}")?;
        writeln!(file, "{value}")?;
        writeln!(file, "{EOF_MARKER}")?;
    } else {
        writeln!(file, "{name}={value}")?;
    }
    Ok(())
}
