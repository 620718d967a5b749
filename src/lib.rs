//! Ferret - pull secrets from a Vault-compatible KV store into your pipeline.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── mod           # Argument surface (single command, INPUT_* fallbacks)
//! │   └── output        # Terminal output helpers
//! └── core/             # Core library components
//!     ├── selectors     # `secrets` selector mini-language parser
//!     ├── headers       # Extra-header input parser
//!     ├── response      # KV v1/v2 response-shape normalizer
//!     ├── fieldpath     # Dot/bracket path evaluation over JSON values
//!     ├── config        # Run configuration
//!     ├── client        # HTTP read client for the secret store
//!     ├── publish       # Env-var / output-value publishing
//!     └── export        # Orchestration of a full run
//! ```
//!
//! # Features
//!
//! - Compact selector language: `ci/npm token; ci/deploy key | DEPLOY_KEY`
//! - KV v1 and v2 response envelopes behind one flat payload view
//! - Dot/bracket selectors into nested secret payloads
//! - Publishes each value to the step environment and the output file

pub mod cli;
pub mod core;
pub mod error;
