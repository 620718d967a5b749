//! Core library components.

pub mod client;
pub mod config;
pub mod export;
pub mod fieldpath;
pub mod headers;
pub mod publish;
pub mod response;
pub mod selectors;
