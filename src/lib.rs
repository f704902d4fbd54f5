#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for fitbit-sync
//!
//! This library implements a scheduled collection job that rotates a Fitbit OAuth2
//! token pair, fetches a handful of daily health metrics, normalizes them into flat
//! records, and stores those records in a key-value table.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface and wiring of concrete adapters
//! - [`config`]: Configuration file loading and validation
//! - [`credentials`]: Named secret storage (client credentials and tokens)
//! - [`oauth`]: Refresh-token exchange against the Fitbit token endpoint
//! - [`metrics`]: Fetching raw metric payloads and normalizing them into records
//! - [`sink`]: Rounding and persisting records into a table
//! - [`pipeline`]: The per-invocation orchestration of all of the above
//! - [`subscription`]: Webhook verification and push-subscription registration

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod commands;
pub mod config;
pub mod credentials;
mod file_doc;
mod file_lock;
mod http;
pub mod metrics;
pub mod oauth;
pub mod pipeline;
pub mod sink;
pub mod subscription;

pub use crate::commands::{Host, run};
