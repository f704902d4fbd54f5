//! Command-line interface for fitbit-sync
//!
//! Each subcommand wires the concrete adapters (the file-backed credential store and
//! table, the HTTP client) into the library and reports the outcome through a
//! [`Host`].
//!
//! ## Commands
//!
//! - **collect**: Rotate the token pair, fetch every metric, and persist the normalized records
//! - **subscribe**: Register a push subscription, after rotating the token pair
//! - **verify**: Answer a subscriber verification probe with 204 or 404
//! - **init**: Generate a default configuration file and seed the credential store

mod collect;
mod common;
mod host;
mod init;
mod run;
mod subscribe;
mod verify;

pub use collect::{CollectArgs, process_collect};
pub use common::{CommonArgs, LogLevel};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use run::run;
pub use subscribe::{SubscribeArgs, process_subscribe};
pub use verify::{VerifyArgs, verify_code};
