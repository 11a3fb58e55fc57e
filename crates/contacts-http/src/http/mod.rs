//! HTTP surface of the contacts service
//!
//! - `api`: axum router and handlers behind the `serve` command
//! - `client`: reqwest client used by http mode
//! - `cli`: clap definitions and the command dispatcher

pub mod api;
pub mod cli;
pub mod client;
pub mod common;
pub mod error;

pub use common::*;
pub use error::{CliError, ClientError};
