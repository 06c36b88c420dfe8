//! # alertctl
//!
//! Command-line client for the Alertmanager HTTP API.
//!
//! Provides commands for:
//! - Listing alerts filtered by state, severity and instance
//! - Listing silences
//! - Creating and deleting silences
//!
//! # Architecture
//!
//! Both the v1 and v2 APIs are supported. Responses from either version are
//! normalized into one model ([`types::Alert`], [`types::Silence`]) so the
//! filter and the renderers never care which version answered.
//!
//! ```text
//! ┌──────────┐   GET/POST/DELETE   ┌──────────────┐
//! │ alertctl │◄───────────────────►│ Alertmanager │
//! └──────────┘   /api/{v1,v2}/...  └──────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod filter;
pub mod matcher;
pub mod output;
pub mod types;

pub use cli::{Cli, Commands, Format};
pub use client::AlertmanagerClient;
pub use config::{ApiVersion, ClientConfig};
pub use error::CliError;
pub use filter::AlertFilter;
pub use output::OutputFormat;
pub use types::{Alert, AlertState, Matcher, Silence};
