//! CLI command implementations.
//!
//! Each submodule implements a specific CLI command:
//! - [`alerts`] - Alert listing and filtering
//! - [`silences`] - Silence listing, creation and deletion

pub mod alerts;
pub mod silences;

pub use alerts::AlertsCommand;
pub use silences::SilencesCommand;
