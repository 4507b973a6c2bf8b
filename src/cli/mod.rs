//! CLI module for streamchat.
//!
//! ```ignore
//! use streamchat::cli::{parse_args, CliCommand};
//!
//! match parse_args(std::env::args()) {
//!     CliCommand::Chat(args) => { /* stream */ }
//!     CliCommand::Version | CliCommand::Help => { /* print and exit */ }
//! }
//! ```

pub mod args;

pub use args::{parse_args, ChatArgs, CliCommand, USAGE};

use crate::config::ClientConfig;

/// Package version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Apply command-line overrides on top of `config`.
pub fn apply_overrides(config: ClientConfig, args: &ChatArgs) -> ClientConfig {
    let mut config = config;
    if let Some(url) = &args.url {
        config = config.with_base_url(url.clone());
    }
    if let Some(path) = &args.workspace_path {
        config = config.with_workspace_path(path.clone());
    }
    config
}
