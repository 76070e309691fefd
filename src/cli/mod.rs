//! CLI command handlers
//!
//! Each subcommand of the `feedback` binary is implemented in its own module.

pub mod delete;
pub mod export;
pub mod helpers;
pub mod init;
pub mod list;
pub mod serve;
pub mod stats;
pub mod submit;
