//! # `deskmate`
//!
//! Local-first personal productivity suite: a task list, categorised notes,
//! projects with deadlines, a script library with a toy runner, UI settings
//! and a personal profile, all persisted through one key-value gateway.

pub mod app;
#[cfg(feature = "cli")]
pub mod cli;
pub mod collection;
pub mod config;
pub mod error;
pub mod id;
pub mod logging;
pub mod models;
pub mod paths;
pub mod present;
pub mod query;
pub mod script_runner;
pub mod storage;
pub mod templates;
pub mod testing;
pub mod traits;
pub mod transfer;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
