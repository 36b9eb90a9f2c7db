//! The narrow interface between Snap-It and the `snapper` command line tool.

pub mod command;
pub mod config;
pub mod error;
pub mod parse;
pub mod snapper;

pub use command::{CommandOutput, CommandRunner, Invocation, SystemRunner};
pub use config::{Escalation, Settings};
pub use error::{Error, Result};
pub use snapper::{Description, Snapper, SnapshotReport, Step};
