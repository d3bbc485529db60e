//! Foundation types for webterm.
//!
//! This crate holds what every other webterm crate shares: the error
//! taxonomy used to classify command and transport failures, and the
//! session configuration loaded from TOML.

pub mod config;
pub mod error;

pub use config::{HistoryLimits, SessionConfig};
pub use error::{Result, ShellError, TransportError};
