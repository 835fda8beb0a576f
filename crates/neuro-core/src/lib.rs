//! NeuroCleanse Core - Shared functionality for the NeuroCleanse tools
//!
//! Quiet the noise, keep the one thing you are working on.

pub mod config;
pub mod format;
pub mod paths;

pub use config::Config;
pub use paths::Paths;
