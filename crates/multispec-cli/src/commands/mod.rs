//! CLI command implementations.

pub mod analyze;
pub mod common;
pub mod init_config;
pub mod plan;
