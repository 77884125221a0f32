//! CLI command implementations

pub mod init;
pub mod prompt;
pub mod session;
