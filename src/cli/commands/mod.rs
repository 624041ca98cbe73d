//! Subcommand implementations.

/// Configuration display command handler.
pub mod config;

/// Interactive setup command handler.
pub mod init;

/// Translation command handler.
pub mod translate;
