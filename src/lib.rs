//! # lu - Streaming Translation Assistant
//!
//! `lu` translates text from the command line with an LLM backend and
//! streams the answer as it arrives. Single words get a dictionary-style
//! entry, phrases a usage note, and sentences a translation with a short
//! explanation.
//!
//! ## Features
//!
//! - **Streaming output**: Fragments are printed as soon as they arrive
//! - **Smart targets**: Foreign text goes to your primary language; text in
//!   your primary language asks where it should go
//! - **Three backends**: OpenAI, DashScope (Qwen) and any OpenAI-compatible API
//!
//! ## Quick Start
//!
//! ```bash
//! # Set up provider, key and primary language
//! lu init
//!
//! # Translate to your primary language
//! lu serendipity
//!
//! # Explicit target
//! lu -t ja 你好世界
//!
//! # From stdin
//! echo "Hello world" | lu
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/lu/config.toml`:
//!
//! ```toml
//! [lu]
//! provider = "dashscope"
//! primary_language = "zh-cn"
//!
//! [models.dashscope]
//! model = "qwen-turbo"
//! api_key_env = "DASHSCOPE_API_KEY"
//! ```

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management and provider settings.
pub mod config;

/// File system utilities.
pub mod fs;

/// Localized interface strings.
pub mod i18n;

/// Input reading from arguments and stdin.
pub mod input;

/// Diagnostic logging setup.
pub mod logging;

/// Global output configuration (quiet mode, colors, stderr/stdout routing).
pub mod output;

/// XDG-style path utilities for configuration.
pub mod paths;

/// Classification, prompts and provider streaming.
pub mod translation;

/// Terminal UI components (spinner, colors, prompts).
pub mod ui;
