//! Configuration file management and provider settings.

mod manager;

pub use manager::{
    ConfigFile, ConfigManager, DEFAULT_PRIMARY_LANGUAGE, LuConfig, ProviderEntry, ResolveOptions,
    ResolvedConfig, resolve_config,
};
