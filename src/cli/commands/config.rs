//! Config command handler: prints the active configuration.

use anyhow::Result;

use crate::config::{ConfigFile, ConfigManager, DEFAULT_PRIMARY_LANGUAGE};
use crate::i18n::Messages;
use crate::translation::{ConfigError, Provider, display_name};
use crate::ui::Style;
use crate::warn;

pub fn run_show_config() -> Result<()> {
    let manager = ConfigManager::new()?;
    if !manager.exists() {
        let messages = Messages::for_language(DEFAULT_PRIMARY_LANGUAGE);
        warn!("{}", Style::warning(messages.config_not_found));
        return Err(ConfigError::NotFound(manager.config_path().display().to_string()).into());
    }

    let config = manager.load()?;
    let messages = Messages::for_language(config.lu.primary_language());
    print_current_config(&config, messages);
    println!(
        "  {} {}",
        Style::label(messages.config_file),
        Style::secondary(manager.config_path().display().to_string())
    );

    Ok(())
}

/// Prints provider, model, primary language and key status. Never prints the key.
pub fn print_current_config(config: &ConfigFile, messages: &Messages) {
    let provider_name = config
        .lu
        .provider
        .as_deref()
        .unwrap_or(Provider::OpenAi.as_str());
    let provider = provider_name.parse::<Provider>().ok();
    let entry = config.models.get(provider_name).cloned().unwrap_or_default();

    println!("{}", Style::header(messages.current_config));
    println!("  {} {}", Style::label(messages.provider), Style::value(provider_name));

    let model = entry
        .model
        .clone()
        .or_else(|| provider.map(|p| p.default_model().to_string()))
        .unwrap_or_default();
    println!("  {} {}", Style::label(messages.model), Style::value(model));

    let primary = config.lu.primary_language();
    println!(
        "  {} {} ({})",
        Style::label(messages.primary_language),
        Style::value(display_name(primary)),
        Style::code(primary)
    );

    if let Some(base_url) = entry.base_url.as_deref() {
        println!("  {} {}", Style::label(messages.base_url), Style::value(base_url));
    }

    if entry.get_api_key().is_some() {
        println!("  {}", Style::success(messages.api_key_configured));
    } else {
        println!("  {}", Style::warning(messages.api_key_not_set));
    }
}
