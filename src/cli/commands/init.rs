//! Init command handler: writes the config file interactively.

use anyhow::{Result, bail};
use inquire::{Confirm, Password, PasswordDisplayMode, Select, Text};

use super::config::print_current_config;
use crate::config::{ConfigFile, ConfigManager, DEFAULT_PRIMARY_LANGUAGE, ProviderEntry};
use crate::i18n::Messages;
use crate::status;
use crate::translation::Provider;
use crate::ui::{Style, handle_prompt_cancellation};

const PRIMARY_LANGUAGE_CHOICES: [(&str, &str); 2] =
    [("zh-cn", "简体中文 (zh-cn)"), ("en", "English (en)")];

/// Runs the init command.
///
/// Cancelling any prompt leaves the existing config untouched.
pub fn run_init() -> Result<()> {
    handle_prompt_cancellation(run_init_inner).map(|_| ())
}

fn run_init_inner() -> Result<()> {
    let manager = ConfigManager::new()?;
    let mut config = manager.load_or_default();
    let existing = manager.exists();

    if existing {
        let messages = Messages::for_language(config.lu.primary_language());
        print_current_config(&config, messages);
        println!();
        println!("{}", Style::warning(messages.config_exists));
        println!("{}", Style::secondary(messages.config_will_overwrite));

        let proceed = Confirm::new(messages.continue_init)
            .with_default(false)
            .prompt()?;
        if !proceed {
            status!("{}", messages.init_cancelled);
            return Ok(());
        }
        println!();
    }

    let primary = select_primary_language(config.lu.primary_language())?;
    let messages = Messages::for_language(primary);

    let current_provider = config
        .lu
        .provider
        .as_deref()
        .and_then(|name| name.parse::<Provider>().ok());
    let provider = select_provider(messages, current_provider)?;

    let current = config
        .provider_entry(provider)
        .cloned()
        .unwrap_or_default();
    let entry = prompt_provider_entry(messages, provider, &current)?;

    config.lu.provider = Some(provider.as_str().to_string());
    config.lu.primary_language = Some(primary.to_string());
    config.models.insert(provider.as_str().to_string(), entry);

    manager.save(&config)?;
    print_summary(&manager, &config, messages);

    Ok(())
}

fn select_primary_language(current: &str) -> Result<&'static str> {
    let options: Vec<&str> = PRIMARY_LANGUAGE_CHOICES
        .iter()
        .map(|(_, label)| *label)
        .collect();
    let default_index = PRIMARY_LANGUAGE_CHOICES
        .iter()
        .position(|(code, _)| *code == current)
        .unwrap_or(0);

    let selection = Select::new("🌍 主语言 / Primary language:", options)
        .with_starting_cursor(default_index)
        .prompt()?;

    let code = PRIMARY_LANGUAGE_CHOICES
        .iter()
        .find(|(_, label)| *label == selection)
        .map_or(DEFAULT_PRIMARY_LANGUAGE, |(code, _)| *code);

    Ok(code)
}

fn select_provider(messages: &Messages, current: Option<Provider>) -> Result<Provider> {
    let options: Vec<&str> = Provider::ALL.iter().map(|p| p.label()).collect();
    let default_index = current
        .and_then(|c| Provider::ALL.iter().position(|p| *p == c))
        .unwrap_or(0);

    let selection = Select::new(messages.choose_provider, options)
        .with_starting_cursor(default_index)
        .prompt()?;

    Ok(Provider::ALL
        .into_iter()
        .find(|p| p.label() == selection)
        .unwrap_or(Provider::OpenAi))
}

fn prompt_provider_entry(
    messages: &Messages,
    provider: Provider,
    current: &ProviderEntry,
) -> Result<ProviderEntry> {
    let base_url = match provider {
        Provider::Custom => Some(prompt_required_url(messages.enter_api_url, current)?),
        Provider::OpenAi => {
            let has_custom = current.base_url.is_some();
            if Confirm::new(messages.custom_base_url)
                .with_default(has_custom)
                .prompt()?
            {
                Some(prompt_required_url(messages.enter_base_url, current)?)
            } else {
                None
            }
        }
        Provider::DashScope => None,
    };

    let api_key = prompt_api_key(messages, current)?;
    let model = select_model(messages, provider, current.model.as_deref())?;

    Ok(ProviderEntry {
        model: Some(model),
        api_key,
        api_key_env: current.api_key_env.clone(),
        base_url,
    })
}

fn prompt_required_url(message: &str, current: &ProviderEntry) -> Result<String> {
    let mut prompt = Text::new(message);
    if let Some(url) = current.base_url.as_deref() {
        prompt = prompt.with_default(url);
    }

    let url = prompt.prompt()?;
    if url.trim().is_empty() {
        bail!("Base URL cannot be empty");
    }

    Ok(url.trim().to_string())
}

/// An empty answer keeps the stored key.
fn prompt_api_key(messages: &Messages, current: &ProviderEntry) -> Result<Option<String>> {
    let key = Password::new(messages.api_key_prompt)
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;

    let key = key.trim();
    if key.is_empty() {
        return Ok(current.api_key.clone());
    }

    Ok(Some(key.to_string()))
}

fn select_model(messages: &Messages, provider: Provider, default: Option<&str>) -> Result<String> {
    let known = provider.known_models();

    if known.is_empty() {
        let model = Text::new(messages.enter_model_name)
            .with_default(default.unwrap_or(provider.default_model()))
            .prompt()?;

        if model.trim().is_empty() {
            bail!("Model name cannot be empty");
        }

        return Ok(model.trim().to_string());
    }

    let default_index = default
        .and_then(|d| known.iter().position(|m| *m == d))
        .unwrap_or(0);

    let selection = Select::new(messages.select_model, known.to_vec())
        .with_starting_cursor(default_index)
        .prompt()?;

    Ok(selection.to_string())
}

fn print_summary(manager: &ConfigManager, config: &ConfigFile, messages: &Messages) {
    println!();
    println!("{}", Style::success(messages.config_saved));
    println!(
        "{} {}",
        messages.config_file,
        Style::secondary(manager.config_path().display().to_string())
    );
    println!();
    print_current_config(config, messages);
    println!();
    println!("{}", messages.default_behavior);
    println!();
    println!("{}", messages.try_it);
    println!("  {}", Style::command("lu hello"));
    println!("  {}", Style::command("lu -t ja 你好世界"));
    println!("  {}", Style::command("lu trans Hello world"));
}
