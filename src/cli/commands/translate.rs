use anyhow::{Result, bail};
use futures_util::StreamExt;
use inquire::Select;
use std::io::{self, Write};

use crate::cli::help_command;
use crate::config::{ConfigManager, DEFAULT_PRIMARY_LANGUAGE, ResolveOptions, resolve_config};
use crate::i18n::Messages;
use crate::input::InputReader;
use crate::translation::{
    AUTO_LANGUAGE, ConfigError, LanguageDetector, TargetResolution, TranslationRequest,
    Translator, build_http_client, native_name, resolve_target,
};
use crate::ui::{Spinner, Style, handle_prompt_cancellation};
use crate::{status, warn};

pub struct TranslateOptions {
    pub words: Vec<String>,
    pub target: Option<String>,
    pub resolve: ResolveOptions,
    /// Subcommand whose help is printed when there is no input.
    pub subcommand: Option<&'static str>,
}

pub async fn run_translate(options: TranslateOptions) -> Result<()> {
    let manager = ConfigManager::new()?;
    if !manager.exists() {
        let messages = Messages::for_language(DEFAULT_PRIMARY_LANGUAGE);
        warn!("{}", Style::warning(messages.config_not_found));
        return Err(ConfigError::NotFound(manager.config_path().display().to_string()).into());
    }

    let config_file = manager.load()?;
    let messages = Messages::for_language(config_file.lu.primary_language());

    let resolved = match resolve_config(&options.resolve, &config_file) {
        Ok(resolved) => resolved,
        Err(err) => {
            if matches!(
                err.downcast_ref::<ConfigError>(),
                Some(ConfigError::MissingApiKey(_))
            ) {
                warn!("{}", Style::warning(messages.api_key_not_configured));
            }
            return Err(err);
        }
    };

    let Some(text) = InputReader::read(&options.words)? else {
        help_command(options.subcommand).print_help()?;
        return Ok(());
    };
    let text = text.trim().to_string();
    if text.is_empty() {
        bail!("Input is empty");
    }

    let primary_lang = resolved.primary_language.as_str();
    let detected = LanguageDetector::new().detect(&text);

    let target = match options.target {
        Some(target) => target,
        None => match resolve_target(detected.as_deref().map_err(|&err| err), primary_lang) {
            TargetResolution::Target(target) => target,
            TargetResolution::AskUser { candidates } => {
                let selection = handle_prompt_cancellation(|| {
                    select_target_language(messages.select_target_language, &candidates)
                })?;
                let Some(target) = selection else {
                    return Ok(());
                };
                target
            }
        },
    };

    let request = TranslationRequest::new(text.as_str(), primary_lang)
        .with_source(detected.unwrap_or_else(|_| AUTO_LANGUAGE.to_string()))
        .with_target(target.as_str());

    status!("\n{} {}", Style::header(messages.translating), text);
    status!("{} {}\n", Style::header(messages.target), Style::code(&target));

    let client = build_http_client(resolved.timeout)?;
    let translator = Translator::new(client, &resolved.model_config);

    stream_to_stdout(&translator, &request, messages).await
}

async fn stream_to_stdout(
    translator: &Translator,
    request: &TranslationRequest,
    messages: &Messages,
) -> Result<()> {
    let spinner = Spinner::new(messages.thinking);
    let mut stream = translator.translate_streaming(request);
    let mut first_chunk = true;
    let mut printed_any = false;

    while let Some(fragment) = stream.next().await {
        if first_chunk {
            spinner.stop();
            first_chunk = false;
        }

        match fragment {
            Ok(chunk) => {
                print!("{chunk}");
                io::stdout().flush()?;
                printed_any = true;
            }
            Err(err) => {
                if printed_any {
                    println!();
                }
                return Err(err.into());
            }
        }
    }

    if first_chunk {
        spinner.stop();
    }

    if printed_any {
        println!();
    }

    Ok(())
}

fn select_target_language(prompt: &str, candidates: &[&'static str]) -> Result<String> {
    // Build options with format "code - Name"
    let options: Vec<String> = candidates
        .iter()
        .map(|code| format!("{code} - {}", native_name(code).unwrap_or(code)))
        .collect();

    let selection = Select::new(prompt, options).prompt()?;

    // Extract code from "code - Name" format
    let code = selection.split(" - ").next().unwrap_or(&selection);

    Ok(code.to_string())
}
