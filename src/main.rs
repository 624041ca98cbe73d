use anyhow::Result;
use clap::Parser;

use lu_cli::cli::commands::{config, init, translate};
use lu_cli::cli::{Args, Command};
use lu_cli::config::{ConfigManager, DEFAULT_PRIMARY_LANGUAGE, ResolveOptions};
use lu_cli::i18n::Messages;
use lu_cli::output::{self, OutputConfig};
use lu_cli::translation::{
    ConfigError, StreamError, UnsupportedLanguage, print_languages, validate_language,
};
use lu_cli::ui::Style;
use lu_cli::{logging, warn};

#[tokio::main]
async fn main() {
    let args = Args::parse();

    output::init(OutputConfig::from_flags(
        args.global.quiet,
        args.global.no_color,
    ));
    logging::init(args.global.verbose);

    if let Err(err) = run(args).await {
        warn!("{} {err:#}", Style::error("❌ Error:"));
        std::process::exit(exit_code_for(&err));
    }
}

async fn run(args: Args) -> Result<()> {
    let resolve = ResolveOptions {
        provider: args.global.provider.clone(),
        model: args.global.model.clone(),
    };

    match args.command {
        Some(Command::Init) => init::run_init(),
        Some(Command::Config) => config::run_show_config(),
        Some(Command::Trans { target, text }) => {
            if let Some(ref lang) = target {
                validate_language(lang)?;
            }

            let options = translate::TranslateOptions {
                words: text,
                target,
                resolve,
                subcommand: Some("trans"),
            };
            translate::run_translate(options).await
        }
        None if args.support => {
            let messages = Messages::for_language(&ui_language());
            print_languages(
                messages.supported_languages,
                messages.language_code,
                messages.language_name,
            );
            println!();
            println!("{}", messages.usage);
            println!("  {}", Style::command("lu -t ja 你好世界"));
            Ok(())
        }
        None => {
            if let Some(ref lang) = args.target {
                validate_language(lang)?;
            }

            let options = translate::TranslateOptions {
                words: args.text,
                target: args.target,
                resolve,
                subcommand: None,
            };
            translate::run_translate(options).await
        }
    }
}

/// Primary language from the config file, if one can be read.
fn ui_language() -> String {
    ConfigManager::new()
        .ok()
        .filter(ConfigManager::exists)
        .map(|manager| manager.load_or_default())
        .map_or_else(
            || DEFAULT_PRIMARY_LANGUAGE.to_string(),
            |config| config.lu.primary_language().to_string(),
        )
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<ConfigError>().is_some() {
        exitcode::CONFIG
    } else if err.downcast_ref::<StreamError>().is_some() {
        exitcode::UNAVAILABLE
    } else if err.downcast_ref::<UnsupportedLanguage>().is_some() {
        exitcode::USAGE
    } else {
        exitcode::SOFTWARE
    }
}
