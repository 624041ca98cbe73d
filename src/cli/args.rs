use clap::{Args as ClapArgs, CommandFactory, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "lu")]
#[command(about = "🔍 Lu - AI-powered command-line translation assistant")]
#[command(version)]
pub struct Args {
    /// Text to translate (reads from stdin if omitted and input is piped)
    pub text: Vec<String>,

    /// Target language code (e.g. zh-cn, en, ja)
    #[arg(short = 't', long = "target")]
    pub target: Option<String>,

    /// Show supported languages
    #[arg(short = 's', long = "support")]
    pub support: bool,

    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Options shared by every command.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Provider override (openai, dashscope, custom)
    #[arg(long, global = true)]
    pub provider: Option<String>,

    /// Model name override
    #[arg(short = 'm', long, global = true)]
    pub model: Option<String>,

    /// Suppress status output
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging on stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Translate text (everything after 'trans' is treated as one text)
    Trans {
        /// Target language code (e.g. zh-cn, en, ja)
        #[arg(short = 't', long = "target")]
        target: Option<String>,

        /// Text to translate
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Initialize and configure lu interactively
    Init,
    /// Show current configuration (the API key is never printed)
    Config,
}

/// The command whose help is shown when there is nothing to translate:
/// the named subcommand if it exists, else the root command.
pub fn help_command(subcommand: Option<&str>) -> clap::Command {
    let mut root = Args::command();
    root.build();
    subcommand
        .and_then(|name| root.find_subcommand(name).cloned())
        .unwrap_or(root)
}
