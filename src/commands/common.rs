//! Common processing logic shared between subcommands.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use clap::ValueEnum;
use gitpoints::Result;
use gitpoints::analysis::Analyzer;
use gitpoints::config::Config;
use gitpoints::github::Client;
use gitpoints::misc::ColorMode;

const LOG_TARGET: &str = "    config";

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,
    /// Only error messages
    Error,
    /// Warning and error messages
    Warn,
    /// Info, warning, and error messages
    Info,
    /// Debug and above messages
    Debug,
    /// All messages including trace
    Trace,
}

/// Common arguments shared between subcommands
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// GitHub personal access token
    #[arg(long, value_name = "TOKEN", env = "GITHUB_TOKEN")]
    pub github_token: Option<String>,

    /// Path to configuration file [default: one of gitpoints.[toml|yml|yaml|json] ]
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,
}

pub struct Common {
    pub analyzer: Analyzer,
    pub config: Config,
    pub color: ColorMode,
}

impl Common {
    /// Create a new Common processor with logger, client, and config
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be loaded or the client cannot be built
    pub fn new(args: &CommonArgs) -> Result<Self> {
        Self::init_logging(args.log_level);

        let (config, config_source, warnings) = Config::load(Utf8Path::new("."), args.config.as_ref())?;
        if let Some(path) = &config_source {
            log::debug!(target: LOG_TARGET, "Loaded configuration from '{path}'");
        }

        // Print warnings if any
        if !warnings.is_empty() {
            eprintln!("\n⚠️  Configuration validation warnings:");
            for warning in &warnings {
                eprintln!("   {warning}");
            }
            eprintln!();
        }

        // The command line and the GITHUB_TOKEN environment variable (both
        // delivered through args) take precedence over the config file
        let token = args.github_token.as_deref().or(config.github_token.as_deref());
        let client = Client::new(token, config.api_base_url.as_str())?;

        Ok(Self {
            analyzer: Analyzer::new(client),
            config,
            color: args.color,
        })
    }

    /// Initialize logger based on log level
    fn init_logging(log_level: LogLevel) {
        if log_level == LogLevel::None {
            return;
        }

        let level = match log_level {
            LogLevel::None => return, // Already checked above, but being explicit
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };

        let env = env_logger::Env::default().filter_or("RUST_LOG", level);

        env_logger::Builder::from_env(env)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(matches!(log_level, LogLevel::Debug) || matches!(log_level, LogLevel::Trace))
            .init();
    }
}
