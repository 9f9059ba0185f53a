use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use gitpoints::Result;
use gitpoints::config::Config;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file [default: one of gitpoints.[toml|yml|yaml|json] ]
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,
}

#[expect(clippy::unnecessary_wraps, reason = "Consistent interface with other subcommands")]
pub fn validate_config(args: &ValidateArgs) -> Result<()> {
    match Config::load(Utf8Path::new("."), args.config.as_ref()) {
        Ok((_, source, warnings)) => {
            println!("Configuration validation successful");
            match &source {
                Some(path) => println!("Config file: {path}"),
                None => println!("Using default configuration (no config file found)"),
            }

            if !warnings.is_empty() {
                eprintln!("\n⚠️  Configuration validation warnings:");
                for warning in &warnings {
                    eprintln!("   {warning}");
                }
                eprintln!();
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Configuration validation failed: {e}");
            std::process::exit(1);
        }
    }
}
