use camino::Utf8PathBuf;
use clap::Parser;
use gitpoints::Result;
use gitpoints::config::Config;
use ohno::bail;

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output configuration file path
    #[arg(value_name = "PATH", default_value = "gitpoints.toml")]
    pub output: Utf8PathBuf,

    /// Overwrite the output file if it already exists
    #[arg(long)]
    pub force: bool,
}

pub fn init_config(args: &InitArgs) -> Result<()> {
    if args.output.exists() && !args.force {
        bail!("configuration file {} already exists, pass --force to overwrite it", args.output);
    }

    let config = Config::default();
    config.save_default_with_comments(&args.output)?;
    println!("Generated default configuration file: {}", args.output);
    Ok(())
}
