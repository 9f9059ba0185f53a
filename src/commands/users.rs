use super::common::{Common, CommonArgs};
use clap::Parser;
use futures_util::future::join_all;
use gitpoints::Result;
use gitpoints::registry::ComparisonRegistry;
use gitpoints::reports::{generate_comparison, generate_separator, generate_user};
use ohno::bail;

#[derive(Parser, Debug)]
pub struct UsersArgs {
    /// GitHub logins to analyze
    #[arg(value_name = "LOGIN", required = true)]
    pub logins: Vec<String>,

    /// Show the per-signal score breakdown for every repository
    #[arg(long)]
    pub explain: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub async fn process_users(args: &UsersArgs) -> Result<()> {
    let common = Common::new(&args.common)?;

    // All analyses run concurrently; results come back in argument order
    let outcomes = join_all(args.logins.iter().map(|login| common.analyzer.analyze(login))).await;

    let mut registry = ComparisonRegistry::new();
    let mut failures = 0_usize;
    let mut first_report = true;

    for (login, outcome) in args.logins.iter().zip(outcomes) {
        match outcome {
            Ok(analysis) => {
                registry.upsert(&analysis.profile, analysis.stats.clone());

                let mut output = String::new();
                if !first_report {
                    generate_separator(&common.config, common.color, &mut output)?;
                }
                generate_user(&analysis, &common.config, common.color, args.explain, &mut output)?;
                print!("{output}");
                first_report = false;
            }
            Err(e) => {
                eprintln!("Unable to analyze '{login}': {e}");
                failures += 1;
            }
        }
    }

    if registry.len() > 1 {
        let mut output = String::new();
        generate_comparison(&registry, &common.config, common.color, &mut output)?;
        print!("{output}");
    }

    if failures > 0 {
        bail!("failed to analyze {failures} of {} user(s)", args.logins.len());
    }
    Ok(())
}
