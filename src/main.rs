//! A tool to analyze GitHub users and score the quality of their public repositories.
//!
//! # Overview
//!
//! `gitpoints` fetches a GitHub user's profile and public repositories, awards each
//! repository a quality score between 0 and 100 from a fixed table of signals, and
//! produces per-user statistics: total stars, total forks, a language breakdown, and
//! the average repository score. Analyzing several users at once builds a comparison
//! table so you can line profiles up side by side.
//!
//! # Installation
//!
//! ```bash
//! cargo install gitpoints
//! ```
//!
//! # Quick Start
//!
//! Analyze a user:
//!
//! ```bash
//! gitpoints users octocat
//! ```
//!
//! This displays a color-coded console report with the user's profile, aggregate
//! statistics, and a table of their repositories sorted by score.
//!
//! # Basic Usage
//!
//! **Analyze one user:**
//! ```bash
//! gitpoints users octocat
//! ```
//!
//! **Compare several users:**
//! ```bash
//! gitpoints users octocat torvalds defunkt
//! ```
//!
//! All analyses run concurrently; per-user reports print in argument order and a
//! comparison table follows when more than one user was analyzed.
//!
//! **Explain every score:**
//! ```bash
//! gitpoints users octocat --explain
//! ```
//!
//! This appends a signal-by-signal breakdown for each repository, showing which
//! signals were granted and how many points each one contributed.
//!
//! # GitHub Access
//!
//! Unauthenticated requests are limited to 60 per hour by GitHub. With a personal
//! access token the limit rises to 5000 per hour. No special permissions are needed;
//! public repository access is sufficient.
//!
//! **Environment variable (recommended):**
//! ```bash
//! export GITHUB_TOKEN=ghp_xxxxxxxxxxxxxxxxxxxx
//! gitpoints users octocat
//! ```
//!
//! **Command-line flag:**
//! ```bash
//! gitpoints users octocat --github-token ghp_xxxxxxxxxxxxxxxxxxxx
//! ```
//!
//! The command line and the environment variable both take precedence over a token
//! stored in the configuration file.
//!
//! # Scoring System
//!
//! Each repository starts at 0 points and earns points for every signal it grants.
//! The recency signals are mutually exclusive, as are the open-issue ratio signals,
//! so the maximum attainable score is exactly 100.
//!
//! | Signal | Points |
//! |--------|--------|
//! | Updated within 30 days | 15 |
//! | License declared | 10 |
//! | Updated within 90 days | 10 |
//! | Low open-issue ratio (< 0.10) | 10 |
//! | Detailed description (> 20 characters) | 10 |
//! | Primary language detected | 10 |
//! | Topics assigned | 10 |
//! | Not archived | 10 |
//! | Issue tracking enabled | 5 |
//! | Description mentions security | 5 |
//! | Homepage listed | 5 |
//! | Updated within a year | 5 |
//! | Starred at least once | 5 |
//! | Forked at least once | 5 |
//! | Moderate open-issue ratio (< 0.30) | 5 |
//!
//! The open-issue ratio divides the open issue count by stars + forks + 1, so small
//! repositories with a handful of issues are not punished as severely as popular
//! ones with a large backlog.
//!
//! ## Color Ratings
//!
//! Scores are color-coded based on thresholds (configurable):
//!
//! - **Green (≥ 80)**: Excellent
//! - **Orange (50-79)**: Good
//! - **Red (< 50)**: Bad
//!
//! # Configuration
//!
//! **Generate a default config:**
//! ```bash
//! gitpoints init
//! gitpoints init custom.toml
//! gitpoints init --force   # overwrite an existing file
//! ```
//!
//! **Validate a config:**
//! ```bash
//! gitpoints validate
//! gitpoints validate --config custom.toml
//! ```
//!
//! **Default search locations:**
//! - `gitpoints.toml`
//! - `gitpoints.yml`
//! - `gitpoints.yaml`
//! - `gitpoints.json`
//!
//! All configuration fields are optional; unspecified fields use sensible defaults.
//!
//! ```toml
//! # Personal access token used when neither the command line nor the
//! # environment supplies one
//! github_token = "ghp_..."
//!
//! # Base URL of the GitHub REST API; point this at a GitHub Enterprise
//! # Server instance by using its API root
//! api_base_url = "https://api.github.com"
//!
//! # Score thresholds for color coding: [orange threshold, green threshold]
//! scoring_bands = [50.0, 80.0]
//! ```
//!
//! The band colors themselves can be overridden with `colors_for_scoring_bands`,
//! an array of three `{ red, green, blue }` tables ordered from bad to excellent.
//!
//! # Troubleshooting
//!
//! ## Rate Limiting
//!
//! When GitHub rejects a request because the rate limit is exhausted, the report
//! for that user is replaced with an error naming the time the limit resets.
//! Supply a token to raise the limit; `gitpoints` never retries on its own.
//!
//! ## Unknown Users
//!
//! A login that doesn't exist fails that analysis only; remaining users are still
//! analyzed and reported, and the command exits nonzero at the end.

use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};
use gitpoints::Result;

mod commands;

use crate::commands::{InitArgs, UsersArgs, ValidateArgs, init_config, process_users, validate_config};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "gitpoints", version, about)]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: GitpointsSubcommand,
}

#[derive(Subcommand, Debug)]
enum GitpointsSubcommand {
    /// Analyze GitHub users and score their public repositories
    Users(Box<UsersArgs>),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    match &Cli::parse().command {
        GitpointsSubcommand::Users(users_args) => process_users(users_args).await,
        GitpointsSubcommand::Init(init_args) => init_config(init_args),
        GitpointsSubcommand::Validate(validate_args) => validate_config(validate_args),
    }
}
