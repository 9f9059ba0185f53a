//! User analysis orchestration.

use crate::analysis::AnalyzeError;
use crate::github::{ApiResult, Client, UserProfile};
use crate::scoring::{self, ScoredRepository, UserStats};
use chrono::{DateTime, Utc};

const LOG_TARGET: &str = "  analysis";

/// The full outcome of analyzing one user
#[derive(Debug, Clone)]
pub struct UserAnalysis {
    pub profile: UserProfile,

    /// Scored repositories, highest quality first
    pub repositories: Vec<ScoredRepository>,

    pub stats: UserStats,

    /// The instant every repository was scored against
    pub analyzed_at: DateTime<Utc>,
}

/// Orchestrates profile retrieval, repository scoring, and aggregation
#[derive(Debug, Clone)]
pub struct Analyzer {
    client: Client,
}

impl Analyzer {
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }

    /// Analyze a user: fetch profile and repositories, score, and aggregate
    ///
    /// A blank login is rejected before any request goes out. The profile
    /// and repository fetches run concurrently; a failed profile fetch
    /// aborts the whole analysis. Every repository is scored against a
    /// single instant so the pass is internally consistent.
    pub async fn analyze(&self, login: &str) -> Result<UserAnalysis, AnalyzeError> {
        let login = login.trim();
        if login.is_empty() {
            return Err(AnalyzeError::InvalidInput);
        }

        log::debug!(target: LOG_TARGET, "Analyzing user '{login}'");

        let (profile_result, repos_result) = tokio::join!(
            self.client.fetch_user_profile(login),
            self.client.fetch_user_repositories(login)
        );

        let profile = unwrap_outcome(profile_result, login)?;
        let repos = unwrap_outcome(repos_result, login)?;

        let now = Utc::now();
        let scored: Vec<ScoredRepository> = repos.into_iter().map(|repo| scoring::score_repository(repo, now)).collect();
        let (repositories, stats) = scoring::aggregate(scored);

        log::debug!(
            target: LOG_TARGET,
            "Analyzed '{login}': {} repositories, average score {}",
            stats.total_repos,
            stats.avg_quality_score
        );

        Ok(UserAnalysis {
            profile,
            repositories,
            stats,
            analyzed_at: now,
        })
    }
}

fn unwrap_outcome<T>(outcome: ApiResult<T>, login: &str) -> Result<T, AnalyzeError> {
    match outcome {
        ApiResult::Success(data, _) => Ok(data),
        ApiResult::RateLimited(info) => Err(AnalyzeError::RateLimited(info.map(|rl| rl.reset_at))),
        ApiResult::NotFound(_) => Err(AnalyzeError::NotFound(login.to_string())),
        ApiResult::Failed(e, _) => Err(AnalyzeError::Transport(e)),
    }
}
