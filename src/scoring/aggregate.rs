//! Per-user aggregation of scored repositories.

use crate::scoring::ScoredRepository;
use std::collections::HashMap;

/// Aggregated statistics over a user's scored repositories
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserStats {
    pub total_repos: usize,
    pub total_stars: u64,
    pub total_forks: u64,

    /// Rounded mean of the repository scores, 0 when there are none
    pub avg_quality_score: u8,

    /// Repository count per detected primary language; repositories without
    /// one contribute to the totals but not to this histogram
    pub languages: HashMap<String, u64>,
}

/// Sort scored repositories by descending quality and derive user statistics
///
/// The sort is stable, so repositories with equal scores keep their listing
/// order (most recently updated first, as delivered by the client).
#[must_use]
pub fn aggregate(mut repos: Vec<ScoredRepository>) -> (Vec<ScoredRepository>, UserStats) {
    let stats = compute_stats(&repos);
    repos.sort_by(|a, b| b.quality_score.cmp(&a.quality_score));
    (repos, stats)
}

fn compute_stats(repos: &[ScoredRepository]) -> UserStats {
    let mut stats = UserStats {
        total_repos: repos.len(),
        ..UserStats::default()
    };

    let mut score_sum = 0u64;
    for scored in repos {
        stats.total_stars += scored.repo.stargazers_count;
        stats.total_forks += scored.repo.forks_count;
        score_sum += u64::from(scored.quality_score);

        if let Some(language) = &scored.repo.language {
            *stats.languages.entry(language.clone()).or_insert(0) += 1;
        }
    }

    if stats.total_repos > 0 {
        stats.avg_quality_score = rounded_mean(score_sum, stats.total_repos);
    }

    stats
}

#[expect(clippy::cast_precision_loss, reason = "score sums are far below f64 precision limits")]
#[expect(clippy::cast_possible_truncation, reason = "a mean of 0-100 scores stays in range")]
#[expect(clippy::cast_sign_loss, reason = "inputs are non-negative")]
fn rounded_mean(sum: u64, count: usize) -> u8 {
    (sum as f64 / count as f64).round() as u8
}
