//! Repository quality scoring.

use crate::github::Repository;
use crate::scoring::Signal;
use chrono::{DateTime, Utc};
use strum::IntoEnumIterator;

/// The highest score a repository can earn
pub const MAX_SCORE: u8 = 100;

/// A repository together with its quality score, fixed at scoring time
#[derive(Debug, Clone)]
pub struct ScoredRepository {
    pub repo: Repository,
    pub quality_score: u8,
}

/// Compute the quality score for a repository at the given instant
///
/// Deterministic for a given record and instant, and total: every input
/// yields a score in `0..=MAX_SCORE`.
#[must_use]
pub fn score(repo: &Repository, now: DateTime<Utc>) -> u8 {
    Signal::iter().filter(|signal| signal.granted(repo, now)).map(Signal::points).sum()
}

/// Score a repository, consuming it
#[must_use]
pub fn score_repository(repo: Repository, now: DateTime<Utc>) -> ScoredRepository {
    let quality_score = score(&repo, now);
    ScoredRepository { repo, quality_score }
}

/// Evaluate every signal against a repository, in table order
///
/// Drives the explain view of the console report.
pub fn evaluate(repo: &Repository, now: DateTime<Utc>) -> impl Iterator<Item = (Signal, bool)> {
    Signal::iter().map(move |signal| (signal, signal.granted(repo, now)))
}
