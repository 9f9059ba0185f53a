//! The fixed signal table behind repository quality scores.

use crate::github::Repository;
use chrono::{DateTime, Utc};
use strum::{Display, EnumIter};

const FRESH_DAYS: i64 = 30;
const RECENT_DAYS: i64 = 90;
const ACTIVE_DAYS: i64 = 365;

const LOW_ISSUE_RATIO: f64 = 0.10;
const MODERATE_ISSUE_RATIO: f64 = 0.30;

/// Matched against lowercased descriptions; the stem lets "secure",
/// "security", and "securing" all qualify.
const SECURITY_STEM: &str = "secur";

const DETAILED_DESCRIPTION_LEN: usize = 20;

/// One quality signal with a fixed point value.
///
/// The recency tiers are mutually exclusive by construction, as are the
/// issue-ratio tiers, so a repository's score is a plain sum over the granted
/// signals and tops out at 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum Signal {
    IssuesEnabled,
    SecurityMention,
    HasHomepage,
    HasLicense,
    UpdatedWithin30Days,
    UpdatedWithin90Days,
    UpdatedWithinYear,
    HasStars,
    HasForks,
    LowIssueRatio,
    ModerateIssueRatio,
    DetailedDescription,
    HasLanguage,
    HasTopics,
    NotArchived,
}

impl Signal {
    /// Points awarded when the signal is granted
    #[must_use]
    pub const fn points(self) -> u8 {
        match self {
            Self::UpdatedWithin30Days => 15,
            Self::HasLicense
            | Self::UpdatedWithin90Days
            | Self::LowIssueRatio
            | Self::DetailedDescription
            | Self::HasLanguage
            | Self::HasTopics
            | Self::NotArchived => 10,
            Self::IssuesEnabled
            | Self::SecurityMention
            | Self::HasHomepage
            | Self::UpdatedWithinYear
            | Self::HasStars
            | Self::HasForks
            | Self::ModerateIssueRatio => 5,
        }
    }

    /// Human-readable label for reports
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::IssuesEnabled => "Issue tracking enabled",
            Self::SecurityMention => "Description mentions security",
            Self::HasHomepage => "Homepage listed",
            Self::HasLicense => "License declared",
            Self::UpdatedWithin30Days => "Updated within 30 days",
            Self::UpdatedWithin90Days => "Updated within 90 days",
            Self::UpdatedWithinYear => "Updated within a year",
            Self::HasStars => "Starred at least once",
            Self::HasForks => "Forked at least once",
            Self::LowIssueRatio => "Low open-issue ratio",
            Self::ModerateIssueRatio => "Moderate open-issue ratio",
            Self::DetailedDescription => "Detailed description",
            Self::HasLanguage => "Primary language detected",
            Self::HasTopics => "Topics assigned",
            Self::NotArchived => "Not archived",
        }
    }

    /// Whether a repository earns this signal at the given instant
    ///
    /// Absent fields never grant a signal: a repository with no `archived`
    /// flag earns neither archived treatment, and an unknown or negative
    /// open-issue count grants neither ratio tier.
    #[must_use]
    pub fn granted(self, repo: &Repository, now: DateTime<Utc>) -> bool {
        match self {
            Self::IssuesEnabled => repo.has_issues == Some(true),
            Self::SecurityMention => repo
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(SECURITY_STEM)),
            Self::HasHomepage => repo.homepage.as_deref().is_some_and(|h| !h.trim().is_empty()),
            Self::HasLicense => repo.license.is_some(),
            Self::UpdatedWithin30Days => age_days(repo, now).is_some_and(|age| age < FRESH_DAYS),
            Self::UpdatedWithin90Days => age_days(repo, now).is_some_and(|age| (FRESH_DAYS..RECENT_DAYS).contains(&age)),
            Self::UpdatedWithinYear => age_days(repo, now).is_some_and(|age| (RECENT_DAYS..ACTIVE_DAYS).contains(&age)),
            Self::HasStars => repo.stargazers_count > 0,
            Self::HasForks => repo.forks_count > 0,
            Self::LowIssueRatio => issue_ratio(repo).is_some_and(|ratio| ratio < LOW_ISSUE_RATIO),
            Self::ModerateIssueRatio => {
                issue_ratio(repo).is_some_and(|ratio| (LOW_ISSUE_RATIO..MODERATE_ISSUE_RATIO).contains(&ratio))
            }
            Self::DetailedDescription => repo
                .description
                .as_deref()
                .is_some_and(|d| d.chars().count() > DETAILED_DESCRIPTION_LEN),
            Self::HasLanguage => repo.language.is_some(),
            Self::HasTopics => !repo.topics.is_empty(),
            Self::NotArchived => repo.archived == Some(false),
        }
    }
}

/// Age of the last update in whole days, negative when the timestamp is in
/// the future (which counts as freshly updated).
fn age_days(repo: &Repository, now: DateTime<Utc>) -> Option<i64> {
    repo.updated_at.map(|updated| (now - updated).num_days())
}

/// Open issues relative to the repository's audience size
#[expect(clippy::cast_precision_loss, reason = "counts are far below f64 precision limits")]
fn issue_ratio(repo: &Repository) -> Option<f64> {
    let open = repo.known_open_issues()?;
    Some(open as f64 / (repo.stargazers_count + repo.forks_count + 1) as f64)
}
