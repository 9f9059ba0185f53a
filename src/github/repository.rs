//! Typed repository model for the GitHub listing endpoint.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// License metadata attached to a repository, when one is declared.
#[derive(Debug, Clone, Deserialize)]
pub struct License {
    #[serde(default)]
    pub name: Option<String>,
}

/// A single repository as returned by `GET /users/{login}/repos`.
///
/// Deserialization is the normalization boundary: every field GitHub may omit
/// or null out is optional with an explicit default, so a degraded payload
/// yields absent values rather than errors. Boolean flags stay `Option<bool>`
/// because an absent flag must not be confused with an explicit `false` when
/// scoring.
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,

    #[serde(default)]
    pub html_url: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Primary language, null for repositories with no detected code.
    #[serde(default)]
    pub language: Option<String>,

    #[serde(default)]
    pub stargazers_count: u64,

    #[serde(default)]
    pub forks_count: u64,

    /// Kept signed; a negative count is treated as unknown by the scorer.
    #[serde(default)]
    pub open_issues_count: Option<i64>,

    #[serde(default)]
    pub homepage: Option<String>,

    #[serde(default)]
    pub license: Option<License>,

    #[serde(default)]
    pub topics: Vec<String>,

    #[serde(default)]
    pub archived: Option<bool>,

    #[serde(default)]
    pub has_issues: Option<bool>,

    #[serde(default)]
    pub private: bool,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Repository {
    /// Open-issue count when it was reported and is non-negative.
    #[must_use]
    pub fn known_open_issues(&self) -> Option<i64> {
        self.open_issues_count.filter(|&count| count >= 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_deserialize_full() {
        let json = r#"{
            "id": 42,
            "name": "widget",
            "html_url": "https://github.com/octocat/widget",
            "description": "A widget factory",
            "language": "Rust",
            "stargazers_count": 120,
            "forks_count": 7,
            "open_issues_count": 3,
            "homepage": "https://widget.example.com",
            "license": {"key": "mit", "name": "MIT License"},
            "topics": ["widgets", "factory"],
            "archived": false,
            "has_issues": true,
            "private": false,
            "updated_at": "2024-06-01T12:00:00Z"
        }"#;

        let repo: Repository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.id, 42);
        assert_eq!(repo.name, "widget");
        assert_eq!(repo.language.as_deref(), Some("Rust"));
        assert_eq!(repo.stargazers_count, 120);
        assert_eq!(repo.forks_count, 7);
        assert_eq!(repo.open_issues_count, Some(3));
        assert_eq!(repo.license.unwrap().name.as_deref(), Some("MIT License"));
        assert_eq!(repo.topics, vec!["widgets", "factory"]);
        assert_eq!(repo.archived, Some(false));
        assert_eq!(repo.has_issues, Some(true));
        assert!(repo.updated_at.is_some());
    }

    #[test]
    fn test_repository_deserialize_minimal() {
        let json = r#"{"id": 1, "name": "bare"}"#;

        let repo: Repository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.name, "bare");
        assert_eq!(repo.html_url, "");
        assert!(repo.description.is_none());
        assert!(repo.language.is_none());
        assert_eq!(repo.stargazers_count, 0);
        assert_eq!(repo.forks_count, 0);
        assert!(repo.open_issues_count.is_none());
        assert!(repo.homepage.is_none());
        assert!(repo.license.is_none());
        assert!(repo.topics.is_empty());
        assert!(repo.archived.is_none());
        assert!(repo.has_issues.is_none());
        assert!(!repo.private);
        assert!(repo.updated_at.is_none());
    }

    #[test]
    fn test_repository_deserialize_nulls() {
        let json = r#"{
            "id": 2,
            "name": "nully",
            "description": null,
            "language": null,
            "homepage": null,
            "license": null,
            "updated_at": null
        }"#;

        let repo: Repository = serde_json::from_str(json).unwrap();
        assert!(repo.description.is_none());
        assert!(repo.language.is_none());
        assert!(repo.homepage.is_none());
        assert!(repo.license.is_none());
        assert!(repo.updated_at.is_none());
    }

    #[test]
    fn test_known_open_issues_filters_negative() {
        let json = r#"{"id": 3, "name": "odd", "open_issues_count": -5}"#;
        let repo: Repository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.open_issues_count, Some(-5));
        assert!(repo.known_open_issues().is_none());
    }

    #[test]
    fn test_known_open_issues_zero_is_known() {
        let json = r#"{"id": 4, "name": "quiet", "open_issues_count": 0}"#;
        let repo: Repository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.known_open_issues(), Some(0));
    }

    #[test]
    fn test_license_without_name() {
        let json = r#"{"id": 5, "name": "licensed", "license": {"key": "other"}}"#;
        let repo: Repository = serde_json::from_str(json).unwrap();
        let license = repo.license.unwrap();
        assert!(license.name.is_none());
    }
}
