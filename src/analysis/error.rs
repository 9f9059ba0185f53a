//! Error taxonomy for user analysis.

use chrono::{DateTime, Utc};
use core::error::Error;
use core::fmt;

/// Everything that can go wrong while analyzing a user
#[derive(Debug)]
pub enum AnalyzeError {
    /// The login was blank; rejected before any request is made
    InvalidInput,

    /// No GitHub user exists for this login
    NotFound(String),

    /// The API refused the request due to rate limiting, with the reset
    /// instant when the response headers supplied one
    RateLimited(Option<DateTime<Utc>>),

    /// Network failure or an unexpected HTTP status
    Transport(ohno::AppError),
}

impl fmt::Display for AnalyzeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput => write!(f, "login must not be empty"),
            Self::NotFound(login) => write!(f, "GitHub user '{login}' was not found"),
            Self::RateLimited(Some(reset_at)) => write!(
                f,
                "GitHub API rate limit exceeded, resets at {}",
                reset_at.format("%Y-%m-%d %H:%M:%S UTC")
            ),
            Self::RateLimited(None) => {
                write!(f, "GitHub API rate limit exceeded; supply an access token to raise the limit")
            }
            Self::Transport(e) => write!(f, "GitHub request failed: {e}"),
        }
    }
}

impl Error for AnalyzeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ohno::app_err;

    #[test]
    fn test_invalid_input_message() {
        assert_eq!(AnalyzeError::InvalidInput.to_string(), "login must not be empty");
    }

    #[test]
    fn test_not_found_names_the_login() {
        let msg = AnalyzeError::NotFound("ghost".to_string()).to_string();
        assert_eq!(msg, "GitHub user 'ghost' was not found");
    }

    #[test]
    fn test_rate_limited_with_reset_mentions_time() {
        let reset = DateTime::from_timestamp(1_704_067_200, 0).unwrap();
        let msg = AnalyzeError::RateLimited(Some(reset)).to_string();
        assert!(msg.contains("resets at 2024-01-01 00:00:00 UTC"), "got: {msg}");
    }

    #[test]
    fn test_rate_limited_without_reset_suggests_token() {
        let msg = AnalyzeError::RateLimited(None).to_string();
        assert!(msg.contains("access token"), "got: {msg}");
    }

    #[test]
    fn test_transport_wraps_cause() {
        let err = AnalyzeError::Transport(app_err!("connection reset"));
        assert!(err.to_string().contains("connection reset"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_only_transport_has_source() {
        assert!(AnalyzeError::InvalidInput.source().is_none());
        assert!(AnalyzeError::NotFound("x".to_string()).source().is_none());
        assert!(AnalyzeError::RateLimited(None).source().is_none());
    }
}
