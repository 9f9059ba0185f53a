//! GitHub API client
//!
//! Minimal GitHub API client for fetching user profiles and repository
//! listings, with typed classification of the outcomes callers care about.

use crate::github::{Repository, UserProfile};
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, LINK};

const LOG_TARGET: &str = "    github";
const REPO_PAGE_SIZE: u8 = 100;
const MAX_REPO_PAGES: u32 = 10;

/// Rate limit information from response headers
#[derive(Debug, Clone, Copy)]
pub struct RateLimitInfo {
    pub remaining: usize,
    pub reset_at: DateTime<Utc>,
}

/// Result of a GitHub API call
#[derive(Debug)]
pub enum ApiResult<T> {
    /// Request succeeded - contains data and optional rate limit info
    Success(T, Option<RateLimitInfo>),

    /// Rate limited (403 or 429) - reset information when the headers carried it
    RateLimited(Option<RateLimitInfo>),

    /// The requested resource was not found (404)
    NotFound(Option<RateLimitInfo>),

    /// Request failed permanently
    Failed(ohno::AppError, Option<RateLimitInfo>),
}

macro_rules! unwrap_or_return {
    ($expr:expr) => {
        match $expr {
            ApiResult::Success(data, rate_limit) => (data, rate_limit),
            ApiResult::RateLimited(rate_limit) => return ApiResult::RateLimited(rate_limit),
            ApiResult::NotFound(rate_limit) => return ApiResult::NotFound(rate_limit),
            ApiResult::Failed(e, rate_limit) => return ApiResult::Failed(e, rate_limit),
        }
    };
}

/// GitHub API client with optional authentication
#[derive(Debug, Clone)]
pub struct Client {
    client: reqwest::Client,
    base_url: String,
}

impl Client {
    /// Create a new API client with an optional bearer token and base URL
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not a valid header value or the
    /// underlying HTTP client cannot be constructed.
    pub fn new(token: Option<&str>, base_url: impl Into<String>) -> crate::Result<Self> {
        use reqwest::header::{AUTHORIZATION, HeaderValue};

        let mut client_builder = reqwest::Client::builder().user_agent("gitpoints");

        if let Some(t) = token {
            let mut auth_val = HeaderValue::from_str(&format!("Bearer {t}"))?;
            auth_val.set_sensitive(true);

            let mut headers = HeaderMap::new();
            let _ = headers.insert(AUTHORIZATION, auth_val);

            client_builder = client_builder.default_headers(headers);
        }

        Ok(Self {
            client: client_builder.build()?,
            base_url: base_url.into(),
        })
    }

    /// Get the base URL for this client
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the profile for a user
    pub async fn fetch_user_profile(&self, login: &str) -> ApiResult<UserProfile> {
        let url = format!("{}/users/{login}", self.base_url);
        log::debug!(target: LOG_TARGET, "Fetching profile for '{login}'");

        let (resp, rate_limit) = unwrap_or_return!(self.api_call(&url).await);

        match resp.json::<UserProfile>().await {
            Ok(profile) => ApiResult::Success(profile, rate_limit),
            Err(e) => ApiResult::Failed(e.into(), rate_limit),
        }
    }

    /// Fetch the public repositories of a user, most recently updated first
    ///
    /// Follows pagination links until the listing is exhausted or the page
    /// cap is reached.
    pub async fn fetch_user_repositories(&self, login: &str) -> ApiResult<Vec<Repository>> {
        let mut all_repos = Vec::with_capacity(REPO_PAGE_SIZE as usize);
        let mut latest_rate_limit: Option<RateLimitInfo> = None;
        let mut page_num = 1u32;

        loop {
            let url = format!(
                "{}/users/{login}/repos?sort=updated&direction=desc&per_page={REPO_PAGE_SIZE}&page={page_num}",
                self.base_url
            );
            log::debug!(target: LOG_TARGET, "Fetching repository page {page_num} for '{login}'");

            let (resp, rate_limit) = unwrap_or_return!(self.api_call(&url).await);

            // Keep the most conservative rate limit info (lowest remaining)
            latest_rate_limit = [latest_rate_limit, rate_limit].into_iter().flatten().min_by_key(|rl| rl.remaining);

            // Parse next page link if present
            let has_next_page = resp
                .headers()
                .get(LINK)
                .and_then(|h| h.to_str().ok())
                .is_some_and(|link_str| link_str.contains(r#"rel="next""#));

            let repos: Vec<Repository> = match resp.json().await {
                Ok(r) => r,
                Err(e) => return ApiResult::Failed(e.into(), latest_rate_limit),
            };

            if repos.is_empty() {
                break;
            }

            all_repos.extend(repos);

            if !has_next_page {
                break;
            }

            page_num += 1;

            if page_num > MAX_REPO_PAGES {
                log::debug!(target: LOG_TARGET, "Reached maximum repository page limit ({MAX_REPO_PAGES}) for '{login}', stopping pagination after {} repositories", all_repos.len());
                break;
            }
        }

        ApiResult::Success(all_repos, latest_rate_limit)
    }

    /// Make an API call and classify the result
    async fn api_call(&self, url: &str) -> ApiResult<reqwest::Response> {
        let resp = match self.client.get(url).send().await {
            Ok(r) => r,
            Err(e) => return ApiResult::Failed(e.into(), None),
        };

        // Extract rate limit info from response headers before checking status
        let rate_limit = extract_rate_limit_from_headers(resp.headers());

        let status = resp.status();
        if status.is_success() {
            return ApiResult::Success(resp, rate_limit);
        }

        let status_code = status.as_u16();
        if matches!(status_code, 403 | 429) {
            log::debug!(target: LOG_TARGET, "Rate limited by '{url}' (status {status_code})");
            return ApiResult::RateLimited(rate_limit);
        }

        if status_code == 404 {
            return ApiResult::NotFound(rate_limit);
        }

        // Any other HTTP error is a permanent failure
        let error = resp.error_for_status().expect_err("status is not successful at this point");
        ApiResult::Failed(error.into(), rate_limit)
    }
}

/// Extract rate limit information from API response headers
fn extract_rate_limit_from_headers(headers: &HeaderMap) -> Option<RateLimitInfo> {
    let remaining = headers.get("x-ratelimit-remaining")?.to_str().ok()?.parse::<usize>().ok()?;

    let reset_timestamp = headers.get("x-ratelimit-reset")?.to_str().ok()?.parse::<i64>().ok()?;

    let reset_at = DateTime::from_timestamp(reset_timestamp, 0)?;

    Some(RateLimitInfo { remaining, reset_at })
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_extract_rate_limit_from_headers() {
        let mut headers = HeaderMap::new();
        let _ = headers.insert("x-ratelimit-remaining", HeaderValue::from_static("4999"));
        let _ = headers.insert("x-ratelimit-reset", HeaderValue::from_static("1704067200"));

        let rate_limit = extract_rate_limit_from_headers(&headers).unwrap();

        assert_eq!(rate_limit.remaining, 4999);
        assert_eq!(rate_limit.reset_at.timestamp(), 1_704_067_200);
    }

    #[test]
    fn test_extract_rate_limit_missing_headers() {
        let headers = HeaderMap::new();
        let rate_limit = extract_rate_limit_from_headers(&headers);
        assert!(rate_limit.is_none());
    }

    #[test]
    fn test_extract_rate_limit_invalid_remaining() {
        let mut headers = HeaderMap::new();
        let _ = headers.insert("x-ratelimit-remaining", HeaderValue::from_static("invalid"));
        let _ = headers.insert("x-ratelimit-reset", HeaderValue::from_static("1704067200"));

        let rate_limit = extract_rate_limit_from_headers(&headers);
        assert!(rate_limit.is_none());
    }

    #[test]
    fn test_extract_rate_limit_invalid_reset() {
        let mut headers = HeaderMap::new();
        let _ = headers.insert("x-ratelimit-remaining", HeaderValue::from_static("4999"));
        let _ = headers.insert("x-ratelimit-reset", HeaderValue::from_static("invalid"));

        let rate_limit = extract_rate_limit_from_headers(&headers);
        assert!(rate_limit.is_none());
    }

    #[test]
    fn test_rate_limit_info_copy() {
        let info1 = RateLimitInfo {
            remaining: 5000,
            reset_at: DateTime::from_timestamp(1_234_567_890, 0).unwrap(),
        };

        let info2 = info1;

        assert_eq!(info1.remaining, 5000);
        assert_eq!(info2.remaining, 5000);
    }

    #[test]
    fn test_client_new_without_token() {
        let client = Client::new(None, "https://api.github.com").unwrap();
        assert_eq!(client.base_url(), "https://api.github.com");
    }

    #[test]
    fn test_client_new_with_token() {
        let client = Client::new(Some("test_token"), "https://api.github.com").unwrap();
        assert_eq!(client.base_url(), "https://api.github.com");
    }

    #[test]
    fn test_client_new_rejects_invalid_token() {
        let client = Client::new(Some("bad\ntoken"), "https://api.github.com");
        assert!(client.is_err());
    }
}
