mod client;
mod repository;
mod user_profile;

pub use client::{ApiResult, Client, RateLimitInfo};
pub use repository::{License, Repository};
pub use user_profile::UserProfile;
