//! Multi-user comparison registry.

use crate::github::UserProfile;
use crate::scoring::UserStats;
use std::collections::HashMap;

/// One user's entry in the comparison set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonEntry {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: String,
    pub stats: UserStats,
}

/// Insertion-ordered set of analyzed users, keyed by login
///
/// Logins are case-sensitive: `Octocat` and `octocat` are distinct entries.
/// The set is transient process state; nothing is persisted.
#[derive(Debug, Default)]
pub struct ComparisonRegistry {
    order: Vec<String>,
    entries: HashMap<String, ComparisonEntry>,
}

impl ComparisonRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user or replace an existing entry's data in place
    ///
    /// A new login appends at the end of the ordering; re-upserting an
    /// existing login replaces the payload without changing its position.
    pub fn upsert(&mut self, profile: &UserProfile, stats: UserStats) {
        let entry = ComparisonEntry {
            login: profile.login.clone(),
            name: profile.name.clone(),
            avatar_url: profile.avatar_url.clone(),
            stats,
        };

        if self.entries.insert(profile.login.clone(), entry).is_none() {
            self.order.push(profile.login.clone());
        }
    }

    /// Remove a user's entry; absent logins are a no-op
    pub fn remove(&mut self, login: &str) {
        if self.entries.remove(login).is_some() {
            self.order.retain(|existing| existing != login);
        }
    }

    /// Entries in insertion order
    pub fn list(&self) -> impl Iterator<Item = &ComparisonEntry> {
        self.order.iter().filter_map(|login| self.entries.get(login))
    }

    #[must_use]
    pub fn get(&self, login: &str) -> Option<&ComparisonEntry> {
        self.entries.get(login)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
