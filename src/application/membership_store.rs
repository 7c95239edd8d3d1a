//! MembershipStore - Buyer list mutations over the remote document and local mirror.
//!
//! Every mutation is a fetch-modify-write of the whole remote list followed by
//! a mirror write. The mirror is only written after the remote write succeeded,
//! so it always reflects the last list the remote store accepted.
//!
//! ## Concurrency
//!
//! Mutations take a single writer lock, so at most one fetch-modify-write is
//! in flight per process and concurrent deliveries cannot overwrite each
//! other's changes. Reads are not serialized.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::membership::MembershipList;
use crate::ports::{ListCache, RemoteListStore};

/// Result of a membership lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Member,
    NotMember,
    /// The remote list could not be read.
    Unavailable,
}

/// Outcome of the startup check against the remote store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupReport {
    /// Remote list readable.
    Remote { buyers: usize },
    /// Remote unreadable; the local mirror holds this many entries.
    MirrorOnly { buyers: usize },
    /// Remote unreadable and no usable mirror.
    Unavailable,
}

/// Two-tier buyer list store.
pub struct MembershipStore {
    remote: Arc<dyn RemoteListStore>,
    cache: Arc<dyn ListCache>,
    write_lock: Mutex<()>,
}

impl MembershipStore {
    pub fn new(remote: Arc<dyn RemoteListStore>, cache: Arc<dyn ListCache>) -> Self {
        Self {
            remote,
            cache,
            write_lock: Mutex::new(()),
        }
    }

    /// Current remote list, or an empty list if it cannot be read.
    ///
    /// Fail-open: a store outage looks like "no buyers". Use [`lookup`] when
    /// the distinction matters.
    ///
    /// [`lookup`]: MembershipStore::lookup
    pub async fn fetch_list(&self) -> MembershipList {
        match self.remote.fetch_list().await {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!("Failed to fetch buyer list: {}", e);
                MembershipList::new()
            }
        }
    }

    /// Check whether `email` is an active buyer.
    pub async fn lookup(&self, email: &str) -> Lookup {
        match self.remote.fetch_list().await {
            Ok(list) if list.contains(email) => Lookup::Member,
            Ok(_) => Lookup::NotMember,
            Err(e) => {
                tracing::warn!("Buyer lookup failed, store unavailable: {}", e);
                Lookup::Unavailable
            }
        }
    }

    /// Add `email` to the buyer list.
    ///
    /// Returns `true` if the email is a member afterwards (including when it
    /// already was, or when `email` is empty and nothing was done). Returns
    /// `false` if the list could not be read or the remote write failed.
    pub async fn add_email(&self, email: &str) -> bool {
        if email.is_empty() {
            return true;
        }
        self.mutate("add", email, |list| list.insert(email)).await
    }

    /// Remove `email` from the buyer list.
    ///
    /// Same return contract as [`add_email`](MembershipStore::add_email).
    pub async fn remove_email(&self, email: &str) -> bool {
        if email.is_empty() {
            return true;
        }
        self.mutate("remove", email, |list| list.remove(email)).await
    }

    /// Read the remote list once and fall back to inspecting the mirror.
    ///
    /// The mirror is only reported on, never written back to the remote store.
    pub async fn startup_check(&self) -> StartupReport {
        match self.remote.fetch_list().await {
            Ok(list) => StartupReport::Remote {
                buyers: list.len(),
            },
            Err(e) => {
                tracing::warn!("Remote buyer list unavailable at startup: {}", e);
                match self.cache.load().await {
                    Ok(Some(list)) => StartupReport::MirrorOnly {
                        buyers: list.len(),
                    },
                    Ok(None) => StartupReport::Unavailable,
                    Err(e) => {
                        tracing::warn!("Local buyer mirror unreadable: {}", e);
                        StartupReport::Unavailable
                    }
                }
            }
        }
    }

    async fn mutate<F>(&self, op: &'static str, email: &str, apply: F) -> bool
    where
        F: FnOnce(&mut MembershipList) -> bool,
    {
        let _guard = self.write_lock.lock().await;

        // Writing after a failed read would replace the remote document with
        // a list built from nothing.
        let mut list = match self.remote.fetch_list().await {
            Ok(list) => list,
            Err(e) => {
                tracing::error!(op, email, "Buyer list unavailable, not writing: {}", e);
                return false;
            }
        };

        if !apply(&mut list) {
            tracing::debug!(op, email, "Buyer list already up to date");
            return true;
        }

        if let Err(e) = self.remote.replace_list(&list).await {
            tracing::error!(op, email, "Remote write failed: {}", e);
            return false;
        }

        if let Err(e) = self.cache.persist(&list).await {
            tracing::warn!(op, email, "Local mirror write failed: {}", e);
        }

        tracing::info!(op, email, buyers = list.len(), "Buyer list updated");
        true
    }
}
