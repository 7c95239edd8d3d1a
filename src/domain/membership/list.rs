//! Buyer membership list.
//!
//! The set of email addresses currently entitled to access. Insertion order is
//! kept so the serialized document stays stable between writes, but lookups
//! and mutations have set semantics: an address appears at most once.

use serde::{Deserialize, Deserializer, Serialize};

/// Set of active buyer email addresses.
///
/// Serializes as a plain JSON array of strings, which is the wire format of
/// both the remote document and the local mirror.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MembershipList {
    emails: Vec<String>,
}

impl MembershipList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from raw entries, dropping repeated addresses.
    ///
    /// The first occurrence of each address keeps its position.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Self::new();
        for entry in entries {
            list.insert(entry);
        }
        list
    }

    /// Returns true if `email` is a member.
    pub fn contains(&self, email: &str) -> bool {
        self.emails.iter().any(|e| e == email)
    }

    /// Adds `email` to the list.
    ///
    /// Returns `false` without touching the list if it was already present.
    pub fn insert(&mut self, email: impl Into<String>) -> bool {
        let email = email.into();
        if self.contains(&email) {
            return false;
        }
        self.emails.push(email);
        true
    }

    /// Removes every occurrence of `email`.
    ///
    /// Returns `true` if anything was removed.
    pub fn remove(&mut self, email: &str) -> bool {
        let before = self.emails.len();
        self.emails.retain(|e| e != email);
        self.emails.len() != before
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.emails.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.emails
    }
}

// Remote documents are written by other tools too, so duplicates are collapsed
// on the way in rather than rejected.
impl<'de> Deserialize<'de> for MembershipList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = Option::<Vec<String>>::deserialize(deserializer)?;
        Ok(Self::from_entries(entries.unwrap_or_default()))
    }
}

impl<S: Into<String>> FromIterator<S> for MembershipList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}
