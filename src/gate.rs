//! Eligibility gate: decides whether a typed StaffID may spin.
//!
//! An identifier is admitted once. Admission is recorded in a grow-only
//! [`UsedSet`] which is written back to the [`KeyValueStore`] after every
//! successful submit. Rejections never touch state or storage.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::{KeyValueStore, STORAGE_KEY, StorageError};

/// Reasons a submission is refused. `Display` is the text shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Please enter a valid StaffID.")]
    EmptyInput,
    #[error("This StaffID is not allowed. Please enter an allowed StaffID.")]
    NotAllowed,
    #[error("StaffID has already been entered. No duplicate spins allowed!")]
    AlreadyUsed,
}

/// Trimmed, uppercased staff identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StaffId(String);

impl StaffId {
    /// Returns `None` when nothing is left after trimming. A byte-order mark
    /// counts as whitespace, as it does for the browser's `trim()`.
    pub fn normalize(raw: &str) -> Option<Self> {
        let id = raw
            .trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
            .to_uppercase();
        if id.is_empty() { None } else { Some(Self(id)) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StaffId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifiers that already spun, in admission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UsedSet {
    ids: Vec<StaffId>,
}

impl UsedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &StaffId) -> bool {
        self.ids.contains(id)
    }

    /// Returns false if `id` was already present.
    pub fn insert(&mut self, id: StaffId) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StaffId> {
        self.ids.iter()
    }

    pub fn to_json(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a stored JSON array. Entries are re-normalized; blanks and
    /// duplicates are dropped.
    pub fn from_json(json: &str) -> Result<Self, StorageError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl<'de> Deserialize<'de> for UsedSet {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = Vec::<String>::deserialize(d)?;
        let mut set = UsedSet::new();
        for id in raw.iter().filter_map(|s| StaffId::normalize(s)) {
            set.insert(id);
        }
        Ok(set)
    }
}

pub struct EligibilityGate<S: KeyValueStore> {
    allow_list: &'static [&'static str],
    used: UsedSet,
    store: S,
}

impl<S: KeyValueStore> EligibilityGate<S> {
    /// Loads the used set from `store`. A missing key means nobody has spun yet;
    /// an unreadable value is logged and treated the same way.
    pub fn new(allow_list: &'static [&'static str], store: S) -> Self {
        let used = match store.get(STORAGE_KEY) {
            Ok(Some(json)) => UsedSet::from_json(&json).unwrap_or_else(|e| {
                log::warn!("ignoring stored {}: {}", STORAGE_KEY, e);
                UsedSet::new()
            }),
            Ok(None) => UsedSet::new(),
            Err(e) => {
                log::warn!("could not load {}: {}", STORAGE_KEY, e);
                UsedSet::new()
            }
        };
        log::debug!("loaded {} used StaffIDs", used.len());
        Self {
            allow_list,
            used,
            store,
        }
    }

    pub fn allow_list(&self) -> &'static [&'static str] {
        self.allow_list
    }

    pub fn used(&self) -> &UsedSet {
        &self.used
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_allowed(&self, id: &StaffId) -> bool {
        self.allow_list.iter().any(|a| *a == id.as_str())
    }

    pub fn submit(&mut self, raw: &str) -> Result<StaffId, Rejection> {
        let id = StaffId::normalize(raw).ok_or(Rejection::EmptyInput)?;
        if !self.is_allowed(&id) {
            return Err(Rejection::NotAllowed);
        }
        if self.used.contains(&id) {
            return Err(Rejection::AlreadyUsed);
        }
        self.used.insert(id.clone());
        self.persist();
        log::info!("admitted {}", id);
        Ok(id)
    }

    // Admission stands even if the write fails; the in-memory set still blocks
    // a repeat for the rest of the session.
    fn persist(&mut self) {
        let result = self
            .used
            .to_json()
            .and_then(|json| self.store.set(STORAGE_KEY, &json));
        if let Err(e) = result {
            log::warn!("failed to persist used StaffIDs: {}", e);
        }
    }
}
