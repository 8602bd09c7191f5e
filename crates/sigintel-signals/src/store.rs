//! Persisted, time-windowed record of already published signals.
//!
//! The store is a single JSON document (`{"signals": [...]}`) owned by one run
//! at a time. Loading never fails: a missing, empty, or corrupt document
//! yields an empty store, and individual entries that cannot be parsed are
//! dropped with a warning (an entry with an unreadable timestamp can never be
//! proven live). Saving is atomic and its failure is fatal to the run.
//!
//! Overlapping invocations race on the file (last write wins); runs must be
//! serialized by whoever schedules them.

use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sigintel_core::persist::{read_optional, write_atomic};
use sigintel_core::{Candidate, Source};

use crate::error::StoreError;

/// Length of the deduplication window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DedupWindow {
    days: u32,
}

impl DedupWindow {
    pub const DEFAULT_DAYS: u32 = 7;

    #[must_use]
    pub fn days(days: u32) -> Self {
        Self { days }
    }

    #[must_use]
    pub fn as_days(self) -> u32 {
        self.days
    }

    /// Oldest instant that is no longer live: `now - window`.
    #[must_use]
    pub fn cutoff(self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::days(i64::from(self.days))
    }

    /// An entry is live iff its timestamp is strictly after the cutoff. An
    /// entry exactly at the cutoff has expired.
    #[must_use]
    pub fn is_live(self, timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        timestamp > self.cutoff(now)
    }
}

impl Default for DedupWindow {
    fn default() -> Self {
        Self::days(Self::DEFAULT_DAYS)
    }
}

/// One previously published item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    pub url: String,
    pub title: String,
    pub source: Source,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SignalStore {
    signals: Vec<Signal>,
}

#[derive(Deserialize)]
struct RawStore {
    signals: Vec<serde_json::Value>,
}

impl SignalStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_signals(signals: Vec<Signal>) -> Self {
        Self { signals }
    }

    /// Load the store at `path`, falling back to an empty store on any error.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        let content = match read_optional(path) {
            Ok(Some(content)) => content,
            Ok(None) => {
                tracing::info!(path = %path.display(), "no existing signal store, starting fresh");
                return Self::new();
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to read signal store; starting fresh"
                );
                return Self::new();
            }
        };

        let store = Self::from_json(&content);
        tracing::debug!(
            path = %path.display(),
            signals = store.len(),
            "loaded signal store"
        );
        store
    }

    /// Parse a store document. Never fails; see the module docs.
    #[must_use]
    pub fn from_json(content: &str) -> Self {
        let raw: RawStore = match serde_json::from_str(content) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "signal store is malformed; starting fresh");
                return Self::new();
            }
        };

        let mut dropped = 0usize;
        let signals = raw
            .signals
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value::<Signal>(value) {
                Ok(signal) => Some(signal),
                Err(e) => {
                    tracing::warn!(index, error = %e, "dropping unreadable stored signal");
                    dropped += 1;
                    None
                }
            })
            .collect();

        if dropped > 0 {
            tracing::warn!(dropped, "signal store contained unreadable entries");
        }

        Self { signals }
    }

    /// Persist the store atomically.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialize`] if the document cannot be encoded or
    /// [`StoreError::Io`] if it cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(self)?;
        write_atomic(path, &json).map_err(|e| StoreError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        tracing::info!(
            path = %path.display(),
            signals = self.signals.len(),
            "saved signal store"
        );
        Ok(())
    }

    #[must_use]
    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.signals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// `true` iff no live entry for `url` exists.
    #[must_use]
    pub fn is_fresh(&self, url: &str, window: DedupWindow, now: DateTime<Utc>) -> bool {
        !self
            .signals
            .iter()
            .any(|signal| signal.url == url && window.is_live(signal.timestamp, now))
    }

    /// Drop every expired entry. Idempotent for a fixed `now`.
    #[must_use]
    pub fn compact(self, window: DedupWindow, now: DateTime<Utc>) -> Self {
        let before = self.signals.len();
        let signals: Vec<Signal> = self
            .signals
            .into_iter()
            .filter(|signal| window.is_live(signal.timestamp, now))
            .collect();

        let removed = before - signals.len();
        if removed > 0 {
            tracing::info!(
                removed,
                window_days = window.as_days(),
                "evicted expired signals"
            );
        }

        Self { signals }
    }

    /// Append a signal. Freshness is the caller's concern; no deduplication
    /// happens here.
    pub fn record(&mut self, url: &str, title: &str, source: Source, now: DateTime<Utc>) {
        self.signals.push(Signal {
            url: url.to_string(),
            title: title.to_string(),
            source,
            timestamp: now,
        });
    }

    /// Keep the candidates that are fresh against the store, preserving input
    /// order. A URL repeated within the batch is kept only once.
    #[must_use]
    pub fn filter_fresh(
        &self,
        candidates: Vec<Candidate>,
        window: DedupWindow,
        now: DateTime<Utc>,
    ) -> Vec<Candidate> {
        let mut seen: HashSet<String> = HashSet::new();
        candidates
            .into_iter()
            .filter(|c| self.is_fresh(&c.url, window, now) && seen.insert(c.url.clone()))
            .collect()
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
