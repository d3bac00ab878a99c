//! Bounded translation history
//!
//! An ordered list of completed exchanges, capped at
//! [`HISTORY_CAPACITY`] entries with oldest-first eviction. Entries are
//! created by the session controller on successful results and never mutated
//! afterwards; everything else gets read-only access.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Maximum number of retained exchanges
pub const HISTORY_CAPACITY: usize = 10;

/// One completed translation exchange
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    /// Unique, monotonically increasing token
    pub id: u64,
    pub original_text: String,
    pub translated_text: String,
    pub source_lang: String,
    pub target_lang: String,
    pub provider: String,
    pub created_at: DateTime<Utc>,
    pub is_image: bool,
}

/// Fields of a new exchange, before the store assigns id and timestamp
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub original_text: String,
    pub translated_text: String,
    pub source_lang: String,
    pub target_lang: String,
    pub provider: String,
    pub is_image: bool,
}

/// FIFO-bounded store of past exchanges
#[derive(Debug, Default)]
pub struct HistoryStore {
    entries: VecDeque<HistoryEntry>,
    next_id: u64,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an exchange, evicting the oldest entry when full
    pub fn push(&mut self, entry: NewEntry) -> u64 {
        self.next_id += 1;
        let id = self.next_id;

        if self.entries.len() == HISTORY_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(HistoryEntry {
            id,
            original_text: entry.original_text,
            translated_text: entry.translated_text,
            source_lang: entry.source_lang,
            target_lang: entry.target_lang,
            provider: entry.provider,
            created_at: Utc::now(),
            is_image: entry.is_image,
        });
        id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries oldest-first
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn newest(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    pub fn get(&self, id: u64) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }
}
