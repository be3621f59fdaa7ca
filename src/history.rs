use crate::options::GenerationOptions;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;
use zeroize::{Zeroize, ZeroizeOnDrop};

pub const DEFAULT_CAPACITY: usize = 50;

#[derive(Debug, Clone, Serialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub password: String,
    #[zeroize(skip)]
    pub timestamp: DateTime<Utc>,
    #[zeroize(skip)]
    pub options: GenerationOptions,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryExport<'a> {
    pub passwords: Vec<&'a HistoryEntry>,
    pub export_date: DateTime<Utc>,
}

#[derive(Debug)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl History {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn record(&mut self, password: &str, options: GenerationOptions) -> &HistoryEntry {
        self.push(HistoryEntry {
            password: password.to_string(),
            timestamp: Utc::now(),
            options,
        })
    }

    pub fn push(&mut self, entry: HistoryEntry) -> &HistoryEntry {
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
        &self.entries[0]
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn export(&self) -> HistoryExport<'_> {
        HistoryExport {
            passwords: self.entries.iter().collect(),
            export_date: Utc::now(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.export())
    }
}
