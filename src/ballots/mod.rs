use chrono::Utc;
use log::{info, warn};
use serde_json::Value;
use std::sync::Arc;

use crate::error::PollError;
use crate::models::{Ballot, BALLOTS_KEY, CORRUPT_BALLOTS_KEY};
use crate::store::{read_or_absent, KeyValueStore};

fn parse_records(raw: &str) -> Option<Vec<Value>> {
    serde_json::from_str(raw).ok()
}

// Records that fail to decode are skipped here but stay in the stored array.
fn decode(records: Vec<Value>) -> Vec<Ballot> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(i, record)| match serde_json::from_value::<Ballot>(record) {
            Ok(ballot) => Some(ballot),
            Err(e) => {
                warn!("Skipping unreadable ballot record {}: {}", i, e);
                None
            }
        })
        .collect()
}

/// Append-only log of cast ballots, persisted as one JSON array.
#[derive(Clone)]
pub struct BallotLog {
    store: Arc<dyn KeyValueStore>,
}

impl BallotLog {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Stored records for a read-modify-write. A backend failure aborts the write;
    /// an unparseable payload is copied aside before the log starts over.
    async fn load_records(&self) -> Result<Vec<Value>, PollError> {
        let raw = match self.store.get(BALLOTS_KEY).await? {
            Some(raw) => raw,
            None => return Ok(Vec::new()),
        };
        match parse_records(&raw) {
            Some(records) => Ok(records),
            None => {
                warn!("Stored ballots are corrupt, moving them to {}", CORRUPT_BALLOTS_KEY);
                self.store.set(CORRUPT_BALLOTS_KEY, &raw).await?;
                Ok(Vec::new())
            }
        }
    }

    /// Records one ballot per label, all stamped with the same instant.
    pub async fn append(&self, labels: &[String]) -> Result<Vec<Ballot>, PollError> {
        if labels.is_empty() {
            return Ok(Vec::new());
        }

        let mut records = self.load_records().await?;

        let cast_at = Utc::now();
        let added: Vec<Ballot> = labels
            .iter()
            .map(|label| Ballot::new(label.clone(), cast_at))
            .collect();
        for ballot in &added {
            records.push(serde_json::to_value(ballot)?);
        }

        let payload = serde_json::to_string(&records)?;
        self.store.set(BALLOTS_KEY, &payload).await?;

        info!("Recorded {} ballot(s) at {}", added.len(), cast_at.to_rfc3339());
        Ok(added)
    }

    pub async fn all(&self) -> Vec<Ballot> {
        let raw = match read_or_absent(self.store.as_ref(), BALLOTS_KEY).await {
            Some(raw) => raw,
            None => return Vec::new(),
        };
        match parse_records(&raw) {
            Some(records) => decode(records),
            None => {
                warn!("Stored ballots are corrupt, treating log as empty");
                Vec::new()
            }
        }
    }

    pub async fn count(&self) -> usize {
        self.all().await.len()
    }

    /// Drops every ballot. Poll settings are untouched.
    pub async fn clear(&self) -> Result<(), PollError> {
        self.store.remove(BALLOTS_KEY).await?;
        info!("Ballot log cleared");
        Ok(())
    }
}
