pub mod tally;

use crate::models::{Ballot, PollConfig};

// Count for one option row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TallyEntry {
    pub label: String,
    pub count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Descending,
    Ascending,
}

// Everything the statistics view shows for one refresh
#[derive(Debug, Clone, PartialEq)]
pub struct PollStats {
    pub title: String,
    pub total_ballots: usize,
    pub option_count: usize,
    pub entries: Vec<TallyEntry>,
}

impl PollStats {
    pub fn collect(config: &PollConfig, ballots: &[Ballot]) -> Self {
        let entries = tally::tally(config, ballots);
        Self {
            title: config.title.clone(),
            total_ballots: ballots.len(),
            option_count: entries.len(),
            entries,
        }
    }

    pub fn percentage(&self, entry: &TallyEntry) -> f64 {
        tally::percentage(entry.count, self.total_ballots)
    }

    pub fn sorted(&self, order: SortOrder) -> Vec<TallyEntry> {
        tally::sort_for_display(&self.entries, order)
    }
}
