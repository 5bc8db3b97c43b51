use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Storage keys
pub const TITLE_KEY: &str = "app_title";
pub const CREDENTIAL_KEY: &str = "admin_password";
pub const MODE_KEY: &str = "app_config";
pub const OPTIONS_KEY: &str = "app_options";
pub const BALLOTS_KEY: &str = "poll_votes";
pub const CORRUPT_BALLOTS_KEY: &str = "poll_votes_corrupt";

pub const DEFAULT_TITLE: &str = "目標與策略";
pub const DEFAULT_CREDENTIAL: &str = "admin123";
pub const DEFAULT_MAX_SELECTIONS: i64 = 3;

pub const DEFAULT_OPTIONS: [&str; 8] = [
    "滿足所有持分者需要",
    "全體參與",
    "凝聚全校共識",
    "清晰的教學目標",
    "協同效應",
    "可見的教學成效",
    "整合內化",
    "與天主聖神一起工作",
];

pub fn default_options() -> Vec<String> {
    DEFAULT_OPTIONS.iter().map(|o| o.to_string()).collect()
}

/// How many options a single ballot may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionMode {
    pub multi_select: bool,
    // Signed so that out-of-range values written by older clients survive a read.
    pub max_selections: i64,
}

impl Default for SelectionMode {
    fn default() -> Self {
        Self {
            multi_select: false,
            max_selections: DEFAULT_MAX_SELECTIONS,
        }
    }
}

impl SelectionMode {
    /// The number of options a ballot may hold given the current option count.
    pub fn effective_limit(&self, option_count: usize) -> usize {
        if !self.multi_select {
            return 1;
        }
        let upper = option_count.max(1) as i64;
        self.max_selections.clamp(1, upper) as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollConfig {
    pub title: String,
    pub options: Vec<String>,
    pub mode: SelectionMode,
    pub credential: String,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            options: default_options(),
            mode: SelectionMode::default(),
            credential: DEFAULT_CREDENTIAL.to_string(),
        }
    }
}

/// One recorded choice. A multi-select submission is stored as several ballots
/// sharing the same timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    #[serde(rename = "option")]
    pub label: String,
    #[serde(rename = "timestamp")]
    pub cast_at: DateTime<Utc>,
}

impl Ballot {
    pub fn new(label: impl Into<String>, cast_at: DateTime<Utc>) -> Self {
        Self {
            label: label.into(),
            cast_at,
        }
    }
}
