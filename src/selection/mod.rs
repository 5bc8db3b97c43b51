use log::{debug, info};

use crate::ballots::BallotLog;
use crate::error::PollError;
use crate::models::{Ballot, PollConfig, SelectionMode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    Selected,
    Deselected,
    /// Single-select: the previous choice was swapped out.
    Replaced { previous: String },
    /// Multi-select limit reached; the selection is unchanged.
    LimitReached { limit: usize },
    UnknownOption,
}

impl ToggleOutcome {
    pub fn is_rejected(&self) -> bool {
        matches!(
            self,
            ToggleOutcome::LimitReached { .. } | ToggleOutcome::UnknownOption
        )
    }
}

/// A ballot being composed, constrained by the poll's selection mode.
#[derive(Debug, Clone)]
pub struct SelectionController {
    options: Vec<String>,
    mode: SelectionMode,
    selected: Vec<String>,
}

impl SelectionController {
    pub fn new(config: &PollConfig) -> Self {
        Self {
            options: config.options.clone(),
            mode: config.mode,
            selected: Vec::new(),
        }
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn limit(&self) -> usize {
        self.mode.effective_limit(self.options.len())
    }

    pub fn is_limit_reached(&self) -> bool {
        self.mode.multi_select && self.selected.len() >= self.limit()
    }

    pub fn toggle(&mut self, label: &str) -> ToggleOutcome {
        if let Some(pos) = self.selected.iter().position(|s| s == label) {
            self.selected.remove(pos);
            return ToggleOutcome::Deselected;
        }

        if !self.options.iter().any(|o| o == label) {
            debug!("Ignoring toggle for unknown option {:?}", label);
            return ToggleOutcome::UnknownOption;
        }

        if !self.mode.multi_select {
            let previous = std::mem::replace(&mut self.selected, vec![label.to_string()]);
            return match previous.into_iter().next() {
                Some(previous) => ToggleOutcome::Replaced { previous },
                None => ToggleOutcome::Selected,
            };
        }

        let limit = self.limit();
        if self.selected.len() >= limit {
            debug!("Selection limit of {} reached, rejecting {:?}", limit, label);
            return ToggleOutcome::LimitReached { limit };
        }

        self.selected.push(label.to_string());
        ToggleOutcome::Selected
    }

    /// Submits the current selection and starts a fresh ballot.
    pub async fn commit(&mut self, log: &BallotLog) -> Result<Vec<Ballot>, PollError> {
        if self.selected.is_empty() {
            return Err(PollError::EmptySelection);
        }

        let recorded = log.append(&self.selected).await?;
        info!("Committed ballot with {} selection(s)", recorded.len());
        self.selected.clear();
        Ok(recorded)
    }
}
