use lazy_static::lazy_static;
use log::{info, warn};
use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::error::{PollError, ValidationError};
use crate::models::{
    default_options, PollConfig, SelectionMode, CREDENTIAL_KEY, DEFAULT_CREDENTIAL, DEFAULT_TITLE,
    MODE_KEY, OPTIONS_KEY, TITLE_KEY,
};
use crate::store::{read_or_absent, KeyValueStore};

lazy_static! {
    // The regex crate has no lookahead, so the letter/digit requirement is checked separately.
    static ref CREDENTIAL_CHARSET: Regex = Regex::new(r"^[A-Za-z0-9]{1,8}$").unwrap();
    static ref HAS_LETTER: Regex = Regex::new(r"[A-Za-z]").unwrap();
    static ref HAS_DIGIT: Regex = Regex::new(r"[0-9]").unwrap();
}

/// Informational notice emitted when a requested selection limit had to be corrected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClampWarning {
    pub requested: i64,
    pub applied: i64,
    pub option_count: usize,
}

impl fmt::Display for ClampWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "maximum selections adjusted from {} to {} (cannot exceed the {} available options)",
            self.requested, self.applied, self.option_count
        )
    }
}

/// Outcome of the administrator's combined save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReport {
    pub config: PollConfig,
    pub warning: Option<ClampWarning>,
}

pub fn is_valid_credential(candidate: &str) -> bool {
    CREDENTIAL_CHARSET.is_match(candidate)
        && HAS_LETTER.is_match(candidate)
        && HAS_DIGIT.is_match(candidate)
}

pub fn filter_options(options: &[String]) -> Vec<String> {
    options
        .iter()
        .filter(|o| !o.trim().is_empty())
        .cloned()
        .collect()
}

/// Write-time correction of a selection mode against `option_count` options.
///
/// Only the "more than there are options" case produces a warning.
pub fn clamp_mode(mode: SelectionMode, option_count: usize) -> (SelectionMode, Option<ClampWarning>) {
    if !mode.multi_select {
        return (mode, None);
    }

    let mut clamped = mode;
    let mut warning = None;
    let count = option_count as i64;

    if clamped.max_selections > count {
        clamped.max_selections = count;
        warning = Some(ClampWarning {
            requested: mode.max_selections,
            applied: count,
            option_count,
        });
    }
    if clamped.max_selections < 1 {
        clamped.max_selections = 1;
        if let Some(w) = warning.as_mut() {
            w.applied = 1;
        }
    }

    (clamped, warning)
}

fn parse_options(raw: Option<String>) -> Vec<String> {
    let raw = match raw {
        Some(raw) => raw,
        None => return default_options(),
    };
    match serde_json::from_str::<Vec<String>>(&raw) {
        Ok(options) => options,
        Err(e) => {
            warn!("Stored options are corrupt, using defaults: {}", e);
            default_options()
        }
    }
}

fn parse_mode(raw: &str) -> Option<SelectionMode> {
    let value: Value = serde_json::from_str(raw).ok()?;
    let fields = value.as_object()?;
    let defaults = SelectionMode::default();

    let multi_select = fields
        .get("multiSelect")
        .or_else(|| fields.get("enableMultiSelect"))
        .and_then(Value::as_bool)
        .unwrap_or(defaults.multi_select);
    let max_selections = fields
        .get("maxSelections")
        .and_then(Value::as_i64)
        .unwrap_or(defaults.max_selections);

    Some(SelectionMode {
        multi_select,
        max_selections,
    })
}

/// Owns the persisted poll settings.
#[derive(Clone)]
pub struct ConfigRepository {
    store: Arc<dyn KeyValueStore>,
}

impl ConfigRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn get_config(&self) -> PollConfig {
        PollConfig {
            title: self.get_title().await,
            options: self.get_options().await,
            mode: self.get_selection_mode().await,
            credential: self.get_credential().await,
        }
    }

    pub async fn get_title(&self) -> String {
        match read_or_absent(self.store.as_ref(), TITLE_KEY).await {
            Some(title) if !title.is_empty() => title,
            _ => DEFAULT_TITLE.to_string(),
        }
    }

    pub async fn set_title(&self, title: &str) -> Result<(), PollError> {
        self.store.set(TITLE_KEY, title).await?;
        info!("Poll title set to {:?}", title);
        Ok(())
    }

    pub async fn get_options(&self) -> Vec<String> {
        parse_options(read_or_absent(self.store.as_ref(), OPTIONS_KEY).await)
    }

    /// Persists the non-blank entries of `options` and returns what was written.
    pub async fn set_options(&self, options: &[String]) -> Result<Vec<String>, PollError> {
        let filtered = filter_options(options);
        let payload = serde_json::to_string(&filtered)?;
        self.store.set(OPTIONS_KEY, &payload).await?;
        info!("Saved {} poll options", filtered.len());
        Ok(filtered)
    }

    pub async fn get_selection_mode(&self) -> SelectionMode {
        let raw = match read_or_absent(self.store.as_ref(), MODE_KEY).await {
            Some(raw) => raw,
            None => return SelectionMode::default(),
        };
        parse_mode(&raw).unwrap_or_else(|| {
            warn!("Stored selection mode is corrupt, using defaults");
            SelectionMode::default()
        })
    }

    /// Clamps `mode` against the current option count, then persists it.
    /// Nothing is written if the option list cannot be read.
    pub async fn set_selection_mode(
        &self,
        mode: SelectionMode,
    ) -> Result<Option<ClampWarning>, PollError> {
        let stored = self.store.get(OPTIONS_KEY).await?;
        let option_count = filter_options(&parse_options(stored)).len();
        let (clamped, warning) = clamp_mode(mode, option_count);
        self.write_mode(clamped).await?;
        Ok(warning)
    }

    async fn write_mode(&self, mode: SelectionMode) -> Result<(), PollError> {
        let payload = serde_json::to_string(&mode)?;
        self.store.set(MODE_KEY, &payload).await?;
        info!(
            "Selection mode saved: multi_select={}, max_selections={}",
            mode.multi_select, mode.max_selections
        );
        Ok(())
    }

    /// Saves title, options and selection mode together, clamping the mode
    /// against the filtered option list.
    pub async fn save(
        &self,
        title: &str,
        options: &[String],
        mode: SelectionMode,
    ) -> Result<SaveReport, PollError> {
        let filtered = filter_options(options);
        let (clamped, warning) = clamp_mode(mode, filtered.len());
        if let Some(w) = &warning {
            warn!("{}", w);
        }

        // Options before mode: if the last write fails, the stored limit is
        // still clamped at use time against whatever options were saved.
        self.set_title(title).await?;
        self.set_options(&filtered).await?;
        self.write_mode(clamped).await?;

        Ok(SaveReport {
            config: self.get_config().await,
            warning,
        })
    }

    async fn get_credential(&self) -> String {
        match read_or_absent(self.store.as_ref(), CREDENTIAL_KEY).await {
            Some(credential) if !credential.is_empty() => credential,
            _ => DEFAULT_CREDENTIAL.to_string(),
        }
    }

    pub async fn set_credential(&self, candidate: &str) -> Result<(), PollError> {
        if !is_valid_credential(candidate) {
            return Err(ValidationError::CredentialFormat.into());
        }
        self.store.set(CREDENTIAL_KEY, candidate).await?;
        info!("Admin password updated");
        Ok(())
    }

    pub async fn verify_credential(&self, candidate: &str) -> bool {
        self.get_credential().await == candidate
    }
}
