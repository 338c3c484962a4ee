//! Persistent high-score list
//!
//! The whole list lives in one JSON file holding an array of records. It is
//! read once on open and rewritten in full on every change.

use super::record::ScoreRecord;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// File name used when no explicit path is given
pub const DEFAULT_SCORES_FILE: &str = "snake_scores.json";

pub struct ScoreStore {
    path: PathBuf,
    records: Vec<ScoreRecord>,
}

impl ScoreStore {
    /// Open the store at `path`, loading whatever is already saved there
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let records = Self::load(&path);
        Self { path, records }
    }

    /// Read saved records; a missing or unreadable file counts as no scores
    pub fn load(path: &Path) -> Vec<ScoreRecord> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                warn!(?path, %err, "failed to read saved scores");
                return Vec::new();
            }
        };

        match serde_json::from_str(&json) {
            Ok(records) => records,
            Err(err) => {
                warn!(?path, %err, "ignoring malformed saved scores");
                Vec::new()
            }
        }
    }

    /// Replace the stored list with `records`
    pub fn save(&mut self, records: Vec<ScoreRecord>) -> Result<()> {
        self.records = records;
        self.persist()
    }

    pub fn append(&mut self, record: ScoreRecord) -> Result<()> {
        info!(name = %record.name, score = record.score, "saving score");
        self.records.push(record);
        self.persist()
    }

    pub fn clear(&mut self) -> Result<()> {
        info!(count = self.records.len(), "clearing saved scores");
        self.records.clear();
        self.persist()
    }

    /// Sort best first. The new order is what the next write stores.
    pub fn sort_for_display(&mut self) -> &[ScoreRecord] {
        self.records.sort_by(|a, b| b.score.cmp(&a.score));
        &self.records
    }

    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }

    pub fn best_score(&self) -> u32 {
        self.records.iter().map(|r| r.score).max().unwrap_or(0)
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
        }

        let json =
            serde_json::to_string_pretty(&self.records).context("Failed to serialize scores")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write scores to {:?}", self.path))?;
        Ok(())
    }
}
