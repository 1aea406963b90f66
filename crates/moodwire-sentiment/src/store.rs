//! Durable score records.
//!
//! A [`ScoreSink`] accepts a timestamped [`ScoreRecord`]. [`JsonLinesStore`]
//! appends records as JSON lines to one file per UTC day, named
//! `sentiment_analysis_scores_YYYYMMDD.jsonl`.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use moodwire_core::AggregationPolicy;
use serde::{Deserialize, Serialize};

use crate::error::SentimentError;
use crate::types::{PolarityScore, ScoredBatch, SentimentLabel};

/// One persisted aggregate score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub captured_at: DateTime<Utc>,
    pub score: PolarityScore,
    pub label: SentimentLabel,
    pub policy: AggregationPolicy,
    pub item_count: usize,
    /// Free-form description of what was scored, e.g. `headlines:us`.
    pub context: String,
}

impl ScoreRecord {
    #[must_use]
    pub fn from_batch(batch: &ScoredBatch, context: &str, captured_at: DateTime<Utc>) -> Self {
        Self {
            captured_at,
            score: batch.aggregate(),
            label: batch.label(),
            policy: batch.policy(),
            item_count: batch.len(),
            context: context.to_string(),
        }
    }
}

/// Somewhere score records can be saved.
pub trait ScoreSink {
    /// Persist one record.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Persistence`] or [`SentimentError::Encode`]
    /// when the record could not be stored.
    fn save(&self, record: &ScoreRecord) -> Result<(), SentimentError>;
}

/// Appends records to dated JSON-lines files inside one directory.
#[derive(Debug, Clone)]
pub struct JsonLinesStore {
    dir: PathBuf,
}

impl JsonLinesStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding the records captured on `date`.
    #[must_use]
    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(format!(
            "sentiment_analysis_scores_{}.jsonl",
            date.format("%Y%m%d")
        ))
    }

    /// Records captured on `date`. A day with no file has no records.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Persistence`] if the file exists but cannot
    /// be read, or [`SentimentError::Deserialize`] for a corrupt line.
    pub fn read_day(&self, date: NaiveDate) -> Result<Vec<ScoreRecord>, SentimentError> {
        let path = self.path_for(date);
        if !path.exists() {
            return Ok(Vec::new());
        }
        Self::read_file(&path)
    }

    /// Parse every record in a JSON-lines file.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Persistence`] if the file cannot be read, or
    /// [`SentimentError::Deserialize`] for a corrupt line.
    pub fn read_file(path: &Path) -> Result<Vec<ScoreRecord>, SentimentError> {
        let content = std::fs::read_to_string(path).map_err(|e| SentimentError::Persistence {
            path: path.display().to_string(),
            source: e,
        })?;
        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                serde_json::from_str(line).map_err(|e| SentimentError::Deserialize {
                    context: format!("{}:{}", path.display(), idx + 1),
                    source: e,
                })
            })
            .collect()
    }
}

impl ScoreSink for JsonLinesStore {
    fn save(&self, record: &ScoreRecord) -> Result<(), SentimentError> {
        let path = self.path_for(record.captured_at.date_naive());
        let persistence = |e: std::io::Error| SentimentError::Persistence {
            path: path.display().to_string(),
            source: e,
        };

        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        std::fs::create_dir_all(&self.dir).map_err(|e| SentimentError::Persistence {
            path: self.dir.display().to_string(),
            source: e,
        })?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(persistence)?;
        file.write_all(line.as_bytes()).map_err(persistence)?;

        tracing::debug!(path = %path.display(), context = %record.context, "saved score record");
        Ok(())
    }
}
