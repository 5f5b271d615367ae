//! Analysis history
//!
//! An ordered, append-only collection of past analysis records backed by a
//! single JSON file. The store owns the file: it is loaded once at startup
//! and rewritten wholesale after every mutation. Writes go through a temp
//! file and an atomic rename so an interrupted write leaves the previous
//! state intact. Single logical writer; no locking.

use crate::analyzer::{AnalysisResult, RiskLevel};
use crate::error::{ClausewiseError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One persisted analysis outcome plus artifact metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Display name of the source (uploaded file name or sample label)
    pub filename: String,

    /// Risk level at analysis time
    pub risk: RiskLevel,

    /// Risk score at analysis time
    pub score: u32,

    /// Human-readable timestamp of the analysis
    pub time: String,

    /// Path of the generated report artifact
    #[serde(rename = "report")]
    pub report_path: String,

    /// Path of the retained upload, empty when a sample was analyzed
    #[serde(rename = "upload")]
    pub upload_path: String,
}

impl HistoryRecord {
    /// Build a record from an analysis outcome and its artifact paths
    pub fn from_analysis(
        filename: impl Into<String>,
        result: &AnalysisResult,
        time: impl Into<String>,
        report_path: impl Into<String>,
        upload_path: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            risk: result.level,
            score: result.score,
            time: time.into(),
            report_path: report_path.into(),
            upload_path: upload_path.into(),
        }
    }
}

/// JSON-file-backed store of analysis records
#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    records: Vec<HistoryRecord>,
}

impl HistoryStore {
    /// Load the store from its backing file.
    ///
    /// A missing file yields an empty store; a file that exists but does not
    /// parse as a record array is a [`ClausewiseError::CorruptHistory`].
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !path.exists() {
            return Ok(Self {
                path,
                records: Vec::new(),
            });
        }

        let content = std::fs::read_to_string(&path).map_err(|e| ClausewiseError::Io {
            source: e,
            context: format!("Failed to read history file: {}", path.display()),
        })?;
        let records =
            serde_json::from_str(&content).map_err(|e| ClausewiseError::CorruptHistory {
                path: path.clone(),
                source: e,
            })?;

        Ok(Self { path, records })
    }

    /// Records in insertion order
    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a record and persist
    pub fn append(&mut self, record: HistoryRecord) -> Result<()> {
        self.records.push(record);
        self.persist()
    }

    /// Remove the first record structurally equal to `record` and persist.
    ///
    /// Returns `false` (without touching the file) when no such record
    /// exists.
    pub fn remove(&mut self, record: &HistoryRecord) -> Result<bool> {
        match self.records.iter().position(|r| r == record) {
            Some(idx) => {
                self.records.remove(idx);
                self.persist()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Drop all records and persist
    pub fn clear(&mut self) -> Result<()> {
        self.records.clear();
        self.persist()
    }

    /// Case-insensitive substring filter over `filename`, insertion order
    /// preserved
    pub fn filter(&self, query: &str) -> Vec<&HistoryRecord> {
        let query = query.to_lowercase();
        self.records
            .iter()
            .filter(|r| r.filename.to_lowercase().contains(&query))
            .collect()
    }

    /// Aggregate view over all records
    pub fn stats(&self) -> HistoryStats {
        let total = self.records.len();
        let average_score = if total == 0 {
            0.0
        } else {
            self.records.iter().map(|r| r.score as f64).sum::<f64>() / total as f64
        };

        let mut by_level = BTreeMap::new();
        for record in &self.records {
            *by_level.entry(record.risk.to_string()).or_insert(0usize) += 1;
        }

        HistoryStats {
            total,
            average_score,
            by_level,
        }
    }

    /// Serialize the full collection and atomically replace the backing file
    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| ClausewiseError::Io {
                    source: e,
                    context: format!("Failed to create history directory: {}", parent.display()),
                })?;
            }
        }

        let content =
            serde_json::to_string_pretty(&self.records).map_err(|e| ClausewiseError::Json {
                source: e,
                context: "Failed to serialize history".to_string(),
            })?;

        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, content).map_err(|e| ClausewiseError::Io {
            source: e,
            context: format!("Failed to write history temp file: {}", tmp_path.display()),
        })?;
        std::fs::rename(&tmp_path, &self.path).map_err(|e| ClausewiseError::Io {
            source: e,
            context: format!("Failed to replace history file: {}", self.path.display()),
        })?;

        Ok(())
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Aggregates over the history, for the dashboard view
#[derive(Debug, Clone, Serialize)]
pub struct HistoryStats {
    pub total: usize,
    pub average_score: f64,
    pub by_level: BTreeMap<String, usize>,
}
