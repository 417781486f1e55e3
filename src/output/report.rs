use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

use crate::scoring::ScoringResult;
use crate::sections::SectionFlags;

/// Scoring result bundled with the flags it was computed under, in the shape
/// handed to results persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsReport {
    pub generated_at: DateTime<Utc>,
    pub scoring: ScoringResult,
    pub sections_enabled: SectionFlags,
}

impl ResultsReport {
    pub fn new(scoring: ScoringResult, sections_enabled: SectionFlags) -> Self {
        Self {
            generated_at: Utc::now(),
            scoring,
            sections_enabled,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize results report")
    }
}

/// Save a results report to a JSON file atomically
///
/// Uses atomic-write-file so a reader never sees a half-written report.
pub fn write_report(path: &Path, report: &ResultsReport) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, report)
        .context("Failed to serialize results report")?;
    file.write_all(b"\n")
        .context("Failed to write results report")?;

    file.commit()
        .with_context(|| format!("Failed to save results report to {}", path.display()))?;

    Ok(())
}
