//! Report artifacts and history export
//!
//! Renders one markdown report per analysis run under the report directory
//! and serializes filtered history views to CSV for external consumption.

use crate::analyzer::AnalysisResult;
use crate::error::{ClausewiseError, Result};
use crate::history::HistoryRecord;
use chrono::Utc;
use std::path::{Path, PathBuf};

/// Fixed recommendations printed on every report
const RECOMMENDATIONS: &[&str] = &[
    "Cap liabilities",
    "Reduce penalties",
    "Review jurisdiction",
    "Mutual termination",
];

/// Render the markdown report body for one analysis run
pub fn render_markdown(filename: &str, result: &AnalysisResult) -> String {
    let mut out = Vec::new();
    out.push(format!("# Contract Risk Report: {}", filename));
    out.push(String::new());
    out.push(format!("- Risk Score: **{}/100**", result.score));
    out.push(format!("- Risk Level: **{}**", result.level));
    out.push(format!("- Detected Clauses: {}", result.matched_labels.len()));
    out.push(String::new());

    if !result.matched_labels.is_empty() {
        out.push("## Detected Clauses".to_string());
        out.push(String::new());
        out.push("| Category | Clauses |".to_string());
        out.push("|---|---|".to_string());
        for (category, labels) in &result.categories {
            out.push(format!("| {} | {} |", category, labels.join(", ")));
        }
        out.push(String::new());
    }

    out.push("## Recommendations".to_string());
    out.push(String::new());
    for recommendation in RECOMMENDATIONS {
        out.push(format!("- {}", recommendation));
    }
    out.push(String::new());

    out.join("\n")
}

/// Write the report artifact for one analysis run.
///
/// The file lands under `report_dir` with a timestamp-derived name; the
/// returned path is what the history record stores.
pub fn write_report(
    filename: &str,
    result: &AnalysisResult,
    report_dir: &Path,
) -> Result<PathBuf> {
    std::fs::create_dir_all(report_dir).map_err(|e| ClausewiseError::Io {
        source: e,
        context: format!(
            "Failed to create report directory: {}",
            report_dir.display()
        ),
    })?;

    let stem: String = filename
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    let path = report_dir.join(format!(
        "report_{}_{}.md",
        Utc::now().format("%Y%m%d_%H%M%S"),
        stem
    ));

    let content = render_markdown(filename, result);
    std::fs::write(&path, content).map_err(|e| ClausewiseError::Io {
        source: e,
        context: format!("Failed to write report: {}", path.display()),
    })?;

    Ok(path)
}

/// Serialize a history view to CSV with columns filename,risk,score,time
pub fn render_history_csv(records: &[&HistoryRecord]) -> Result<String> {
    let mut wtr = csv::WriterBuilder::new().from_writer(vec![]);
    wtr.write_record(["filename", "risk", "score", "time"])?;
    for record in records {
        wtr.write_record(&[
            record.filename.clone(),
            record.risk.to_string(),
            record.score.to_string(),
            record.time.clone(),
        ])?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| ClausewiseError::Io {
            source: e.into_error(),
            context: "Failed to finalize CSV output".to_string(),
        })?;
    Ok(String::from_utf8_lossy(&bytes).replace("\r\n", "\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{analyze, RiskLevel};
    use crate::rules::RuleSet;
    use tempfile::TempDir;

    #[test]
    fn test_render_markdown_includes_breakdown() {
        let rules = RuleSet::builtin().unwrap();
        let result = analyze("Arbitration applies; liability is capped.", &rules);

        let md = render_markdown("msa.txt", &result);
        assert!(md.contains("# Contract Risk Report: msa.txt"));
        assert!(md.contains("Risk Score: **40/100**"));
        assert!(md.contains("| Legal | Liability, Arbitration |"));
        assert!(md.contains("- Cap liabilities"));
    }

    #[test]
    fn test_write_report_creates_file() {
        let temp_dir = TempDir::new().unwrap();
        let rules = RuleSet::builtin().unwrap();
        let result = analyze("penalty clause", &rules);

        let path = write_report("vendor contract.txt", &result, temp_dir.path()).unwrap();

        assert!(path.exists());
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Risk Level: **Low**"));
    }

    #[test]
    fn test_history_csv_shape() {
        let record = HistoryRecord {
            filename: "a.txt".to_string(),
            risk: RiskLevel::Medium,
            score: 40,
            time: "01 Jan 2026 12:00".to_string(),
            report_path: "reports/r.md".to_string(),
            upload_path: String::new(),
        };

        let csv = render_history_csv(&[&record]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("filename,risk,score,time"));
        assert_eq!(lines.next(), Some("a.txt,Medium,40,01 Jan 2026 12:00"));
    }
}
