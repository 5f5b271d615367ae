//! Contract text sources
//!
//! Supplies plain text to the analyzer from either a bundled sample
//! contract or a plain-text file on disk, and retains a copy of analyzed
//! files in the upload directory.

use crate::error::{ClausewiseError, Result};
use std::path::{Path, PathBuf};

/// A sample contract bundled with the binary
#[derive(Debug, Clone, Copy)]
pub struct Sample {
    /// Name used to select the sample on the command line
    pub name: &'static str,
    /// Display label, stored as the record filename
    pub title: &'static str,
    /// Contract text
    pub text: &'static str,
}

/// Bundled sample contracts, mirroring the demo corpus
pub const SAMPLES: &[Sample] = &[
    Sample {
        name: "employment",
        title: "Employment",
        text: include_str!("../../samples/sample_employment.txt"),
    },
    Sample {
        name: "service",
        title: "Service",
        text: include_str!("../../samples/sample_service.txt"),
    },
    Sample {
        name: "vendor",
        title: "Vendor",
        text: include_str!("../../samples/sample_vendor.txt"),
    },
    Sample {
        name: "low-risk",
        title: "Low Risk",
        text: include_str!("../../samples/sample_low_risk.txt"),
    },
];

/// Look up a bundled sample by name, case-insensitively
pub fn sample_by_name(name: &str) -> Result<&'static Sample> {
    let wanted = name.to_lowercase();
    SAMPLES
        .iter()
        .find(|s| s.name == wanted)
        .ok_or_else(|| ClausewiseError::UnknownSample {
            name: name.to_string(),
        })
}

/// Read contract text from a plain-text file.
///
/// PDF extraction is out of scope; anything that is not UTF-8 text is
/// rejected rather than half-decoded.
pub fn read_contract(path: &Path) -> Result<String> {
    if matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("pdf") | Some("doc") | Some("docx")
    ) {
        return Err(ClausewiseError::UnsupportedInput {
            path: path.to_path_buf(),
        });
    }

    std::fs::read_to_string(path).map_err(|e| ClausewiseError::Io {
        source: e,
        context: format!("Failed to read contract file: {}", path.display()),
    })
}

/// Copy an analyzed file into the upload directory, returning the retained
/// path
pub fn retain_upload(path: &Path, upload_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(upload_dir).map_err(|e| ClausewiseError::Io {
        source: e,
        context: format!(
            "Failed to create upload directory: {}",
            upload_dir.display()
        ),
    })?;

    let file_name = path
        .file_name()
        .ok_or_else(|| ClausewiseError::UnsupportedInput {
            path: path.to_path_buf(),
        })?;
    let dest = upload_dir.join(file_name);

    std::fs::copy(path, &dest).map_err(|e| ClausewiseError::Io {
        source: e,
        context: format!("Failed to retain upload: {}", dest.display()),
    })?;

    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sample_lookup_case_insensitive() {
        let sample = sample_by_name("Low-Risk").unwrap();
        assert_eq!(sample.title, "Low Risk");
    }

    #[test]
    fn test_unknown_sample() {
        assert!(matches!(
            sample_by_name("lease"),
            Err(ClausewiseError::UnknownSample { .. })
        ));
    }

    #[test]
    fn test_samples_are_non_empty() {
        for sample in SAMPLES {
            assert!(!sample.text.trim().is_empty(), "{} is empty", sample.name);
        }
    }

    #[test]
    fn test_pdf_rejected() {
        let result = read_contract(Path::new("contract.pdf"));
        assert!(matches!(
            result,
            Err(ClausewiseError::UnsupportedInput { .. })
        ));
    }

    #[test]
    fn test_retain_upload_copies_file() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("nda.txt");
        std::fs::write(&source, "No risky terms here.").unwrap();

        let upload_dir = temp_dir.path().join("uploads");
        let retained = retain_upload(&source, &upload_dir).unwrap();

        assert_eq!(retained, upload_dir.join("nda.txt"));
        assert_eq!(
            std::fs::read_to_string(retained).unwrap(),
            "No risky terms here."
        );
    }
}
