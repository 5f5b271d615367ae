use crate::config::Config;
use crate::error::{ClausewiseError, Result, ValidationError};

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration
    pub fn validate(config: &Config) -> Result<()> {
        let mut errors = Vec::new();

        // Validate schema version
        Self::validate_schema_version(config, &mut errors);

        // Validate storage settings
        Self::validate_storage(config, &mut errors);

        // Validate rule file path
        Self::validate_rules(config, &mut errors);

        // Validate report settings
        Self::validate_report(config, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ClausewiseError::ConfigValidation { errors })
        }
    }

    fn validate_schema_version(config: &Config, errors: &mut Vec<ValidationError>) {
        let version = &config.meta.schema_version;
        if version != "1.0.0" {
            errors.push(ValidationError::new(
                "_meta.schema_version",
                format!("Unsupported schema version: {}", version),
            ));
        }
    }

    fn validate_storage(config: &Config, errors: &mut Vec<ValidationError>) {
        if config.storage.data_dir.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "storage.data_dir",
                "Data directory path cannot be empty",
            ));
        }

        if config.storage.history_file.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "storage.history_file",
                "History file path cannot be empty",
            ));
        }

        if config.storage.upload_dir.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "storage.upload_dir",
                "Upload directory path cannot be empty",
            ));
        }

        if config.storage.report_dir.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "storage.report_dir",
                "Report directory path cannot be empty",
            ));
        }
    }

    fn validate_rules(config: &Config, errors: &mut Vec<ValidationError>) {
        // Note: keyword file existence is not checked here because:
        // 1. Paths may contain ~ which needs expansion
        // 2. The file may not exist yet (created by `clausewise config init`)
        // 3. RuleSet loading falls back to the built-in rules

        if config.rules.keywords_file.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "rules.keywords_file",
                "Keywords file path cannot be empty",
            ));
        }
    }

    fn validate_report(config: &Config, errors: &mut Vec<ValidationError>) {
        let format = &config.report.format;
        let valid_formats = ["markdown"];
        if !valid_formats.contains(&format.as_str()) {
            errors.push(ValidationError::new(
                "report.format",
                format!(
                    "Format must be one of {:?}, got '{}'",
                    valid_formats, format
                ),
            ));
        }
    }
}
