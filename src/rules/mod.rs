//! Keyword rule registry for configuration-driven risk detection
//!
//! This module provides:
//! - Keyword rules loaded from a TOML configuration file
//! - A built-in default rule set embedded in the binary
//! - Pre-compiled case-insensitive highlight patterns per rule

use crate::error::{ClausewiseError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default rule set shipped with the binary, installed by `config init`.
pub const DEFAULT_KEYWORDS_TOML: &str = include_str!("../../config-templates/keywords.toml");

/// Keyword rule configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordConfig {
    /// Trigger token matched against lowercased contract text
    pub trigger: String,
    /// Risk category the rule contributes to (e.g. "Legal")
    pub category: String,
    /// Human-readable clause label (e.g. "Liability")
    pub label: String,
}

/// Keywords configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordsConfig {
    pub keyword: Vec<KeywordConfig>,
}

/// Compiled keyword rule with a pre-compiled highlight regex
#[derive(Debug, Clone)]
pub struct KeywordRule {
    /// Lowercased trigger token
    pub trigger: String,
    pub category: String,
    pub label: String,
    /// Case-insensitive literal matcher over the trigger
    pub highlight: Regex,
}

/// Registry of compiled keyword rules, in configuration order
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<KeywordRule>,
}

impl RuleSet {
    /// Load the rule set from a TOML configuration file
    pub fn from_config_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ClausewiseError::Io {
            source: e,
            context: format!("Failed to read keywords config: {:?}", path),
        })?;
        let config: KeywordsConfig = toml::from_str(&content)?;
        Self::from_config(config)
    }

    /// Build the rule set from a parsed configuration
    pub fn from_config(config: KeywordsConfig) -> Result<Self> {
        let mut rules = Vec::with_capacity(config.keyword.len());

        for keyword_cfg in &config.keyword {
            let trigger = keyword_cfg.trigger.trim().to_lowercase();
            if trigger.is_empty() {
                return Err(ClausewiseError::Config(format!(
                    "Empty trigger for keyword rule '{}'",
                    keyword_cfg.label
                )));
            }

            // Literal match, case-insensitive, no word boundaries: a trigger
            // inside a larger word still counts.
            let highlight =
                Regex::new(&format!("(?i){}", regex::escape(&trigger))).map_err(|e| {
                    ClausewiseError::Config(format!(
                        "Invalid trigger for keyword rule '{}': {}",
                        keyword_cfg.label, e
                    ))
                })?;

            rules.push(KeywordRule {
                trigger,
                category: keyword_cfg.category.clone(),
                label: keyword_cfg.label.clone(),
                highlight,
            });
        }

        Ok(Self { rules })
    }

    /// Build the built-in default rule set
    pub fn builtin() -> Result<Self> {
        let config: KeywordsConfig = toml::from_str(DEFAULT_KEYWORDS_TOML)?;
        Self::from_config(config)
    }

    /// Rules in configuration order
    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_rules_compile() {
        let rules = RuleSet::builtin().unwrap();
        assert_eq!(rules.len(), 7);
        assert!(rules.rules().iter().any(|r| r.trigger == "non-compete"));
    }

    #[test]
    fn test_trigger_lowercased_on_load() {
        let config = KeywordsConfig {
            keyword: vec![KeywordConfig {
                trigger: "  Penalty ".to_string(),
                category: "Financial".to_string(),
                label: "Penalty".to_string(),
            }],
        };

        let rules = RuleSet::from_config(config).unwrap();
        assert_eq!(rules.rules()[0].trigger, "penalty");
    }

    #[test]
    fn test_empty_trigger_rejected() {
        let config = KeywordsConfig {
            keyword: vec![KeywordConfig {
                trigger: "   ".to_string(),
                category: "Legal".to_string(),
                label: "Broken".to_string(),
            }],
        };

        assert!(RuleSet::from_config(config).is_err());
    }

    #[test]
    fn test_highlight_regex_is_case_insensitive() {
        let rules = RuleSet::builtin().unwrap();
        let liability = rules
            .rules()
            .iter()
            .find(|r| r.trigger == "liability")
            .unwrap();

        assert!(liability.highlight.is_match("LIABILITY"));
        assert!(liability.highlight.is_match("Liability"));
        assert!(liability.highlight.is_match("reliability"));
    }
}
