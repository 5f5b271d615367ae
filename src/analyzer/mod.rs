//! Risk analysis over contract text
//!
//! Pure scan of the input text against the keyword rule set: each triggered
//! rule contributes its label once, the score is a capped linear function of
//! the match count, and the severity level falls out of fixed thresholds.

use crate::rules::RuleSet;
use regex::NoExpand;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Points contributed by each distinct matched keyword
pub const SCORE_PER_MATCH: u32 = 20;
/// Upper bound on the risk score
pub const MAX_SCORE: u32 = 100;
/// Scores at or above this are High risk
pub const HIGH_THRESHOLD: u32 = 60;
/// Scores at or above this (and below High) are Medium risk
pub const MEDIUM_THRESHOLD: u32 = 30;

/// Coarse severity bucket derived from the risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Classify a score; boundaries are inclusive on the higher band
    pub fn from_score(score: u32) -> Self {
        if score >= HIGH_THRESHOLD {
            RiskLevel::High
        } else if score >= MEDIUM_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

/// Outcome of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// One label per triggered keyword, in rule-set order
    pub matched_labels: Vec<String>,

    /// Labels found per risk category
    pub categories: BTreeMap<String, Vec<String>>,

    /// Risk score in 0..=100
    pub score: u32,

    /// Severity bucket for the score
    pub level: RiskLevel,

    /// Input text with every keyword occurrence wrapped as `**UPPER**`
    pub highlighted: String,
}

/// Analyze contract text against a rule set.
///
/// Detection is case-insensitive substring membership: each rule fires at
/// most once no matter how often its trigger occurs. Highlighting replaces
/// every occurrence, also case-insensitively.
pub fn analyze(text: &str, rules: &RuleSet) -> AnalysisResult {
    let lowered = text.to_lowercase();

    let mut matched_labels = Vec::new();
    let mut categories: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for rule in rules.rules() {
        if lowered.contains(&rule.trigger) {
            matched_labels.push(rule.label.clone());
            categories
                .entry(rule.category.clone())
                .or_default()
                .push(rule.label.clone());
        }
    }

    let score = (matched_labels.len() as u32 * SCORE_PER_MATCH).min(MAX_SCORE);
    let level = RiskLevel::from_score(score);

    let mut highlighted = text.to_string();
    for rule in rules.rules() {
        let emphasis = format!("**{}**", rule.trigger.to_uppercase());
        highlighted = rule
            .highlight
            .replace_all(&highlighted, NoExpand(&emphasis))
            .to_string();
    }

    AnalysisResult {
        matched_labels,
        categories,
        score,
        level,
        highlighted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> RuleSet {
        RuleSet::builtin().unwrap()
    }

    #[test]
    fn test_no_keywords_is_low_risk() {
        let result = analyze("This is a simple agreement with no risky terms.", &rules());
        assert!(result.matched_labels.is_empty());
        assert_eq!(result.score, 0);
        assert_eq!(result.level, RiskLevel::Low);
    }

    #[test]
    fn test_three_keywords_is_high_risk() {
        let text =
            "The vendor may terminate this agreement. Liability is capped. Jurisdiction: Delaware.";
        let result = analyze(text, &rules());

        assert_eq!(
            result.matched_labels,
            vec!["Liability", "Termination", "Jurisdiction"]
        );
        assert_eq!(result.score, 60);
        assert_eq!(result.level, RiskLevel::High);
    }

    #[test]
    fn test_score_is_capped_at_100() {
        let text = "penalty liability terminate indemnity jurisdiction arbitration non-compete";
        let result = analyze(text, &rules());

        assert_eq!(result.matched_labels.len(), 7);
        assert_eq!(result.score, 100);
        assert_eq!(result.level, RiskLevel::High);
    }

    #[test]
    fn test_repeated_keyword_counts_once() {
        let result = analyze("penalty, penalty, and another penalty", &rules());
        assert_eq!(result.matched_labels, vec!["Penalty"]);
        assert_eq!(result.score, 20);
    }

    #[test]
    fn test_detection_inside_larger_word() {
        // Substring membership, not word-boundary matching.
        let result = analyze("the reliability of the system", &rules());
        assert_eq!(result.matched_labels, vec!["Liability"]);
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(RiskLevel::from_score(0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(29), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(30), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(59), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(60), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(100), RiskLevel::High);
    }

    #[test]
    fn test_category_breakdown() {
        let text = "Arbitration and jurisdiction clauses, plus a penalty for late delivery.";
        let result = analyze(text, &rules());

        assert_eq!(result.categories["Financial"], vec!["Penalty"]);
        assert_eq!(result.categories["Legal"], vec!["Jurisdiction", "Arbitration"]);
        assert!(!result.categories.contains_key("Operational"));
    }

    #[test]
    fn test_highlighting_is_case_insensitive() {
        let result = analyze("Liability is capped. LIABILITY survives.", &rules());
        assert_eq!(
            result.highlighted,
            "**LIABILITY** is capped. **LIABILITY** survives."
        );
    }

    #[test]
    fn test_empty_text_unchanged() {
        let result = analyze("", &rules());
        assert!(result.matched_labels.is_empty());
        assert_eq!(result.score, 0);
        assert_eq!(result.level, RiskLevel::Low);
        assert_eq!(result.highlighted, "");
    }

    #[test]
    fn test_analyze_is_deterministic() {
        let text = "Indemnity and arbitration apply.";
        let first = analyze(text, &rules());
        let second = analyze(text, &rules());
        assert_eq!(first, second);
    }
}
