use clausewise::analyzer::{analyze, RiskLevel};
use clausewise::ingest::SAMPLES;
use clausewise::report;
use clausewise::rules::RuleSet;
use tempfile::TempDir;

fn rules() -> RuleSet {
    RuleSet::builtin().expect("built-in rules should compile")
}

#[test]
fn test_risky_contract_scores_high() {
    let text =
        "The vendor may terminate this agreement. Liability is capped. Jurisdiction: Delaware.";
    let result = analyze(text, &rules());

    assert_eq!(result.score, 60);
    assert_eq!(result.level, RiskLevel::High);
    assert_eq!(
        result.matched_labels,
        vec!["Liability", "Termination", "Jurisdiction"]
    );

    // Every hit is emphasized in the preview, case-insensitively.
    assert!(result.highlighted.contains("**TERMINATE**"));
    assert!(result.highlighted.contains("**LIABILITY** is capped"));
    assert!(result.highlighted.contains("**JURISDICTION**: Delaware"));
}

#[test]
fn test_clean_contract_scores_zero() {
    let text = "This is a simple agreement with no risky terms.";
    let result = analyze(text, &rules());

    assert_eq!(result.score, 0);
    assert_eq!(result.level, RiskLevel::Low);
    assert!(result.matched_labels.is_empty());
    assert!(result.categories.is_empty());
    assert_eq!(result.highlighted, text);
}

#[test]
fn test_bundled_samples_cover_the_risk_bands() {
    let rules = rules();

    let vendor = SAMPLES.iter().find(|s| s.name == "vendor").unwrap();
    let vendor_result = analyze(vendor.text, &rules);
    assert_eq!(vendor_result.level, RiskLevel::High);
    assert_eq!(vendor_result.score, 100, "vendor sample trips five rules");

    let low = SAMPLES.iter().find(|s| s.name == "low-risk").unwrap();
    let low_result = analyze(low.text, &rules);
    assert_eq!(low_result.level, RiskLevel::Low);
    assert_eq!(low_result.score, 0);
}

#[test]
fn test_report_artifact_reflects_the_analysis() {
    let temp_dir = TempDir::new().expect("temp dir");
    let result = analyze(
        "Indemnity obligations survive. Disputes go to arbitration.",
        &rules(),
    );

    let path = report::write_report("msa.txt", &result, temp_dir.path())
        .expect("report should be written");
    let content = std::fs::read_to_string(&path).expect("report should be readable");

    assert!(content.contains("# Contract Risk Report: msa.txt"));
    assert!(content.contains("Risk Score: **40/100**"));
    assert!(content.contains("Risk Level: **Medium**"));
    assert!(content.contains("| Legal | Indemnity, Arbitration |"));
}

#[test]
fn test_custom_rule_file_overrides_builtin() {
    let temp_dir = TempDir::new().expect("temp dir");
    let keywords_path = temp_dir.path().join("keywords.toml");
    std::fs::write(
        &keywords_path,
        r#"
[[keyword]]
trigger = "force majeure"
category = "Operational"
label = "Force majeure"
"#,
    )
    .unwrap();

    let rules = RuleSet::from_config_file(&keywords_path).expect("custom rules should load");
    assert_eq!(rules.len(), 1);

    let result = analyze("Force Majeure events excuse performance.", &rules);
    assert_eq!(result.matched_labels, vec!["Force majeure"]);
    assert_eq!(result.categories["Operational"], vec!["Force majeure"]);
    assert!(result.highlighted.starts_with("**FORCE MAJEURE** events"));
}
