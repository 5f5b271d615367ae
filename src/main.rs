use clausewise::analyzer::{analyze, AnalysisResult};
use clausewise::cli::{Cli, Commands, ConfigAction};
use clausewise::config::Config;
use clausewise::error::{ClausewiseError, Result};
use clausewise::history::{HistoryRecord, HistoryStore};
use clausewise::ingest;
use clausewise::report;
use clausewise::rules::{RuleSet, DEFAULT_KEYWORDS_TOML};

fn main() -> Result<()> {
    // Initialize logging
    init_logging();

    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Handle commands
    match cli.command {
        Commands::Analyze {
            file,
            sample,
            json,
            no_report,
        } => {
            cmd_analyze(cli.config, file, sample, json, no_report)?;
        }
        Commands::History { search, json } => {
            cmd_history(cli.config, search, json)?;
        }
        Commands::Delete { index, search } => {
            cmd_delete(cli.config, index, search)?;
        }
        Commands::Clear => {
            cmd_clear(cli.config)?;
        }
        Commands::Export { output, search } => {
            cmd_export(cli.config, &output, search)?;
        }
        Commands::Stats => {
            cmd_stats(cli.config)?;
        }
        Commands::Samples => {
            cmd_samples();
        }
        Commands::Config { action } => {
            cmd_config(cli.config, action)?;
        }
    }

    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("clausewise=info"));

    fmt().with_env_filter(filter).with_target(false).init();
}

fn cmd_analyze(
    config_path: Option<std::path::PathBuf>,
    file: Option<std::path::PathBuf>,
    sample: Option<String>,
    json: bool,
    no_report: bool,
) -> Result<()> {
    let config = load_config(config_path)?;
    let rules = load_rules(&config)?;

    // Resolve the input text, its display name, and the retained upload path
    let (text, filename, upload_path) = match (&file, &sample) {
        (_, Some(name)) => {
            let sample = ingest::sample_by_name(name)?;
            (sample.text.to_string(), sample.title.to_string(), String::new())
        }
        (Some(path), None) => {
            let text = ingest::read_contract(path)?;
            let upload_dir = expand_path(&config.storage.upload_dir)?;
            let retained = ingest::retain_upload(path, &upload_dir)?;
            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            (text, filename, retained.display().to_string())
        }
        (None, None) => return Err(ClausewiseError::EmptyInput),
    };

    if text.trim().is_empty() {
        return Err(ClausewiseError::EmptyInput);
    }

    tracing::info!("Analyzing {} ({} rules)", filename, rules.len());
    let result = analyze(&text, &rules);

    let report_path = if no_report {
        String::new()
    } else {
        let report_dir = expand_path(&config.storage.report_dir)?;
        let path = report::write_report(&filename, &result, &report_dir)?;
        path.display().to_string()
    };

    let record = HistoryRecord::from_analysis(
        &filename,
        &result,
        chrono::Local::now().format("%d %b %Y %H:%M").to_string(),
        &report_path,
        &upload_path,
    );

    let history_file = expand_path(&config.storage.history_file)?;
    let mut store = HistoryStore::load(history_file)?;
    store.append(record)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).map_err(|e| ClausewiseError::Json {
                source: e,
                context: "Failed to serialize analysis result".to_string(),
            })?
        );
    } else {
        print_result(&filename, &result, &report_path);
    }

    Ok(())
}

fn print_result(filename: &str, result: &AnalysisResult, report_path: &str) {
    println!("Highlighted Clauses");
    println!("===================");
    println!("{}", result.highlighted);
    println!();
    println!("{}", filename);
    println!("  Risk Score: {}/100", result.score);
    println!("  Risk Level: {}", result.level);
    println!("  Detected Clauses: {}", result.matched_labels.len());

    if !result.categories.is_empty() {
        println!("\nCategory Risks:");
        for (category, labels) in &result.categories {
            println!("  {}: {}", category, labels.join(", "));
        }
    }

    if !report_path.is_empty() {
        println!("\n✓ Report written to: {}", report_path);
    }
}

fn cmd_history(
    config_path: Option<std::path::PathBuf>,
    search: Option<String>,
    json: bool,
) -> Result<()> {
    let config = load_config(config_path)?;
    let history_file = expand_path(&config.storage.history_file)?;
    let store = HistoryStore::load(history_file)?;

    let query = search.unwrap_or_default();
    let records = store.filter(&query);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&records).map_err(|e| ClausewiseError::Json {
                source: e,
                context: "Failed to serialize history".to_string(),
            })?
        );
        return Ok(());
    }

    if records.is_empty() {
        println!("No matching records.");
        return Ok(());
    }

    println!("History: {} record(s)", records.len());
    for (idx, record) in records.iter().enumerate() {
        println!(
            "  [{}] {} — {} ({}) — {}",
            idx, record.filename, record.risk, record.score, record.time
        );

        // Artifacts that no longer exist on disk are simply not offered.
        if !record.report_path.is_empty()
            && std::path::Path::new(&record.report_path).exists()
        {
            println!("      report: {}", record.report_path);
        }
        if !record.upload_path.is_empty()
            && std::path::Path::new(&record.upload_path).exists()
        {
            println!("      upload: {}", record.upload_path);
        }
    }

    Ok(())
}

fn cmd_delete(
    config_path: Option<std::path::PathBuf>,
    index: usize,
    search: Option<String>,
) -> Result<()> {
    let config = load_config(config_path)?;
    let history_file = expand_path(&config.storage.history_file)?;
    let mut store = HistoryStore::load(history_file)?;

    let query = search.unwrap_or_default();
    let record = store
        .filter(&query)
        .get(index)
        .map(|r| (*r).clone())
        .ok_or_else(|| {
            ClausewiseError::Other(anyhow::anyhow!(
                "No history record at index {} (run `clausewise history` to list)",
                index
            ))
        })?;

    if store.remove(&record)? {
        println!("✓ Deleted: {} — {} ({})", record.filename, record.risk, record.score);
    }

    Ok(())
}

fn cmd_clear(config_path: Option<std::path::PathBuf>) -> Result<()> {
    let config = load_config(config_path)?;
    let history_file = expand_path(&config.storage.history_file)?;
    let mut store = HistoryStore::load(history_file)?;

    let count = store.len();
    store.clear()?;
    println!("✓ Cleared {} record(s)", count);

    Ok(())
}

fn cmd_export(
    config_path: Option<std::path::PathBuf>,
    output: &std::path::Path,
    search: Option<String>,
) -> Result<()> {
    let config = load_config(config_path)?;
    let history_file = expand_path(&config.storage.history_file)?;
    let store = HistoryStore::load(history_file)?;

    let query = search.unwrap_or_default();
    let records = store.filter(&query);
    let csv = report::render_history_csv(&records)?;

    std::fs::write(output, csv).map_err(|e| ClausewiseError::Io {
        source: e,
        context: format!("Failed to write CSV export: {}", output.display()),
    })?;

    println!("✓ Exported {} record(s) to: {}", records.len(), output.display());

    Ok(())
}

fn cmd_stats(config_path: Option<std::path::PathBuf>) -> Result<()> {
    let config = load_config(config_path)?;
    let history_file = expand_path(&config.storage.history_file)?;
    let store = HistoryStore::load(history_file)?;

    if store.is_empty() {
        println!("No data yet.");
        return Ok(());
    }

    let stats = store.stats();
    println!("Clausewise Dashboard");
    println!("====================");
    println!("\nTotal Contracts: {}", stats.total);
    println!("Avg Risk Score: {:.1}", stats.average_score);

    println!("\nRisk Distribution:");
    for (level, count) in &stats.by_level {
        println!("  {}: {}", level, count);
    }

    Ok(())
}

fn cmd_samples() {
    println!("Bundled sample contracts:");
    for sample in ingest::SAMPLES {
        println!("  {:<12} {}", sample.name, sample.title);
    }
    println!("\nRun `clausewise analyze --sample <name>` to try one.");
}

fn cmd_config(config_path: Option<std::path::PathBuf>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = load_config(config_path)?;
            let json =
                serde_json::to_string_pretty(&config).map_err(|e| ClausewiseError::Json {
                    source: e,
                    context: "Failed to serialize config".to_string(),
                })?;
            println!("{}", json);
        }
        ConfigAction::Validate { file } => {
            let path = file.unwrap_or_else(|| Config::default_path().unwrap());
            let config = Config::load(&path)?;
            println!("✓ Configuration is valid");
            println!("  Schema version: {}", config.meta.schema_version);
        }
        ConfigAction::Init { force } => {
            let path = Config::default_path()?;

            if path.exists() && !force {
                println!("Configuration file already exists at: {}", path.display());
                println!("Use --force to overwrite");
                return Ok(());
            }

            // Create parent directory
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| ClausewiseError::Io {
                    source: e,
                    context: format!("Failed to create config directory: {:?}", parent),
                })?;
            }

            // Save default config
            let config = Config::default();
            config.save(&path)?;

            println!("✓ Configuration initialized at: {}", path.display());

            // Install the default keyword rules next to the config
            let keywords_path = path.parent().unwrap().join("keywords.toml");
            if force || !keywords_path.exists() {
                std::fs::write(&keywords_path, DEFAULT_KEYWORDS_TOML).map_err(|e| {
                    ClausewiseError::Io {
                        source: e,
                        context: format!("Failed to write keywords.toml: {:?}", keywords_path),
                    }
                })?;
            }

            println!("✓ Keyword rules installed");
            println!("  - keywords.toml: risk detection rules");
        }
    }

    Ok(())
}

fn load_config(config_path: Option<std::path::PathBuf>) -> Result<Config> {
    let path = config_path.unwrap_or_else(|| Config::default_path().unwrap());

    if !path.exists() {
        tracing::warn!(
            "Config file not found, using defaults. Run 'clausewise config init' to create one."
        );
        return Ok(Config::default());
    }

    Config::load(&path)
}

fn load_rules(config: &Config) -> Result<RuleSet> {
    let keywords_file = expand_path(&config.rules.keywords_file)?;

    if keywords_file.exists() {
        RuleSet::from_config_file(&keywords_file)
    } else {
        tracing::debug!(
            "Keywords file not found at {}, using built-in rules",
            keywords_file.display()
        );
        RuleSet::builtin()
    }
}

fn expand_path(path: &std::path::Path) -> Result<std::path::PathBuf> {
    let path_str = path
        .to_str()
        .ok_or_else(|| ClausewiseError::Config("Invalid path encoding".to_string()))?;

    if let Some(stripped) = path_str.strip_prefix("~/") {
        let home = dirs::home_dir().ok_or_else(|| {
            ClausewiseError::Config("Cannot determine home directory".to_string())
        })?;
        Ok(home.join(stripped))
    } else {
        Ok(path.to_path_buf())
    }
}
