//! Clausewise - Contract Risk Analysis CLI
//!
//! A command-line tool that scans contract text against a configurable set of
//! risk keywords, derives a risk score and severity level, renders a
//! highlighted preview and a markdown report, and keeps a JSON-backed history
//! of past analyses.

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod ingest;
pub mod report;
pub mod rules;

pub use error::{ClausewiseError, Result};
