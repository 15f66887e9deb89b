use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
use serde::de::DeserializeOwned;

use crate::records::{
    MatchOutcomeRecord, MatchPlayerRecord, TeamSummaryRecord, TossSummaryRecord,
};

pub const MASTER_FILE: &str = "npl_master.csv";
pub const TEAM_SUMMARY_FILE: &str = "team_performance_summary.csv";
pub const TOSS_SUMMARY_FILE: &str = "toss_impact.csv";
pub const MATCH_RESULTS_FILE: &str = "match_level_results.csv";

/// The four tables the dashboard derives everything from.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub master: Vec<MatchPlayerRecord>,
    pub team_summary: Vec<TeamSummaryRecord>,
    pub toss_summary: Vec<TossSummaryRecord>,
    pub outcomes: Vec<MatchOutcomeRecord>,
}

/// Data directory resolution: CLI value, then NPL_DATA_DIR, then ./data.
pub fn resolve_data_dir(cli: Option<&str>) -> PathBuf {
    if let Some(dir) = cli {
        return PathBuf::from(dir);
    }
    if let Some(dir) = std::env::var("NPL_DATA_DIR")
        .ok()
        .filter(|v| !v.trim().is_empty())
    {
        return PathBuf::from(dir);
    }
    PathBuf::from("data")
}

pub fn load_dataset(dir: &Path) -> Result<Dataset> {
    let master = read_table(&dir.join(MASTER_FILE))?;
    let team_summary = read_table(&dir.join(TEAM_SUMMARY_FILE))?;
    let toss_summary = read_table(&dir.join(TOSS_SUMMARY_FILE))?;
    let outcomes = read_table(&dir.join(MATCH_RESULTS_FILE))?;
    info!(
        "loaded {} master rows, {} team summaries, {} toss summaries, {} outcome rows from {}",
        master.len(),
        team_summary.len(),
        toss_summary.len(),
        outcomes.len(),
        dir.display()
    );
    Ok(Dataset {
        master,
        team_summary,
        toss_summary,
        outcomes,
    })
}

/// Reads a table by extension: `.json` arrays or headered CSV.
pub fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => read_json(path),
        _ => read_csv(path),
    }
}

pub fn read_csv<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("open csv {}", path.display()))?;
    let mut out = Vec::new();
    for row in reader.deserialize() {
        out.push(row.with_context(|| format!("decode csv row in {}", path.display()))?);
    }
    Ok(out)
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let body =
        fs::read_to_string(path).with_context(|| format!("read json {}", path.display()))?;
    parse_json_rows(&body).with_context(|| format!("decode json {}", path.display()))
}

/// JSON export endpoints hand back `null` for an empty table; treat that
/// and a blank body as no rows.
pub fn parse_json_rows<T: DeserializeOwned>(body: &str) -> Result<Vec<T>> {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    serde_json::from_str(trimmed).context("invalid json table")
}
