//! Loading and aligning per-lead-time forecast snapshots.
//!
//! Each snapshot file is parsed into validated records, sub-daily rows are
//! collapsed to one record per (city, date), and the five collections are
//! joined on that key into a [`table::ForecastTable`].

pub mod daily;
pub mod parser;
pub mod table;
pub mod types;

use anyhow::Result;
use std::path::Path;
use tracing::{info, warn};

use crate::error::PipelineIssue;
use daily::collapse_daily;
use parser::{ParsedSnapshot, load_snapshot};
use table::ForecastTable;
use types::{ForecastRecord, LeadTime};

/// Joined table and every row-level issue met while building it.
#[derive(Debug, Default)]
pub struct LoadedForecasts {
    pub table: ForecastTable,
    pub issues: Vec<PipelineIssue>,
}

/// Collapses and joins already-parsed snapshots.
pub fn align(snapshots: Vec<ParsedSnapshot>) -> LoadedForecasts {
    let mut issues = Vec::new();
    let mut records: Vec<ForecastRecord> = Vec::new();

    for snapshot in snapshots {
        issues.extend(snapshot.issues);
        records.extend(collapse_daily(snapshot.records));
    }

    LoadedForecasts {
        table: ForecastTable::join(records),
        issues,
    }
}

/// Reads the five snapshot files from `dir`.
///
/// `file_template` names each file, with `{lead}` replaced by the lead
/// time in days, e.g. `weather_data_forecast_{lead}day.csv`.
#[tracing::instrument(skip(dir), fields(dir = %dir.display()))]
pub fn load_dir(dir: &Path, file_template: &str) -> Result<LoadedForecasts> {
    let mut snapshots = Vec::new();

    for lead in LeadTime::all() {
        let name = file_template.replace("{lead}", &lead.to_string());
        let snapshot = load_snapshot(&dir.join(&name), lead)?;
        info!(
            lead_time = lead.days(),
            file = %name,
            records = snapshot.records.len(),
            rejected = snapshot.issues.len(),
            "Snapshot loaded"
        );
        snapshots.push(snapshot);
    }

    let loaded = align(snapshots);
    if loaded.table.is_empty() {
        warn!("No forecast rows survived loading");
    }
    Ok(loaded)
}
