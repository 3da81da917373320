//! Persistence of pipeline results as delimited tables and JSON.
//!
//! Writes `forecast_table.csv`, `accuracy_summary.csv` and `report.json`
//! into an output directory.

use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::{self, File};
use std::path::Path;
use tracing::{debug, info};

use crate::accuracy::types::CityAccuracySummary;
use crate::forecast::table::ForecastTable;
use crate::forecast::types::LeadTime;
use crate::pipeline::PipelineOutput;

pub const TABLE_FILE: &str = "forecast_table.csv";
pub const SUMMARY_FILE: &str = "accuracy_summary.csv";
pub const REPORT_FILE: &str = "report.json";

const LEAD_COLUMNS: [&str; 7] = [
    "Temp_Max",
    "Temp_Min",
    "Temp_Avg",
    "Humidity",
    "Weather",
    "Rain_Probability",
    "Weather_Score",
];

/// Writes all three outputs into `dir`, creating it if needed.
#[tracing::instrument(skip(dir, output), fields(dir = %dir.display()))]
pub fn write_outputs(dir: &Path, output: &PipelineOutput) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    write_table(&dir.join(TABLE_FILE), &output.table)?;
    write_summaries(&dir.join(SUMMARY_FILE), &output.summaries)?;
    write_json(&dir.join(REPORT_FILE), &output.report)?;

    info!("Outputs written");
    Ok(())
}

/// Writes the wide table, one row per (city, date). Absent lead times are empty cells.
pub fn write_table(path: &Path, table: &ForecastTable) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = WriterBuilder::new().from_writer(file);

    let mut header = vec![
        "Ville".to_string(),
        "Latitude".to_string(),
        "Longitude".to_string(),
        "Date".to_string(),
    ];
    for lead in LeadTime::all() {
        header.extend(LEAD_COLUMNS.iter().map(|c| format!("{c}_{lead}")));
    }
    writer.write_record(&header)?;

    for row in table.rows() {
        let mut record = vec![
            row.city.clone(),
            row.latitude.to_string(),
            row.longitude.to_string(),
            row.date.format("%Y-%m-%d").to_string(),
        ];
        for lead in LeadTime::all() {
            match row.lead(lead) {
                Some(v) => record.extend([
                    v.temp_max.to_string(),
                    v.temp_min.to_string(),
                    v.temp_avg.to_string(),
                    v.humidity.to_string(),
                    v.weather.clone(),
                    v.rain_probability.to_string(),
                    v.weather_score.to_string(),
                ]),
                None => record.extend(std::iter::repeat_n(String::new(), LEAD_COLUMNS.len())),
            }
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    debug!(path = %path.display(), rows = table.len(), "Forecast table written");
    Ok(())
}

/// Writes `Ville, Accuracy_2..5_mean, Mean_Accuracy, Latitude, Longitude`.
pub fn write_summaries(path: &Path, summaries: &[CityAccuracySummary]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

    for summary in summaries {
        writer.serialize(summary)?;
    }

    writer.flush()?;
    debug!(path = %path.display(), rows = summaries.len(), "Accuracy summary written");
    Ok(())
}

/// Serializes `value` as pretty JSON to `path`.
pub fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    let body = serde_json::to_vec_pretty(value)?;
    fs::write(path, body).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
