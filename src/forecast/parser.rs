//! CSV reader for one lead-time snapshot file.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::error::PipelineIssue;
use crate::forecast::types::{ForecastRecord, ForecastRow, LeadTime};
use crate::weather_score::weather_score;

/// Columns every snapshot must carry. `Weather_Score` and `Temp_Avg` may be absent.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "Ville",
    "Latitude",
    "Longitude",
    "Date",
    "Temp_Max",
    "Temp_Min",
    "Humidity",
    "Weather",
    "Rain_Probability",
];

/// Records accepted from one snapshot, plus the rows that were rejected.
#[derive(Debug, Default)]
pub struct ParsedSnapshot {
    pub records: Vec<ForecastRecord>,
    pub issues: Vec<PipelineIssue>,
}

/// Opens `path` and parses it as the snapshot for `lead_time`.
pub fn load_snapshot(path: &Path, lead_time: LeadTime) -> Result<ParsedSnapshot> {
    let file = File::open(path)
        .with_context(|| format!("opening lead time {lead_time} snapshot {}", path.display()))?;
    read_snapshot(file, lead_time)
        .with_context(|| format!("reading lead time {lead_time} snapshot {}", path.display()))
}

/// Parses a snapshot from any reader.
///
/// Columns are matched by header name and unknown columns are ignored.
/// Rows that fail to decode or validate are reported as issues; an unreadable
/// header, a missing required column or an I/O failure is an error.
pub fn read_snapshot<R: Read>(reader: R, lead_time: LeadTime) -> Result<ParsedSnapshot> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().context("reading CSV header")?.clone();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();
    if !missing.is_empty() {
        bail!("snapshot header is missing column(s): {}", missing.join(", "));
    }

    let mut parsed = ParsedSnapshot::default();

    for result in rdr.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or_default();
                parsed.issues.push(malformed(lead_time, line, e.to_string()));
                continue;
            }
        };

        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let row: ForecastRow = match record.deserialize(Some(&headers)) {
            Ok(row) => row,
            Err(e) => {
                parsed.issues.push(malformed(lead_time, line, e.to_string()));
                continue;
            }
        };

        match validate_row(row, lead_time, line) {
            Ok(rec) => parsed.records.push(rec),
            Err(issue) => {
                debug!(%issue, "Row rejected");
                parsed.issues.push(issue);
            }
        }
    }

    debug!(
        lead_time = lead_time.days(),
        accepted = parsed.records.len(),
        rejected = parsed.issues.len(),
        "Snapshot parsed"
    );
    Ok(parsed)
}

/// Turns a raw row into a record, filling the weather score and average
/// temperature when the collector left them empty.
pub fn validate_row(
    row: ForecastRow,
    lead_time: LeadTime,
    line: u64,
) -> Result<ForecastRecord, PipelineIssue> {
    let date = parse_date(&row.date)
        .ok_or_else(|| malformed(lead_time, line, format!("invalid date '{}'", row.date)))?;

    let weather = row.weather.trim().to_ascii_lowercase();
    let Some(table_score) = weather_score(&weather) else {
        return Err(PipelineIssue::UnknownWeather {
            city: row.city,
            date,
            lead_time,
            weather,
        });
    };

    let temp_avg = row
        .temp_avg
        .unwrap_or((row.temp_max + row.temp_min) / 2.0);
    let weather_score = row.weather_score.unwrap_or(table_score as f64);

    let numeric = [
        ("Latitude", row.latitude),
        ("Longitude", row.longitude),
        ("Temp_Max", row.temp_max),
        ("Temp_Min", row.temp_min),
        ("Temp_Avg", temp_avg),
        ("Humidity", row.humidity),
        ("Rain_Probability", row.rain_probability),
        ("Weather_Score", weather_score),
    ];
    if let Some((name, _)) = numeric.iter().find(|(_, v)| !v.is_finite()) {
        return Err(malformed(lead_time, line, format!("{name} is not a finite number")));
    }
    if !(0.0..=1.0).contains(&row.rain_probability) {
        return Err(malformed(
            lead_time,
            line,
            format!("Rain_Probability {} outside [0, 1]", row.rain_probability),
        ));
    }
    if !(0.0..=100.0).contains(&row.humidity) {
        return Err(malformed(
            lead_time,
            line,
            format!("Humidity {} outside [0, 100]", row.humidity),
        ));
    }

    Ok(ForecastRecord {
        city: row.city,
        date,
        lead_time,
        latitude: row.latitude,
        longitude: row.longitude,
        temp_max: row.temp_max,
        temp_min: row.temp_min,
        temp_avg,
        humidity: row.humidity,
        weather,
        rain_probability: row.rain_probability,
        weather_score,
    })
}

/// Accepts `YYYY-MM-DD`, optionally followed by a time part.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.trim().split([' ', 'T']).next()?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

fn malformed(lead_time: LeadTime, line: u64, reason: String) -> PipelineIssue {
    PipelineIssue::MalformedRow {
        lead_time,
        line,
        reason,
    }
}
