//! Record types for per-lead-time forecast snapshots.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of days between issuing a forecast and the date it predicts.
///
/// Only 1..=5 exist. Lead time 1 is the reference the others are compared to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct LeadTime(u8);

impl LeadTime {
    pub const MAX: u8 = 5;
    pub const REFERENCE: LeadTime = LeadTime(1);

    pub fn new(days: u8) -> Option<Self> {
        (1..=Self::MAX).contains(&days).then_some(LeadTime(days))
    }

    pub fn days(self) -> u8 {
        self.0
    }

    /// Zero-based slot in per-lead-time arrays.
    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    pub fn is_reference(self) -> bool {
        self == Self::REFERENCE
    }

    /// All lead times, 1 through 5.
    pub fn all() -> impl Iterator<Item = LeadTime> {
        (1..=Self::MAX).map(LeadTime)
    }

    /// Lead times scored against the reference, 2 through 5.
    pub fn compared() -> impl Iterator<Item = LeadTime> {
        (2..=Self::MAX).map(LeadTime)
    }
}

impl fmt::Display for LeadTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for LeadTime {
    type Error = String;

    fn try_from(days: u8) -> Result<Self, Self::Error> {
        LeadTime::new(days).ok_or_else(|| format!("lead time {days} outside 1..={}", Self::MAX))
    }
}

impl From<LeadTime> for u8 {
    fn from(lead: LeadTime) -> u8 {
        lead.0
    }
}

/// A single row as written by the collector. Numeric cells may be empty.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastRow {
    #[serde(rename = "Ville")]
    pub city: String,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Temp_Max")]
    pub temp_max: f64,
    #[serde(rename = "Temp_Min")]
    pub temp_min: f64,
    #[serde(rename = "Humidity")]
    pub humidity: f64,
    #[serde(rename = "Weather")]
    pub weather: String,
    #[serde(rename = "Rain_Probability")]
    pub rain_probability: f64,
    #[serde(rename = "Weather_Score", default)]
    pub weather_score: Option<f64>,
    #[serde(rename = "Temp_Avg", default)]
    pub temp_avg: Option<f64>,
}

/// One validated observation for one city, one target date, one lead time.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRecord {
    pub city: String,
    pub date: NaiveDate,
    pub lead_time: LeadTime,
    pub latitude: f64,
    pub longitude: f64,
    pub temp_max: f64,
    pub temp_min: f64,
    pub temp_avg: f64,
    pub humidity: f64,
    pub weather: String,
    pub rain_probability: f64,
    pub weather_score: f64,
}

/// The forecast values of one lead time inside an aligned row.
#[derive(Debug, Clone, PartialEq)]
pub struct LeadValues {
    pub temp_max: f64,
    pub temp_min: f64,
    pub temp_avg: f64,
    pub humidity: f64,
    pub weather: String,
    pub rain_probability: f64,
    pub weather_score: f64,
}

impl From<&ForecastRecord> for LeadValues {
    fn from(r: &ForecastRecord) -> Self {
        LeadValues {
            temp_max: r.temp_max,
            temp_min: r.temp_min,
            temp_avg: r.temp_avg,
            humidity: r.humidity,
            weather: r.weather.clone(),
            rain_probability: r.rain_probability,
            weather_score: r.weather_score,
        }
    }
}
