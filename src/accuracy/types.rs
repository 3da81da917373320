//! Data types produced by the accuracy pipeline.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::PipelineIssue;
use crate::forecast::types::LeadTime;

/// Error of one lead time's forecast against the reference forecast.
///
/// All terms are non-negative. `temp_error` is relative and has no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ErrorTriple {
    pub temp_error: f64,
    pub rain_error: f64,
    pub score_error: f64,
}

/// Accuracy in [0, 100] of one (city, date, lead time > 1) tuple.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccuracyScore {
    pub city: String,
    pub date: NaiveDate,
    pub lead_time: LeadTime,
    pub errors: ErrorTriple,
    pub accuracy: f64,
}

/// Scores for every tuple that could be compared, and the tuples that could not.
#[derive(Debug, Default)]
pub struct ScoredForecasts {
    pub scores: Vec<AccuracyScore>,
    pub issues: Vec<PipelineIssue>,
}

/// One row per city: mean accuracy per lead time and their mean.
///
/// A lead time with no scored tuple for the city is `None` and does not
/// take part in `mean_accuracy`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityAccuracySummary {
    #[serde(rename = "Ville")]
    pub city: String,
    #[serde(rename = "Accuracy_2_mean")]
    pub accuracy_2_mean: Option<f64>,
    #[serde(rename = "Accuracy_3_mean")]
    pub accuracy_3_mean: Option<f64>,
    #[serde(rename = "Accuracy_4_mean")]
    pub accuracy_4_mean: Option<f64>,
    #[serde(rename = "Accuracy_5_mean")]
    pub accuracy_5_mean: Option<f64>,
    #[serde(rename = "Mean_Accuracy")]
    pub mean_accuracy: f64,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
}

impl CityAccuracySummary {
    pub fn lead_mean(&self, lead: LeadTime) -> Option<f64> {
        match lead.days() {
            2 => self.accuracy_2_mean,
            3 => self.accuracy_3_mean,
            4 => self.accuracy_4_mean,
            5 => self.accuracy_5_mean,
            _ => None,
        }
    }
}

/// Per-city summaries and the issues raised while building them.
#[derive(Debug, Default)]
pub struct CitySummaries {
    pub summaries: Vec<CityAccuracySummary>,
    pub issues: Vec<PipelineIssue>,
}

/// National accuracy for a single lead time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeadAccuracy {
    pub lead_time: LeadTime,
    pub accuracy: f64,
    pub cities: usize,
}
