//! Recoverable data-quality issues raised while scoring forecasts.
//!
//! None of these abort a run. Each stage returns its output together with
//! the issues it found, and the affected tuple or row is left out of the
//! computed sample.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::forecast::types::LeadTime;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineIssue {
    /// A (city, date) pair has no value for the reference or the compared lead time.
    #[error("{city} {date}: no lead time {missing} value to compare lead time {lead_time} against")]
    MissingCounterpart {
        city: String,
        date: NaiveDate,
        lead_time: LeadTime,
        missing: LeadTime,
    },

    #[error("{city} {date}: reference temperature {reference_temp} is zero, lead time {lead_time} skipped")]
    DivisionByNearZero {
        city: String,
        date: NaiveDate,
        lead_time: LeadTime,
        reference_temp: f64,
    },

    /// The same city was seen with more than one coordinate pair; the first one wins.
    #[error("{city}: duplicate entry at ({latitude}, {longitude}) dropped")]
    DuplicateCity {
        city: String,
        latitude: f64,
        longitude: f64,
    },

    #[error("{city} {date}: unknown weather description '{weather}' in lead time {lead_time} row")]
    UnknownWeather {
        city: String,
        date: NaiveDate,
        lead_time: LeadTime,
        weather: String,
    },

    #[error("{city}: every forecast tuple was excluded, no accuracy computed")]
    UnscoredCity { city: String },

    #[error("lead time {lead_time} row {line}: {reason}")]
    MalformedRow {
        lead_time: LeadTime,
        line: u64,
        reason: String,
    },
}

/// Stable short name of an issue kind, used to count issues in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    MissingCounterpart,
    DivisionByNearZero,
    DuplicateCity,
    UnknownWeather,
    UnscoredCity,
    MalformedRow,
}

impl PipelineIssue {
    pub fn kind(&self) -> IssueKind {
        match self {
            PipelineIssue::MissingCounterpart { .. } => IssueKind::MissingCounterpart,
            PipelineIssue::DivisionByNearZero { .. } => IssueKind::DivisionByNearZero,
            PipelineIssue::DuplicateCity { .. } => IssueKind::DuplicateCity,
            PipelineIssue::UnknownWeather { .. } => IssueKind::UnknownWeather,
            PipelineIssue::UnscoredCity { .. } => IssueKind::UnscoredCity,
            PipelineIssue::MalformedRow { .. } => IssueKind::MalformedRow,
        }
    }
}
