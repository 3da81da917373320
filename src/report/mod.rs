//! Rankings, trends and the serializable report handed to presentation.

pub mod profile;
pub mod ranking;
pub mod trend;

use serde::Serialize;
use std::collections::BTreeMap;

use crate::accuracy::types::LeadAccuracy;
use crate::error::{IssueKind, PipelineIssue};
use profile::CityProfile;
use ranking::Ranking;
use trend::{BiasPoint, DailyMean};

/// Rankings built directly on lead time 1 values rather than on accuracy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawRankings {
    pub weather_score: Ranking,
    pub temperature: Ranking,
    pub rain_probability: Ranking,
}

/// Count per issue kind and every issue message in pipeline order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IssueSummary {
    pub counts: BTreeMap<IssueKind, usize>,
    pub messages: Vec<String>,
}

impl IssueSummary {
    pub fn from_issues(issues: &[PipelineIssue]) -> Self {
        let mut summary = IssueSummary::default();
        for issue in issues {
            *summary.counts.entry(issue.kind()).or_default() += 1;
            summary.messages.push(issue.to_string());
        }
        summary
    }

    pub fn count(&self, kind: IssueKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or_default()
    }
}

/// Complete result of one run, written as `report.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccuracyReport {
    pub schema_version: u8,
    pub algorithm_version: u8,
    pub cities: usize,
    pub national_accuracy: Option<f64>,
    pub lead_time_accuracy: Vec<LeadAccuracy>,
    pub accuracy: Ranking,
    pub raw: RawRankings,
    pub bias_trend: Vec<BiasPoint>,
    pub daily_temperature: Vec<DailyMean>,
    pub city_profiles: Vec<CityProfile>,
    pub issues: IssueSummary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_issue_summary_counts_by_kind() {
        let issues = vec![
            PipelineIssue::UnscoredCity { city: "Caen".into() },
            PipelineIssue::UnscoredCity { city: "Metz".into() },
            PipelineIssue::DuplicateCity {
                city: "Reims".into(),
                latitude: 49.3,
                longitude: 4.1,
            },
        ];

        let summary = IssueSummary::from_issues(&issues);

        assert_eq!(summary.count(IssueKind::UnscoredCity), 2);
        assert_eq!(summary.count(IssueKind::DuplicateCity), 1);
        assert_eq!(summary.count(IssueKind::DivisionByNearZero), 0);
        assert_eq!(summary.messages.len(), 3);
        assert!(summary.messages[0].starts_with("Caen"));
    }

    #[test]
    fn test_issue_kinds_serialize_snake_case() {
        let issues = vec![PipelineIssue::DivisionByNearZero {
            city: "Lille".into(),
            date: NaiveDate::from_ymd_opt(2025, 1, 8).unwrap(),
            lead_time: crate::forecast::types::LeadTime::new(2).unwrap(),
            reference_temp: 0.0,
        }];
        let json = serde_json::to_string(&IssueSummary::from_issues(&issues)).unwrap();
        assert!(json.contains("\"division_by_near_zero\":1"));
    }
}
