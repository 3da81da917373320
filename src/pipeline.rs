//! One full pass: aligned table → error terms → accuracy → city summaries → report.
//!
//! Every stage derives a new value from the previous one; nothing is
//! mutated in place, so the same input always yields the same output.

use tracing::info;

use crate::accuracy::aggregate::{lead_time_accuracy, national_accuracy, summarize_cities};
use crate::accuracy::score::score_table;
use crate::accuracy::types::{AccuracyScore, CityAccuracySummary};
use crate::config::PipelineConfig;
use crate::error::PipelineIssue;
use crate::forecast::LoadedForecasts;
use crate::forecast::table::ForecastTable;
use crate::report::profile::city_profiles;
use crate::report::ranking::{
    Ranking, accuracy_metrics, rain_metrics, temperature_metrics, weather_score_metrics,
};
use crate::report::trend::{bias_trend, daily_temperature};
use crate::report::{AccuracyReport, IssueSummary, RawRankings};

pub const SCHEMA_VERSION: u8 = 1;
pub const ALGORITHM_VERSION: u8 = 1;

#[derive(Debug)]
pub struct PipelineOutput {
    pub table: ForecastTable,
    pub scores: Vec<AccuracyScore>,
    pub summaries: Vec<CityAccuracySummary>,
    pub issues: Vec<PipelineIssue>,
    pub report: AccuracyReport,
}

#[tracing::instrument(skip_all, fields(rows = loaded.table.len()))]
pub fn run(loaded: LoadedForecasts, config: &PipelineConfig) -> PipelineOutput {
    let LoadedForecasts { table, mut issues } = loaded;

    let scored = score_table(&table, config.zero_temperature_epsilon);
    issues.extend(scored.issues);

    let cities = summarize_cities(&table, &scored.scores);
    issues.extend(cities.issues);
    let summaries = cities.summaries;

    let national = national_accuracy(&summaries);
    let n = config.ranking_size;
    let map_n = config.map_size;

    let report = AccuracyReport {
        schema_version: SCHEMA_VERSION,
        algorithm_version: ALGORITHM_VERSION,
        cities: summaries.len(),
        national_accuracy: national,
        lead_time_accuracy: lead_time_accuracy(&summaries),
        accuracy: Ranking::build(&accuracy_metrics(&summaries), n, map_n),
        raw: RawRankings {
            weather_score: Ranking::build(&weather_score_metrics(&table), n, map_n),
            temperature: Ranking::build(&temperature_metrics(&table), n, map_n),
            rain_probability: Ranking::build(&rain_metrics(&table), n, map_n),
        },
        bias_trend: bias_trend(table.rows()),
        daily_temperature: daily_temperature(&table),
        city_profiles: city_profiles(&table, &summaries),
        issues: IssueSummary::from_issues(&issues),
    };

    info!(
        cities = summaries.len(),
        scores = scored.scores.len(),
        issues = issues.len(),
        national_accuracy = national,
        "Pipeline finished"
    );

    PipelineOutput {
        table,
        scores: scored.scores,
        summaries,
        issues,
        report,
    }
}
