use std::collections::{BTreeMap, HashMap};
use tracing::{info, warn};

use crate::accuracy::types::{AccuracyScore, CityAccuracySummary, CitySummaries, LeadAccuracy};
use crate::error::PipelineIssue;
use crate::forecast::table::ForecastTable;
use crate::forecast::types::LeadTime;
use crate::utility::mean;

/// Reduces per-tuple scores to one summary per city.
///
/// Accuracy is averaged in two stages: first over dates for each lead time,
/// then over the lead times the city actually has. Summaries are ordered by
/// city name. Coordinates are the first seen for the city in table order; a
/// city reappearing at other coordinates is reported and that entry dropped.
#[tracing::instrument(skip_all, fields(scores = scores.len()))]
pub fn summarize_cities(table: &ForecastTable, scores: &[AccuracyScore]) -> CitySummaries {
    let mut out = CitySummaries::default();
    let coordinates = first_coordinates(table, &mut out.issues);

    let mut by_city: HashMap<&str, BTreeMap<LeadTime, Vec<f64>>> = HashMap::new();
    for s in scores {
        by_city
            .entry(s.city.as_str())
            .or_default()
            .entry(s.lead_time)
            .or_default()
            .push(s.accuracy);
    }

    for city in table.cities() {
        let Some(&(latitude, longitude)) = coordinates.get(city) else {
            continue;
        };

        let lead_means: BTreeMap<LeadTime, f64> = by_city
            .get(city)
            .into_iter()
            .flatten()
            .filter_map(|(lead, values)| mean(values).map(|m| (*lead, m)))
            .collect();

        let means: Vec<f64> = lead_means.values().copied().collect();
        let Some(mean_accuracy) = mean(&means) else {
            warn!(city, "No scored forecast for city");
            out.issues.push(PipelineIssue::UnscoredCity {
                city: city.to_string(),
            });
            continue;
        };

        let lead_mean = |days: u8| LeadTime::new(days).and_then(|l| lead_means.get(&l).copied());
        out.summaries.push(CityAccuracySummary {
            city: city.to_string(),
            accuracy_2_mean: lead_mean(2),
            accuracy_3_mean: lead_mean(3),
            accuracy_4_mean: lead_mean(4),
            accuracy_5_mean: lead_mean(5),
            mean_accuracy,
            latitude,
            longitude,
        });
    }

    info!(cities = out.summaries.len(), "City accuracy summarized");
    out
}

/// First coordinates of each city, reporting any later differing pair once.
fn first_coordinates<'a>(
    table: &'a ForecastTable,
    issues: &mut Vec<PipelineIssue>,
) -> HashMap<&'a str, (f64, f64)> {
    let mut first: HashMap<&str, (f64, f64)> = HashMap::new();
    let mut reported: Vec<(&str, f64, f64)> = Vec::new();

    for row in table.rows() {
        let pair = (row.latitude, row.longitude);
        let kept = *first.entry(row.city.as_str()).or_insert(pair);
        if kept == pair {
            continue;
        }

        let dup = (row.city.as_str(), row.latitude, row.longitude);
        if !reported.contains(&dup) {
            warn!(
                city = %row.city,
                latitude = row.latitude,
                longitude = row.longitude,
                "Duplicate city coordinates dropped"
            );
            issues.push(PipelineIssue::DuplicateCity {
                city: row.city.clone(),
                latitude: row.latitude,
                longitude: row.longitude,
            });
            reported.push(dup);
        }
    }

    first
}

/// Mean of the per-city `mean_accuracy` values.
pub fn national_accuracy(summaries: &[CityAccuracySummary]) -> Option<f64> {
    let values: Vec<f64> = summaries.iter().map(|s| s.mean_accuracy).collect();
    mean(&values)
}

/// For each lead time 2..=5, the mean over cities of that lead time's city mean.
pub fn lead_time_accuracy(summaries: &[CityAccuracySummary]) -> Vec<LeadAccuracy> {
    LeadTime::compared()
        .filter_map(|lead| {
            let values: Vec<f64> = summaries.iter().filter_map(|s| s.lead_mean(lead)).collect();
            mean(&values).map(|accuracy| LeadAccuracy {
                lead_time: lead,
                accuracy,
                cities: values.len(),
            })
        })
        .collect()
}
