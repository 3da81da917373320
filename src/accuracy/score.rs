use tracing::{debug, info};

use crate::accuracy::deviation::error_terms;
use crate::accuracy::types::{AccuracyScore, ErrorTriple, ScoredForecasts};
use crate::error::PipelineIssue;
use crate::forecast::table::ForecastTable;
use crate::forecast::types::LeadTime;

/// Weight of each error term in the accuracy deficit. They sum to 100.
pub const TEMP_WEIGHT: f64 = 40.0;
pub const RAIN_WEIGHT: f64 = 35.0;
pub const SCORE_WEIGHT: f64 = 25.0;

pub const MAX_ACCURACY: f64 = 100.0;

/// Weighted error before clamping: `40·temp + 35·rain + 25·score`.
pub fn deficit(errors: &ErrorTriple) -> f64 {
    errors.temp_error * TEMP_WEIGHT
        + errors.rain_error * RAIN_WEIGHT
        + errors.score_error * SCORE_WEIGHT
}

/// `100 - deficit`, clamped to [0, 100].
pub fn accuracy(errors: &ErrorTriple) -> f64 {
    (MAX_ACCURACY - deficit(errors)).clamp(0.0, MAX_ACCURACY)
}

/// Scores lead times 2..=5 of every row against its lead time 1 values.
///
/// Tuples missing either side, or whose reference temperature is zero, are
/// left out and reported.
#[tracing::instrument(skip(table), fields(rows = table.len()))]
pub fn score_table(table: &ForecastTable, zero_epsilon: f64) -> ScoredForecasts {
    let mut out = ScoredForecasts::default();

    for row in table.rows() {
        for lead in LeadTime::compared() {
            let (reference, forecast) = match (row.reference(), row.lead(lead)) {
                (Some(r), Some(f)) => (r, f),
                (r, _) => {
                    let missing = if r.is_none() { LeadTime::REFERENCE } else { lead };
                    out.issues.push(PipelineIssue::MissingCounterpart {
                        city: row.city.clone(),
                        date: row.date,
                        lead_time: lead,
                        missing,
                    });
                    continue;
                }
            };

            let Some(errors) = error_terms(reference, forecast, zero_epsilon) else {
                debug!(city = %row.city, date = %row.date, lead_time = lead.days(), "Zero reference temperature");
                out.issues.push(PipelineIssue::DivisionByNearZero {
                    city: row.city.clone(),
                    date: row.date,
                    lead_time: lead,
                    reference_temp: reference.temp_avg,
                });
                continue;
            };

            out.scores.push(AccuracyScore {
                city: row.city.clone(),
                date: row.date,
                lead_time: lead,
                accuracy: accuracy(&errors),
                errors,
            });
        }
    }

    info!(
        scored = out.scores.len(),
        excluded = out.issues.len(),
        "Forecast tuples scored"
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::types::ForecastRecord;
    use chrono::NaiveDate;

    fn errors(temp_error: f64, rain_error: f64, score_error: f64) -> ErrorTriple {
        ErrorTriple {
            temp_error,
            rain_error,
            score_error,
        }
    }

    fn record(city: &str, day: u32, lead: u8, temp: f64, rain: f64, score: f64) -> ForecastRecord {
        ForecastRecord {
            city: city.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            lead_time: LeadTime::new(lead).unwrap(),
            latitude: 48.85,
            longitude: 2.35,
            temp_max: temp + 2.0,
            temp_min: temp - 2.0,
            temp_avg: temp,
            humidity: 80.0,
            weather: "scattered clouds".to_string(),
            rain_probability: rain,
            weather_score: score,
        }
    }

    #[test]
    fn test_weights_sum_to_one_hundred() {
        assert_eq!(TEMP_WEIGHT + RAIN_WEIGHT + SCORE_WEIGHT, 100.0);
    }

    #[test]
    fn test_perfect_forecast_scores_one_hundred() {
        assert_eq!(accuracy(&errors(0.0, 0.0, 0.0)), 100.0);
        assert!(accuracy(&errors(0.0, 0.0, 1e-6)) < 100.0);
    }

    #[test]
    fn test_deficit_is_linear_in_errors() {
        let base = errors(0.2, 0.1, 0.3);
        let scaled = errors(0.6, 0.3, 0.9);
        assert!((deficit(&scaled) - 3.0 * deficit(&base)).abs() < 1e-9);
    }

    #[test]
    fn test_accuracy_is_clamped() {
        assert_eq!(accuracy(&errors(10.0, 1.0, 2.0)), 0.0);
        let a = accuracy(&errors(0.5, 0.5, 0.5));
        assert!((0.0..=100.0).contains(&a));
    }

    #[test]
    fn test_paris_example_scores_86() {
        let table = ForecastTable::join(vec![
            record("Paris", 10, 1, 5.0, 0.1, 400.0),
            record("Paris", 10, 2, 6.0, 0.2, 380.0),
        ]);
        let scored = score_table(&table, 1e-9);

        assert_eq!(scored.scores.len(), 1);
        let s = &scored.scores[0];
        assert_eq!(s.lead_time, LeadTime::new(2).unwrap());
        assert!((s.accuracy - 86.0).abs() < 1e-9);
        // lead times 3..=5 are absent
        assert_eq!(scored.issues.len(), 3);
    }

    #[test]
    fn test_zero_reference_temperature_is_excluded() {
        let table = ForecastTable::join(vec![
            record("Lille", 10, 1, 0.0, 0.1, 400.0),
            record("Lille", 10, 2, 1.0, 0.1, 400.0),
        ]);
        let scored = score_table(&table, 1e-9);

        assert!(scored.scores.is_empty());
        assert!(scored.issues.iter().any(|i| matches!(
            i,
            PipelineIssue::DivisionByNearZero { lead_time, .. } if lead_time.days() == 2
        )));
        assert!(scored.scores.iter().all(|s| s.accuracy.is_finite()));
    }

    #[test]
    fn test_missing_reference_is_reported() {
        let table = ForecastTable::join(vec![record("Metz", 10, 2, 1.0, 0.1, 400.0)]);
        let scored = score_table(&table, 1e-9);

        assert!(scored.scores.is_empty());
        assert_eq!(scored.issues.len(), 4);
        assert!(scored.issues.iter().all(|i| matches!(
            i,
            PipelineIssue::MissingCounterpart { missing, .. } if missing.is_reference()
        )));
    }

    #[test]
    fn test_all_scores_within_bounds() {
        let mut records = Vec::new();
        for day in 1..=20u32 {
            let t = day as f64 - 10.5;
            records.push(record("Albi", day, 1, t, 0.1, 200.0));
            for lead in 2..=5u8 {
                records.push(record("Albi", day, lead, t * lead as f64, 0.9, -400.0));
            }
        }
        let scored = score_table(&ForecastTable::join(records), 1e-9);

        assert_eq!(scored.scores.len(), 80);
        assert!(scored.scores.iter().all(|s| (0.0..=100.0).contains(&s.accuracy)));
    }
}
