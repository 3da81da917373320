//! Descriptive mean trends, with no smoothing or significance testing.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::forecast::table::{AlignedRow, ForecastTable};
use crate::forecast::types::{LeadTime, LeadValues};
use crate::utility::mean;

/// Unweighted means of the forecast fields at one lead time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BiasPoint {
    pub lead_time: LeadTime,
    pub samples: usize,
    pub weather_score: Option<f64>,
    pub temp_avg: Option<f64>,
    pub rain_probability: Option<f64>,
    pub humidity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyMean {
    pub date: NaiveDate,
    pub temp_avg: f64,
    pub cities: usize,
}

/// Five-point bias sequence (lead times 1..=5) over the given rows.
///
/// Drift across the points shows whether longer-range forecasts lean
/// optimistic or pessimistic.
pub fn bias_trend<'a>(rows: impl Iterator<Item = &'a AlignedRow>) -> Vec<BiasPoint> {
    let rows: Vec<&AlignedRow> = rows.collect();

    LeadTime::all()
        .map(|lead| {
            let values: Vec<_> = rows.iter().filter_map(|r| r.lead(lead)).collect();
            let field = |f: fn(&LeadValues) -> f64| {
                mean(&values.iter().map(|v| f(v)).collect::<Vec<_>>())
            };
            BiasPoint {
                lead_time: lead,
                samples: values.len(),
                weather_score: field(|v| v.weather_score),
                temp_avg: field(|v| v.temp_avg),
                rain_probability: field(|v| v.rain_probability),
                humidity: field(|v| v.humidity),
            }
        })
        .collect()
}

/// Mean lead time 1 temperature per target date, in date order.
pub fn daily_temperature(table: &ForecastTable) -> Vec<DailyMean> {
    let mut by_date: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
    for row in table.rows() {
        if let Some(reference) = row.reference() {
            by_date.entry(row.date).or_default().push(reference.temp_avg);
        }
    }

    by_date
        .into_iter()
        .filter_map(|(date, temps)| {
            mean(&temps).map(|temp_avg| DailyMean {
                date,
                temp_avg,
                cities: temps.len(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::types::ForecastRecord;

    fn record(city: &str, day: u32, lead: u8, temp: f64, score: f64) -> ForecastRecord {
        ForecastRecord {
            city: city.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 12, day).unwrap(),
            lead_time: LeadTime::new(lead).unwrap(),
            latitude: 47.0,
            longitude: 3.0,
            temp_max: temp + 1.0,
            temp_min: temp - 1.0,
            temp_avg: temp,
            humidity: 60.0 + lead as f64,
            weather: "broken clouds".to_string(),
            rain_probability: 0.1 * lead as f64,
            weather_score: score,
        }
    }

    #[test]
    fn test_bias_trend_has_five_points() {
        let table = ForecastTable::join(vec![
            record("Albi", 5, 1, 4.0, 300.0),
            record("Albi", 6, 1, 6.0, 500.0),
            record("Albi", 5, 2, 3.0, 400.0),
            record("Caen", 5, 1, 2.0, 100.0),
        ]);

        let trend = bias_trend(table.rows());

        assert_eq!(trend.len(), 5);
        assert_eq!(trend[0].samples, 3);
        assert_eq!(trend[0].temp_avg, Some(4.0));
        assert_eq!(trend[0].weather_score, Some(300.0));
        assert_eq!(trend[1].samples, 1);
        assert_eq!(trend[1].humidity, Some(62.0));
        assert_eq!(trend[4].samples, 0);
        assert_eq!(trend[4].temp_avg, None);
    }

    #[test]
    fn test_bias_trend_for_one_city() {
        let table = ForecastTable::join(vec![
            record("Albi", 5, 1, 4.0, 300.0),
            record("Caen", 5, 1, 2.0, 100.0),
        ]);
        let trend = bias_trend(table.rows_for("Caen"));
        assert_eq!(trend[0].temp_avg, Some(2.0));
    }

    #[test]
    fn test_daily_temperature_by_date() {
        let table = ForecastTable::join(vec![
            record("Albi", 6, 1, 6.0, 0.0),
            record("Caen", 5, 1, 2.0, 0.0),
            record("Albi", 5, 1, 4.0, 0.0),
            record("Caen", 6, 2, 9.0, 0.0),
        ]);

        let daily = daily_temperature(&table);

        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].date, NaiveDate::from_ymd_opt(2024, 12, 5).unwrap());
        assert_eq!(daily[0].temp_avg, 3.0);
        assert_eq!(daily[0].cities, 2);
        assert_eq!(daily[1].temp_avg, 6.0);
        assert_eq!(daily[1].cities, 1);
    }
}
