//! Ordered city rankings over a single scalar per city.
//!
//! Input metrics arrive in city-name order. Sorting is stable, so cities
//! with equal values keep that order in both directions.

use serde::Serialize;

use crate::accuracy::types::CityAccuracySummary;
use crate::forecast::table::ForecastTable;
use crate::forecast::types::LeadValues;
use crate::utility::mean;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityMetric {
    pub city: String,
    pub value: f64,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Descending,
    Ascending,
}

/// Best and worst `n` cities for map display.
///
/// `top` is the head and `bottom` the tail of the descending ranking, so
/// with fewer than `2n` cities the two sets overlap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoPartition {
    pub top: Vec<CityMetric>,
    pub bottom: Vec<CityMetric>,
}

/// Highest and lowest slices of one metric, plus its map partition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranking {
    pub highest: Vec<CityMetric>,
    pub lowest: Vec<CityMetric>,
    pub map: GeoPartition,
}

impl Ranking {
    pub fn build(metrics: &[CityMetric], n: usize, map_n: usize) -> Self {
        Ranking {
            highest: top_n(metrics, n),
            lowest: bottom_n(metrics, n),
            map: partition_extremes(metrics, map_n),
        }
    }
}

pub fn rank(metrics: &[CityMetric], order: Order) -> Vec<CityMetric> {
    let mut ranked = metrics.to_vec();
    match order {
        Order::Descending => ranked.sort_by(|a, b| b.value.total_cmp(&a.value)),
        Order::Ascending => ranked.sort_by(|a, b| a.value.total_cmp(&b.value)),
    }
    ranked
}

pub fn top_n(metrics: &[CityMetric], n: usize) -> Vec<CityMetric> {
    rank(metrics, Order::Descending).into_iter().take(n).collect()
}

pub fn bottom_n(metrics: &[CityMetric], n: usize) -> Vec<CityMetric> {
    rank(metrics, Order::Ascending).into_iter().take(n).collect()
}

pub fn partition_extremes(metrics: &[CityMetric], n: usize) -> GeoPartition {
    let ranked = rank(metrics, Order::Descending);
    let tail_start = ranked.len().saturating_sub(n);
    GeoPartition {
        top: ranked.iter().take(n).cloned().collect(),
        bottom: ranked[tail_start..].to_vec(),
    }
}

pub fn accuracy_metrics(summaries: &[CityAccuracySummary]) -> Vec<CityMetric> {
    summaries
        .iter()
        .map(|s| CityMetric {
            city: s.city.clone(),
            value: s.mean_accuracy,
            latitude: s.latitude,
            longitude: s.longitude,
        })
        .collect()
}

/// Sum of lead time 1 weather scores per city.
pub fn weather_score_metrics(table: &ForecastTable) -> Vec<CityMetric> {
    reference_metrics(table, |v| v.weather_score, |xs| Some(xs.iter().sum()))
}

/// Mean lead time 1 average temperature per city.
pub fn temperature_metrics(table: &ForecastTable) -> Vec<CityMetric> {
    reference_metrics(table, |v| v.temp_avg, mean)
}

/// Sum of lead time 1 rain probabilities per city.
pub fn rain_metrics(table: &ForecastTable) -> Vec<CityMetric> {
    reference_metrics(table, |v| v.rain_probability, |xs| Some(xs.iter().sum()))
}

/// Reduces one lead time 1 field per city. Cities with no lead time 1 row
/// are left out; coordinates are those of the city's first lead time 1 row.
fn reference_metrics(
    table: &ForecastTable,
    field: fn(&LeadValues) -> f64,
    reduce: fn(&[f64]) -> Option<f64>,
) -> Vec<CityMetric> {
    table
        .cities()
        .into_iter()
        .filter_map(|city| {
            let first = table.rows_for(city).find(|r| r.reference().is_some())?;
            let values: Vec<f64> = table
                .rows_for(city)
                .filter_map(|r| r.reference())
                .map(field)
                .collect();
            if values.is_empty() {
                return None;
            }
            Some(CityMetric {
                city: city.to_string(),
                value: reduce(&values)?,
                latitude: first.latitude,
                longitude: first.longitude,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::types::{ForecastRecord, LeadTime};
    use chrono::NaiveDate;

    fn metric(city: &str, value: f64) -> CityMetric {
        CityMetric {
            city: city.to_string(),
            value,
            latitude: 0.0,
            longitude: 0.0,
        }
    }

    fn names(metrics: &[CityMetric]) -> Vec<&str> {
        metrics.iter().map(|m| m.city.as_str()).collect()
    }

    fn record(city: &str, day: u32, lead: u8, temp: f64, rain: f64, score: f64) -> ForecastRecord {
        ForecastRecord {
            city: city.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 2, day).unwrap(),
            lead_time: LeadTime::new(lead).unwrap(),
            latitude: 44.0,
            longitude: 1.0,
            temp_max: temp + 3.0,
            temp_min: temp - 3.0,
            temp_avg: temp,
            humidity: 70.0,
            weather: "clear sky".to_string(),
            rain_probability: rain,
            weather_score: score,
        }
    }

    #[test]
    fn test_rank_orders_and_keeps_ties_alphabetical() {
        let metrics = vec![
            metric("Albi", 50.0),
            metric("Brest", 80.0),
            metric("Caen", 50.0),
            metric("Dijon", 20.0),
        ];

        let desc = rank(&metrics, Order::Descending);
        let asc = rank(&metrics, Order::Ascending);

        assert_eq!(names(&desc), vec!["Brest", "Albi", "Caen", "Dijon"]);
        assert_eq!(names(&asc), vec!["Dijon", "Albi", "Caen", "Brest"]);
    }

    #[test]
    fn test_rank_is_reproducible() {
        let metrics: Vec<CityMetric> = ["A", "B", "C", "D", "E"]
            .iter()
            .map(|c| metric(c, 1.0))
            .collect();
        assert_eq!(rank(&metrics, Order::Descending), rank(&metrics, Order::Descending));
        assert_eq!(names(&rank(&metrics, Order::Ascending)), vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn test_top_and_bottom_slices() {
        let metrics = vec![metric("A", 3.0), metric("B", 1.0), metric("C", 2.0)];
        assert_eq!(names(&top_n(&metrics, 2)), vec!["A", "C"]);
        assert_eq!(names(&bottom_n(&metrics, 2)), vec!["B", "C"]);
        assert_eq!(top_n(&metrics, 10).len(), 3);
    }

    #[test]
    fn test_partition_extremes() {
        let metrics: Vec<CityMetric> = (0..6).map(|i| metric(&format!("C{i}"), i as f64)).collect();
        let p = partition_extremes(&metrics, 2);
        assert_eq!(names(&p.top), vec!["C5", "C4"]);
        assert_eq!(names(&p.bottom), vec!["C1", "C0"]);

        let small = partition_extremes(&metrics[..3], 25);
        assert_eq!(small.top.len(), 3);
        assert_eq!(small.bottom.len(), 3);
    }

    #[test]
    fn test_reference_metrics_use_lead_time_one() {
        let table = ForecastTable::join(vec![
            record("Nice", 1, 1, 12.0, 0.1, 600.0),
            record("Nice", 2, 1, 14.0, 0.3, 500.0),
            record("Nice", 1, 2, 30.0, 0.9, -400.0),
            record("Lille", 1, 1, 3.0, 0.8, -20.0),
            record("Rouen", 1, 3, 3.0, 0.8, -20.0),
        ]);

        let scores = weather_score_metrics(&table);
        let temps = temperature_metrics(&table);
        let rain = rain_metrics(&table);

        assert_eq!(names(&scores), vec!["Lille", "Nice"]);
        assert_eq!(scores[1].value, 1100.0);
        assert_eq!(temps[1].value, 13.0);
        assert!((rain[1].value - 0.4).abs() < 1e-12);
        assert_eq!(names(&top_n(&scores, 1)), vec!["Nice"]);
    }

    #[test]
    fn test_reference_metrics_take_coordinates_from_lead_time_one_row() {
        let mut early = record("Laval", 1, 3, 5.0, 0.2, 100.0);
        early.latitude = 50.0;
        let table = ForecastTable::join(vec![early, record("Laval", 2, 1, 6.0, 0.1, 200.0)]);

        let temps = temperature_metrics(&table);
        assert_eq!(temps.len(), 1);
        assert_eq!(temps[0].latitude, 44.0);
        assert_eq!(temps[0].value, 6.0);
    }
}
