//! Collapses sub-daily forecasts into one record per (city, date).
//!
//! Collectors append every 3-hourly slot of a target date to the snapshot,
//! so a single lead-time file holds several rows per key.

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::forecast::types::{ForecastRecord, LeadTime};
use crate::utility::{mean, mode};

/// Reduces each group of rows sharing (city, date, lead time) to one record.
///
/// | Field            | Reduction                        |
/// |------------------|----------------------------------|
/// | temp_max         | max                              |
/// | temp_min         | min                              |
/// | temp_avg         | mean                             |
/// | humidity         | mean                             |
/// | rain_probability | mean                             |
/// | weather_score    | mean                             |
/// | weather          | mode, ties to first encountered  |
/// | lat / lon        | first seen                       |
///
/// Groups keep the order in which their first row appeared.
pub fn collapse_daily(records: Vec<ForecastRecord>) -> Vec<ForecastRecord> {
    let mut slots: HashMap<(String, NaiveDate, LeadTime), usize> = HashMap::new();
    let mut groups: Vec<Vec<ForecastRecord>> = Vec::new();

    for rec in records {
        let key = (rec.city.clone(), rec.date, rec.lead_time);
        match slots.get(&key) {
            Some(&i) => groups[i].push(rec),
            None => {
                slots.insert(key, groups.len());
                groups.push(vec![rec]);
            }
        }
    }

    groups.into_iter().filter_map(reduce_group).collect()
}

fn reduce_group(group: Vec<ForecastRecord>) -> Option<ForecastRecord> {
    if group.len() == 1 {
        return group.into_iter().next();
    }

    let column = |f: fn(&ForecastRecord) -> f64| group.iter().map(f).collect::<Vec<_>>();

    let temp_max = group.iter().map(|r| r.temp_max).fold(f64::NEG_INFINITY, f64::max);
    let temp_min = group.iter().map(|r| r.temp_min).fold(f64::INFINITY, f64::min);
    let temp_avg = mean(&column(|r| r.temp_avg))?;
    let humidity = mean(&column(|r| r.humidity))?;
    let rain_probability = mean(&column(|r| r.rain_probability))?;
    let weather_score = mean(&column(|r| r.weather_score))?;
    let weather = mode(group.iter().map(|r| r.weather.as_str()))?.to_string();

    let first = group.first()?;
    Some(ForecastRecord {
        city: first.city.clone(),
        date: first.date,
        lead_time: first.lead_time,
        latitude: first.latitude,
        longitude: first.longitude,
        temp_max,
        temp_min,
        temp_avg,
        humidity,
        weather,
        rain_probability,
        weather_score,
    })
}
