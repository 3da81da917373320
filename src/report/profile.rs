use serde::Serialize;

use crate::accuracy::types::CityAccuracySummary;
use crate::forecast::table::ForecastTable;
use crate::forecast::types::LeadValues;
use crate::report::trend::{BiasPoint, bias_trend};
use crate::utility::{mean, mode};

/// Lead time 1 overview of one city across all its dates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityProfile {
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub days: usize,
    pub avg_temp: f64,
    pub max_temp: f64,
    pub min_temp: f64,
    pub avg_humidity: f64,
    pub avg_rain_probability: f64,
    pub weather_score: f64,
    pub most_common_weather: String,
    pub mean_accuracy: Option<f64>,
    pub bias: Vec<BiasPoint>,
}

/// Builds the profile of `city`, or `None` if it has no lead time 1 row.
pub fn city_profile(
    table: &ForecastTable,
    summaries: &[CityAccuracySummary],
    city: &str,
) -> Option<CityProfile> {
    let first = table.rows_for(city).find(|r| r.reference().is_some())?;
    let days: Vec<_> = table.rows_for(city).filter_map(|r| r.reference()).collect();

    let column = |f: fn(&LeadValues) -> f64| {
        days.iter().map(|v| f(v)).collect::<Vec<_>>()
    };

    Some(CityProfile {
        city: city.to_string(),
        latitude: first.latitude,
        longitude: first.longitude,
        days: days.len(),
        avg_temp: mean(&column(|v| v.temp_avg))?,
        max_temp: column(|v| v.temp_max).into_iter().fold(f64::NEG_INFINITY, f64::max),
        min_temp: column(|v| v.temp_min).into_iter().fold(f64::INFINITY, f64::min),
        avg_humidity: mean(&column(|v| v.humidity))?,
        avg_rain_probability: mean(&column(|v| v.rain_probability))?,
        weather_score: column(|v| v.weather_score).iter().sum(),
        most_common_weather: mode(days.iter().map(|v| v.weather.as_str()))?.to_string(),
        mean_accuracy: summaries
            .iter()
            .find(|s| s.city == city)
            .map(|s| s.mean_accuracy),
        bias: bias_trend(table.rows_for(city)),
    })
}

/// Profiles of every city with lead time 1 data, in city-name order.
pub fn city_profiles(table: &ForecastTable, summaries: &[CityAccuracySummary]) -> Vec<CityProfile> {
    table
        .cities()
        .into_iter()
        .filter_map(|city| city_profile(table, summaries, city))
        .collect()
}
