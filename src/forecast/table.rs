//! Keyed join of the five lead-time snapshots into one wide table.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::info;

use crate::forecast::types::{ForecastRecord, LeadTime, LeadValues};

/// Every lead time's forecast for one (city, target date).
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedRow {
    pub city: String,
    pub date: NaiveDate,
    pub latitude: f64,
    pub longitude: f64,
    leads: [Option<LeadValues>; LeadTime::MAX as usize],
}

impl AlignedRow {
    fn new(rec: &ForecastRecord) -> Self {
        AlignedRow {
            city: rec.city.clone(),
            date: rec.date,
            latitude: rec.latitude,
            longitude: rec.longitude,
            leads: Default::default(),
        }
    }

    /// Values for `lead`, or `None` when that snapshot had no row for this key.
    pub fn lead(&self, lead: LeadTime) -> Option<&LeadValues> {
        self.leads[lead.index()].as_ref()
    }

    pub fn reference(&self) -> Option<&LeadValues> {
        self.lead(LeadTime::REFERENCE)
    }
}

/// Wide table keyed by (city, date), iterated in city-name then date order.
#[derive(Debug, Clone, Default)]
pub struct ForecastTable {
    rows: BTreeMap<(String, NaiveDate), AlignedRow>,
}

impl ForecastTable {
    /// Joins per-lead-time records on the explicit (city, date) key.
    ///
    /// City, date and coordinates come from the lead time 1 record when one
    /// exists for the key, otherwise from the first record seen. Expects at
    /// most one record per (city, date, lead time); a later duplicate
    /// replaces the earlier values, so collapse sub-daily rows first.
    pub fn join(records: impl IntoIterator<Item = ForecastRecord>) -> Self {
        let mut table = ForecastTable::default();

        for rec in records {
            let row = table
                .rows
                .entry((rec.city.clone(), rec.date))
                .or_insert_with(|| AlignedRow::new(&rec));

            if rec.lead_time.is_reference() {
                row.latitude = rec.latitude;
                row.longitude = rec.longitude;
            }
            row.leads[rec.lead_time.index()] = Some(LeadValues::from(&rec));
        }

        info!(
            rows = table.rows.len(),
            cities = table.cities().len(),
            "Forecast table joined"
        );
        table
    }

    pub fn rows(&self) -> impl Iterator<Item = &AlignedRow> {
        self.rows.values()
    }

    pub fn rows_for<'a>(&'a self, city: &'a str) -> impl Iterator<Item = &'a AlignedRow> + 'a {
        self.rows.values().filter(move |r| r.city == city)
    }

    /// Distinct cities in alphabetical order.
    pub fn cities(&self) -> Vec<&str> {
        let mut cities: Vec<&str> = self.rows.keys().map(|(c, _)| c.as_str()).collect();
        cities.dedup();
        cities
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
