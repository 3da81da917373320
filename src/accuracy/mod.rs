//! Forecast accuracy scoring and aggregation.
//!
//! Each lead time 2..=5 forecast is compared with the lead time 1 forecast
//! for the same city and date, turned into a weighted accuracy in [0, 100],
//! and averaged per city and nationally.

pub mod aggregate;
pub mod deviation;
pub mod score;
pub mod types;
