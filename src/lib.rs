pub mod accuracy;
pub mod config;
pub mod error;
pub mod forecast;
pub mod output;
pub mod pipeline;
pub mod report;
pub mod utility;
pub mod weather_score;
