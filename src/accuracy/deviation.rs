use crate::accuracy::types::ErrorTriple;
use crate::forecast::types::LeadValues;

/// Fixed divisor for weather score differences. Not derived from data.
pub const SCORE_NORMALIZATION: f64 = 200.0;

/// Computes the error terms of `forecast` against `reference`.
///
/// - temperature: `|t_k - t_1| / |t_1|`
/// - rain: `|p_k - p_1|`
/// - weather score: `|s_k - s_1| / 200`
///
/// Returns `None` when the reference temperature is within `zero_epsilon`
/// of zero, where the relative temperature error is undefined.
pub fn error_terms(
    reference: &LeadValues,
    forecast: &LeadValues,
    zero_epsilon: f64,
) -> Option<ErrorTriple> {
    if reference.temp_avg.abs() <= zero_epsilon {
        return None;
    }

    Some(ErrorTriple {
        temp_error: (forecast.temp_avg - reference.temp_avg).abs() / reference.temp_avg.abs(),
        rain_error: (forecast.rain_probability - reference.rain_probability).abs(),
        score_error: (forecast.weather_score - reference.weather_score).abs() / SCORE_NORMALIZATION,
    })
}
