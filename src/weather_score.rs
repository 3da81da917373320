//! Pleasantness rating for the textual weather descriptions reported by the
//! forecast provider.
//!
//! Scores run from -400 (tornado) to +600 (clear sky). The table is fixed;
//! a description that is not listed has no score and rows carrying it are
//! rejected at load time.

static WEATHER_SCORES: &[(&str, i32)] = &[
    ("clear sky", 600),
    ("few clouds", 500),
    ("scattered clouds", 400),
    ("broken clouds", 300),
    ("overcast clouds", 200),
    // drizzle
    ("light intensity drizzle", -1),
    ("drizzle", -2),
    ("heavy intensity drizzle", -3),
    ("light intensity drizzle rain", -4),
    ("drizzle rain", -5),
    ("heavy intensity drizzle rain", -6),
    ("shower drizzle", -7),
    ("shower rain and drizzle", -8),
    ("heavy shower rain and drizzle", -9),
    // rain
    ("light rain", -10),
    ("moderate rain", -20),
    ("heavy intensity rain", -30),
    ("very heavy rain", -40),
    ("extreme rain", -50),
    ("freezing rain", -60),
    ("light intensity shower rain", -70),
    ("shower rain", -80),
    ("heavy intensity shower rain", -90),
    ("ragged shower rain", -100),
    // thunderstorm
    ("thunderstorm with light drizzle", -15),
    ("thunderstorm with drizzle", -25),
    ("thunderstorm with light rain", -35),
    ("thunderstorm with rain", -45),
    ("thunderstorm with heavy drizzle", -55),
    ("thunderstorm with heavy rain", -65),
    ("thunderstorm", -75),
    ("heavy thunderstorm", -85),
    ("ragged thunderstorm", -95),
    // snow
    ("light snow", -20),
    ("snow", -40),
    ("heavy snow", -60),
    ("sleet", -80),
    ("light shower sleet", -100),
    ("shower sleet", -120),
    ("light rain and snow", -140),
    ("rain and snow", -160),
    ("light shower snow", -180),
    ("shower snow", -200),
    ("heavy shower snow", -220),
    // atmosphere
    ("mist", -10),
    ("smoke", -20),
    ("haze", -30),
    ("sand/dust whirls", -40),
    ("fog", -50),
    ("sand", -60),
    ("dust", -70),
    ("volcanic ash", -90),
    ("squalls", -100),
    ("tornado", -400),
];

/// Returns the score for `description`, matched after trimming and ASCII lowercasing.
pub fn weather_score(description: &str) -> Option<i32> {
    let needle = description.trim().to_ascii_lowercase();
    WEATHER_SCORES
        .iter()
        .find(|(name, _)| *name == needle)
        .map(|(_, score)| *score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_score_range() {
        assert_eq!(weather_score("clear sky"), Some(600));
        assert_eq!(weather_score("tornado"), Some(-400));
        let max = WEATHER_SCORES.iter().map(|(_, s)| *s).max();
        let min = WEATHER_SCORES.iter().map(|(_, s)| *s).min();
        assert_eq!(max, Some(600));
        assert_eq!(min, Some(-400));
    }

    #[test]
    fn test_lookup_normalizes_case_and_whitespace() {
        assert_eq!(weather_score("  Overcast Clouds "), Some(200));
        assert_eq!(weather_score("Light Rain"), Some(-10));
    }

    #[test]
    fn test_unknown_description() {
        assert_eq!(weather_score("raining frogs"), None);
        assert_eq!(weather_score(""), None);
    }

    #[test]
    fn test_descriptions_are_unique() {
        let names: HashSet<_> = WEATHER_SCORES.iter().map(|(n, _)| *n).collect();
        assert_eq!(names.len(), WEATHER_SCORES.len());
    }
}
