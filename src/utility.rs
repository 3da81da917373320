use std::collections::HashMap;
use std::hash::Hash;

/// Computes the arithmetic mean of a slice of values. Returns `None` for empty input.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Most frequent item. On a tie the item encountered first wins.
pub fn mode<T, I>(items: I) -> Option<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut counts: HashMap<T, (usize, usize)> = HashMap::new();
    for (position, item) in items.into_iter().enumerate() {
        counts.entry(item).or_insert((0, position)).0 += 1;
    }

    counts
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(item, _)| item)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1.0, 2.0, 6.0]), Some(3.0));
    }

    #[test]
    fn test_mode_picks_most_frequent() {
        let m = mode(["fog", "clear sky", "fog", "mist"]);
        assert_eq!(m, Some("fog"));
    }

    #[test]
    fn test_mode_tie_goes_to_first_encountered() {
        assert_eq!(mode(["mist", "fog", "fog", "mist"]), Some("mist"));
        assert_eq!(mode(["fog", "mist", "mist", "fog"]), Some("fog"));
        assert_eq!(mode(["b", "a"]), Some("b"));
    }

    #[test]
    fn test_mode_empty() {
        assert_eq!(mode(Vec::<String>::new()), None);
    }
}
