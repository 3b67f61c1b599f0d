use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;

/// Most frequent value. Ties go to the value seen first. `None` for empty input.
pub fn mode<T, I>(values: I) -> Option<T>
where
    I: IntoIterator<Item = T>,
    T: Eq + Hash,
{
    let mut counts: HashMap<T, (usize, usize)> = HashMap::new();
    for (idx, value) in values.into_iter().enumerate() {
        counts.entry(value).or_insert((0, idx)).0 += 1;
    }

    counts
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(value, _)| value)
}

/// One category's count and fraction of the non-missing total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Share {
    pub value: String,
    pub count: usize,
    pub fraction: f64,
}

/// Counts each category and normalizes by the number of values seen.
///
/// Ordered by descending count, ties by first appearance.
pub fn value_shares<'a, I>(values: I) -> Vec<Share>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut total = 0usize;

    for value in values {
        total += 1;
        let count = counts.entry(value).or_insert_with(|| {
            order.push(value);
            0
        });
        *count += 1;
    }

    let mut shares: Vec<Share> = order
        .into_iter()
        .map(|value| {
            let count = counts[value];
            Share {
                value: value.to_string(),
                count,
                fraction: count as f64 / total as f64,
            }
        })
        .collect();
    // stable sort keeps first-appearance order among equal counts
    shares.sort_by(|a, b| b.count.cmp(&a.count));
    shares
}

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_empty() {
        assert_eq!(mode(Vec::<u32>::new()), None);
    }

    #[test]
    fn test_mode_clear_winner() {
        assert_eq!(mode(vec![3, 1, 3, 2]), Some(3));
    }

    #[test]
    fn test_mode_tie_goes_to_first_seen() {
        assert_eq!(mode(vec!["b", "a", "a", "b"]), Some("b"));
        assert_eq!(mode(vec![7, 5, 5, 7]), Some(7));
        assert_eq!(mode(vec![1, 2, 3]), Some(1));
    }

    #[test]
    fn test_value_shares_order_and_fractions() {
        let shares = value_shares(["Customer", "Subscriber", "Subscriber", "Dependent"]);

        let values: Vec<_> = shares.iter().map(|s| s.value.as_str()).collect();
        assert_eq!(values, vec!["Subscriber", "Customer", "Dependent"]);
        assert_eq!(shares[0].count, 2);
        assert_eq!(shares[0].fraction, 0.5);
        assert_eq!(shares[1].fraction, 0.25);

        let total: f64 = shares.iter().map(|s| s.fraction).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_value_shares_empty() {
        assert!(value_shares(std::iter::empty()).is_empty());
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(0.126), 0.13);
        assert_eq!(round2(1.0), 1.0);
    }
}
