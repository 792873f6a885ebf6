//! Class balance checking.

use std::collections::HashMap;

/// Largest tolerated ratio between the biggest and smallest class
const BALANCE_TOLERANCE: f64 = 1.1;

/// Count how many labels belong to each class.
pub fn class_counts(labels: &[String]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for label in labels {
        *counts.entry(label.clone()).or_insert(0) += 1;
    }
    counts
}

/// Whether the class distribution is balanced.
///
/// Balanced means the largest class holds at most 1.1x the images of the
/// smallest. An empty distribution counts as balanced.
pub fn check_balance(counts: &HashMap<String, usize>) -> bool {
    let max = counts.values().copied().max().unwrap_or(0);
    let min = counts.values().copied().min().unwrap_or(0);
    if min == 0 {
        return counts.is_empty();
    }
    (max as f64) <= BALANCE_TOLERANCE * (min as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, usize)]) -> HashMap<String, usize> {
        pairs
            .iter()
            .map(|(name, count)| (name.to_string(), *count))
            .collect()
    }

    #[test]
    fn test_within_tolerance_is_balanced() {
        assert!(check_balance(&counts(&[("A", 100), ("B", 105)])));
    }

    #[test]
    fn test_beyond_tolerance_is_unbalanced() {
        assert!(!check_balance(&counts(&[("A", 100), ("B", 130)])));
    }

    #[test]
    fn test_empty_is_balanced() {
        assert!(check_balance(&HashMap::new()));
    }

    #[test]
    fn test_empty_class_is_unbalanced() {
        assert!(!check_balance(&counts(&[("A", 100), ("B", 0)])));
    }

    #[test]
    fn test_class_counts() {
        let labels = vec!["a".to_string(), "b".to_string(), "a".to_string()];
        let counts = class_counts(&labels);
        assert_eq!(counts["a"], 2);
        assert_eq!(counts["b"], 1);
    }
}
