/// Number of consecutive solves averaged into one Ao5 point.
pub const AO5_WINDOW: usize = 5;

pub fn best(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Mean of every run of `window` consecutive values.
///
/// Yields `len - window + 1` points; point `i` covers `values[i..i + window]`.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    if window == 0 {
        return Vec::new();
    }
    values
        .windows(window)
        .map(|w| w.iter().sum::<f64>() / window as f64)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_is_minimum() {
        assert_eq!(best(&[1.0, 2.0, 1.5]), Some(1.0));
        assert_eq!(best(&[]), None);
    }

    #[test]
    fn mean_of_three() {
        assert_eq!(mean(&[1.0, 2.0, 1.5]), Some(1.5));
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn rolling_mean_has_len_minus_four_points() {
        let values: Vec<f64> = (1..=9).map(f64::from).collect();
        let ao5 = rolling_mean(&values, AO5_WINDOW);
        assert_eq!(ao5.len(), values.len() - 4);
        for (i, point) in ao5.iter().enumerate() {
            let expected = values[i..=i + 4].iter().sum::<f64>() / 5.0;
            assert_eq!(*point, expected);
        }
    }

    #[test]
    fn rolling_mean_of_exactly_one_window() {
        assert_eq!(rolling_mean(&[1.0, 2.0, 3.0, 4.0, 5.0], AO5_WINDOW), vec![3.0]);
    }

    #[test]
    fn rolling_mean_short_input_is_empty() {
        assert!(rolling_mean(&[1.0, 2.0, 3.0, 4.0], AO5_WINDOW).is_empty());
        assert!(rolling_mean(&[1.0], 0).is_empty());
    }
}
