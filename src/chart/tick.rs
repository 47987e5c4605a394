use crate::chart::Domain;

/// Stride between visible X labels so roughly `target` of them are drawn.
///
/// `0` means "no stride": the axis keeps only its first and last label.
pub fn tick_interval(n: usize, target: usize) -> usize {
    if n <= 1 {
        return 0;
    }
    (n / target.max(1)).max(1)
}

/// Indices of the points whose X label is drawn.
pub fn label_indices(n: usize, interval: usize) -> Vec<usize> {
    match (n, interval) {
        (0, _) => vec![],
        (1, _) => vec![0],
        (_, 0) => vec![0, n - 1],
        _ => (0..n).step_by(interval).collect(),
    }
}

/// `count` evenly spaced values across the domain, ends included.
pub fn value_ticks(domain: Domain, count: usize) -> Vec<f64> {
    match count {
        0 => vec![],
        1 => vec![domain.min],
        _ => {
            let step = (domain.max - domain.min) / (count - 1) as f64;
            (0..count).map(|i| domain.min + step * i as f64).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_boundaries() {
        assert_eq!(tick_interval(0, 10), 0);
        assert_eq!(tick_interval(1, 10), 0);
        assert_eq!(tick_interval(10, 10), 1);
        assert_eq!(tick_interval(250, 10), 25);
        assert_eq!(tick_interval(5, 10), 1);
        assert_eq!(tick_interval(259, 10), 25);
    }

    #[test]
    fn zero_target_does_not_divide_by_zero() {
        assert_eq!(tick_interval(20, 0), 20);
    }

    #[test]
    fn labels_for_interval() {
        assert_eq!(label_indices(1, 0), vec![0]);
        assert_eq!(label_indices(10, 1).len(), 10);
        assert_eq!(label_indices(250, 25).len(), 10);
        assert_eq!(label_indices(7, 3), vec![0, 3, 6]);
    }

    #[test]
    fn zero_interval_preserves_start_and_end() {
        assert_eq!(label_indices(5, 0), vec![0, 4]);
        assert!(label_indices(0, 0).is_empty());
    }

    #[test]
    fn value_ticks_span_domain() {
        let ticks = value_ticks(Domain { min: 0.0, max: 100.0 }, 5);
        assert_eq!(ticks, vec![0.0, 25.0, 50.0, 75.0, 100.0]);
    }
}
