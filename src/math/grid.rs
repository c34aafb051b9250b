//! Evenly spaced sample grids.

/// `steps` evenly spaced points from `start` to `end`, both inclusive.
///
/// `steps == 1` yields `[start]`; `steps == 0` yields an empty grid. The last
/// point is pinned to `end` so callers can rely on the exact endpoint.
pub fn lin_space(start: f64, end: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (steps as f64 - 1.0);
            let mut out: Vec<f64> = (0..steps).map(|i| start + step * i as f64).collect();
            out[steps - 1] = end;
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn includes_both_endpoints() {
        let g = lin_space(10.0, 40.0, 4);
        assert_eq!(g, vec![10.0, 20.0, 30.0, 40.0]);
    }

    #[test]
    fn degenerate_counts() {
        assert!(lin_space(0.0, 1.0, 0).is_empty());
        assert_eq!(lin_space(5.0, 9.0, 1), vec![5.0]);
    }

    #[test]
    fn reversed_range_descends() {
        let g = lin_space(3.0, 1.0, 3);
        assert_eq!(g, vec![3.0, 2.0, 1.0]);
    }
}
