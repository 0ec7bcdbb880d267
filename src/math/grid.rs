//! Year grid generation.

/// Generate `n` evenly spaced points between `start` and `end` (inclusive).
///
/// `n == 1` yields just `start`; `n == 0` yields an empty grid.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n as f64 - 1.0);
            let mut out: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            // Pin the last point so accumulated rounding never overshoots the horizon.
            out[n - 1] = end;
            out
        }
    }
}

/// Index of the grid point closest to `x` (ties resolve to the earlier point).
pub fn nearest_index(grid: &[f64], x: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &g) in grid.iter().enumerate() {
        let d = (g - x).abs();
        match best {
            Some((_, bd)) if d >= bd => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_includes_endpoints() {
        let v = linspace(0.0, 50.0, 1000);
        assert_eq!(v.len(), 1000);
        assert_eq!(v[0], 0.0);
        assert_eq!(v[999], 50.0);
        assert!((v[1] - 50.0 / 999.0).abs() < 1e-12);
    }

    #[test]
    fn linspace_small_counts() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(0.0, 1.0, 1), vec![0.0]);
        assert_eq!(linspace(0.0, 1.0, 2), vec![0.0, 1.0]);
    }

    #[test]
    fn nearest_index_prefers_earlier_on_tie() {
        let grid = [0.0, 1.0, 2.0, 3.0];
        assert_eq!(nearest_index(&grid, 1.4), Some(1));
        assert_eq!(nearest_index(&grid, 1.5), Some(1));
        assert_eq!(nearest_index(&grid, 9.0), Some(3));
        assert_eq!(nearest_index(&[], 1.0), None);
    }
}
