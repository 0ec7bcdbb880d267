//! ASCII plotting of the projected timeline for terminal output.
//!
//! Fixed-size character grid with deterministic output, so golden tests can
//! pin the exact rendering.
//!
//! Plot elements:
//! - improved curve: `-`
//! - natural decline: `.`
//!
//! The improved curve is drawn first and wins where the two overlap.

use crate::domain::TimelineSeries;

pub const IMPROVED_MARK: char = '-';
pub const NATURAL_MARK: char = '.';

/// Render both curves of a timeline into a `width` x `height` grid.
pub fn render_timeline_plot(series: &TimelineSeries, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (x_min, x_max) = range(series.years()).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = range(series.co2_natural().iter().chain(series.co2_improved()))
        .unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];
    let frame = Frame {
        x_min,
        x_max,
        y_min,
        y_max,
    };

    let improved: Vec<(f64, f64)> = series
        .years()
        .iter()
        .copied()
        .zip(series.co2_improved().iter().copied())
        .collect();
    let natural: Vec<(f64, f64)> = series
        .years()
        .iter()
        .copied()
        .zip(series.co2_natural().iter().copied())
        .collect();

    draw_curve(&mut grid, &improved, &frame, IMPROVED_MARK);
    draw_curve(&mut grid, &natural, &frame, NATURAL_MARK);

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: years=[{x_min:.1}, {x_max:.1}] | CO2e=[{y_min:.1}, {y_max:.1}] kg | {IMPROVED_MARK} improved, {NATURAL_MARK} natural\n"
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out
}

struct Frame {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

fn range<'a>(values: impl IntoIterator<Item = &'a f64>) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        min = min.min(v);
        max = max.max(v);
    }
    if min.is_finite() && max.is_finite() && max > min {
        Some((min, max))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(t: f64, frame: &Frame, width: usize) -> usize {
    let width = width.max(2);
    let u = ((t - frame.x_min) / (frame.x_max - frame.x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, frame: &Frame, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - frame.y_min) / (frame.y_max - frame.y_min)).clamp(0.0, 1.0);
    // y_max is row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], frame: &Frame, ch: char) {
    let height = grid.len();
    let Some(width) = grid.first().map(Vec::len) else {
        return;
    };

    let mut prev = None;
    for &(t, y) in curve {
        let x = map_x(t, frame, width);
        let yy = map_y(y, frame, height);
        match prev {
            Some((x0, y0)) => draw_line(grid, x0, y0, x, yy, ch),
            None => {
                if grid[yy][x] == ' ' {
                    grid[yy][x] = ch;
                }
            }
        }
        prev = Some((x, yy));
    }
}

/// Integer line drawing (Bresenham). Never overwrites a non-blank cell.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_golden_snapshot_small() {
        let series = TimelineSeries::new(
            vec![0.0, 1.0, 2.0, 3.0, 4.0],
            vec![4.0, 3.5, 3.0, 2.5, 2.0],
            vec![4.0, 3.0, 2.0, 1.0, 0.0],
        );

        let txt = render_timeline_plot(&series, 12, 6);
        let expected = concat!(
            "Plot: years=[0.0, 4.0] | CO2e=[-0.2, 4.2] kg | - improved, . natural\n",
            "--          \n",
            "  --...     \n",
            "    -- ...  \n",
            "      -   ..\n",
            "       ---  \n",
            "          --\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn degenerate_series_still_renders_minimum_grid() {
        let series = TimelineSeries::new(vec![0.0], vec![10.0], vec![10.0]);
        let txt = render_timeline_plot(&series, 3, 2);
        let rows: Vec<&str> = txt.lines().skip(1).collect();
        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|r| r.chars().count() == 10));
        let marks: usize = rows.iter().map(|r| r.matches(IMPROVED_MARK).count()).sum();
        assert_eq!(marks, 1);
        assert!(!rows.iter().any(|r| r.contains(NATURAL_MARK)));
    }
}
