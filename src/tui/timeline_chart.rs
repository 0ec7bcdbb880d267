//! Plotters-powered CO2 timeline chart widget for Ratatui.
//!
//! Plotters is rendered into the Ratatui buffer through `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// A render-only chart description.
///
/// All series and bounds are computed outside the render call, so `render()`
/// only draws.
pub struct TimelineChart<'a> {
    /// Improved curve, `(year, kg CO2e)`.
    pub improved: &'a [(f64, f64)],
    /// Natural decline curve, `(year, kg CO2e)`.
    pub natural: &'a [(f64, f64)],
    /// Year at which the improved curve first reaches zero.
    pub neutrality_year: Option<f64>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub fmt_x: fn(f64) -> String,
    pub fmt_y: fn(f64) -> String,
}

impl Widget for TimelineChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters may fail to lay out a chart in a tiny area.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;
        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(self.x_label)
                .y_desc(self.y_label)
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| (self.fmt_x)(*v))
                .y_label_formatter(&|v| (self.fmt_y)(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            let improved_color = RGBColor(0, 255, 255); // cyan
            let natural_color = RGBColor(160, 160, 160); // gray
            let marker_color = RGBColor(0, 255, 0); // green

            // Natural first so the improved curve stays on top where they meet.
            chart.draw_series(LineSeries::new(self.natural.iter().copied(), &natural_color))?;
            chart.draw_series(LineSeries::new(self.improved.iter().copied(), &improved_color))?;

            if let Some(year) = self.neutrality_year {
                chart.draw_series(LineSeries::new([(year, y0), (year, y1)], &marker_color))?;
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}
