//! Ratatui-based terminal UI.
//!
//! The TUI provides a settings panel for the climate zone, decline rate,
//! efficiency degradation and horizon, re-runs the calculation on every change,
//! and renders both CO2 curves with neutrality and economics in the header.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};
use tracing::debug;

use crate::app::pipeline::{CalculationOutput, run_calculation};
use crate::domain::{CalculationConfig, LookupTables};
use crate::error::AppError;

mod timeline_chart;

use timeline_chart::TimelineChart;

const DECLINE_STEP: f64 = 0.005;
const MAX_DECLINE: f64 = 0.995;
const DEGRADATION_STEP: f64 = 0.001;
const YEARS_STEP: u32 = 5;

const FIELD_COUNT: usize = 4;

/// Start the TUI.
///
/// The first calculation runs before the terminal is touched, so a bad
/// configuration is reported like any other CLI error.
pub fn run(config: CalculationConfig, tables: LookupTables) -> Result<(), AppError> {
    let mut app = App::new(config, tables)?;

    let _guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    /// Configuration as loaded; `r` resets to it.
    loaded: CalculationConfig,
    config: CalculationConfig,
    tables: LookupTables,
    selected_field: usize,
    status: String,
    /// Last successful run. Kept when an edit fails validation.
    run: CalculationOutput,
}

impl App {
    fn new(config: CalculationConfig, tables: LookupTables) -> Result<Self, AppError> {
        let run = run_calculation(&config, &tables)?;
        Ok(Self {
            loaded: config.clone(),
            config,
            tables,
            selected_field: 0,
            status: "Ready.".to_string(),
            run,
        })
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => {
                self.selected_field = self.selected_field.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected_field + 1 < FIELD_COUNT {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::Char('r') => {
                self.config = self.loaded.clone();
                self.recalculate("Reset to loaded configuration.".to_string());
            }
            _ => {}
        }
        false
    }

    fn adjust_field(&mut self, delta: i32) {
        let up = delta >= 0;
        let c = &mut self.config;
        let status = match self.selected_field {
            0 => {
                c.climate_zone = if up { c.climate_zone.next() } else { c.climate_zone.prev() };
                format!("climate zone: {}", c.climate_zone)
            }
            1 => {
                let step = if up { DECLINE_STEP } else { -DECLINE_STEP };
                c.decline_rate = round_to_step(c.decline_rate + step, DECLINE_STEP).clamp(0.0, MAX_DECLINE);
                format!("decline rate: {:.4}/yr", c.decline_rate)
            }
            2 => {
                let step = if up { DEGRADATION_STEP } else { -DEGRADATION_STEP };
                c.efficiency_degradation =
                    round_to_step(c.efficiency_degradation + step, DEGRADATION_STEP).max(0.0);
                format!("efficiency degradation: {:.4}/yr", c.efficiency_degradation)
            }
            3 => {
                c.years_to_calculate = if up {
                    c.years_to_calculate.saturating_add(YEARS_STEP)
                } else {
                    c.years_to_calculate.saturating_sub(YEARS_STEP)
                }
                .max(YEARS_STEP);
                format!("horizon: {} years", c.years_to_calculate)
            }
            _ => return,
        };
        self.recalculate(status);
    }

    fn recalculate(&mut self, status: String) {
        match run_calculation(&self.config, &self.tables) {
            Ok(run) => {
                self.run = run;
                self.status = status;
            }
            Err(err) => {
                debug!(target: "tui", error = %err, "Edit rejected");
                self.status = format!("{status} (rejected: {err})");
            }
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0), Constraint::Length(3)])
            .split(frame.area());

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let run = &self.run;
        let lines = vec![
            Line::from(vec![
                Span::styled("roofc", Style::default().fg(Color::Cyan)),
                Span::raw(format!(
                    " roof carbon projection | {:.0} m2 | initial {:.1} kg CO2e",
                    self.config.roof_area, run.initial_co2
                )),
            ]),
            Line::from(Span::styled(
                format!(
                    "neutral (improved): {} | neutral (natural): {} | saving {:.1} kg CO2e/yr",
                    fmt_year(run.neutrality.improved_year),
                    fmt_year(run.neutrality.natural_year),
                    run.savings.total_annual,
                ),
                Style::default().fg(Color::Gray),
            )),
            Line::from(Span::styled(
                format!(
                    "cost EUR {:.0} | payback {} | 10y ROI {:.2}%",
                    run.economics.estimated_cost,
                    run.economics
                        .simple_payback_years
                        .map(|y| format!("{y:.1} yrs"))
                        .unwrap_or_else(|| "n/a".to_string()),
                    run.economics.roi_10yr,
                ),
                Style::default().fg(Color::Gray),
            )),
        ];

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(6)])
            .split(area);

        self.draw_chart(frame, chunks[0]);
        self.draw_settings(frame, chunks[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("CO2 timeline").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let series = chart_series(&self.run);
        let (chart_rect, insets) = chart_layout(inner);
        let widget = TimelineChart {
            improved: &series.improved,
            natural: &series.natural,
            neutrality_year: self.run.neutrality.improved_year,
            x_bounds: series.x_bounds,
            y_bounds: series.y_bounds,
            x_label: X_LABEL,
            y_label: Y_LABEL,
            fmt_x: fmt_axis_x,
            fmt_y: fmt_axis_y,
        };

        frame.render_widget(widget, chart_rect);
        if let Some(insets) = insets {
            draw_axis_ticks(frame, inner, chart_rect, insets, series.x_bounds, series.y_bounds);
        }
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let c = &self.config;
        let items = vec![
            ListItem::new(format!(
                "Climate zone: {} (x{:.1})",
                c.climate_zone,
                c.climate_zone.factor()
            )),
            ListItem::new(format!("Decline rate: {:.4}/yr", c.decline_rate)),
            ListItem::new(format!("Efficiency degradation: {:.4}/yr", c.efficiency_degradation)),
            ListItem::new(format!("Horizon: {} years ({} points)", c.years_to_calculate, c.points)),
        ];

        let list = List::new(items)
            .block(Block::default().title("Settings").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  r reset  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

const X_LABEL: &str = "year";
const Y_LABEL: &str = "kg CO2e";

/// Chart input derived from one calculation.
struct ChartSeries {
    improved: Vec<(f64, f64)>,
    natural: Vec<(f64, f64)>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

fn chart_series(run: &CalculationOutput) -> ChartSeries {
    let years = run.timeline.years();
    let improved: Vec<(f64, f64)> = years
        .iter()
        .copied()
        .zip(run.timeline.co2_improved().iter().copied())
        .collect();
    let natural: Vec<(f64, f64)> = years
        .iter()
        .copied()
        .zip(run.timeline.co2_natural().iter().copied())
        .collect();

    let mut x1 = years.last().copied().unwrap_or(1.0);
    if !x1.is_finite() || x1 <= 0.0 {
        x1 = 1.0;
    }

    // Curves start at the initial value and never go below zero.
    let mut y_max = improved
        .iter()
        .chain(&natural)
        .map(|&(_, y)| y)
        .fold(f64::NEG_INFINITY, f64::max);
    if !y_max.is_finite() || y_max <= 0.0 {
        y_max = 1.0;
    }
    let pad = y_max * 0.05;

    ChartSeries {
        improved,
        natural,
        x_bounds: [0.0, x1],
        y_bounds: [-pad, y_max + pad],
    }
}

fn round_to_step(value: f64, step: f64) -> f64 {
    (value / step).round() * step
}

fn fmt_year(year: Option<f64>) -> String {
    year.map(|y| format!("year {y:.1}"))
        .unwrap_or_else(|| "not reached".to_string())
}

fn fmt_axis_x(v: f64) -> String {
    format!("{v:.0}")
}

fn fmt_axis_y(v: f64) -> String {
    format!("{v:.0}")
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 9,
        right: 2,
        top: 1,
        bottom: 2,
    };

    if inner.width <= insets.left + insets.right + 10 || inner.height <= insets.top + insets.bottom + 5 {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };

    (rect, Some(insets))
}

fn draw_axis_ticks(
    frame: &mut ratatui::Frame<'_>,
    inner: Rect,
    chart: Rect,
    insets: AxisInsets,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
) {
    let ticks = 5usize;
    let style = Style::default().fg(Color::Gray);

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let label = fmt_axis_x(x_bounds[0] + u * (x_bounds[1] - x_bounds[0]));
        let x = chart.x + ((chart.width - 1) as f64 * u).round() as u16;
        let start = x.saturating_sub((label.len() / 2) as u16);
        let y = chart.y + chart.height;
        if y >= inner.y + inner.height - 1 {
            continue;
        }
        let width = label.len() as u16;
        frame.render_widget(Paragraph::new(label).style(style), Rect { x: start, y, width, height: 1 });
    }

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let label = fmt_axis_y(y_bounds[0] + u * (y_bounds[1] - y_bounds[0]));
        let y = chart.y + (chart.height - 1) - ((chart.height - 1) as f64 * u).round() as u16;
        let start = (inner.x + insets.left.saturating_sub(1)).saturating_sub(label.len() as u16);
        if start < inner.x {
            continue;
        }
        let width = label.len() as u16;
        frame.render_widget(Paragraph::new(label).style(style), Rect { x: start, y, width, height: 1 });
    }

    let x_rect = Rect {
        x: chart.x,
        y: chart.y + chart.height + 1,
        width: chart.width,
        height: 1,
    };
    if x_rect.y < inner.y + inner.height {
        frame.render_widget(
            Paragraph::new(X_LABEL).alignment(Alignment::Center).style(style),
            x_rect,
        );
    }

    let y_rect = Rect {
        x: inner.x,
        y: inner.y,
        width: insets.left.saturating_sub(1),
        height: 1,
    };
    frame.render_widget(
        Paragraph::new(Y_LABEL).style(style.add_modifier(Modifier::BOLD)),
        y_rect,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ClimateZone;

    fn config() -> CalculationConfig {
        CalculationConfig {
            roof_area: 1000.0,
            gwp_roof: 2.0,
            decline_rate: 0.02,
            roof_division: [("Green Areas".to_string(), 100.0)].into(),
            full_savings: [("Green Areas".to_string(), 400.0)].into(),
            improvement_years: Default::default(),
            climate_zone: ClimateZone::Temperate,
            efficiency_degradation: 0.005,
            years_to_calculate: 20,
            points: 200,
        }
    }

    fn app() -> App {
        App::new(config(), LookupTables::STANDARD).unwrap()
    }

    #[test]
    fn adjusting_fields_reruns_the_calculation() {
        let mut app = app();
        app.handle_key(KeyCode::Right);
        assert_eq!(app.config.climate_zone, ClimateZone::Temperate.next());
        assert_eq!(app.run.configuration.climate_zone, app.config.climate_zone);

        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Right);
        assert_eq!(app.config.years_to_calculate, 25);
        assert_eq!(app.run.timeline.years().last().copied(), Some(25.0));

        assert!(!app.handle_key(KeyCode::Char('r')));
        assert_eq!(app.config, config());
        assert!(app.handle_key(KeyCode::Char('q')));
    }

    #[test]
    fn decline_rate_stays_inside_the_valid_range() {
        let mut app = app();
        app.selected_field = 1;
        for _ in 0..10 {
            app.adjust_field(-1);
        }
        assert_eq!(app.config.decline_rate, 0.0);
        for _ in 0..400 {
            app.adjust_field(1);
        }
        assert!(app.config.decline_rate < 1.0);
        assert_eq!(app.run.configuration.decline_rate, app.config.decline_rate);
    }

    #[test]
    fn horizon_never_drops_to_zero() {
        let mut app = app();
        app.selected_field = 3;
        for _ in 0..10 {
            app.adjust_field(-1);
        }
        assert_eq!(app.config.years_to_calculate, YEARS_STEP);
    }

    #[test]
    fn chart_bounds_cover_both_curves() {
        let app = app();
        let series = chart_series(&app.run);
        assert_eq!(series.x_bounds, [0.0, 20.0]);
        assert!(series.y_bounds[0] < 0.0);
        assert!(series.y_bounds[1] > app.run.initial_co2);
        assert_eq!(series.improved.len(), 200);
    }
}
