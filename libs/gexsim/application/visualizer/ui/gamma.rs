//! Gamma profile widget - one row per strike, puts left of the axis, calls right
//!
//! When the strike window holds more strikes than the area has rows, adjacent
//! strikes are summed into a single row so the whole window stays on screen.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::application::visualizer::App;
use crate::domain::GammaLevel;

/// Columns used by the strike label ("88-90 ")
const LABEL_WIDTH: u16 = 6;
/// Columns used by the net column
const NET_WIDTH: u16 = 9;
/// Columns used by the spot marker suffix
const SPOT_WIDTH: u16 = 7;
const SPOT_MARKER: &str = " ◄ SPOT";

/// One chart row: a single strike, or a run of adjacent strikes summed together
#[derive(Debug, Clone, PartialEq)]
struct StrikeRow {
    first: u32,
    last: u32,
    call_gamma: f64,
    put_gamma: f64,
}

impl StrikeRow {
    fn label(&self) -> String {
        if self.first == self.last {
            self.first.to_string()
        } else {
            format!("{}-{}", self.first, self.last)
        }
    }

    fn contains(&self, strike: u32) -> bool {
        (self.first..=self.last).contains(&strike)
    }

    fn net_gamma(&self) -> f64 {
        self.call_gamma + self.put_gamma
    }
}

/// Strikes summed into each row so that `len` strikes fit in `rows`
fn strikes_per_row(len: usize, rows: usize) -> usize {
    if rows == 0 {
        return len.max(1);
    }
    len.div_ceil(rows).max(1)
}

/// Group `levels` into at most `rows` rows of adjacent strikes
fn fit_rows(levels: &[GammaLevel], rows: usize) -> Vec<StrikeRow> {
    if rows == 0 {
        return Vec::new();
    }

    levels
        .chunks(strikes_per_row(levels.len(), rows))
        .map(|chunk| StrikeRow {
            first: chunk[0].strike,
            last: chunk[chunk.len() - 1].strike,
            call_gamma: chunk.iter().map(|l| l.call_gamma).sum(),
            put_gamma: chunk.iter().map(|l| l.put_gamma).sum(),
        })
        .collect()
}

/// Draw the gamma exposure profile for the visible strike window
pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let levels = app.visible_levels();
    let rows = fit_rows(levels, area.height.saturating_sub(2) as usize);

    let range = match (levels.first(), levels.last()) {
        (Some(first), Some(last)) => format!("{}-{}", first.strike, last.strike),
        _ => "-".to_string(),
    };
    let zoom = if app.window.is_full() { "" } else { " zoom" };
    let per_row = strikes_per_row(levels.len(), rows.len());
    let grouping = if per_row > 1 {
        format!(" ({} per row)", per_row)
    } else {
        String::new()
    };
    let title = format!(
        " Gamma Exposure Profile ($B) | strikes {} of {}{}{} ",
        range,
        app.window.level_count(),
        zoom,
        grouping
    );

    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let bar_width = (inner.width.saturating_sub(LABEL_WIDTH + NET_WIDTH + SPOT_WIDTH + 1) / 2) as usize;
    let scale = max_abs_gamma(&rows);
    let spot_strike = app.snapshot.spot_strike();

    let lines: Vec<Line> = rows
        .iter()
        .map(|row| format_row(row, scale, bar_width, row.contains(spot_strike)))
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Largest absolute call or put value, used to scale bars
fn max_abs_gamma(rows: &[StrikeRow]) -> f64 {
    rows.iter()
        .map(|r| r.call_gamma.max(-r.put_gamma))
        .fold(0.0, f64::max)
}

/// Number of bar cells for `value` at `scale`
fn bar_len(value: f64, scale: f64, width: usize) -> usize {
    if scale <= 0.0 || width == 0 {
        return 0;
    }
    ((value.abs() / scale) * width as f64).round().min(width as f64) as usize
}

fn format_row(row: &StrikeRow, scale: f64, width: usize, at_spot: bool) -> Line<'static> {
    let put_cells = bar_len(row.put_gamma, scale, width);
    let call_cells = bar_len(row.call_gamma, scale, width);
    let net = row.net_gamma();
    let net_color = if net > 0.0 { Color::Green } else { Color::Red };

    let (label_style, marker) = if at_spot {
        (
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            SPOT_MARKER.to_string(),
        )
    } else {
        (Style::default().fg(Color::DarkGray), " ".repeat(SPOT_WIDTH as usize))
    };

    Line::from(vec![
        Span::styled(format!("{:>5} ", row.label()), label_style),
        Span::raw(" ".repeat(width - put_cells)),
        Span::styled("█".repeat(put_cells), Style::default().fg(Color::Red)),
        Span::styled("│", Style::default().fg(Color::DarkGray)),
        Span::styled("█".repeat(call_cells), Style::default().fg(Color::Green)),
        Span::raw(" ".repeat(width - call_cells)),
        Span::styled(format!(" {:>+7.2}", net), Style::default().fg(net_color)),
        Span::styled(marker, Style::default().fg(Color::Yellow)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
    use tokio::runtime::Handle;

    use crate::application::feed::{spawn_market_feed, MarketDataController};
    use crate::domain::Timeframe;
    use crate::infrastructure::SimulationConfig;

    fn levels(count: u32) -> Vec<GammaLevel> {
        (1..=count)
            .map(|strike| GammaLevel {
                strike,
                call_gamma: 1.0,
                put_gamma: -0.5,
            })
            .collect()
    }

    fn rendered_lines(buffer: &Buffer) -> Vec<String> {
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|cells| cells.iter().map(|c| c.symbol()).collect())
            .collect()
    }

    fn dashboard(timeframe: Timeframe) -> App {
        let config = SimulationConfig {
            initial_timeframe: timeframe,
            ..SimulationConfig::default().with_seed(21)
        };
        let controller = Arc::new(MarketDataController::new(config));
        let feed = spawn_market_feed(&Handle::current(), controller.clone(), Duration::from_secs(3600));
        App::with_feed(controller, feed)
    }

    #[test]
    fn test_bar_len_scales_and_caps() {
        assert_eq!(bar_len(5.0, 10.0, 20), 10);
        assert_eq!(bar_len(-10.0, 10.0, 20), 20);
        assert_eq!(bar_len(15.0, 10.0, 20), 20);
        assert_eq!(bar_len(1.0, 0.0, 20), 0);
        assert_eq!(bar_len(1.0, 1.0, 0), 0);
    }

    #[test]
    fn test_max_abs_gamma_uses_both_sides() {
        let rows = fit_rows(
            &[
                GammaLevel { strike: 1, call_gamma: 2.0, put_gamma: -5.0 },
                GammaLevel { strike: 2, call_gamma: 3.0, put_gamma: -1.0 },
            ],
            2,
        );
        assert_eq!(max_abs_gamma(&rows), 5.0);
        assert_eq!(max_abs_gamma(&[]), 0.0);
    }

    #[test]
    fn test_fit_rows_keeps_single_strikes_when_room() {
        let rows = fit_rows(&levels(30), 38);
        assert_eq!(rows.len(), 30);
        assert_eq!(rows[0].label(), "1");
        assert_eq!(rows[29].label(), "30");
    }

    #[test]
    fn test_fit_rows_groups_every_strike() {
        let rows = fit_rows(&levels(90), 38);
        assert_eq!(rows.len(), 30);
        assert_eq!(rows[0].label(), "1-3");
        assert_eq!(rows[0].call_gamma, 3.0);
        assert_eq!(rows[0].put_gamma, -1.5);
        assert!(rows[14].contains(45));
        assert_eq!(rows[29].label(), "88-90");

        let uneven = fit_rows(&levels(10), 4);
        assert_eq!(uneven.len(), 4);
        assert_eq!(uneven[3].label(), "10");

        assert!(fit_rows(&levels(10), 0).is_empty());
        assert!(fit_rows(&[], 10).is_empty());
    }

    #[test]
    fn test_spot_marker_only_on_matching_row() {
        let rows = fit_rows(&levels(90), 30);
        let marked: Vec<String> = rows
            .iter()
            .filter(|row| row.contains(80))
            .map(|row| row.label())
            .collect();
        assert_eq!(marked, vec!["79-81".to_string()]);

        let line = format_row(&rows[26], 1.0, 10, true);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.ends_with(SPOT_MARKER));
        assert!(text.starts_with("79-81 "));
    }

    #[tokio::test]
    async fn test_full_window_renders_every_strike() {
        let app = dashboard(Timeframe::Days90);
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                draw(frame, &app, area);
            })
            .unwrap();

        let lines = rendered_lines(terminal.backend().buffer());
        assert!(lines[0].contains("strikes 1-90 of 90 (3 per row)"));
        assert!(lines.iter().any(|l| l.contains("43-45")));
        assert!(lines.iter().any(|l| l.contains("88-90")));

        // Initial spot of 75 lands on strike 80
        let spot_rows: Vec<&String> = lines.iter().filter(|l| l.contains("SPOT")).collect();
        assert_eq!(spot_rows.len(), 1);
        assert!(spot_rows[0].contains("79-81"));
    }

    #[tokio::test]
    async fn test_zoomed_window_renders_single_strikes() {
        let mut app = dashboard(Timeframe::Days30);
        app.zoom_in();
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                draw(frame, &app, area);
            })
            .unwrap();

        let lines = rendered_lines(terminal.backend().buffer());
        assert!(lines[0].contains("strikes 3-28 of 30 zoom"));
        assert!(!lines[0].contains("per row"));
        // Spot strike 80 is outside the 30D axis
        assert!(!lines.iter().any(|l| l.contains("SPOT")));
    }
}
