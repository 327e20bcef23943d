//! Metric cards derived from the gamma profile

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::application::visualizer::App;

/// Format a signed notional in billions, e.g. "+$4.20B"
pub fn format_billions(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "+" };
    format!("{}${:.2}B", sign, value.abs())
}

fn format_strike(strike: Option<f64>) -> String {
    strike.map(|s| format!("{:.1}", s)).unwrap_or_else(|| "-".to_string())
}

fn row(label: &str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {:<12}", label), Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(color)),
    ])
}

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let metrics = &app.metrics;
    let net_color = if metrics.is_net_long() { Color::Green } else { Color::Red };

    let lines = vec![
        row("Net GEX", format_billions(metrics.net_gamma), net_color),
        row("Call GEX", format_billions(metrics.total_call_gamma), Color::Green),
        row("Put GEX", format_billions(metrics.total_put_gamma), Color::Red),
        row("Zero Gamma", format_strike(metrics.zero_gamma), Color::White),
        row("Call Wall", format_strike(metrics.call_wall.map(f64::from)), Color::Green),
        row("Put Wall", format_strike(metrics.put_wall.map(f64::from)), Color::Red),
        row(
            "Visible",
            format!("{}/{}", app.window.visible_count(), app.window.level_count()),
            Color::White,
        ),
    ];

    let panel = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Market Internals "));

    frame.render_widget(panel, area);
}
