//! Season gauge - flow dominance as bitcoin vs altcoin share

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::application::visualizer::App;
use crate::domain::ALTCOIN_SEASON_THRESHOLD;

/// Gauge caption for a flow reading
pub fn season_label(flow_dominance: u8) -> (&'static str, Color) {
    if flow_dominance >= ALTCOIN_SEASON_THRESHOLD {
        ("ALTCOIN SEASON", Color::Green)
    } else {
        ("BITCOIN SEASON", Color::Red)
    }
}

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let flow = app.snapshot.flow_dominance.min(100);
    let (label, color) = season_label(flow);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Season Gauge | Altcoin vs Bitcoin ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Reading
            Constraint::Length(1), // Gauge bar
            Constraint::Length(1), // Split legend
            Constraint::Min(0),
        ])
        .split(inner);

    let reading = Paragraph::new(Line::from(vec![
        Span::styled(format!(" {}% ", flow), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ]));
    frame.render_widget(reading, rows[0]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Green).bg(Color::Red))
        .ratio(flow as f64 / 100.0)
        .label("");
    frame.render_widget(gauge, rows[1]);

    let legend = Paragraph::new(Line::from(vec![
        Span::styled(format!(" BITCOIN {}%", 100 - flow), Style::default().fg(Color::Red)),
        Span::raw("  "),
        Span::styled(format!("ALTCOINS {}%", flow), Style::default().fg(Color::Green)),
    ]));
    frame.render_widget(legend, rows[2]);
}
