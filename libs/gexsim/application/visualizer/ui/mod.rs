//! UI widgets for the dashboard

pub mod gamma;
pub mod gauge;
pub mod metrics;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::state::PriceDirection;
use super::App;
use crate::domain::{MarketStatus, Regime};

/// Draw the main UI layout
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);
    draw_main(frame, app, chunks[1]);
    draw_footer(frame, app, chunks[2]);
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let snapshot = &app.snapshot;
    let direction = app.price_direction();

    let price_style = match direction {
        PriceDirection::Up => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        PriceDirection::Down => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        PriceDirection::Neutral => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    };

    let status_style = if snapshot.status == MarketStatus::Open {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let regime_color = match snapshot.regime {
        Regime::AltcoinSeason => Color::Green,
        Regime::BitcoinSeason => Color::Red,
        Regime::Transition => Color::Yellow,
    };

    let line = Line::from(vec![
        Span::styled(" SPX ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::styled("S&P 500 Index  ", Style::default().fg(Color::DarkGray)),
        Span::styled(format!("{:.2}", snapshot.spot_price), price_style),
        Span::styled(format!(" {} ", direction.arrow()), price_style),
        Span::raw("| "),
        Span::styled(format!("MARKET: {}", snapshot.status), status_style),
        Span::raw(" | "),
        Span::styled(format!("REGIME: {}", snapshot.regime), Style::default().fg(regime_color)),
        Span::raw(" | "),
        Span::raw(format!("TF: {}", snapshot.timeframe)),
    ]);

    let header = Paragraph::new(line)
        .block(Block::default().borders(Borders::ALL).title(" GEX Dashboard "));

    frame.render_widget(header, area);
}

fn draw_main(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Gamma profile
            Constraint::Length(36), // Side panel
        ])
        .split(area);

    gamma::draw(frame, app, chunks[0]);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Season gauge
            Constraint::Min(0),    // Metric cards
        ])
        .split(chunks[1]);

    gauge::draw(frame, app, side[0]);
    metrics::draw(frame, app, side[1]);
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let status = app.status_message.as_deref().unwrap_or("");
    let keys = "q=quit 1/2/3=30D/60D/90D t=cycle +/-=zoom h/l=pan 0=reset";

    let footer_text = if status.is_empty() {
        format!(" #{} | {}", app.snapshot.sequence, keys)
    } else {
        format!(" #{} | {} | {}", app.snapshot.sequence, status, keys)
    };

    let footer = Paragraph::new(footer_text).block(Block::default().borders(Borders::ALL));

    frame.render_widget(footer, area);
}
