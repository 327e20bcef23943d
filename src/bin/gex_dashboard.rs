//! GEX Dashboard - Terminal UI for the simulated gamma-exposure market
//!
//! Subscribes to the market data controller and renders:
//! - Live spot price with directional flash
//! - Gamma exposure profile per strike, with zoom/pan
//! - Season gauge and metric cards

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use gex_dashboard::bin_common::{cli, load_config_from_env, parse_args, ConfigType};
use gex_dashboard::gexsim::application::visualizer::{ui, App};
use gex_dashboard::gexsim::{init_file_tracing, DashboardConfig, Timeframe};

/// How long to wait for input before redrawing
const INPUT_POLL: Duration = Duration::from_millis(10);

fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    let args = parse_args();
    let config_type = match cli::flag_value(&args, "--config") {
        Some(path) => ConfigType::Custom(path.to_string()),
        None => ConfigType::Dashboard,
    };
    let config_path = load_config_from_env(config_type);

    // Stdout logging would corrupt the alternate screen, so only log to a file.
    // Set it up before the real load so config warnings reach the file.
    let logging = DashboardConfig::peek(&config_path);
    if let Some(log_file) = &logging.log_file {
        init_file_tracing(log_file, &logging.log_level)?;
    }

    let config = DashboardConfig::load_or_default(&config_path)?;
    config.log();

    let runtime = tokio::runtime::Runtime::new()?;
    let mut app = App::initialize(runtime.handle(), config.simulation.clone());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Stop the feed before the runtime goes away
    app.shutdown();

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        app.refresh();

        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(INPUT_POLL)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key.code);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('1') => app.change_timeframe(Timeframe::Days30),
        KeyCode::Char('2') => app.change_timeframe(Timeframe::Days60),
        KeyCode::Char('3') => app.change_timeframe(Timeframe::Days90),
        KeyCode::Char('t') => app.cycle_timeframe(),
        KeyCode::Char('+') | KeyCode::Char('=') => app.zoom_in(),
        KeyCode::Char('-') => app.zoom_out(),
        KeyCode::Char('h') | KeyCode::Left => app.pan_left(),
        KeyCode::Char('l') | KeyCode::Right => app.pan_right(),
        KeyCode::Char('0') => app.reset_zoom(),
        _ => {}
    }
}
