//! GEX Dashboard
//!
//! Terminal UI rendering the live simulated market snapshot:
//! price header, gamma profile, season gauge and metric cards.

pub mod app;
pub mod state;
pub mod ui;

pub use app::App;
pub use state::{PriceDirection, PriceFlash, StrikeWindow};
