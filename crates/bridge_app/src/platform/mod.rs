//! Native shell around the bridge core: window, effects, storage and logging.
mod app;
mod config;
mod effects;
mod logging;
mod persistence;
mod ui;

pub use app::run_app;
