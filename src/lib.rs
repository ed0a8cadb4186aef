//! Financial probe toolkit: turns company report spreadsheets into a
//! normalized summary table, and one report into a three-year view with chart
//! series.

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod routes;
pub mod services;

use services::probe::ProbeExtractor;

// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
}

impl AppState {
    pub fn new(config: config::Config) -> Self {
        Self { config }
    }

    pub fn extractor(&self) -> ProbeExtractor {
        ProbeExtractor::new(self.config.field_catalog.clone(), self.config.extractor_options())
    }
}
