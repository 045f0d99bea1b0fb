//! Shared state for the Actix-web server.
//!
//! Wrapped in `web::Data` across handlers. Scrape sessions are created
//! per request, so the only shared piece is the configuration.

use crate::config::Config;

pub struct AppState {
    pub config: Config,
}
