use std::sync::Arc;

use rollcall_service::Services;

/// Page served at `/` when no other is configured.
pub const BUNDLED_WELCOME: &str = include_str!("../assets/welcome.html");

/// Shared state handed to every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    pub services: Services,
    welcome: Arc<str>,
}

impl AppState {
    pub fn new(services: Services) -> Self {
        Self::with_welcome(services, BUNDLED_WELCOME)
    }

    pub fn with_welcome(services: Services, welcome: impl Into<Arc<str>>) -> Self {
        Self {
            services,
            welcome: welcome.into(),
        }
    }

    pub fn welcome(&self) -> &str {
        &self.welcome
    }
}
