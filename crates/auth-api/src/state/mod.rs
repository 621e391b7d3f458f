//! Shared handler state

use std::fmt;
use std::sync::Arc;

use auth_common::AppConfig;
use auth_service::{AuthService, ServiceContext};

use crate::cookies::RefreshCookie;

/// Cloned into every request; everything behind it is immutable after startup
#[derive(Clone)]
pub struct AppState {
    service_context: Arc<ServiceContext>,
    config: Arc<AppConfig>,
    refresh_cookie: RefreshCookie,
}

impl AppState {
    /// The cookie policy is fixed here from the JWT and cookie sections
    pub fn new(service_context: ServiceContext, config: AppConfig) -> Self {
        Self {
            refresh_cookie: RefreshCookie::from_config(&config),
            service_context: Arc::new(service_context),
            config: Arc::new(config),
        }
    }

    /// Orchestrator bound to this state's stores and codec
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(&self.service_context)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn refresh_cookie(&self) -> &RefreshCookie {
        &self.refresh_cookie
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &self.service_context)
            .field("app", &self.config.app.name)
            .field("refresh_cookie", &self.refresh_cookie)
            .finish()
    }
}
