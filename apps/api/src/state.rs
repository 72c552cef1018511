use crate::browser::resolver::BrowserEnv;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Everything here is read-only after startup, so cloning per request is
/// cheap and no cross-request state can leak.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Capability snapshot consumed by the render backend resolver.
    pub browser: BrowserEnv,
}
