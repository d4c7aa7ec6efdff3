//! Runtime knobs read by the request middleware.

use std::sync::OnceLock;

use crate::config::ServerConfig;

#[derive(Debug, Clone, Copy)]
pub(super) struct RuntimeSettings {
    pub(super) slow_request_threshold_ms: u64,

    /// Continue incoming `traceparent` traces. Only meaningful with export on.
    pub(super) parent_propagation: bool,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            slow_request_threshold_ms: 1_000,
            parent_propagation: false,
        }
    }
}

static SETTINGS: OnceLock<RuntimeSettings> = OnceLock::new();

/// Fix the settings for the life of the process. Later calls are ignored.
pub(super) fn install(config: &ServerConfig) {
    let observability = &config.observability;

    _ = SETTINGS.set(RuntimeSettings {
        slow_request_threshold_ms: observability.slow_request_threshold_ms,
        parent_propagation: observability.otel_enabled
            && observability.otel_parent_propagation_enabled,
    });
}

pub(super) fn current() -> RuntimeSettings {
    SETTINGS.get().copied().unwrap_or_default()
}
