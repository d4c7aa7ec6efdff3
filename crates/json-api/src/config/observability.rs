//! Logging and telemetry settings

use clap::{Args, ValueEnum};

/// Shape of log lines on stdout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// One line per event.
    Compact,

    /// Multi-line events with source locations, for local development.
    Pretty,

    /// One JSON object per event, for log shippers.
    Json,
}

#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` holds no directives (e.g. `debug`)
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// OTLP trace export and access log thresholds.
#[derive(Debug, Args)]
pub struct ObservabilityConfig {
    /// Export spans over OTLP/gRPC
    #[arg(long, env = "OTEL_ENABLED", default_value_t = false)]
    pub otel_enabled: bool,

    /// Join traces started by callers that send `traceparent`
    #[arg(long, env = "OTEL_PARENT_PROPAGATION_ENABLED", default_value_t = false)]
    pub otel_parent_propagation_enabled: bool,

    #[arg(long, env = "OTEL_EXPORTER_OTLP_ENDPOINT", default_value = "http://localhost:4317")]
    pub otel_exporter_otlp_endpoint: String,

    #[arg(long, env = "OTEL_EXPORTER_OTLP_TIMEOUT_SECONDS", default_value_t = 3)]
    pub otel_exporter_otlp_timeout_seconds: u64,

    #[arg(long, env = "OTEL_SERVICE_NAME", default_value = "portal-json")]
    pub otel_service_name: String,

    /// Reported as `deployment.environment.name`
    #[arg(long, env = "OTEL_DEPLOYMENT_ENVIRONMENT", default_value = "development")]
    pub otel_deployment_environment: String,

    /// Share of new traces to keep, 0.0 to 1.0
    #[arg(long, env = "OTEL_TRACE_SAMPLE_RATIO", default_value_t = 1.0)]
    pub otel_trace_sample_ratio: f64,

    /// Requests slower than this are logged at `warn`
    #[arg(long, env = "SLOW_REQUEST_THRESHOLD_MS", default_value_t = 1_000)]
    pub slow_request_threshold_ms: u64,
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Parser)]
    struct Wrapper {
        #[command(flatten)]
        logging: LoggingConfig,

        #[command(flatten)]
        observability: ObservabilityConfig,
    }

    #[test]
    fn tracing_export_is_off_by_default() -> TestResult {
        let parsed = Wrapper::try_parse_from(["portal-json"])?;

        assert!(!parsed.observability.otel_enabled);
        assert_eq!(parsed.observability.otel_service_name, "portal-json");
        assert_eq!(parsed.logging.log_format, LogFormat::Compact);

        Ok(())
    }

    #[test]
    fn accepts_json_log_format() -> TestResult {
        let parsed = Wrapper::try_parse_from(["portal-json", "--log-format", "json"])?;

        assert_eq!(parsed.logging.log_format, LogFormat::Json);

        Ok(())
    }
}
