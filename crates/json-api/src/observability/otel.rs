//! OTLP trace export.

use std::time::Duration;

use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    Resource,
    trace::{Sampler, SdkTracerProvider},
};

use crate::config::observability::ObservabilityConfig;

use super::ObservabilityError;

pub(super) fn build_tracer_provider(
    config: &ObservabilityConfig,
) -> Result<SdkTracerProvider, ObservabilityError> {
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&config.otel_exporter_otlp_endpoint)
        .with_timeout(Duration::from_secs(config.otel_exporter_otlp_timeout_seconds))
        .build()?;

    Ok(SdkTracerProvider::builder()
        .with_sampler(sampler(config.otel_trace_sample_ratio))
        .with_resource(resource(config))
        .with_batch_exporter(exporter)
        .build())
}

fn resource(config: &ObservabilityConfig) -> Resource {
    Resource::builder_empty()
        .with_service_name(config.otel_service_name.clone())
        .with_attributes([
            KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
            KeyValue::new(
                "deployment.environment.name",
                config.otel_deployment_environment.clone(),
            ),
        ])
        .build()
}

/// Follow the caller's sampling decision, otherwise sample `ratio` of new
/// traces. Out of range ratios are clamped and NaN samples everything.
fn sampler(ratio: f64) -> Sampler {
    let ratio = if ratio.is_nan() { 1.0 } else { ratio.clamp(0.0, 1.0) };

    Sampler::ParentBased(Box::new(Sampler::TraceIdRatioBased(ratio)))
}

#[cfg(test)]
mod tests {
    use opentelemetry_sdk::trace::Sampler;

    use super::sampler;

    fn root_ratio(sampler: &Sampler) -> Option<f64> {
        match sampler {
            Sampler::ParentBased(root) => match root.as_ref() {
                Sampler::TraceIdRatioBased(ratio) => Some(*ratio),
                _ => None,
            },
            _ => None,
        }
    }

    fn samples(ratio: f64, expected: f64) -> bool {
        root_ratio(&sampler(ratio)).is_some_and(|actual| (actual - expected).abs() < f64::EPSILON)
    }

    #[test]
    fn ratio_is_clamped() {
        assert!(samples(1.5, 1.0), "above range");
        assert!(samples(-0.5, 0.0), "below range");
        assert!(samples(0.25, 0.25), "in range");
        assert!(samples(f64::NAN, 1.0), "not a number");
    }
}
