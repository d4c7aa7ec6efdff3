//! Prometheus metrics: HTTP traffic plus sign-in and ticket counters.

use std::sync::OnceLock;

use portal::tickets::TicketOrigin;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder, core::Collector,
};
use salvo::{
    Request, Response, handler,
    http::{
        StatusCode,
        header::{CONTENT_TYPE, HeaderValue},
    },
};
use tracing::error;

const DURATION_BUCKETS: [f64; 11] = [
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// How a caller tried to sign in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoginMethod {
    Directory,
    Local,
}

impl LoginMethod {
    const fn label(self) -> &'static str {
        match self {
            Self::Directory => "directory",
            Self::Local => "local",
        }
    }
}

#[derive(Debug)]
struct PortalMetrics {
    registry: Registry,
    http_requests: IntCounterVec,
    http_duration: HistogramVec,
    http_in_flight: IntGauge,
    logins: IntCounterVec,
    tickets_created: IntCounterVec,
    helpdesk_failures: IntCounter,
}

static METRICS: OnceLock<Option<PortalMetrics>> = OnceLock::new();

fn metrics() -> Option<&'static PortalMetrics> {
    METRICS.get_or_init(PortalMetrics::build).as_ref()
}

/// Registers `metric` and hands it back, logging why when either step fails.
fn register<M>(registry: &Registry, name: &str, metric: prometheus::Result<M>) -> Option<M>
where
    M: Collector + Clone + 'static,
{
    let metric = metric
        .inspect_err(|source| error!(metric = name, "failed to create metric: {source}"))
        .ok()?;

    registry
        .register(Box::new(metric.clone()))
        .inspect_err(|source| error!(metric = name, "failed to register metric: {source}"))
        .ok()?;

    Some(metric)
}

impl PortalMetrics {
    fn build() -> Option<Self> {
        let registry = Registry::new_custom(Some("portal_json".to_string()), None).ok()?;

        let http_requests = register(
            &registry,
            "http_requests_total",
            IntCounterVec::new(
                Opts::new("http_requests_total", "HTTP requests by method, route and status."),
                &["method", "route", "status_class", "status_code"],
            ),
        )?;

        let http_duration = register(
            &registry,
            "http_request_duration_seconds",
            HistogramVec::new(
                HistogramOpts::new(
                    "http_request_duration_seconds",
                    "HTTP request latency by method and route.",
                )
                .buckets(DURATION_BUCKETS.to_vec()),
                &["method", "route"],
            ),
        )?;

        let http_in_flight = register(
            &registry,
            "http_requests_in_flight",
            IntGauge::new("http_requests_in_flight", "Requests currently being served."),
        )?;

        let logins = register(
            &registry,
            "logins_total",
            IntCounterVec::new(
                Opts::new("logins_total", "Sign-in attempts by method and outcome."),
                &["method", "outcome"],
            ),
        )?;

        let tickets_created = register(
            &registry,
            "tickets_created_total",
            IntCounterVec::new(
                Opts::new("tickets_created_total", "Tickets created by origin."),
                &["origin"],
            ),
        )?;

        let helpdesk_failures = register(
            &registry,
            "helpdesk_failures_total",
            IntCounter::new("helpdesk_failures_total", "Failed helpdesk requests."),
        )?;

        Some(Self {
            registry,
            http_requests,
            http_duration,
            http_in_flight,
            logins,
            tickets_created,
            helpdesk_failures,
        })
    }
}

/// Counts a request as in flight until dropped.
#[derive(Debug)]
pub(super) struct InFlight(Option<&'static IntGauge>);

impl InFlight {
    pub(super) fn enter() -> Self {
        let gauge = metrics().map(|metrics| &metrics.http_in_flight);

        if let Some(gauge) = gauge {
            gauge.inc();
        }

        Self(gauge)
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if let Some(gauge) = self.0 {
            gauge.dec();
        }
    }
}

pub(super) fn observe_request(method: &str, route: &str, status_code: u16, duration_seconds: f64) {
    let Some(metrics) = metrics() else {
        return;
    };

    let code = status_code.to_string();

    metrics
        .http_requests
        .with_label_values(&[method, route, status_class(status_code), code.as_str()])
        .inc();

    metrics
        .http_duration
        .with_label_values(&[method, route])
        .observe(duration_seconds);
}

pub(crate) fn record_login(method: LoginMethod, succeeded: bool) {
    if let Some(metrics) = metrics() {
        let outcome = if succeeded { "success" } else { "failure" };

        metrics
            .logins
            .with_label_values(&[method.label(), outcome])
            .inc();
    }
}

pub(crate) fn record_ticket_created(origin: TicketOrigin) {
    if let Some(metrics) = metrics() {
        let origin = match origin {
            TicketOrigin::Customer => "customer",
            TicketOrigin::Staff => "staff",
        };

        metrics.tickets_created.with_label_values(&[origin]).inc();
    }
}

pub(crate) fn record_helpdesk_failure() {
    if let Some(metrics) = metrics() {
        metrics.helpdesk_failures.inc();
    }
}

/// Prometheus text exposition.
#[handler]
pub(crate) async fn metrics_handler(_req: &mut Request, res: &mut Response) {
    let Some(metrics) = metrics() else {
        res.status_code(StatusCode::SERVICE_UNAVAILABLE);
        return;
    };

    let encoder = TextEncoder::new();
    let mut body = String::new();

    if let Err(source) = encoder.encode_utf8(&metrics.registry.gather(), &mut body) {
        error!("failed to encode metrics: {source}");
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

        return;
    }

    match encoder.format_type().parse::<HeaderValue>() {
        Ok(content_type) => {
            res.headers_mut().insert(CONTENT_TYPE, content_type);
            res.render(body);
        }
        Err(source) => {
            error!("invalid metrics content type: {source}");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}

fn status_class(status_code: u16) -> &'static str {
    match status_code / 100 {
        1 => "1xx",
        2 => "2xx",
        3 => "3xx",
        4 => "4xx",
        5 => "5xx",
        _ => "other",
    }
}
