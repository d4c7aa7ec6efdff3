//! Access log, request span and HTTP metrics for every request.

mod parent_context;
mod request_ids;
mod spans;

use std::time::Instant;

use salvo::{
    Request, handler,
    http::StatusCode,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::{Instrument as _, error, field::Empty, info, info_span, warn};
use tracing_opentelemetry::OpenTelemetrySpanExt as _;

use crate::auth::RequestContext;

use super::{metrics, settings};

const REQUEST_ID_DEPOT_KEY: &str = "request_id";

#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    // Scrapes would otherwise dominate the access log.
    if req.uri().path() == "/metrics" {
        ctrl.call_next(req, depot, res).await;
        return;
    }

    let settings = settings::current();
    let started = Instant::now();
    let request_id = request_ids::assign(req, res);

    depot.insert(REQUEST_ID_DEPOT_KEY, request_id.clone());

    let method = req.method().to_string();
    let route = spans::route_template(req.uri().path());
    let _in_flight = metrics::InFlight::enter();

    let span = info_span!(
        parent: None,
        "http.request",
        otel.name = %format!("{method} {route}"),
        otel.kind = "server",
        request_id = %request_id,
        method = %method,
        route = %route,
        remote_addr = %req.remote_addr(),
        user_id = Empty,
        status = Empty,
        duration_ms = Empty,
    );

    if settings.parent_propagation
        && let Some(parent) = parent_context::extract_parent_context(req.headers())
        && let Err(source) = span.set_parent(parent)
    {
        warn!("failed to attach remote parent to request span: {source}");
    }

    ctrl.call_next(req, depot, res)
        .instrument(span.clone())
        .await;

    let elapsed = started.elapsed();
    let status = res.status_code.unwrap_or(StatusCode::OK);
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    metrics::observe_request(&method, &route, status.as_u16(), elapsed.as_secs_f64());

    if let Ok(context) = depot.obtain::<RequestContext>() {
        span.record("user_id", context.user.id.into_i64());
    }

    span.record("status", status.as_u16());
    span.record("duration_ms", duration_ms);

    let threshold_ms = settings.slow_request_threshold_ms;

    span.in_scope(|| {
        if status.is_server_error() {
            error!(status = status.as_u16(), duration_ms, "request failed");
        } else if status.is_client_error() {
            warn!(status = status.as_u16(), duration_ms, "request rejected");
        } else if duration_ms > threshold_ms {
            warn!(status = status.as_u16(), duration_ms, threshold_ms, "slow request");
        } else {
            info!(status = status.as_u16(), duration_ms, "request completed");
        }
    });
}
