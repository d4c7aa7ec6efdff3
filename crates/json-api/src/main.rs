//! Portal JSON API Server

use std::process;

use salvo::{
    affix_state::inject,
    oapi::{
        OpenApi,
        security::{ApiKey, ApiKeyValue, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info, warn};

use portal_app::context::AppContext;

use crate::{
    auth::cookies::SessionCookies,
    config::ServerConfig,
    observability::{Observability, request_logging},
    state::State,
};

mod app_links;
mod auth;
mod config;
mod error;
mod extensions;
mod healthcheck;
mod observability;
mod router;
mod shutdown;
mod state;
mod subscriptions;
#[cfg(test)]
mod test_helpers;
mod tickets;
mod users;

/// Portal JSON API Server entry point
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    let observability = Observability::init(&config).unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "the subscriber failed to install, stderr is all that is left"
        )]
        {
            eprintln!("Observability error: {e}");
        }

        process::exit(1);
    });

    let settings = config.app_settings();

    let app = match config.storage.database_url.as_deref() {
        Some(url) => AppContext::from_database_url(url, settings).await,
        None => {
            warn!("DATABASE_URL is not set, keeping all data in memory");

            AppContext::in_memory(settings).await
        }
    };

    let app = app.unwrap_or_else(|init_error| {
        error!("failed to initialize app context: {init_error}");

        process::exit(1);
    });

    let cookies = SessionCookies::from(&config.sessions);
    let addr = config.socket_addr();

    info!(%addr, session_cookie = cookies.name(), "starting server");

    let listener = TcpListener::new(addr).bind().await;

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(request_logging)
        .hoop(inject(State::shared(app, cookies.clone())))
        .push(router::app_router());

    let doc = OpenApi::new("Portal API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(cookies.name()))),
        )
        .merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let server = Server::new(listener);

    let handle = server.handle();

    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    server
        .serve(Service::new(router).catcher(error::catcher()))
        .await;

    info!("server stopped");

    observability.shutdown();
}
