use std::{io, net::SocketAddr};

use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;
use tower_http::{catch_panic::CatchPanicLayer, services::ServeDir, trace::TraceLayer};

use crate::{
    app_state::AppState,
    config::{Config, DevMode},
    error::{expose_error_detail, PanicResponder},
    routes::{health::health, index::index},
};

pub fn build_router(state: AppState) -> Router {
    let dev_mode = state.config.dev_mode;
    let static_dir = state.config.static_dir.clone();

    let routes = Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state);

    with_layers(routes, dev_mode)
}

/// Binds the configured address and nothing else.
pub async fn bind(cfg: &Config) -> io::Result<TcpListener> {
    let addr: SocketAddr = cfg
        .addr()
        .parse()
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
    TcpListener::bind(addr).await
}

fn with_layers(router: Router, dev_mode: DevMode) -> Router {
    router
        .layer(middleware::from_fn_with_state(dev_mode, expose_error_detail))
        .layer(CatchPanicLayer::custom(PanicResponder {
            verbose: dev_mode.verbose_errors,
        }))
        .layer(TraceLayer::new_for_http())
}
