//! HTTP server setup.

use std::net::SocketAddr;

use axum::Router;
use surrealdb::Surreal;
use surrealdb::engine::any::Any;
use tokio::net::TcpListener;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::routes::create_router;
use crate::state::{ApiConfig, AppState};

/// Build the router and the address to serve it on.
pub async fn create_server(
    config: ApiConfig,
    db: Surreal<Any>,
) -> Result<(Router, SocketAddr), Box<dyn std::error::Error + Send + Sync>> {
    let state = AppState::new(db).await?;

    let mut router = create_router(state).layer(TraceLayer::new_for_http());

    if config.enable_cors {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(AnyOrigin)
                .allow_methods(AnyOrigin)
                .allow_headers(AnyOrigin),
        );
    }

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    Ok((router, addr))
}

/// Run the server until it exits.
pub async fn run_server(
    config: ApiConfig,
    db: Surreal<Any>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let (router, addr) = create_server(config, db).await?;

    tracing::info!("Seatwise API listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
