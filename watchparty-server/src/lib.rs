mod config;
mod context;
mod errors;
mod gateway;
mod rooms;
mod schemas;
mod serialized;

use std::{
    net::{Ipv4Addr, SocketAddr},
    sync::Arc,
};

use log::info;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use watchparty_collab::Collab;

pub use config::*;
pub use errors::{ServerError, ServerResult};

use context::ServerContext;

pub type Router = axum::Router<ServerContext>;

/// Starts the watchparty server and runs it until it fails.
pub async fn run_server(config: ServerConfig, collab: Collab) -> std::io::Result<()> {
    let addr: SocketAddr = (Ipv4Addr::UNSPECIFIED, config.port).into();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let context = ServerContext {
        collab: Arc::new(collab),
    };

    let root_router = Router::new()
        .nest("/api/rooms", rooms::router())
        .nest("/gateway", gateway::router())
        .layer(cors)
        .with_state(context);

    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, root_router.into_make_service()).await
}
