//! Todo Live server binary.
//!
//! Wires the PostgreSQL store, the Redis transport, and the in-process
//! broadcaster together and serves the to-do API under `/api/todo`.

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use http::HeaderValue;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use todo_live::adapters::http::todo::HtmlItemRenderer;
use todo_live::adapters::http::{todo_routes, TodoAppState};
use todo_live::adapters::postgres::{ensure_schema, PostgresItemStore};
use todo_live::adapters::redis::RedisPubSubTransport;
use todo_live::config::AppConfig;
use todo_live::live::UpdateBroadcaster;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Configuration
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    // PostgreSQL
    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .max_lifetime(config.database.max_lifetime())
        .connect(&config.database.url)
        .await?;
    ensure_schema(&pool).await?;
    let store = Arc::new(PostgresItemStore::new(pool));

    // Redis transport
    let transport = Arc::new(
        tokio::time::timeout(
            config.redis.timeout(),
            RedisPubSubTransport::connect(&config.redis.url),
        )
        .await??,
    );

    // Fan-out and its transport relay
    let broadcaster = Arc::new(UpdateBroadcaster::new(config.events.buffer_capacity));
    broadcaster.start_relay(transport.clone(), &config.events.channel);

    let state = TodoAppState::new(
        store,
        transport,
        broadcaster.clone(),
        Arc::new(HtmlItemRenderer),
        config.events.channel.clone(),
    );

    let app = Router::new()
        .nest("/api/todo", todo_routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&config))
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.server.request_timeout_secs,
                ))),
        );

    let addr = config.server.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, channel = %config.events.channel, "todo-live listening");

    tokio::select! {
        result = axum::serve(listener, app).into_future() => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("shutting down");
        }
    }

    broadcaster.shutdown();

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::new(&config.server.log_level);
    if config.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
