use std::sync::Arc;

use pageforge::catalog::Registry;
use pageforge::{db, routes, state};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    let pool = db::init_pool(&database_url)
        .await
        .expect("database init failed");

    let registry = Arc::new(Registry::with_default_catalog());
    tracing::info!(templates = registry.len(), "component registry derived");

    let state = state::AppState::new(pool, registry);
    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "pageforge listening");
    axum::serve(listener, app).await.expect("server failed");
}
