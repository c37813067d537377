use std::sync::Arc;

use polyrag_auth::core::auth::{AuthGateway, TokenService, auth_router};
use polyrag_auth::core::config::Config;
use polyrag_auth::core::users::InMemoryUserStore;
use tower_http::cors::CorsLayer;

#[tokio::main]
async fn main() {
    // Load .env file (if exists)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load application config from environment variables.
    // The signing secret is resolved exactly once, here.
    let config = Config::from_env();

    // Log config status (without revealing the secret)
    tracing::info!(
        "Config loaded: access_ttl={}m, refresh_ttl={}d, bind={}",
        config.access_token_expiration_minutes,
        config.refresh_token_expiration_days,
        config.bind_addr
    );

    let users = Arc::new(InMemoryUserStore::new());
    let gateway = AuthGateway::new(users, TokenService::new(&config));

    // The API is consumed by a browser frontend on another origin
    let app = auth_router(gateway).layer(CorsLayer::permissive());

    tracing::info!("listening on http://{}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("failed to bind listener");
    axum::serve(listener, app.into_make_service())
        .await
        .expect("server error");
}
