// Vitrine API Server
// Backend for the marketing site: admin sessions, contact messages, offers, blog

mod config;
mod cookie;
mod handlers;
mod middleware;
mod routes;

use config::Config;
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use vitrine_auth::AuthService;
use vitrine_database::{
    BlogPostRepository, MessageLifecycle, MessageRepository, OfferRepository, SessionRepository,
};

pub struct AppState {
    pub auth: AuthService,
    pub messages: MessageRepository,
    pub lifecycle: MessageLifecycle,
    pub offers: OfferRepository,
    pub blog: BlogPostRepository,
}

/// How often the optional sweeper reaps expired session rows. Expiry
/// is enforced on every check regardless; this only keeps the table
/// tidy.
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,vitrine_api=debug,tower_http=debug".to_string()),
        )
        .init();

    tracing::info!("Starting Vitrine API server");
    tracing::info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Load configuration; the admin password hash is injected here and
    // immutable for the lifetime of the process
    let config = Config::from_env();
    tracing::info!("Server: {}:{}", config.server_host, config.server_port);

    // Initialize database
    tracing::info!("Connecting to database...");
    let database = vitrine_database::Database::new(config.database.clone())
        .await
        .expect("Failed to connect to database");
    database.ping().await.expect("Database ping failed");
    tracing::info!("Database connected");

    let pool = database.pool().clone();
    let auth = AuthService::new(
        SessionRepository::new(pool.clone()),
        config.admin_password_hash,
    );
    tracing::info!("Auth service initialized");

    let state = Arc::new(AppState {
        auth,
        messages: MessageRepository::new(pool.clone()),
        lifecycle: MessageLifecycle::new(pool.clone()),
        offers: OfferRepository::new(pool.clone()),
        blog: BlogPostRepository::new(pool),
    });

    // Periodic session sweep (optional hygiene, not required for
    // correctness)
    let sweeper_state = Arc::clone(&state);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            match sweeper_state.auth.sweep_expired().await {
                Ok(0) => {}
                Ok(reaped) => tracing::info!("Swept {} expired admin sessions", reaped),
                Err(e) => tracing::error!("Session sweep failed: {}", e),
            }
        }
    });

    // Create router
    let app = routes::create_router(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = format!("{}:{}", config.server_host, config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server ready at http://{}", addr);

    // ConnectInfo feeds the session IP binding
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server error");

    Ok(())
}
