use tracing_subscriber::EnvFilter;

use hearth::server::{self, config::Config, model::app::AppState, startup};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let db = startup::connect_to_database(&config).await.unwrap();

    tracing::info!("Starting server on port {}", config.port);

    let state = AppState {
        db,
        jwt_secret: config.jwt_secret.clone(),
    };
    let app = server::router::routes().with_state(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .unwrap();
    axum::serve(listener, app).await.unwrap();
}
