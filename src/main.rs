mod apidoc;
mod config;
mod handlers;
mod models;
mod routes;
mod services;
mod utils;

use std::sync::Arc;

use config::Config;
use reqwest;
use services::sessions::SessionRegistry;
use services::waha::WahaClient;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
pub struct AppState {
    pub cfg: Config,
    pub sessions: Arc<SessionRegistry>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = Config::from_env().expect("Failed to load configuration");
    let http = reqwest::Client::new();
    // Compute before moving state anywhere
    let addr = format!("{}:{}", cfg.app_host, cfg.app_port);

    // The message log lives under the session folder; make sure it exists.
    std::fs::create_dir_all(&cfg.session_folder_path)
        .expect("Failed to create session folder");

    // Register one WAHA-backed client per configured session. The registry is
    // read-only from the handlers' point of view.
    let sessions = Arc::new(SessionRegistry::new());
    for name in &cfg.sessions {
        let client = WahaClient::new(
            http.clone(),
            cfg.waha_base_url.clone(),
            cfg.waha_api_key.clone(),
            name.clone(),
        );
        sessions.insert(name.clone(), Arc::new(client)).await;
    }

    let state = AppState { cfg, sessions };

    let app = routes::router()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", apidoc::ApiDoc::openapi()))
        .with_state(state);

    let listener = TcpListener::bind(&addr).await.unwrap();

    tracing::info!("Poll adapter listening on http://{addr}");
    axum::serve(listener, app).await.unwrap();
}
