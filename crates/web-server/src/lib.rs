use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use configuration::ServerSettings;
use database::{LeadStore, ScenarioStore, Storage};
use report::ReportRenderer;
use simulator::RoiCalculator;
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub scenarios: Arc<dyn ScenarioStore>,
    pub leads: Arc<dyn LeadStore>,
    pub calculator: RoiCalculator,
    pub renderer: ReportRenderer,
}

impl AppState {
    pub fn new(storage: Storage, calculator: RoiCalculator) -> Self {
        Self {
            scenarios: storage.scenarios,
            leads: storage.leads,
            calculator,
            renderer: ReportRenderer::new(),
        }
    }
}

/// Assembles the routes and middleware.
///
/// Fails only if the configured frontend URL is not a valid header value.
pub fn build_router(state: Arc<AppState>, settings: &ServerSettings) -> anyhow::Result<Router> {
    let origin = HeaderValue::from_str(&settings.frontend_url)
        .with_context(|| format!("Invalid frontend_url '{}'", settings.frontend_url))?;

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::exact(origin))
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .expose_headers([header::CONTENT_DISPOSITION])
        .allow_credentials(true);

    let app = Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/simulate", post(handlers::simulate))
        .route(
            "/api/scenarios",
            get(handlers::list_scenarios).post(handlers::create_scenario),
        )
        .route(
            "/api/scenarios/:id",
            get(handlers::get_scenario).delete(handlers::delete_scenario),
        )
        .route("/api/report/generate", post(handlers::generate_report))
        .with_state(state)
        .layer(cors)
        // Logs every incoming request.
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(settings.body_limit_bytes));

    Ok(app)
}

/// Binds the configured address and serves until the process is stopped.
pub async fn run_server(state: Arc<AppState>, settings: &ServerSettings) -> anyhow::Result<()> {
    let app = build_router(state, settings)?;
    let addr = format!("{}:{}", settings.host, settings.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server started and listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
