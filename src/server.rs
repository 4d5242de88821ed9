use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::Semaphore;
use tower_http::services::ServeDir;
use tracing::{error, info};
use ::time::{format_description::well_known, OffsetDateTime};

use crate::{
    command::{build_command, ScanMode},
    errors::ScanError,
    nmap, parser,
    types::HostRecord,
};

/// Shared per-process configuration. Nothing here mutates after startup;
/// the semaphore is the only cross-request coordination point.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<ServerConfig>,
}

pub struct ServerConfig {
    pub nmap_path: String,
    pub use_sudo: bool,
    pub scan_timeout: Duration,
    pub ui_dir: PathBuf,
    /// One permit: scans run strictly one at a time. nmap is heavy and
    /// concurrent runs against the same range conflict; waiting requests
    /// queue here instead of racing.
    scan_slot: Semaphore,
}

impl AppState {
    pub fn new(nmap_path: String, use_sudo: bool, scan_timeout: Duration, ui_dir: PathBuf) -> Self {
        Self {
            inner: Arc::new(ServerConfig {
                nmap_path,
                use_sudo,
                scan_timeout,
                ui_dir,
                scan_slot: Semaphore::new(1),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    #[serde(default)]
    pub target: String,
    #[serde(rename = "scanType", default)]
    pub scan_type: String,
    #[serde(rename = "customCommand", default)]
    pub custom_command: String,
}

#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub status: String,
    pub hosts: Vec<HostRecord>,
    pub target: String,
    pub count: usize,
    /// Argv joined with spaces, for display in the UI only.
    pub command: String,
    /// RFC3339 completion time of the scan.
    pub timestamp: String,
}

/// Build the application router. No global app object: callers construct
/// state, get a router back, and decide how to serve it.
pub fn build_router(state: AppState) -> Router {
    let ui_dir = state.inner.ui_dir.clone();

    let api = Router::new()
        .route("/scan", post(post_scan))
        .route("/health", get(get_health))
        .route("/nmap-info", get(get_nmap_info))
        .with_state(state);

    let static_svc = ServeDir::new(ui_dir).append_index_html_on_directories(true);

    Router::new().nest("/api", api).fallback_service(static_svc)
}

/// Bind and serve until the process is stopped. Bind failures are fatal;
/// an external supervisor owns restarts.
pub async fn serve(bind: &str, router: Router) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("serving UI on http://{bind}");
    axum::serve(listener, router).await?;
    Ok(())
}

async fn get_health() -> impl IntoResponse {
    Json(json!({ "status": "ok", "service": "nmap-web-rs" }))
}

async fn get_nmap_info(State(app): State<AppState>) -> impl IntoResponse {
    let info = nmap::probe_nmap(&app.inner.nmap_path).await;
    Json(info)
}

async fn post_scan(
    State(app): State<AppState>,
    Json(req): Json<ScanRequest>,
) -> axum::response::Response {
    match run_scan_request(&app, &req).await {
        Ok(resp) => (StatusCode::OK, Json(resp)).into_response(),
        Err(e) => {
            error!("scan failed for target {:?}: {e}", req.target);
            let status = StatusCode::from_u16(e.http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(json!({ "error": e.to_string() }))).into_response()
        }
    }
}

async fn run_scan_request(app: &AppState, req: &ScanRequest) -> Result<ScanResponse, ScanError> {
    let mode = ScanMode::from_request(&req.scan_type);
    let mut argv = build_command(&req.target, mode, &req.custom_command, app.inner.use_sudo)?;
    // Swap the generic tool token for the configured binary path.
    let tool_idx = usize::from(app.inner.use_sudo);
    argv[tool_idx] = app.inner.nmap_path.clone();

    info!("scanning target: {}", req.target.trim());

    // The semaphore is never closed, so acquire only fails during runtime
    // shutdown; report that as an execution failure.
    let _permit =
        app.inner.scan_slot.acquire().await.map_err(|_| ScanError::ExecutionFailed {
            status: "unavailable".to_string(),
            stderr: "scanner is shutting down".to_string(),
        })?;

    let xml = nmap::run_scan(&argv, app.inner.scan_timeout).await?;
    let hosts = parser::parse_nmap_xml(&xml);
    info!("found {} hosts", hosts.len());

    Ok(ScanResponse {
        status: "success".to_string(),
        count: hosts.len(),
        hosts,
        target: req.target.trim().to_string(),
        command: argv.join(" "),
        timestamp: now_rfc3339(),
    })
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("1970-01-01T00:00:00Z"))
}
