use crate::adapters::{http::build_http_client, OpenAiClient, SupabaseReportStore, WhoisXmlClient};
use crate::core::formatter::ScanResponse;
use crate::core::scanner::ScanEngine;
use crate::core::{ConfigProvider, FeedbackReport, ScanRequest};
use crate::utils::error::Result;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Clone)]
struct AppState {
    engine: ScanEngine,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// Client-visible failure. Every variant renders as `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

#[derive(Debug, Deserialize)]
struct ScanBody {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ScanTextBody {
    message: Option<String>,
}

/// Report fields are untyped so a float score or a non-string vote still
/// reaches the store instead of failing extraction.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReportBody {
    url: Option<Value>,
    mona_score: Option<Value>,
    ai_risk_level: Option<Value>,
    user_vote: Option<Value>,
    comment: Option<Value>,
}

#[derive(Debug, Serialize)]
struct ReportResponse {
    success: bool,
    report: Value,
}

/// Only the empty string counts as missing; whitespace is a value.
fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Absent, `null`, `false`, `0` and `""` all count as missing.
fn required_value(value: Option<Value>) -> Option<Value> {
    value.filter(|v| match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

fn body_or_reject<T>(
    payload: std::result::Result<Json<T>, JsonRejection>,
    missing: &str,
) -> std::result::Result<T, ApiError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        ApiError::bad_request(missing)
    })
}

async fn health() -> &'static str {
    "OK"
}

async fn scan(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ScanBody>, JsonRejection>,
) -> std::result::Result<Json<ScanResponse>, ApiError> {
    const MISSING: &str = "URL required";
    let body = body_or_reject(payload, MISSING)?;
    let url = required(body.url).ok_or_else(|| ApiError::bad_request(MISSING))?;

    Ok(Json(state.engine.scan(&ScanRequest::Url { url }).await))
}

async fn scan_text(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ScanTextBody>, JsonRejection>,
) -> std::result::Result<Json<ScanResponse>, ApiError> {
    const MISSING: &str = "Message text required";
    let body = body_or_reject(payload, MISSING)?;
    let message = required(body.message).ok_or_else(|| ApiError::bad_request(MISSING))?;

    Ok(Json(state.engine.scan(&ScanRequest::Text { message }).await))
}

async fn report(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ReportBody>, JsonRejection>,
) -> std::result::Result<Json<ReportResponse>, ApiError> {
    const MISSING: &str = "URL and userVote are required";
    let body = body_or_reject(payload, MISSING)?;
    let (Some(url), Some(user_vote)) =
        (required_value(body.url), required_value(body.user_vote))
    else {
        return Err(ApiError::bad_request(MISSING));
    };

    let report = FeedbackReport {
        url,
        mona_score: body.mona_score,
        ai_risk_level: body.ai_risk_level,
        user_vote,
        comment: body.comment,
    };

    match state.engine.submit_report(&report).await {
        Ok(stored) => Ok(Json(ReportResponse {
            success: true,
            report: stored,
        })),
        Err(e) => {
            tracing::error!(
                "❌ Failed to save report: {} (Category: {:?})",
                e,
                e.category()
            );
            Err(ApiError::internal("Failed to save report"))
        }
    }
}

/// Build the router over an already-wired engine.
pub fn build_app(engine: ScanEngine) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/scan", post(scan))
        .route("/scan-text", post(scan_text))
        .route("/report", post(report))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(AppState { engine })
}

/// Wire the production adapters from configuration.
pub fn engine_from_config(config: &dyn ConfigProvider) -> Result<ScanEngine> {
    let client = build_http_client(config.request_timeout_seconds())?;

    let lookup = WhoisXmlClient::new(
        client.clone(),
        config.whois_endpoint(),
        config.whois_api_key().map(str::to_string),
    );
    let model = OpenAiClient::new(
        client.clone(),
        config.openai_base_url(),
        config.openai_model(),
        config.openai_api_key().map(str::to_string),
    );
    let store = SupabaseReportStore::new(
        client,
        config.supabase_url(),
        config.supabase_key().map(str::to_string),
        config.supabase_table(),
    );

    Ok(ScanEngine::new(
        Arc::new(lookup),
        Arc::new(model),
        Arc::new(store),
    ))
}

/// Run the server until Ctrl+C or SIGTERM.
pub async fn run_with_config(config: &dyn ConfigProvider) -> anyhow::Result<()> {
    let app = build_app(engine_from_config(config)?);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port()));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🚀 TrustMona listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("TrustMona shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", err);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to install SIGTERM handler: {}", err);
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
