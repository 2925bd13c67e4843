//! SavvySpend Web Server
//!
//! Axum-based REST API for the SavvySpend personal finance backend.
//!
//! Endpoints:
//! - `/api/expenses` - expense CRUD with skip/limit pagination
//! - `/api/ml`       - budget forecaster predict/train
//! - `/`             - liveness/welcome
//!
//! CORS is fully open (any origin/method/header); the API carries no
//! authentication of its own.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::{cors::{Any, CorsLayer}, trace::TraceLayer};
use tracing::{error, info};

use savvy_core::db::Database;
use savvy_core::Error as CoreError;

mod handlers;

/// Maximum pagination limit
pub const MAX_PAGE_LIMIT: i64 = 1000;

/// Shared application state
pub struct AppState {
    pub db: Database,
    /// Path to the persisted forecast model file
    pub model_path: PathBuf,
}

/// Delete-acknowledgment response: `{"ok": true}`
#[derive(Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

/// Simple message response: `{"message": "..."}`
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Create the application router
pub fn create_router(db: Database, model_path: PathBuf) -> Router {
    let state = Arc::new(AppState { db, model_path });

    // Both spellings of the collection path are registered: unlike the
    // original framework, axum does not redirect "/api/expenses" to
    // "/api/expenses/".
    let api_routes = Router::new()
        .route(
            "/expenses",
            get(handlers::list_expenses).post(handlers::create_expense),
        )
        .route(
            "/expenses/",
            get(handlers::list_expenses).post(handlers::create_expense),
        )
        .route("/expenses/:id", delete(handlers::delete_expense))
        // Forecast model
        .route("/ml/predict", post(handlers::predict_budget))
        .route("/ml/train", post(handlers::train_budget));

    // Open CORS: any origin, method, header
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::read_root))
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Start the server
pub async fn serve(
    db: Database,
    model_path: PathBuf,
    host: &str,
    port: u16,
) -> anyhow::Result<()> {
    let app = create_router(db, model_path);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn unprocessable(msg: &str) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: msg.to_string(),
            internal: None,
        }
    }

    /// Map a core error onto the HTTP taxonomy:
    /// validation -> 422, not-found -> 404, untrained model -> 400,
    /// everything else -> 500 with the detail kept server-side.
    pub fn from_core(err: CoreError) -> Self {
        match err {
            CoreError::InvalidData(msg) => Self::unprocessable(&msg),
            CoreError::NotFound(msg) => Self::not_found(&msg),
            CoreError::ModelUntrained => {
                Self::bad_request("Model has not been trained yet")
            }
            other => Self::from(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}
