//! Budget forecast handlers
//!
//! The forecaster is constructed from the persisted model file on every
//! request. Concurrent train calls race last-writer-wins on that file;
//! the core layer's atomic replace keeps the file intact either way.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState, MessageResponse};
use savvy_core::forecast::BudgetForecaster;

/// Request body for prediction, e.g. `{"features": [[1.0, 2.0], [2.0, 3.0]]}`
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub features: Vec<Vec<f64>>,
}

#[derive(Serialize)]
pub struct PredictResponse {
    pub predictions: Vec<f64>,
}

/// Request body for training
#[derive(Debug, Deserialize)]
pub struct TrainRequest {
    pub features: Vec<Vec<f64>>,
    pub targets: Vec<f64>,
}

/// POST /api/ml/predict - Predict budget for given feature rows
pub async fn predict_budget(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, AppError> {
    let forecaster =
        BudgetForecaster::load(&state.model_path).map_err(AppError::from_core)?;
    let predictions = forecaster
        .predict(&payload.features)
        .map_err(AppError::from_core)?;

    Ok(Json(PredictResponse { predictions }))
}

/// POST /api/ml/train - Fit a new model and overwrite the persisted one
pub async fn train_budget(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TrainRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let mut forecaster =
        BudgetForecaster::load(&state.model_path).map_err(AppError::from_core)?;
    forecaster
        .fit(&payload.features, &payload.targets)
        .map_err(AppError::from_core)?;

    Ok(Json(MessageResponse {
        message: "Model trained successfully.".to_string(),
    }))
}
