use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{Classification, ImageInput, Recommendation},
    services::GenreEntry,
};

use super::AppState;

// Request types

#[derive(Debug, Default, Deserialize)]
pub struct RecommendParams {
    pub limit: Option<usize>,
}

fn image_from_body(body: Bytes) -> AppResult<ImageInput> {
    if body.is_empty() {
        return Err(AppError::InvalidInput(
            "Request body must contain an image".to_string(),
        ));
    }
    Ok(ImageInput::Bytes(body.to_vec()))
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Detect the emotion of the face in the uploaded image
pub async fn classify(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    body: Bytes,
) -> AppResult<Json<Classification>> {
    let image = image_from_body(body)?;

    let classification = state
        .recommender
        .classifier()
        .classify_detailed(&image)
        .await;

    tracing::info!(
        request_id = %request_id,
        emotion = %classification.emotion,
        detected = classification.detected,
        "Classification completed"
    );

    Ok(Json(classification))
}

/// Recommend movies for the mood of the face in the uploaded image
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    params: Result<Query<RecommendParams>, QueryRejection>,
    body: Bytes,
) -> AppResult<Json<Recommendation>> {
    let Query(params) = params.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    let image_bytes = body.len();
    let image = image_from_body(body)?;
    let limit = state.effective_limit(params.limit);

    tracing::info!(
        request_id = %request_id,
        image_bytes = image_bytes,
        limit = limit,
        "Processing recommendation request"
    );

    let recommendation = state.recommender.recommend(&image, limit).await;

    tracing::info!(
        request_id = %request_id,
        emotion = %recommendation.emotion,
        movies = recommendation.movies.len(),
        "Recommendation completed"
    );

    Ok(Json(recommendation))
}

/// Emotion → genre → listings URL table
pub async fn genres(State(state): State<AppState>) -> Json<Vec<GenreEntry>> {
    Json(state.recommender.queries().entries())
}
