use axum::{
    Json,
    extract::{Path, State},
};

use super::{ApiError, ApiResponse, AppState};

/// Pass-through lookup against the external metadata API.
pub async fn external_movie(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let payload = state.tmdb.movie_details(id).await?;

    Ok(Json(ApiResponse::success(payload)))
}
