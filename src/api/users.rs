use axum::{
    Json,
    extract::{Path, State},
};

use super::auth::AuthUser;
use super::types::{ApiJson, ApiQuery, Pagination, UpdateUserRequest, UserListResponse};
use super::{ApiError, ApiResponse, AppState, validation};
use crate::services::{UserRecord, UserUpdate};

pub async fn list_users(
    State(state): State<AppState>,
    _auth: AuthUser,
    ApiQuery(pagination): ApiQuery<Pagination>,
) -> Result<Json<ApiResponse<UserListResponse>>, ApiError> {
    let (limit, page) = (pagination.limit(), pagination.page());
    validation::validate_pagination(limit, page)?;

    let (users, total) = state.users.list(limit, page).await?;

    Ok(Json(ApiResponse::success(UserListResponse {
        users,
        total,
        page,
        limit,
    })))
}

pub async fn get_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<UserRecord>>, ApiError> {
    let user = state
        .users
        .get(id)
        .await
        .map_err(|e| not_found_for(e, id))?;

    Ok(Json(ApiResponse::success(user)))
}

pub async fn update_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i32>,
    ApiJson(req): ApiJson<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserRecord>>, ApiError> {
    validation::validate_user_update(&req)?;

    let update = UserUpdate {
        username: req.username,
        email: req.email,
        password: req.password,
    };

    let user = state
        .users
        .update(id, update)
        .await
        .map_err(|e| not_found_for(e, id))?;

    Ok(Json(ApiResponse::success(user)))
}

pub async fn delete_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state
        .users
        .delete(id)
        .await
        .map_err(|e| not_found_for(e, id))?;

    Ok(Json(ApiResponse::success(())))
}

fn not_found_for(err: crate::services::UserError, id: i32) -> ApiError {
    match err {
        crate::services::UserError::NotFound => ApiError::user_not_found(id),
        other => ApiError::from(other),
    }
}
