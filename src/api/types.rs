use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::request::Parts;
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::services::{MovieRecord, UserRecord};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// JSON body extractor whose rejections use the response envelope and a
/// plain 400 instead of axum's default rejection body.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = axum::extract::rejection::JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::validation(rejection.body_text()))?;

        Ok(Self(value))
    }
}

/// Query string extractor with the same envelope-and-400 contract as
/// [`ApiJson`].
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: serde::de::DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let axum::extract::Query(value) =
            axum::extract::Query::<T>::from_request_parts(parts, state)
                .await
                .map_err(|rejection| ApiError::validation(rejection.body_text()))?;

        Ok(Self(value))
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateMovieRequest {
    pub titulo: String,
    pub titulo_original: Option<String>,
    pub director: String,
    pub anio: i32,
    pub sinopsis: String,
    pub imagen_url: String,
    pub duracion: i32,
    pub pais: String,
    pub rating_promedio: Option<f64>,
    pub trailer_url: String,
    pub fecha_estreno: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateMovieRequest {
    pub titulo: Option<String>,
    pub titulo_original: Option<String>,
    pub director: Option<String>,
    pub anio: Option<i32>,
    pub sinopsis: Option<String>,
    pub imagen_url: Option<String>,
    pub duracion: Option<i32>,
    pub pais: Option<String>,
    pub rating_promedio: Option<f64>,
    pub trailer_url: Option<String>,
    pub fecha_estreno: Option<String>,
}

/// Filter criteria for `GET /movies/search`, all optional and combined
/// conjunctively.
#[derive(Debug, Deserialize, Default)]
pub struct MovieSearchParams {
    pub id: Option<i32>,
    pub titulo: Option<String>,
    pub titulo_original: Option<String>,
    pub director: Option<String>,
    pub anio: Option<i32>,
    pub sinopsis: Option<String>,
    pub pais: Option<String>,
    pub duracion: Option<i32>,
    pub rating_promedio: Option<f64>,
    pub fecha_estreno: Option<String>,
    pub usuario_id: Option<i32>,
}

#[derive(Debug, Deserialize, Default)]
pub struct Pagination {
    pub limit: Option<u64>,
    pub page: Option<u64>,
}

impl Pagination {
    pub const DEFAULT_LIMIT: u64 = 10;
    pub const DEFAULT_PAGE: u64 = 1;

    #[must_use]
    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT)
    }

    #[must_use]
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(Self::DEFAULT_PAGE)
    }
}

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<UserRecord>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
}

#[derive(Debug, Serialize)]
pub struct MovieListResponse {
    pub movies: Vec<MovieRecord>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
