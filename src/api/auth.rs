//! Registration, login, and the bearer token extractor that gates every
//! protected handler.

use axum::{
    Extension, Json,
    extract::{ConnectInfo, FromRequestParts, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION, request::Parts},
};
use std::net::SocketAddr;
use tracing::{info, warn};

use super::types::{ApiJson, LoginRequest, RegisterRequest};
use super::{ApiError, ApiResponse, AppState, validation};
use crate::services::{LoginResult, UserRecord};

/// The authenticated account id, resolved from the `Authorization: Bearer`
/// header. Handlers taking this as an argument reject unauthenticated
/// requests with 401 before running.
pub struct AuthUser(pub i32);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("Missing authorization header"))?;

        let Some(token) = auth_header.strip_prefix("Bearer ") else {
            return Err(ApiError::unauthorized(
                "Invalid authorization header format",
            ));
        };

        let subject = state.tokens.verify(token)?;

        Ok(Self(subject))
    }
}

/// Rate-limit key for the requesting client: the first `X-Forwarded-For`
/// entry when present, otherwise the peer address.
pub fn client_key(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    peer.map_or_else(|| "unknown".to_string(), |addr| addr.ip().to_string())
}

pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserRecord>>), ApiError> {
    validation::validate_registration(&req)?;

    let user = state
        .users
        .register(&req.username, &req.email, &req.password)
        .await?;

    info!("Registered user {} (id {})", user.username, user.id);

    Ok((StatusCode::CREATED, Json(ApiResponse::success(user))))
}

pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    connect_info: Option<Extension<ConnectInfo<SocketAddr>>>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResult>>, ApiError> {
    let key = client_key(&headers, connect_info.map(|Extension(ConnectInfo(addr))| addr));

    if !state.login_limiter.check(&key).await {
        warn!("Login rate limit hit for {key}");
        return Err(ApiError::RateLimited(
            "Too many login attempts, try again later".to_string(),
        ));
    }

    let result = state.users.login(&req.username, &req.password).await?;

    Ok(Json(ApiResponse::success(result)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_key_prefers_first_forwarded_entry() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            "203.0.113.7, 10.0.0.1".parse().unwrap(),
        );

        assert_eq!(client_key(&headers, None), "203.0.113.7");
    }

    #[test]
    fn client_key_falls_back_to_peer_address() {
        let headers = HeaderMap::new();
        let peer: SocketAddr = "192.0.2.4:51000".parse().unwrap();

        assert_eq!(client_key(&headers, Some(peer)), "192.0.2.4");
        assert_eq!(client_key(&headers, None), "unknown");
    }
}
