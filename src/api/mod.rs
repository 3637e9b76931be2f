use axum::{
    Json, Router,
    extract::State,
    http::HeaderValue,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::clients::TmdbClient;
use crate::config::Config;
use crate::db::Store;
use crate::services::{
    LoginRateLimiter, MovieService, SeaOrmMovieService, SeaOrmUserService, TokenIssuer,
    UserService,
};

pub mod auth;
mod error;
mod metadata;
mod movies;
mod types;
mod users;
mod validation;

pub use error::ApiError;
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,

    pub users: Arc<dyn UserService>,

    pub movies: Arc<dyn MovieService>,

    pub tokens: TokenIssuer,

    pub login_limiter: Arc<LoginRateLimiter>,

    pub tmdb: TmdbClient,
}

pub async fn create_app_state(config: &Config) -> anyhow::Result<AppState> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;

    let tokens = TokenIssuer::new(&config.auth.jwt_secret, config.auth.token_expiry_hours);

    let users: Arc<dyn UserService> = Arc::new(SeaOrmUserService::new(
        store.clone(),
        tokens.clone(),
        config.security.clone(),
    ));

    let movies: Arc<dyn MovieService> = Arc::new(SeaOrmMovieService::new(store.clone()));

    let login_limiter = Arc::new(LoginRateLimiter::from_config(
        &config.security.login_throttle,
    ));

    let tmdb = TmdbClient::new(&config.tmdb)?;

    Ok(AppState {
        store,
        users,
        movies,
        tokens,
        login_limiter,
        tmdb,
    })
}

pub fn router(state: AppState, cors_origins: &[String]) -> Router {
    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/users", get(users::list_users))
        .route("/users/{id}", get(users::get_user))
        .route("/users/{id}", put(users::update_user))
        .route("/users/{id}", delete(users::delete_user))
        .route("/movies", get(movies::list_movies))
        .route("/movies", post(movies::create_movie))
        .route("/movies/search", get(movies::search_movies))
        .route("/movies/{id}", get(movies::get_movie))
        .route("/movies/{id}", put(movies::update_movie))
        .route("/movies/{id}", delete(movies::delete_movie))
        .route("/external/movie/{id}", get(metadata::external_movie))
        .route("/health", get(health))
        .with_state(state)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}

async fn health(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<HealthResponse>>, ApiError> {
    state.store.ping().await?;

    Ok(Json(ApiResponse::success(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })))
}
