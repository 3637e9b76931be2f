use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::auth::AuthUser;
use super::types::{
    ApiJson, ApiQuery, CreateMovieRequest, MovieListResponse, MovieSearchParams, Pagination,
    UpdateMovieRequest,
};
use super::{ApiError, ApiResponse, AppState, validation};
use crate::db::{MovieChanges, MovieInsert, MovieQuery};
use crate::services::MovieRecord;

pub async fn list_movies(
    State(state): State<AppState>,
    ApiQuery(pagination): ApiQuery<Pagination>,
) -> Result<Json<ApiResponse<MovieListResponse>>, ApiError> {
    let (limit, page) = (pagination.limit(), pagination.page());
    validation::validate_pagination(limit, page)?;

    let (movies, total) = state.movies.list(limit, page).await?;

    Ok(Json(ApiResponse::success(MovieListResponse {
        movies,
        total,
        page,
        limit,
    })))
}

pub async fn search_movies(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<MovieSearchParams>,
) -> Result<Json<ApiResponse<Vec<MovieRecord>>>, ApiError> {
    let query = MovieQuery {
        id: params.id,
        titulo: params.titulo,
        titulo_original: params.titulo_original,
        director: params.director,
        anio: params.anio,
        sinopsis: params.sinopsis,
        pais: params.pais,
        duracion: params.duracion,
        min_rating: params.rating_promedio,
        fecha_estreno: params.fecha_estreno,
        usuario_id: params.usuario_id,
    };

    let movies = state
        .movies
        .search(&query)
        .await
        .map_err(|e| match e {
            crate::services::MovieError::NotFound => {
                ApiError::NotFound("No movies match the given filters".to_string())
            }
            other => ApiError::from(other),
        })?;

    Ok(Json(ApiResponse::success(movies)))
}

pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<MovieRecord>>, ApiError> {
    let movie = state
        .movies
        .get(id)
        .await
        .map_err(|e| not_found_for(e, id))?;

    Ok(Json(ApiResponse::success(movie)))
}

pub async fn create_movie(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiJson(req): ApiJson<CreateMovieRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MovieRecord>>), ApiError> {
    validation::validate_new_movie(&req)?;

    // Ownership comes from the token, not the body.
    let insert = MovieInsert {
        titulo: req.titulo,
        titulo_original: req.titulo_original,
        director: req.director,
        anio: req.anio,
        sinopsis: req.sinopsis,
        imagen_url: req.imagen_url,
        duracion: req.duracion,
        pais: req.pais,
        rating_promedio: req.rating_promedio.unwrap_or(0.0),
        trailer_url: req.trailer_url,
        fecha_estreno: req.fecha_estreno,
        usuario_id: user_id,
    };

    let movie = state.movies.create(insert).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(movie))))
}

pub async fn update_movie(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i32>,
    ApiJson(req): ApiJson<UpdateMovieRequest>,
) -> Result<Json<ApiResponse<MovieRecord>>, ApiError> {
    validation::validate_movie_update(&req)?;

    let changes = MovieChanges {
        titulo: req.titulo,
        titulo_original: req.titulo_original,
        director: req.director,
        anio: req.anio,
        sinopsis: req.sinopsis,
        imagen_url: req.imagen_url,
        duracion: req.duracion,
        pais: req.pais,
        rating_promedio: req.rating_promedio,
        trailer_url: req.trailer_url,
        fecha_estreno: req.fecha_estreno,
    };

    let movie = state
        .movies
        .update(id, changes)
        .await
        .map_err(|e| not_found_for(e, id))?;

    Ok(Json(ApiResponse::success(movie)))
}

pub async fn delete_movie(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state
        .movies
        .delete(id)
        .await
        .map_err(|e| not_found_for(e, id))?;

    Ok(Json(ApiResponse::success(())))
}

fn not_found_for(err: crate::services::MovieError, id: i32) -> ApiError {
    match err {
        crate::services::MovieError::NotFound => ApiError::movie_not_found(id),
        other => ApiError::from(other),
    }
}
