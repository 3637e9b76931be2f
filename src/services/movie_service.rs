//! Domain service for the movie catalog.

use serde::Serialize;
use thiserror::Error;

use crate::db::{MovieChanges, MovieInsert, MovieQuery};
use crate::entities::movies;

#[derive(Debug, Error)]
pub enum MovieError {
    #[error("Movie not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for MovieError {
    fn from(err: anyhow::Error) -> Self {
        if let Some(db_err) = err.downcast_ref::<sea_orm::DbErr>() {
            return Self::Database(db_err.to_string());
        }
        Self::Internal(err.to_string())
    }
}

/// Movie DTO for responses.
#[derive(Debug, Clone, Serialize)]
pub struct MovieRecord {
    pub id: i32,
    pub titulo: String,
    pub titulo_original: Option<String>,
    pub director: String,
    pub anio: i32,
    pub sinopsis: String,
    pub imagen_url: String,
    pub duracion: i32,
    pub pais: String,
    pub rating_promedio: f64,
    pub trailer_url: String,
    pub fecha_estreno: String,
    pub fecha_creacion: String,
    pub fecha_modificacion: String,
    pub usuario_id: i32,
}

impl From<movies::Model> for MovieRecord {
    fn from(model: movies::Model) -> Self {
        Self {
            id: model.id,
            titulo: model.titulo,
            titulo_original: model.titulo_original,
            director: model.director,
            anio: model.anio,
            sinopsis: model.sinopsis,
            imagen_url: model.imagen_url,
            duracion: model.duracion,
            pais: model.pais,
            rating_promedio: model.rating_promedio,
            trailer_url: model.trailer_url,
            fecha_estreno: model.fecha_estreno,
            fecha_creacion: model.fecha_creacion,
            fecha_modificacion: model.fecha_modificacion,
            usuario_id: model.usuario_id,
        }
    }
}

/// Domain service trait for the movie catalog.
#[async_trait::async_trait]
pub trait MovieService: Send + Sync {
    async fn create(&self, movie: MovieInsert) -> Result<MovieRecord, MovieError>;

    /// Returns [`MovieError::NotFound`] if no movie matches `id`.
    async fn get(&self, id: i32) -> Result<MovieRecord, MovieError>;

    /// Newest-first page plus the total row count.
    async fn list(&self, limit: u64, page: u64) -> Result<(Vec<MovieRecord>, u64), MovieError>;

    /// Conjunctive filter search, newest-first.
    ///
    /// # Errors
    ///
    /// Returns [`MovieError::NotFound`] when nothing matches.
    async fn search(&self, query: &MovieQuery) -> Result<Vec<MovieRecord>, MovieError>;

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`MovieError::NotFound`] if no movie matches `id`.
    async fn update(&self, id: i32, changes: MovieChanges) -> Result<MovieRecord, MovieError>;

    /// Returns [`MovieError::NotFound`] if no movie matches `id`.
    async fn delete(&self, id: i32) -> Result<(), MovieError>;
}
