//! `SeaORM` implementation of the `MovieService` trait.

use async_trait::async_trait;

use crate::db::{MovieChanges, MovieInsert, MovieQuery, Store};
use crate::services::movie_service::{MovieError, MovieRecord, MovieService};

pub struct SeaOrmMovieService {
    store: Store,
}

impl SeaOrmMovieService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MovieService for SeaOrmMovieService {
    async fn create(&self, movie: MovieInsert) -> Result<MovieRecord, MovieError> {
        let model = self.store.insert_movie(movie).await?;

        Ok(MovieRecord::from(model))
    }

    async fn get(&self, id: i32) -> Result<MovieRecord, MovieError> {
        let movie = self
            .store
            .get_movie(id)
            .await?
            .ok_or(MovieError::NotFound)?;

        Ok(MovieRecord::from(movie))
    }

    async fn list(&self, limit: u64, page: u64) -> Result<(Vec<MovieRecord>, u64), MovieError> {
        let (rows, total) = self.store.list_movies(limit, page).await?;

        Ok((rows.into_iter().map(MovieRecord::from).collect(), total))
    }

    async fn search(&self, query: &MovieQuery) -> Result<Vec<MovieRecord>, MovieError> {
        let rows = self.store.search_movies(query).await?;

        if rows.is_empty() {
            return Err(MovieError::NotFound);
        }

        Ok(rows.into_iter().map(MovieRecord::from).collect())
    }

    async fn update(&self, id: i32, changes: MovieChanges) -> Result<MovieRecord, MovieError> {
        let movie = self
            .store
            .update_movie(id, changes)
            .await?
            .ok_or(MovieError::NotFound)?;

        Ok(MovieRecord::from(movie))
    }

    async fn delete(&self, id: i32) -> Result<(), MovieError> {
        let deleted = self.store.delete_movie(id).await?;
        if !deleted {
            return Err(MovieError::NotFound);
        }

        Ok(())
    }
}
