use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::entities::{movies, users};

pub mod migrator;
pub mod repositories;

pub use repositories::movie::{MovieChanges, MovieInsert, MovieQuery};
pub use repositories::user::UserChanges;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn movie_repo(&self) -> repositories::movie::MovieRepository {
        repositories::movie::MovieRepository::new(self.conn.clone())
    }

    pub async fn insert_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<users::Model> {
        self.user_repo().insert(username, email, password_hash).await
    }

    pub async fn get_user(&self, id: i32) -> Result<Option<users::Model>> {
        self.user_repo().get(id).await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<users::Model>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn find_taken_user(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<users::Model>> {
        self.user_repo().find_taken(username, email).await
    }

    pub async fn list_users(&self, limit: u64, page: u64) -> Result<(Vec<users::Model>, u64)> {
        self.user_repo().list(limit, page).await
    }

    pub async fn update_user(
        &self,
        id: i32,
        changes: UserChanges,
    ) -> Result<Option<users::Model>> {
        self.user_repo().update(id, changes).await
    }

    pub async fn delete_user(&self, id: i32) -> Result<bool> {
        self.user_repo().delete(id).await
    }

    pub async fn insert_movie(&self, movie: MovieInsert) -> Result<movies::Model> {
        self.movie_repo().insert(movie).await
    }

    pub async fn get_movie(&self, id: i32) -> Result<Option<movies::Model>> {
        self.movie_repo().get(id).await
    }

    pub async fn list_movies(&self, limit: u64, page: u64) -> Result<(Vec<movies::Model>, u64)> {
        self.movie_repo().list(limit, page).await
    }

    pub async fn search_movies(&self, query: &MovieQuery) -> Result<Vec<movies::Model>> {
        self.movie_repo().search(query).await
    }

    pub async fn update_movie(
        &self,
        id: i32,
        changes: MovieChanges,
    ) -> Result<Option<movies::Model>> {
        self.movie_repo().update(id, changes).await
    }

    pub async fn delete_movie(&self, id: i32) -> Result<bool> {
        self.movie_repo().delete(id).await
    }
}
