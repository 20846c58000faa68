use anyhow::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::SecurityConfig;
use crate::models::{Movie, MovieDraft, MovieWithScreenings};

pub mod migrator;
pub mod repositories;

pub use repositories::user::User;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

fn is_in_memory(db_url: &str) -> bool {
    let path = db_url.trim_start_matches("sqlite:");
    path == ":memory:" || path.contains("mode=memory")
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

        let (max_connections, min_connections) = if is_in_memory(db_url) {
            // every pooled connection would otherwise see its own empty database
            (1, 1)
        } else {
            let path_str = db_url.trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
            (max_connections, min_connections)
        };

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

    fn movie_repo(&self) -> repositories::movie::MovieRepository {
        repositories::movie::MovieRepository::new(self.conn.clone())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    // ========================================================================
    // Movies
    // ========================================================================

    pub async fn list_movies(&self) -> Result<Vec<MovieWithScreenings>> {
        self.movie_repo().list_with_screenings().await
    }

    pub async fn get_movie(&self, id: &str) -> Result<Option<MovieWithScreenings>> {
        self.movie_repo().get_with_screenings(id).await
    }

    pub async fn create_movie(&self, draft: &MovieDraft) -> Result<MovieWithScreenings> {
        self.movie_repo().create(draft).await
    }

    /// Overwrites the movie's scalars and replaces its screenings with the
    /// single one in `draft`. `None` when the movie does not exist.
    pub async fn replace_movie(&self, id: &str, draft: &MovieDraft) -> Result<Option<Movie>> {
        self.movie_repo().replace(id, draft).await
    }

    /// Deletes the movie and all of its screenings. `false` when the movie
    /// does not exist, in which case nothing is removed.
    pub async fn delete_movie(&self, id: &str) -> Result<bool> {
        self.movie_repo().delete_cascade(id).await
    }

    /// Number of screenings stored for a movie, counted in the database
    /// rather than through the API read model. Used by `marquee remove` to
    /// report what a cascade delete will take out.
    pub async fn count_screenings(&self, movie_id: &str) -> Result<u64> {
        self.movie_repo().count_screenings(movie_id).await
    }

    // ========================================================================
    // Users
    // ========================================================================

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn verify_user_password(&self, username: &str, password: &str) -> Result<bool> {
        self.user_repo().verify_password(username, password).await
    }

    pub async fn update_user_password(
        &self,
        username: &str,
        new_password: &str,
        security: &SecurityConfig,
    ) -> Result<()> {
        self.user_repo()
            .update_password(username, new_password, security)
            .await
    }

    pub async fn verify_api_key(&self, api_key: &str) -> Result<Option<User>> {
        self.user_repo().verify_api_key(api_key).await
    }

    pub async fn regenerate_user_api_key(&self, username: &str) -> Result<String> {
        self.user_repo().regenerate_api_key(username).await
    }
}
