use crate::entities::{movies, prelude::*, screenings};
use crate::models::{Movie, MovieDraft, MovieWithScreenings, Screening, ScreeningDraft};
use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::info;

/// Repository for movies and their screenings
pub struct MovieRepository {
    conn: DatabaseConnection,
}

impl MovieRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    // ========================================================================
    // Model Conversion Helpers
    // ========================================================================

    fn map_movie_model(m: movies::Model) -> Result<Movie> {
        let actors = serde_json::from_str(&m.actors)
            .with_context(|| format!("Corrupt actors column for movie {}", m.id))?;

        Ok(Movie {
            id: m.id,
            title: m.title,
            duration: m.duration,
            language: m.language,
            subtitles: m.subtitles,
            director: m.director,
            actors,
            min_age: m.min_age,
            poster: m.poster,
        })
    }

    fn map_screening_model(s: screenings::Model) -> Result<Screening> {
        let week_days = serde_json::from_str(&s.week_days)
            .with_context(|| format!("Corrupt week_days column for screening {}", s.id))?;

        Ok(Screening {
            id: s.id,
            movie_id: s.movie_id,
            start_date: s.start_date,
            end_date: s.end_date,
            week_days,
            start_time: s.start_time,
            city: s.city,
            address: s.address,
        })
    }

    fn map_with_screenings(
        movie: movies::Model,
        screenings: Vec<screenings::Model>,
    ) -> Result<MovieWithScreenings> {
        Ok(MovieWithScreenings {
            movie: Self::map_movie_model(movie)?,
            screenings: screenings
                .into_iter()
                .map(Self::map_screening_model)
                .collect::<Result<_>>()?,
        })
    }

    fn screening_active_model(
        movie_id: &str,
        draft: &ScreeningDraft,
    ) -> Result<screenings::ActiveModel> {
        Ok(screenings::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            movie_id: Set(movie_id.to_string()),
            start_date: Set(draft.start_date),
            end_date: Set(draft.end_date),
            week_days: Set(serde_json::to_string(&draft.week_days)?),
            start_time: Set(draft.start_time),
            city: Set(draft.city.clone()),
            address: Set(draft.address.clone()),
        })
    }

    fn apply_scalars(active: &mut movies::ActiveModel, draft: &MovieDraft) -> Result<()> {
        active.title = Set(draft.title.clone());
        active.duration = Set(draft.duration);
        active.language = Set(draft.language.clone());
        active.subtitles = Set(draft.subtitles.clone());
        active.director = Set(draft.director.clone());
        active.actors = Set(serde_json::to_string(&draft.actors)?);
        active.min_age = Set(draft.min_age);
        active.poster = Set(draft.poster.clone());
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());
        Ok(())
    }

    // ========================================================================
    // Reads
    // ========================================================================

    pub async fn list_with_screenings(&self) -> Result<Vec<MovieWithScreenings>> {
        let movies = Movies::find()
            .order_by_asc(movies::Column::Title)
            .all(&self.conn)
            .await?;

        let screenings = movies
            .load_many(
                Screenings::find().order_by_asc(screenings::Column::StartDate),
                &self.conn,
            )
            .await?;

        movies
            .into_iter()
            .zip(screenings)
            .map(|(movie, screenings)| Self::map_with_screenings(movie, screenings))
            .collect()
    }

    pub async fn get_with_screenings(&self, id: &str) -> Result<Option<MovieWithScreenings>> {
        let Some(movie) = Movies::find_by_id(id.to_string()).one(&self.conn).await? else {
            return Ok(None);
        };

        let screenings = movie
            .find_related(Screenings)
            .order_by_asc(screenings::Column::StartDate)
            .all(&self.conn)
            .await?;

        Self::map_with_screenings(movie, screenings).map(Some)
    }

    pub async fn count_screenings(&self, movie_id: &str) -> Result<u64> {
        let count = Screenings::find()
            .filter(screenings::Column::MovieId.eq(movie_id))
            .count(&self.conn)
            .await?;
        Ok(count)
    }

    // ========================================================================
    // Writes
    // ========================================================================

    pub async fn create(&self, draft: &MovieDraft) -> Result<MovieWithScreenings> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = chrono::Utc::now().to_rfc3339();

        let mut active = movies::ActiveModel {
            id: Set(id.clone()),
            created_at: Set(now),
            ..Default::default()
        };
        Self::apply_scalars(&mut active, draft)?;

        let txn = self.conn.begin().await?;

        Movies::insert(active).exec_without_returning(&txn).await?;
        Screenings::insert(Self::screening_active_model(&id, &draft.screening)?)
            .exec_without_returning(&txn)
            .await?;

        txn.commit().await?;
        info!(movie_id = %id, "Created movie '{}'", draft.title);

        self.get_with_screenings(&id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Failed to retrieve created movie {id}"))
    }

    pub async fn replace(&self, id: &str, draft: &MovieDraft) -> Result<Option<Movie>> {
        let txn = self.conn.begin().await?;

        let Some(existing) = Movies::find_by_id(id.to_string()).one(&txn).await? else {
            txn.rollback().await?;
            return Ok(None);
        };

        let mut active: movies::ActiveModel = existing.into();
        Self::apply_scalars(&mut active, draft)?;
        let updated = active.update(&txn).await?;

        let removed = Screenings::delete_many()
            .filter(screenings::Column::MovieId.eq(id))
            .exec(&txn)
            .await?
            .rows_affected;

        Screenings::insert(Self::screening_active_model(id, &draft.screening)?)
            .exec_without_returning(&txn)
            .await?;

        txn.commit().await?;
        info!(movie_id = %id, replaced_screenings = removed, "Updated movie");

        Self::map_movie_model(updated).map(Some)
    }

    pub async fn delete_cascade(&self, id: &str) -> Result<bool> {
        let txn = self.conn.begin().await?;

        let removed = Screenings::delete_many()
            .filter(screenings::Column::MovieId.eq(id))
            .exec(&txn)
            .await?
            .rows_affected;

        let deleted = Movies::delete_by_id(id.to_string())
            .exec(&txn)
            .await?
            .rows_affected;

        if deleted == 0 {
            txn.rollback().await?;
            return Ok(false);
        }

        txn.commit().await?;
        info!(movie_id = %id, screenings = removed, "Deleted movie");
        Ok(true)
    }
}
