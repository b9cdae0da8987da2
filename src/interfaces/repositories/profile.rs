use async_trait::async_trait;
use sqlx::types::Json;
use std::borrow::Cow;

use crate::{
    entities::profile::{Profile, ProfileInsert, ProfileRow},
    errors::AppError,
    repositories::sqlx_repo::SqlxProfileRepo,
};

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn check_connection(&self) -> Result<(), AppError>;
    async fn create(&self, profile: &ProfileInsert) -> Result<i64, AppError>;
    async fn get_page(&self, page: u32, limit: u32) -> Result<Vec<Profile>, AppError>;
    async fn total_count(&self) -> Result<u64, AppError>;
    async fn get_by_id(&self, id: i64) -> Result<Option<Profile>, AppError>;
    async fn update(&self, id: i64, profile: &ProfileInsert) -> Result<(), AppError>;
    async fn search(&self, term: &str) -> Result<Vec<Profile>, AppError>;
}

impl SqlxProfileRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxProfileRepo { pool }
    }
}

#[async_trait]
impl ProfileRepository for SqlxProfileRepo {
    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(AppError::from)
    }

    async fn create(&self, profile: &ProfileInsert) -> Result<i64, AppError> {
        let id: i64 = sqlx::query_scalar(
            r#"INSERT INTO profiles
                (name, email, location, skills, experience_years, available_for_work, hourly_rate)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               RETURNING id"#,
        )
        .bind(&profile.name)
        .bind(&profile.email)
        .bind(&profile.location)
        .bind(Json(&profile.skills))
        .bind(profile.experience_years)
        .bind(profile.available_for_work)
        .bind(profile.hourly_rate)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.code() == Some(Cow::Borrowed("23505")) => {
                AppError::DuplicateEmail
            }
            _ => AppError::from(e),
        })?;

        Ok(id)
    }

    /// One page window in identity order. Clamping page/limit to sane
    /// values is the caller's job, not the adapter's.
    async fn get_page(&self, page: u32, limit: u32) -> Result<Vec<Profile>, AppError> {
        let offset = (i64::from(page) - 1) * i64::from(limit);

        let rows: Vec<ProfileRow> =
            sqlx::query_as("SELECT * FROM profiles ORDER BY id LIMIT $1 OFFSET $2")
                .bind(i64::from(limit))
                .bind(offset)
                .fetch_all(&self.pool)
                .await
                .map_err(AppError::from)?;

        Ok(rows.into_iter().map(Profile::from).collect())
    }

    async fn total_count(&self) -> Result<u64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM profiles")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)?;

        Ok(count as u64)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Profile>, AppError> {
        let row: Option<ProfileRow> = sqlx::query_as("SELECT * FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)?;

        Ok(row.map(Profile::from))
    }

    async fn update(&self, id: i64, profile: &ProfileInsert) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"UPDATE profiles
               SET name = $1,
                   email = $2,
                   location = $3,
                   skills = $4,
                   experience_years = $5,
                   available_for_work = $6,
                   hourly_rate = $7
               WHERE id = $8"#,
        )
        .bind(&profile.name)
        .bind(&profile.email)
        .bind(&profile.location)
        .bind(Json(&profile.skills))
        .bind(profile.experience_years)
        .bind(profile.available_for_work)
        .bind(profile.hourly_rate)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.code() == Some(Cow::Borrowed("23505")) => {
                AppError::DuplicateEmail
            }
            _ => AppError::from(e),
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Profile not found".to_string()));
        }

        Ok(())
    }

    /// OR of two independent predicates: substring match on location, or
    /// JSONB containment of the exact term in the skills array. A row
    /// matching both still appears once.
    async fn search(&self, term: &str) -> Result<Vec<Profile>, AppError> {
        let pattern = format!("%{}%", term);

        let rows: Vec<ProfileRow> = sqlx::query_as(
            "SELECT * FROM profiles WHERE location LIKE $1 OR skills @> $2 ORDER BY id",
        )
        .bind(pattern)
        .bind(Json(vec![term.to_string()]))
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(rows.into_iter().map(Profile::from).collect())
    }
}
