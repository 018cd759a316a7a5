//! Repository for the `users` table.

use habitsgoals_core::types::DbId;
use sqlx::PgPool;

use crate::models::profile::{CreateProfile, UserProfile};
use crate::models::user::{CreateUser, User};
use crate::repositories::profile_repo::PROFILE_COLUMNS;

const COLUMNS: &str = "id, email, password_hash, created_at, updated_at";

pub struct UserRepo;

impl UserRepo {
    /// Insert the account and its profile in one transaction.
    ///
    /// A duplicate email fails on `uq_users_email` and nothing is written.
    pub async fn create_with_profile(
        pool: &PgPool,
        user: &CreateUser,
        profile: &CreateProfile,
    ) -> Result<(User, UserProfile), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO users (email, password_hash)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let created = sqlx::query_as::<_, User>(&query)
            .bind(&user.email)
            .bind(&user.password_hash)
            .fetch_one(&mut *tx)
            .await?;

        let query = format!(
            "INSERT INTO user_profiles (user_id, email, name, timezone)
             VALUES ($1, $2, $3, $4)
             RETURNING {PROFILE_COLUMNS}"
        );
        let created_profile = sqlx::query_as::<_, UserProfile>(&query)
            .bind(created.id)
            .bind(&profile.email)
            .bind(&profile.name)
            .bind(&profile.timezone)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(user_id = created.id, "User and profile created");
        Ok((created, created_profile))
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Emails are stored lowercased; callers pass the lowercased form.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Delete the account. Sessions, profile, habits, logs, goals and tasks
    /// go with it through `ON DELETE CASCADE`.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
