//! Repository for the `user_profiles` table.

use habitsgoals_core::locale::{Language, Theme};
use habitsgoals_core::types::DbId;
use sqlx::PgPool;

use crate::models::profile::{UpdateProfile, UserProfile};

pub(crate) const PROFILE_COLUMNS: &str = "user_id, email, name, bio, avatar_url, timezone, \
                        preferred_units, theme, language, created_at, updated_at";

pub struct ProfileRepo;

impl ProfileRepo {
    pub async fn find(pool: &PgPool, user_id: DbId) -> Result<Option<UserProfile>, sqlx::Error> {
        let query = format!("SELECT {PROFILE_COLUMNS} FROM user_profiles WHERE user_id = $1");
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Apply the non-`None` fields of `input`.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<UserProfile>, sqlx::Error> {
        let query = format!(
            "UPDATE user_profiles SET
                name = COALESCE($2, name),
                bio = COALESCE($3, bio),
                avatar_url = COALESCE($4, avatar_url),
                timezone = COALESCE($5, timezone),
                preferred_units = COALESCE($6, preferred_units),
                theme = COALESCE($7, theme),
                language = COALESCE($8, language)
             WHERE user_id = $1
             RETURNING {PROFILE_COLUMNS}"
        );
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.bio)
            .bind(&input.avatar_url)
            .bind(&input.timezone)
            .bind(&input.preferred_units)
            .bind(input.theme.map(Theme::as_str))
            .bind(input.language.map(Language::as_str))
            .fetch_optional(pool)
            .await
    }

    pub async fn set_language(
        pool: &PgPool,
        user_id: DbId,
        language: Language,
    ) -> Result<Option<UserProfile>, sqlx::Error> {
        Self::update(
            pool,
            user_id,
            &UpdateProfile {
                language: Some(language),
                ..Default::default()
            },
        )
        .await
    }

    pub async fn set_theme(
        pool: &PgPool,
        user_id: DbId,
        theme: Theme,
    ) -> Result<Option<UserProfile>, sqlx::Error> {
        Self::update(
            pool,
            user_id,
            &UpdateProfile {
                theme: Some(theme),
                ..Default::default()
            },
        )
        .await
    }
}
