//! Per-user profile and preferences.

use habitsgoals_core::locale::{Language, Theme};
use habitsgoals_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserProfile {
    pub user_id: DbId,
    pub email: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    /// IANA timezone name.
    pub timezone: String,
    pub preferred_units: Vec<String>,
    #[sqlx(try_from = "String")]
    pub theme: Theme,
    #[sqlx(try_from = "String")]
    pub language: Language,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Profile written at sign-up.
#[derive(Debug, Clone)]
pub struct CreateProfile {
    pub email: String,
    pub name: Option<String>,
    pub timezone: String,
}

/// Partial profile update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfile {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub timezone: Option<String>,
    pub preferred_units: Option<Vec<String>>,
    pub theme: Option<Theme>,
    pub language: Option<Language>,
}
