//! Handlers for the signed-in user's profile (`/me`).

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use habitsgoals_core::catalog::validate_unit_codes;
use habitsgoals_core::confirmation::verify_confirmation;
use habitsgoals_core::dates::validate_timezone;
use habitsgoals_core::locale::{locale_cookie, Language, Theme};
use habitsgoals_db::models::profile::UpdateProfile;
use habitsgoals_db::repositories::{ProfileRepo, UserRepo};
use habitsgoals_events::{ChangeEvent, Collection};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LanguageRequest {
    pub language: Language,
}

#[derive(Debug, Deserialize)]
pub struct ThemeRequest {
    pub theme: Theme,
}

/// Body of `DELETE /me`.
#[derive(Debug, Deserialize)]
pub struct DeleteAccountRequest {
    pub confirm: Option<String>,
}

/// GET /api/v1/me
pub async fn get_profile(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let profile = ProfileRepo::find(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("UserProfile", auth.user_id))?;

    Ok(Json(DataResponse { data: profile }))
}

/// PATCH /api/v1/me
///
/// Partial update; absent fields are left unchanged.
pub async fn update_profile(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(mut input): Json<UpdateProfile>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = input.name.as_mut() {
        *name = name.trim().to_string();
    }
    if let Some(tz) = input.timezone.as_deref() {
        input.timezone = Some(validate_timezone(tz.trim())?.name().to_string());
    }
    if let Some(units) = input.preferred_units.as_deref() {
        validate_unit_codes(units)?;
    }

    let profile = ProfileRepo::update(&state.pool, auth.user_id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("UserProfile", auth.user_id))?;

    tracing::info!(user_id = auth.user_id, "Profile updated");
    state.publish(ChangeEvent::updated(Collection::Profile, auth.user_id, auth.user_id));

    Ok(Json(DataResponse { data: profile }))
}

/// PUT /api/v1/me/language
///
/// Stores the language on the profile and sets the locale cookie so
/// unauthenticated pages follow the same choice.
pub async fn set_language(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<LanguageRequest>,
) -> AppResult<impl IntoResponse> {
    let profile = ProfileRepo::set_language(&state.pool, auth.user_id, input.language)
        .await?
        .ok_or_else(|| AppError::not_found("UserProfile", auth.user_id))?;

    tracing::info!(user_id = auth.user_id, language = %input.language, "Language changed");
    state.publish(ChangeEvent::updated(Collection::Profile, auth.user_id, auth.user_id));

    Ok((
        [(SET_COOKIE, locale_cookie(input.language))],
        Json(DataResponse { data: profile }),
    ))
}

/// PUT /api/v1/me/theme
pub async fn set_theme(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ThemeRequest>,
) -> AppResult<impl IntoResponse> {
    let profile = ProfileRepo::set_theme(&state.pool, auth.user_id, input.theme)
        .await?
        .ok_or_else(|| AppError::not_found("UserProfile", auth.user_id))?;

    state.publish(ChangeEvent::updated(Collection::Profile, auth.user_id, auth.user_id));

    Ok(Json(DataResponse { data: profile }))
}

/// DELETE /api/v1/me
///
/// Deletes the account and, through cascades, every habit, log, goal, task
/// and session it owns. Open WebSocket connections of the user are closed.
pub async fn delete_account(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<DeleteAccountRequest>,
) -> AppResult<StatusCode> {
    verify_confirmation(input.confirm.as_deref())?;

    let deleted = UserRepo::delete(&state.pool, auth.user_id).await?;
    if !deleted {
        return Err(AppError::not_found("User", auth.user_id));
    }

    let closed = state.ws_manager.close_user(auth.user_id).await;
    tracing::info!(user_id = auth.user_id, closed, "Account deleted");

    Ok(StatusCode::NO_CONTENT)
}
