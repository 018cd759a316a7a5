//! Handler for `GET /locale`.

use axum::response::IntoResponse;
use axum::Json;
use habitsgoals_core::locale::Language;
use serde::Serialize;

use crate::middleware::auth::AuthUser;
use crate::middleware::locale::RequestLocale;
use crate::response::DataResponse;

#[derive(Debug, Serialize)]
pub struct LocaleInfo {
    pub language: Language,
    pub supported: [Language; 2],
}

/// GET /api/v1/locale
///
/// The language this request resolves to: locale cookie first, then
/// Accept-Language, then the default.
pub async fn get_locale(_auth: AuthUser, RequestLocale(language): RequestLocale) -> impl IntoResponse {
    Json(DataResponse {
        data: LocaleInfo {
            language,
            supported: Language::ALL,
        },
    })
}
