//! Request extractors.
//!
//! - [`auth::AuthUser`] -- the user behind a Bearer access token.
//! - [`locale::RequestLocale`] -- the language negotiated for the request.

pub mod auth;
pub mod locale;
