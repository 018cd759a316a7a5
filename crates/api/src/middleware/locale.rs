//! Per-request language negotiation.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::{ACCEPT_LANGUAGE, COOKIE};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use habitsgoals_core::locale::{negotiate, Language, LOCALE_COOKIE};

/// Language for this request: the `locale` cookie, then `Accept-Language`,
/// then the default. Never rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLocale(pub Language);

impl<S: Send + Sync> FromRequestParts<S> for RequestLocale {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let cookie = cookie_value(&parts.headers, LOCALE_COOKIE);
        let accept = parts
            .headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok());
        Ok(RequestLocale(negotiate(cookie.as_deref(), accept)))
    }
}

/// Value of the first cookie called `name` across all `Cookie` headers.
fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn finds_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("theme=dark; locale=en-US; x=1"));
        assert_eq!(cookie_value(&headers, "locale").as_deref(), Some("en-US"));
        assert_eq!(cookie_value(&headers, "missing"), None);
    }

    #[tokio::test]
    async fn cookie_beats_accept_language() {
        let request = axum::http::Request::builder()
            .header(COOKIE, "locale=en-US")
            .header(ACCEPT_LANGUAGE, "pt-BR,pt;q=0.9")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();
        let RequestLocale(language) = RequestLocale::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(language, Language::EnUs);
    }
}
