//! Extract the session id from the request's cookies.

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;

/// Cookie carrying the session id.
pub const SESSION_COOKIE: &str = "form_session";

/// Extractor for the optional session id cookie.
#[derive(Clone, Debug)]
pub struct SessionCookie(pub Option<String>);

impl SessionCookie {
    pub fn from_jar(jar: &CookieJar) -> Self {
        let value = jar
            .get(SESSION_COOKIE)
            .map(|c| c.value_trimmed().to_string())
            .filter(|s| !s.is_empty());
        SessionCookie(value)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionCookie
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(SessionCookie::from_jar(&CookieJar::from_headers(&parts.headers)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header::COOKIE, Request};

    async fn extract(cookie: Option<&str>) -> Option<String> {
        let mut builder = Request::builder().uri("/");
        if let Some(c) = cookie {
            builder = builder.header(COOKIE, c);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        SessionCookie::from_request_parts(&mut parts, &()).await.unwrap().0
    }

    #[tokio::test]
    async fn test_reads_session_cookie_among_others() {
        assert_eq!(
            extract(Some("theme=dark; form_session=abc-123; x=y")).await.as_deref(),
            Some("abc-123")
        );
    }

    #[tokio::test]
    async fn test_quoted_cookie_value_is_unquoted() {
        assert_eq!(extract(Some("form_session=\"abc\"")).await.as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn test_missing_or_empty_cookie() {
        assert_eq!(extract(None).await, None);
        assert_eq!(extract(Some("form_session=")).await, None);
        assert_eq!(extract(Some("other=1")).await, None);
    }
}
