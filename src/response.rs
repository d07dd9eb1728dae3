//! HTML response helpers.

use crate::extractors::session::SESSION_COOKIE;
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

/// Session cookie for `id`: whole site, HttpOnly, SameSite=Lax.
pub fn session_cookie(id: &str) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// HTML response, setting the session cookie when `set_cookie` is true.
pub fn html_with_session(body: String, session_id: &str, set_cookie: bool) -> Response {
    if set_cookie {
        (CookieJar::new().add(session_cookie(session_id)), Html(body)).into_response()
    } else {
        Html(body).into_response()
    }
}
