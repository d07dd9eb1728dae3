//! GET renders the form, POST submits it.

use crate::extractors::SessionCookie;
use crate::response::html_with_session;
use crate::state::AppState;
use crate::submit::{SubmissionPipeline, SUCCESS_MESSAGE};
use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
    Form as UrlEncoded,
};
use std::collections::HashMap;

pub async fn show_form(SessionCookie(cookie): SessionCookie, State(state): State<AppState>) -> Response {
    let mut session = state.sessions.load(cookie.as_deref());
    let html = state.form.render(&mut session.data, state.title.as_deref());
    let stored = state.sessions.save(&session);
    html_with_session(html, &session.id, session.is_new && stored)
}

pub async fn submit_form(
    SessionCookie(cookie): SessionCookie,
    State(state): State<AppState>,
    UrlEncoded(data): UrlEncoded<HashMap<String, String>>,
) -> Response {
    let mut session = state.sessions.load(cookie.as_deref());
    let prepared = state.form.prepare_submission(&mut session.data, data);
    // Only known sessions are written back.
    if !session.is_new {
        state.sessions.save(&session);
    }
    let result = match prepared {
        Ok(command) => SubmissionPipeline::execute(state.store.as_ref(), &command).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(_) => Html(SUCCESS_MESSAGE).into_response(),
        Err(e) => e.into_response(),
    }
}
