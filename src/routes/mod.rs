mod common;
mod form;

pub use common::common_routes;
pub use form::{form_routes, MAX_BODY_BYTES};
