//! HTTP handlers for the form page and its submission.

pub mod form;
pub use form::*;
