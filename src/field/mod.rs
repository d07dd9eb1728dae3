//! Field models: type inference from columns and field-set composition.

pub mod infer;
mod model;
mod set;

pub use infer::{base_type, infer, parse_possible_values, DATE_TYPES};
pub use model::*;
pub use set::FieldSet;
