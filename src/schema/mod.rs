//! Table schema input: column descriptors and their typed flags.

mod column;
pub use column::*;
