//! Report output.
//!
//! - [`json`]: writes the [`InjuryReport`](crate::models::InjuryReport) as an
//!   indented JSON document, overwriting any existing file

pub mod json;
