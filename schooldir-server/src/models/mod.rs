//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod school;
pub mod search;

pub use validation::ValidationError;
pub use school::{NewSchool, School, SchoolForm, SchoolSummary, REQUIRED_FIELDS};
pub use search::{SearchParams, SearchTerm};
