//! Service layer providing the marketplace's business operations on top of models.
//! - Separates business logic from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Turns JSON bodies into typed inputs with field-level errors.

pub mod errors;
pub mod validation;
pub mod views;
pub mod auth;
pub mod catalog;
pub mod advertisements;
pub mod providers;
pub mod matching;
#[cfg(test)]
pub mod test_support;
