//! Pieces shared by every crate in the workspace: logging setup and the
//! small response types that are not tied to a domain entity.

pub mod types;
pub mod utils;
