//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Only bearer-token verification lives here; accounts are provisioned
//! outside the API.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;

pub use domain::CurrentUser;
pub use service::AuthService;
