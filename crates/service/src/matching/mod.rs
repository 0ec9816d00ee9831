//! Request/response matching: clients raise service requests against a
//! provider's offering, providers answer them. "Unanswered" is always
//! derived from the absence of response rows.

pub mod domain;
pub mod repository;
pub mod service;

pub use repository::SeaOrmMatchingRepository;
pub use service::MatchingService;
