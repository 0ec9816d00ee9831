//! Persistence model: one SeaORM entity per table plus the validated `create`
//! helpers that every write goes through.

pub mod errors;
pub mod db;
pub mod user;
pub mod town;
pub mod gender;
pub mod working_day;
pub mod product_category;
pub mod product;
pub mod service_provider;
pub mod provider_working_day;
pub mod provider_service;
pub mod service_request;
pub mod service_response;
pub mod advertisement;
pub mod advertisement_service;

#[cfg(test)]
mod tests;
