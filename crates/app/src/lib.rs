//! Shared application services, persistence and integrations for the portal.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod helpdesk;

#[cfg(test)]
mod test;

mod ids;

pub use ids::TypedId;
