//! Portal Domain Concerns

pub mod app_links;
mod columns;
pub mod sessions;
pub mod subscriptions;
pub mod tickets;
pub mod users;
