//! Subscriptions

pub mod data;
pub mod errors;
pub mod memory;
pub mod records;
mod repository;
pub mod service;

pub use errors::SubscriptionsServiceError;
pub use memory::MemorySubscriptionsService;
pub use service::*;
