//! Users

pub mod data;
pub mod errors;
pub mod memory;
pub mod records;
mod repository;
pub mod service;

pub use errors::UsersServiceError;
pub use memory::MemoryUsersService;
pub use service::*;
