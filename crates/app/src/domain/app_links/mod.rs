//! Application Links

pub mod data;
pub mod errors;
pub mod memory;
pub mod records;
mod repository;
pub mod service;

pub use data::default_app_links;
pub use errors::AppLinksServiceError;
pub use memory::MemoryAppLinksService;
pub use service::*;
