//! Sessions
//!
//! Server-side sessions handed to clients as opaque cookie tokens. Only a
//! SHA-256 digest of each token is kept.

pub mod errors;
pub mod memory;
pub mod records;
pub mod service;
pub mod token;

pub use errors::SessionsServiceError;
pub use memory::MemorySessionsService;
pub use service::*;
