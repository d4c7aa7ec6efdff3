//! Tickets

pub mod data;
pub mod desk;
pub mod errors;
pub mod memory;
pub mod records;
mod reference;
mod repository;
pub mod service;

pub use desk::{TicketDesk, TicketDeskError};
pub use errors::TicketsServiceError;
pub use memory::MemoryTicketsService;
pub use service::*;
