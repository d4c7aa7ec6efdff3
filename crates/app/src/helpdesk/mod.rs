//! Helpdesk integration
//!
//! Tickets can be mirrored into an external helpdesk. [`HelpdeskClient`] is
//! the REST transport, [`HelpdeskAdapter`] translates between local tickets
//! and the helpdesk's numeric state and priority ids.

mod adapter;
mod client;
pub mod models;

pub use adapter::HelpdeskAdapter;
pub use client::{HelpdeskApi, HelpdeskClient, HelpdeskError, HelpdeskSettings, MockHelpdeskApi};
