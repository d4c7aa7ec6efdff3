//! Portal
//!
//! Domain rules for the company portal: account roles and states, ticket
//! enumerations and references, helpdesk id tables, registration checks and
//! directory principal formatting. Nothing in this crate performs I/O.

pub mod directory;
pub mod helpdesk;
pub mod registration;
pub mod roles;
pub mod tickets;
