//! Sessions, role gates and the sign-in endpoints.

pub(crate) mod cookies;
mod context;
mod errors;
mod gates;
pub(crate) mod handlers;
pub(crate) mod middleware;

pub(crate) use context::RequestContext;
pub(crate) use gates::RoleGate;
