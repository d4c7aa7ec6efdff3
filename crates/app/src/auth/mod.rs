//! Authentication
//!
//! Customers and admins sign in with a locally stored password, employees
//! through the directory. Both paths end in a [`UserRecord`] that the
//! session binder attaches to a session.
//!
//! [`UserRecord`]: crate::domain::users::records::UserRecord

mod customer;
pub mod directory;
mod employee;
pub mod password;

pub use customer::{CustomerLoginError, LocalAuthenticator, NewAccount, RegistrationError};
pub use employee::{EmployeeAuthenticator, EmployeeLoginError};
pub use password::PasswordError;
