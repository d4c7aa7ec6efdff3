//! Directory (LDAP / Active Directory) sign-in

mod authenticator;
mod ldap;
mod transport;

pub use authenticator::{
    DirectoryAuthError, DirectoryAuthenticator, DirectoryIdentity, DirectoryNaming,
    DirectorySettings,
};
pub use ldap::LdapTransport;
pub use transport::{
    BindOutcome, DirectoryProfile, DirectoryTransport, DirectoryTransportError,
    MockDirectoryTransport,
};
