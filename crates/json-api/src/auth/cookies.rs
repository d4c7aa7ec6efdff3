//! Session cookie handling.

use salvo::{
    http::cookie::{Cookie, SameSite},
    prelude::{Request, Response},
};

use crate::config::sessions::SessionConfig;

/// Name and flags of the cookie that carries the session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SessionCookies {
    name: String,
    secure: bool,
}

impl SessionCookies {
    pub(crate) fn new(name: impl Into<String>, secure: bool) -> Self {
        Self {
            name: name.into(),
            secure,
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    /// Session token sent by the client, if any.
    pub(crate) fn read(&self, req: &Request) -> Option<String> {
        req.cookie(&self.name)
            .map(|cookie| cookie.value().trim().to_string())
            .filter(|token| !token.is_empty())
    }

    /// Hand the token to the client. The cookie lives for the browser
    /// session; the server enforces the real expiry.
    pub(crate) fn issue(&self, res: &mut Response, token: &str) {
        res.add_cookie(self.build(token.to_string()));
    }

    /// Tell the client to forget the token.
    pub(crate) fn clear(&self, res: &mut Response) {
        let mut cookie = self.build(String::new());
        cookie.make_removal();

        res.add_cookie(cookie);
    }

    fn build(&self, value: String) -> Cookie<'static> {
        Cookie::build((self.name.clone(), value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .build()
    }
}

impl From<&SessionConfig> for SessionCookies {
    fn from(config: &SessionConfig) -> Self {
        Self::new(config.session_cookie_name.clone(), config.session_cookie_secure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_cookie_is_http_only() {
        let cookies = SessionCookies::new("portal_session", true);
        let cookie = cookies.build("ps_token".to_string());

        assert_eq!(cookie.name(), "portal_session");
        assert_eq!(cookie.value(), "ps_token");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
    }
}
