//! Where the form gets the session token from.

use axum_extra::extract::cookie::CookieJar;

pub const TOKEN_COOKIE: &str = "token";

pub trait CredentialProvider: Send + Sync {
    fn token(&self) -> Option<String>;
}

///A token known up front, or known to be absent.
#[derive(Debug, Clone, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl CredentialProvider for StaticToken {
    fn token(&self) -> Option<String> {
        self.0.clone()
    }
}

///Reads the token the login page left in the `token` cookie.
#[derive(Debug, Clone)]
pub struct CookieToken(Option<String>);

impl From<&CookieJar> for CookieToken {
    fn from(jar: &CookieJar) -> Self {
        Self(
            jar.get(TOKEN_COOKIE)
                .map(|c| c.value().trim().to_string())
                .filter(|t| !t.is_empty()),
        )
    }
}

impl CredentialProvider for CookieToken {
    fn token(&self) -> Option<String> {
        self.0.clone()
    }
}
