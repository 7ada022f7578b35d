use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AuthError;

/// An opaque API token; never printed.
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("Token(..)")
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct UserInfo {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// The authentication capability handed to every browser and client at
/// construction.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated {
        token: Token,
        user: Option<UserInfo>,
    },
}

impl Session {
    pub fn anonymous() -> Self {
        Self::Anonymous
    }

    pub fn authenticated(token: Token, user: Option<UserInfo>) -> Self {
        Self::Authenticated { token, user }
    }

    /// A session from an optional token, e.g. as read from configuration.
    pub fn from_token(token: Option<String>) -> Self {
        match token.filter(|t| !t.trim().is_empty()) {
            Some(token) => Self::authenticated(Token::new(token), None),
            None => Self::Anonymous,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }

    pub fn bearer(&self) -> Option<&str> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated { token, .. } => Some(token.as_str()),
        }
    }

    pub fn user(&self) -> Option<&UserInfo> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated { user, .. } => user.as_ref(),
        }
    }

    /// Gate access to views that require a logged in user.
    pub fn require(&self) -> Result<&Token, AuthError> {
        match self {
            Session::Anonymous => Err(AuthError::NotLoggedIn),
            Session::Authenticated { token, .. } => Ok(token),
        }
    }
}
