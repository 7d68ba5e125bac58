//! Authentication models

use std::fmt;

/// How requests to DefectDojo are authenticated
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// API token sent as `Authorization: Token <token>`
    Token(String),
    /// Username and password exchanged once for a token
    Password { username: String, password: String },
    /// No credentials; the server decides what is allowed
    Anonymous,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Token(_) => f.write_str("Token(<redacted>)"),
            Credentials::Password { username, .. } => f
                .debug_struct("Password")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Credentials::Anonymous => f.write_str("Anonymous"),
        }
    }
}

/// Base URL plus credentials for one CLI invocation. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    /// DefectDojo base URL without a trailing slash
    pub base_url: String,
    pub credentials: Credentials,
}

impl AuthContext {
    /// Build a context, preferring a token over a username/password pair.
    pub fn new(
        base_url: &str,
        token: Option<String>,
        username: Option<String>,
        password: Option<String>,
    ) -> Self {
        let credentials = match (token, username, password) {
            (Some(token), _, _) if !token.is_empty() => Credentials::Token(token),
            (_, Some(username), Some(password)) => Credentials::Password { username, password },
            _ => Credentials::Anonymous,
        };

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        }
    }
}
