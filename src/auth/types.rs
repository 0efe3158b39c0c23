//! Auth configuration types

/// Prefix carried by NetBox v2 API tokens
const V2_TOKEN_PREFIX: &str = "nbt_";

/// Authentication configuration
#[derive(Clone, Default, PartialEq, Eq)]
pub enum AuthConfig {
    /// No authentication
    #[default]
    None,

    /// Legacy NetBox token (`Authorization: Token <token>`)
    Token {
        /// The API token
        token: String,
    },

    /// Bearer token (`Authorization: Bearer <token>`)
    Bearer {
        /// The API token
        token: String,
    },
}

impl AuthConfig {
    /// Pick the auth scheme for a NetBox API token
    pub fn from_api_token(token: impl Into<String>) -> Self {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            Self::None
        } else if token.starts_with(V2_TOKEN_PREFIX) {
            Self::Bearer { token }
        } else {
            Self::Token { token }
        }
    }

    /// Value for the `Authorization` header, if any
    pub fn header_value(&self) -> Option<String> {
        match self {
            Self::None => None,
            Self::Token { token } => Some(format!("Token {token}")),
            Self::Bearer { token } => Some(format!("Bearer {token}")),
        }
    }
}

// Tokens must never end up in logs.
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Token { .. } => f.debug_struct("Token").field("token", &"***").finish(),
            Self::Bearer { .. } => f.debug_struct("Bearer").field("token", &"***").finish(),
        }
    }
}
