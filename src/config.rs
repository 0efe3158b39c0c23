//! Runtime configuration
//!
//! Connection settings come from the environment (optionally seeded from a
//! `.env` file) and can be overridden on the command line.

use crate::auth::AuthConfig;
use crate::error::{Error, Result};
use crate::http::HttpClientConfig;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Variables holding the NetBox URL, in lookup order
pub const URL_VARS: &[&str] = &["NETBOX_URL", "NB_URL"];

/// Variables holding the API token, in lookup order
pub const TOKEN_VARS: &[&str] = &["NETBOX_API_KEY", "NB_API_KEY", "NETBOX_TOKEN"];

/// Default directory holding definition files
pub const DEFAULT_CONF_DIR: &str = "conf";

/// Default directory receiving CSV files
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Default records per page
pub const DEFAULT_PAGE_SIZE: u32 = 1000;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Load `.env` from the working directory, if present
pub fn load_dotenv() {
    match dotenv::dotenv() {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => debug!("Ignoring unreadable .env: {e}"),
    }
}

/// Where to reach NetBox and how to authenticate
#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    /// Server URL (without `/api`)
    pub url: Url,
    /// Authentication derived from the API token
    pub auth: AuthConfig,
    /// Request timeout
    pub timeout: Duration,
    /// Skip TLS certificate verification
    pub insecure: bool,
}

impl ConnectionSettings {
    /// Resolve from CLI overrides, falling back to the process environment
    pub fn from_env(url: Option<&str>, token: Option<&str>) -> Result<Self> {
        Self::from_sources(url, token, |key| std::env::var(key).ok())
    }

    /// Resolve from CLI overrides and an environment lookup
    pub fn from_sources(
        url: Option<&str>,
        token: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let url = non_empty(url.map(String::from))
            .or_else(|| first_var(URL_VARS, &env))
            .ok_or_else(|| Error::missing_field(URL_VARS.join(" or ")))?;

        let token = non_empty(token.map(String::from))
            .or_else(|| first_var(TOKEN_VARS, &env))
            .ok_or_else(|| Error::missing_field(TOKEN_VARS.join(", ")))?;

        Ok(Self {
            url: parse_base_url(&url)?,
            auth: AuthConfig::from_api_token(token),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            insecure: false,
        })
    }

    /// Set the request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Skip TLS certificate verification
    #[must_use]
    pub fn with_insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    /// HTTP client configuration for these settings
    pub fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig::builder()
            .base_url(self.url.as_str())
            .timeout(self.timeout)
            .accept_invalid_certs(self.insecure)
            .build()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn first_var(keys: &[&str], env: &impl Fn(&str) -> Option<String>) -> Option<String> {
    keys.iter().find_map(|key| non_empty(env(key)))
}

/// Parse and check the NetBox server URL
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::invalid_value(
            "url",
            format!("unsupported scheme '{other}', expected http or https"),
        )),
    }
}

/// Parse a delimiter argument into a single byte
///
/// Accepts one ASCII character, or `\t`/`tab` for tab-separated output.
pub fn parse_delimiter(raw: &str) -> Result<u8> {
    match raw {
        "\\t" | "tab" => return Ok(b'\t'),
        _ => {}
    }

    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() && c != '"' && c != '\n' && c != '\r' => Ok(c as u8),
        _ => Err(Error::invalid_value(
            "delimiter",
            format!("'{raw}' is not a single ASCII character"),
        )),
    }
}
