//! Authentication module
//!
//! Supports the two NetBox API token schemes:
//! - legacy tokens sent as `Authorization: Token <key>`
//! - v2 tokens (`nbt_` prefix) sent as `Authorization: Bearer <key>`

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::AuthConfig;
