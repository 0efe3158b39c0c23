//! Response decoder module
//!
//! Parses NetBox list responses and pulls the record array out of them.

mod decoders;

pub use decoders::{DecodedPage, JsonDecoder};
