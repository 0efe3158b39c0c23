//! Field extraction module
//!
//! Turns NetBox API records into flat rows of strings.
//!
//! # Access rules
//!
//! | Field        | Record value                         | Output          |
//! |--------------|--------------------------------------|-----------------|
//! | `name`       | `"DC1"`                              | `DC1`           |
//! | `region`     | `{"id": 3, "name": "EU", ...}`       | `EU`            |
//! | `tenant.slug`| `{"slug": "acme", ...}`              | `acme`          |
//! | `tags`       | `[{"slug": "a"}, {"slug": "b"}]`     | `a,b`           |
//! | `tags.name`  | `[{"name": "A"}, {"name": "B"}]`     | `A,B`           |
//! | `status`     | `{"value": "active", "label": ...}`  | `active`        |
//! | `comments`   | `"line 1\nline 2"`                   | `line 1 line 2` |
//! | missing/null | -                                    | empty           |

mod resolver;

pub use resolver::{
    extract_row, normalize, render_value, resolve_field, FieldPath, RowExtractor, LIST_SEPARATOR,
};

#[cfg(test)]
mod tests;
