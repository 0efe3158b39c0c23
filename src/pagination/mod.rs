//! Pagination module
//!
//! Supports: Next URL (NetBox default), Offset
//!
//! # Overview
//!
//! NetBox list endpoints return `count`, `next`, `previous` and `results`.
//! Each strategy decides from a page body whether another page exists and
//! which request fetches it.

mod strategies;
mod types;

pub use strategies::{paginator_for, NextUrlPaginator, OffsetPaginator};
pub use types::{
    extract_path_string, NextPage, PaginationState, Paginator, StopCondition, StopResult,
};
