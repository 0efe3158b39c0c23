//! Pagination strategy implementations
//!
//! Each strategy handles a specific pagination pattern.

use super::types::{
    extract_path_string, NextPage, PaginationState, Paginator, StopCondition, StopResult,
};
use crate::types::{PaginationMode, StringMap};
use serde_json::Value;

/// Build the paginator for a pagination mode
pub fn paginator_for(mode: PaginationMode, page_size: u32) -> Box<dyn Paginator> {
    match mode {
        PaginationMode::NextUrl => Box::new(NextUrlPaginator::netbox(page_size)),
        PaginationMode::Offset => Box::new(OffsetPaginator::netbox(page_size)),
    }
}

// ============================================================================
// Next URL Pagination
// ============================================================================

/// Next URL pagination (URL in response body)
///
/// NetBox returns an absolute `next` link on every page except the last,
/// where it is `null`. The link already carries `limit` and `offset`.
#[derive(Debug, Clone)]
pub struct NextUrlPaginator {
    /// Dot path to the next URL in the response
    pub path: String,
    /// Query parameter name for page size
    pub limit_param: String,
    /// Page size requested on the first page
    pub page_size: u32,
}

impl NextUrlPaginator {
    /// Create a new next URL paginator
    pub fn new(path: impl Into<String>, limit_param: impl Into<String>, page_size: u32) -> Self {
        Self {
            path: path.into(),
            limit_param: limit_param.into(),
            page_size,
        }
    }

    /// Paginator matching NetBox's `next`/`limit` conventions
    pub fn netbox(page_size: u32) -> Self {
        Self::new("next", "limit", page_size)
    }
}

impl Paginator for NextUrlPaginator {
    fn initial_params(&self, _state: &PaginationState) -> StringMap {
        let mut params = StringMap::new();
        params.insert(self.limit_param.clone(), self.page_size.to_string());
        params
    }

    fn process_response(
        &self,
        body: &Value,
        records_count: usize,
        state: &mut PaginationState,
    ) -> NextPage {
        state.add_fetched(records_count as u64);

        if let Some(next_url) = extract_path_string(body, &self.path) {
            if !next_url.is_empty() {
                state.next_page();
                return NextPage::with_url(next_url);
            }
        }

        state.mark_done();
        NextPage::Done
    }
}

// ============================================================================
// Offset Pagination
// ============================================================================

/// Offset-based pagination
///
/// Computes `?offset=N&limit=M` locally instead of trusting the `next` link.
/// Useful when NetBox sits behind a proxy that rewrites the host in `next`.
#[derive(Debug, Clone)]
pub struct OffsetPaginator {
    /// Query parameter name for offset
    pub offset_param: String,
    /// Query parameter name for limit
    pub limit_param: String,
    /// Number of records per page
    pub limit_value: u32,
    /// Stop condition
    pub stop_condition: StopCondition,
}

impl OffsetPaginator {
    /// Create a new offset paginator
    pub fn new(
        offset_param: impl Into<String>,
        limit_param: impl Into<String>,
        limit_value: u32,
        stop_condition: StopCondition,
    ) -> Self {
        Self {
            offset_param: offset_param.into(),
            limit_param: limit_param.into(),
            limit_value,
            stop_condition,
        }
    }

    /// Paginator matching NetBox's `offset`/`limit`/`count` conventions
    pub fn netbox(page_size: u32) -> Self {
        Self::new("offset", "limit", page_size, StopCondition::total_count("count"))
    }

    fn params(&self, offset: u64) -> StringMap {
        let mut params = StringMap::new();
        params.insert(self.offset_param.clone(), offset.to_string());
        params.insert(self.limit_param.clone(), self.limit_value.to_string());
        params
    }
}

impl Paginator for OffsetPaginator {
    fn initial_params(&self, state: &PaginationState) -> StringMap {
        self.params(state.offset)
    }

    fn process_response(
        &self,
        body: &Value,
        records_count: usize,
        state: &mut PaginationState,
    ) -> NextPage {
        state.add_fetched(records_count as u64);

        if self.stop_condition.check(body, records_count, state) == StopResult::Stop {
            state.mark_done();
            return NextPage::Done;
        }

        // The server may cap limit below what we asked for, so a short page
        // only ends pagination when no total is available.
        if records_count < self.limit_value as usize
            && matches!(self.stop_condition, StopCondition::EmptyPage)
        {
            state.mark_done();
            return NextPage::Done;
        }

        state.add_offset(records_count as u64);
        state.next_page();
        NextPage::with_params(self.params(state.offset))
    }
}
