//! Page selection and page metadata.

use crate::config::ServiceConfig;
use crate::error::{RegistrationError, RegistrationResult};
use serde::{Deserialize, Serialize};

use super::filter::{LIMIT_PARAM, PAGE_PARAM};

/// A validated page selection. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub limit: usize,
}

impl PageRequest {
    pub fn new(page: usize, limit: usize) -> Self {
        Self { page, limit }
    }

    /// Parse raw `page` and `limit` values.
    ///
    /// Absent or empty values take the defaults (page 1, the configured
    /// default limit). Values that are not positive integers, or a limit
    /// above the configured maximum, are rejected.
    pub fn parse(
        page: Option<&str>,
        limit: Option<&str>,
        config: &ServiceConfig,
    ) -> RegistrationResult<Self> {
        let page = match page.map(str::trim).filter(|v| !v.is_empty()) {
            Some(raw) => parse_positive(PAGE_PARAM, raw)?,
            None => 1,
        };
        let limit = match limit.map(str::trim).filter(|v| !v.is_empty()) {
            Some(raw) => parse_positive(LIMIT_PARAM, raw)?,
            None => config.default_limit,
        };

        if limit > config.max_limit {
            return Err(RegistrationError::invalid_query(
                LIMIT_PARAM,
                format!("must be less than or equal to {}", config.max_limit),
            ));
        }

        Ok(Self { page, limit })
    }

    /// Number of matching records to skip.
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

fn parse_positive(parameter: &str, raw: &str) -> RegistrationResult<usize> {
    match raw.parse::<usize>() {
        Ok(value) if value >= 1 => Ok(value),
        _ => Err(RegistrationError::invalid_query(
            parameter,
            format!("'{}' is not a positive integer", raw),
        )),
    }
}

/// Page metadata returned with every list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: usize,
    pub limit: usize,
    pub page: usize,
    pub total_pages: usize,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl Pagination {
    pub fn new(total: usize, page: usize, limit: usize) -> Self {
        let total_pages = if limit == 0 { 0 } else { total.div_ceil(limit) };
        Self {
            total,
            limit,
            page,
            total_pages,
            has_next_page: page < total_pages,
            has_prev_page: page > 1,
        }
    }

    pub fn for_request(total: usize, request: PageRequest) -> Self {
        Self::new(total, request.page, request.limit)
    }
}
