//! Pagination descriptor and paged results.

use crate::config::DatabaseConfig;
use serde::{Deserialize, Serialize};

/// Page request plus the total row count once a query has filled it in
///
/// Pages are 1-based. A page size of 0 disables paging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PagerFields")]
pub struct Pager {
    page_number: u64,
    page_size: u64,
    record_count: u64,
}

/// Wire form of [`Pager`]; page numbers are clamped on the way in
#[derive(Deserialize)]
struct PagerFields {
    #[serde(default)]
    page_number: u64,
    #[serde(default = "default_page_size")]
    page_size: u64,
    #[serde(default)]
    record_count: u64,
}

fn default_page_size() -> u64 {
    crate::config::DEFAULT_PAGE_SIZE
}

impl From<PagerFields> for Pager {
    fn from(fields: PagerFields) -> Self {
        let mut pager = Pager::new(fields.page_number, fields.page_size);
        pager.set_record_count(fields.record_count);
        pager
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(1, default_page_size())
    }
}

impl Pager {
    /// First page sized by the configured `default_page_size`
    pub fn from_config(config: &DatabaseConfig) -> Self {
        Self::new(1, config.default_page_size)
    }

    /// Page numbers below 1 are treated as page 1
    pub fn new(page_number: u64, page_size: u64) -> Self {
        Self {
            page_number: page_number.max(1),
            page_size,
            record_count: 0,
        }
    }

    pub fn page_number(&self) -> u64 {
        self.page_number
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn record_count(&self) -> u64 {
        self.record_count
    }

    pub fn set_record_count(&mut self, record_count: u64) -> &mut Self {
        self.record_count = record_count;
        self
    }

    pub fn set_page_number(&mut self, page_number: u64) -> &mut Self {
        self.page_number = page_number.max(1);
        self
    }

    /// Whether LIMIT/OFFSET should be applied at all
    pub fn is_paged(&self) -> bool {
        self.page_size > 0
    }

    pub fn offset(&self) -> u64 {
        self.page_number.saturating_sub(1).saturating_mul(self.page_size)
    }

    /// Number of pages for the current record count (0 when unpaged or empty)
    pub fn page_count(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.record_count.div_ceil(self.page_size)
    }

    pub fn is_first(&self) -> bool {
        self.page_number == 1
    }

    pub fn is_last(&self) -> bool {
        self.page_number >= self.page_count()
    }
}

/// Query result list with the pager that produced it (if any)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult<T> {
    pub list: Vec<T>,
    pub pager: Option<Pager>,
}

impl<T> Default for QueryResult<T> {
    fn default() -> Self {
        Self {
            list: Vec::new(),
            pager: None,
        }
    }
}

impl<T> QueryResult<T> {
    pub fn new(list: Vec<T>, pager: Option<Pager>) -> Self {
        Self { list, pager }
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}
