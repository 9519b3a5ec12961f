//! Query building blocks shared by the `Dao` and the service layer.
//!
//! - **Cnd / Chain**: WHERE + ORDER BY conditions and name/value chains for bulk updates
//! - **FieldFilter**: per-table regex selection of the columns a statement touches
//! - **Pager / QueryResult**: pagination descriptor and paged result carrier
//! - **Value Conversion**: SeaQuery `Value` to `ToSql` parameter conversion
//!
//! # Examples
//!
//! ```
//! use entity_service::{Cnd, Pager};
//!
//! let cnd = Cnd::where_("age", ">", 18).and("name", "like", "J%").desc("id");
//! let pager = Pager::new(2, 20);
//! assert_eq!(pager.offset(), 20);
//! # let _ = cnd;
//! ```

pub mod cnd;
#[doc(inline)]
pub use cnd::{Chain, Cnd};

pub mod field_filter;
#[doc(inline)]
pub use field_filter::FieldFilter;

pub mod pager;
#[doc(inline)]
pub use pager::{Pager, QueryResult};

// Value conversion utilities
pub(crate) mod value_conversion;

use crate::executor::DaoError;
use once_cell::sync::Lazy;
use regex::Regex;
use sea_query::Iden;

/// Runtime identifier (table or column name) for sea-query statements
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Name(pub(crate) String);

impl Name {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl Iden for Name {
    fn unquoted(&self) -> &str {
        &self.0
    }
}

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid"));

/// Reject names that would need quoting to be spliced into raw SQL (aggregate names,
/// column names inside `Expr::cust`).
pub(crate) fn ensure_identifier(kind: &str, name: &str) -> Result<(), DaoError> {
    if IDENTIFIER.is_match(name) {
        Ok(())
    } else {
        Err(DaoError::IllegalArgument(format!(
            "{kind} must be a plain identifier, got {name:?}"
        )))
    }
}
