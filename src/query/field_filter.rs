//! Field filters: which columns of which table a statement may touch.
//!
//! A [`FieldFilter`] maps table names to a [`FieldMatcher`]. A matcher keeps a column
//! when it matches the `actived` pattern (if any) and does not match the `locked`
//! pattern (if any). Patterns are regular expressions matched against the column
//! name, e.g. `^(id|name)$`. `ignore_null` drops null values from inserts/updates.

use crate::executor::DaoError;
use regex::Regex;
use sea_query::Value;
use std::collections::HashMap;

/// Column selection rules for one table
#[derive(Debug, Clone, Default)]
pub struct FieldMatcher {
    actived: Option<Regex>,
    locked: Option<Regex>,
    ignore_null: bool,
}

impl FieldMatcher {
    /// Build a matcher; blank patterns mean "no restriction"
    ///
    /// # Errors
    ///
    /// `IllegalArgument` when a pattern is not a valid regular expression.
    pub fn make(actived: Option<&str>, locked: Option<&str>, ignore_null: bool) -> Result<Self, DaoError> {
        Ok(Self {
            actived: compile(actived)?,
            locked: compile(locked)?,
            ignore_null,
        })
    }

    pub fn is_ignore_null(&self) -> bool {
        self.ignore_null
    }

    /// Whether `column` is selected
    pub fn matches(&self, column: &str) -> bool {
        if let Some(locked) = &self.locked {
            if locked.is_match(column) {
                return false;
            }
        }
        match &self.actived {
            Some(actived) => actived.is_match(column),
            None => true,
        }
    }

    /// Whether `column` with `value` is written by an insert/update
    pub fn matches_value(&self, column: &str, value: &Value) -> bool {
        if self.ignore_null && crate::value::is_null(value) {
            return false;
        }
        self.matches(column)
    }
}

fn compile(pattern: Option<&str>) -> Result<Option<Regex>, DaoError> {
    match pattern.map(str::trim) {
        None | Some("") => Ok(None),
        Some(p) => Regex::new(p)
            .map(Some)
            .map_err(|e| DaoError::IllegalArgument(format!("invalid field pattern {p:?}: {e}"))),
    }
}

/// Per-table field matchers
///
/// # Example
///
/// ```
/// use entity_service::FieldFilter;
///
/// let filter = FieldFilter::create("users", "^(id|name)$")?
///     .set("orders", "^(id|total)$")?;
/// assert!(filter.matches("users", "name"));
/// assert!(!filter.matches("users", "password"));
/// assert!(filter.matches("audit_log", "anything"));
/// # Ok::<(), entity_service::DaoError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct FieldFilter {
    matchers: HashMap<String, FieldMatcher>,
}

impl FieldFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter keeping only the columns of `table` that match `actived`
    pub fn create(table: &str, actived: &str) -> Result<Self, DaoError> {
        Self::new().set(table, actived)
    }

    /// Filter hiding the columns of `table` that match `locked`
    pub fn locked(table: &str, locked: &str) -> Result<Self, DaoError> {
        Ok(Self::new().set_matcher(table, FieldMatcher::make(None, Some(locked), false)?))
    }

    /// Filter that only drops null values of `table` from inserts/updates
    pub fn ignore_null(table: &str) -> Self {
        Self::new().set_matcher(
            table,
            FieldMatcher {
                ignore_null: true,
                ..FieldMatcher::default()
            },
        )
    }

    /// Add (or replace) the `actived` rule for `table`
    pub fn set(self, table: &str, actived: &str) -> Result<Self, DaoError> {
        Ok(self.set_matcher(table, FieldMatcher::make(Some(actived), None, false)?))
    }

    pub fn set_matcher(mut self, table: &str, matcher: FieldMatcher) -> Self {
        self.matchers.insert(table.to_string(), matcher);
        self
    }

    pub fn matcher(&self, table: &str) -> Option<&FieldMatcher> {
        self.matchers.get(table)
    }

    /// Whether `column` of `table` is selected; tables without a rule keep every column
    pub fn matches(&self, table: &str, column: &str) -> bool {
        self.matcher(table).map_or(true, |m| m.matches(column))
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}
