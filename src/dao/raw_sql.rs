//! Raw SQL helpers
//!
//! Custom SQL runs as-is with `$n` parameters. The paged variant first counts the
//! rows of the statement wrapped as a subquery, then reruns it with `LIMIT/OFFSET`.

use super::Dao;
use crate::executor::{DaoError, DaoExecutor};
use crate::query::{Pager, QueryResult};
use crate::record::{FromRecord, Record};
use crate::value::TryGetable;
use sea_query::{Value, Values};

/// Count statement for an arbitrary query
///
/// ```
/// assert_eq!(
///     entity_service::count_sql("SELECT * FROM users;"),
///     "select count(1) count from (SELECT * FROM users) t"
/// );
/// ```
pub fn count_sql(sql: &str) -> String {
    format!("select count(1) count from ({}) t", strip_terminator(sql))
}

/// `sql` with `LIMIT/OFFSET` for `pager`; unchanged when the pager does not page
pub fn paged_sql(sql: &str, pager: &Pager) -> String {
    let sql = strip_terminator(sql);
    if pager.is_paged() {
        format!("{sql} LIMIT {} OFFSET {}", pager.page_size(), pager.offset())
    } else {
        sql.to_string()
    }
}

fn strip_terminator(sql: &str) -> &str {
    sql.trim().trim_end_matches(';').trim_end()
}

impl<E: DaoExecutor> Dao<E> {
    /// Execute a statement, returning the number of rows affected
    ///
    /// # Errors
    ///
    /// Returns `DaoError` if the SQL execution fails.
    pub fn execute_sql(&self, sql: &str, params: &[Value]) -> Result<u64, DaoError> {
        self.execute_values(sql, &Values(params.to_vec()))
    }

    /// Run a query and return its rows as [`Record`]s
    pub fn query_records(&self, sql: &str, params: &[Value]) -> Result<Vec<Record>, DaoError> {
        self.query_values(sql, &Values(params.to_vec()))
    }

    /// Run a query and map every row into `V`
    pub fn query_sql_as<V: FromRecord>(&self, sql: &str, params: &[Value]) -> Result<Vec<V>, DaoError> {
        self.query_records(sql, params)?
            .iter()
            .map(V::from_record)
            .collect()
    }

    /// First column of the first row
    ///
    /// # Errors
    ///
    /// `QueryError` when the query returns no row or no column.
    pub fn query_value<T: TryGetable>(&self, sql: &str, params: &[Value]) -> Result<T, DaoError> {
        let record = self
            .query_records(sql, params)?
            .into_iter()
            .next()
            .ok_or_else(|| DaoError::QueryError("Query returned no rows".to_string()))?;
        let (_, value) = record
            .iter()
            .next()
            .ok_or_else(|| DaoError::QueryError("Query returned no columns".to_string()))?;
        Ok(T::try_get(value.clone())?)
    }

    /// Paged custom query
    ///
    /// Counts with [`count_sql`] first; when that yields no row the result is empty
    /// and carries no pager. Otherwise the page is read with [`paged_sql`] and a
    /// copy of `pager` holding the record count is returned. Without a pager every
    /// row is read and the result has no pager.
    pub fn query_sql_pager<V: FromRecord>(
        &self,
        sql: &str,
        params: &[Value],
        pager: Option<&Pager>,
    ) -> Result<QueryResult<V>, DaoError> {
        let Some(count_record) = self.query_records(&count_sql(sql), params)?.into_iter().next() else {
            return Ok(QueryResult::default());
        };
        let record_count = count_record.get_or_default::<i64>("count")?;

        let page_sql = match pager {
            Some(pager) => paged_sql(sql, pager),
            None => strip_terminator(sql).to_string(),
        };
        let list = self.query_sql_as::<V>(&page_sql, params)?;

        let pager = pager.map(|pager| {
            let mut pager = *pager;
            pager.set_record_count(u64::try_from(record_count).unwrap_or(0));
            pager
        });
        Ok(QueryResult::new(list, pager))
    }
}
