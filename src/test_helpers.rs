//! Test support: a scripted, recording executor
//!
//! `MockExecutor` captures every statement and its parameters, and answers with
//! results queued in advance. With nothing queued, queries return no rows and
//! statements affect 0 rows.

use crate::executor::{DaoError, DaoExecutor};
use crate::record::Record;
use sea_query::{Value, Values};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

enum Scripted {
    Records(Vec<Record>),
    Affected(u64),
    Error(String),
}

#[derive(Clone, Default)]
pub struct MockExecutor {
    captured_sql: Arc<Mutex<Vec<String>>>,
    captured_values: Arc<Mutex<Vec<Vec<Value>>>>,
    results: Arc<Mutex<VecDeque<Scripted>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the rows returned by the next query
    pub fn push_records(&self, records: Vec<Record>) -> &Self {
        lock(&self.results).push_back(Scripted::Records(records));
        self
    }

    /// Queue the affected-row count of the next statement
    pub fn push_affected(&self, affected: u64) -> &Self {
        lock(&self.results).push_back(Scripted::Affected(affected));
        self
    }

    /// Make the next call fail with a `QueryError`
    pub fn push_error(&self, message: &str) -> &Self {
        lock(&self.results).push_back(Scripted::Error(message.to_string()));
        self
    }

    pub fn statements(&self) -> Vec<String> {
        lock(&self.captured_sql).clone()
    }

    pub fn last_statement(&self) -> Option<String> {
        lock(&self.captured_sql).last().cloned()
    }

    /// Bound values of every captured statement, in call order
    pub fn values(&self) -> Vec<Vec<Value>> {
        lock(&self.captured_values).clone()
    }

    pub fn clear(&self) {
        lock(&self.captured_sql).clear();
        lock(&self.captured_values).clear();
        lock(&self.results).clear();
    }

    fn capture(&self, sql: &str, values: &Values) -> Option<Scripted> {
        lock(&self.captured_sql).push(sql.to_string());
        lock(&self.captured_values).push(values.0.clone());
        lock(&self.results).pop_front()
    }
}

impl DaoExecutor for MockExecutor {
    fn execute(&self, sql: &str, values: &Values) -> Result<u64, DaoError> {
        match self.capture(sql, values) {
            Some(Scripted::Affected(n)) => Ok(n),
            Some(Scripted::Records(records)) => Ok(records.len() as u64),
            Some(Scripted::Error(msg)) => Err(DaoError::QueryError(msg)),
            None => Ok(0),
        }
    }

    fn query(&self, sql: &str, values: &Values) -> Result<Vec<Record>, DaoError> {
        match self.capture(sql, values) {
            Some(Scripted::Records(records)) => Ok(records),
            Some(Scripted::Affected(_)) | None => Ok(Vec::new()),
            Some(Scripted::Error(msg)) => Err(DaoError::QueryError(msg)),
        }
    }
}
