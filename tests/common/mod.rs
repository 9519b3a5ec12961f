//! Shared fixtures: a scripted executor and two hand-mapped entities.

#![allow(dead_code)]

use entity_service::{DaoError, DaoExecutor, Entity, FromRecord, Link, PrimaryKey, Record};
use sea_query::{Value, Values};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Executor answering from a queue of canned row sets and recording every statement
#[derive(Clone, Default)]
pub struct ScriptedExecutor {
    log: Arc<Mutex<Vec<(String, Vec<Value>)>>>,
    rows: Arc<Mutex<VecDeque<Vec<Record>>>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, rows: Vec<Record>) {
        self.rows.lock().unwrap().push_back(rows);
    }

    pub fn sql(&self) -> Vec<String> {
        self.log.lock().unwrap().iter().map(|(sql, _)| sql.clone()).collect()
    }

    pub fn params(&self, idx: usize) -> Vec<Value> {
        self.log.lock().unwrap()[idx].1.clone()
    }

    fn next(&self, sql: &str, values: &Values) -> Vec<Record> {
        self.log.lock().unwrap().push((sql.to_string(), values.0.clone()));
        self.rows.lock().unwrap().pop_front().unwrap_or_default()
    }
}

impl DaoExecutor for ScriptedExecutor {
    fn execute(&self, sql: &str, values: &Values) -> Result<u64, DaoError> {
        Ok(self.next(sql, values).len() as u64)
    }

    fn query(&self, sql: &str, values: &Values) -> Result<Vec<Record>, DaoError> {
        Ok(self.next(sql, values))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderItem {
    pub sku: String,
    pub quantity: i32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Order {
    pub id: i64,
    pub customer: String,
    pub total: i64,
    pub status: Option<String>,
    pub items: Vec<OrderItem>,
}

impl Order {
    pub fn row(id: i64, customer: &str, total: i64) -> Record {
        Record::new()
            .with("id", id)
            .with("customer", customer)
            .with("total", total)
            .with("status", "open")
    }
}

impl FromRecord for Order {
    fn from_record(record: &Record) -> Result<Self, DaoError> {
        Ok(Self {
            id: record.get_i64("id")?,
            customer: record.get_or_default("customer")?,
            total: record.get_or_default("total")?,
            status: record.get_or_default("status")?,
            items: Vec::new(),
        })
    }
}

impl Entity for Order {
    fn table_name() -> &'static str {
        "orders"
    }

    fn columns() -> &'static [&'static str] {
        &["id", "customer", "total", "status"]
    }

    fn primary_key() -> PrimaryKey {
        PrimaryKey::Id("id")
    }

    fn values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("id", self.id.into()),
            ("customer", self.customer.clone().into()),
            ("total", self.total.into()),
            ("status", self.status.clone().into()),
        ]
    }

    fn set_generated_id(&mut self, id: i64) {
        self.id = id;
    }

    fn links() -> Vec<Link> {
        vec![Link::many("items", "order_items", "id", "order_id")]
    }

    fn set_link(&mut self, name: &str, records: Vec<Record>) -> Result<(), DaoError> {
        if name == "items" {
            self.items = records
                .iter()
                .map(|r| {
                    Ok(OrderItem {
                        sku: r.get_string("sku")?,
                        quantity: r.get_int("quantity")?,
                    })
                })
                .collect::<Result<_, DaoError>>()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Country {
    pub iso: String,
    pub name: String,
}

impl FromRecord for Country {
    fn from_record(record: &Record) -> Result<Self, DaoError> {
        Ok(Self {
            iso: record.get_string("iso")?,
            name: record.get_or_default("name")?,
        })
    }
}

impl Entity for Country {
    fn table_name() -> &'static str {
        "countries"
    }

    fn columns() -> &'static [&'static str] {
        &["iso", "name"]
    }

    fn primary_key() -> PrimaryKey {
        PrimaryKey::Name("iso")
    }

    fn values(&self) -> Vec<(&'static str, Value)> {
        vec![("iso", self.iso.clone().into()), ("name", self.name.clone().into())]
    }
}
