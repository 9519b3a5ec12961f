//! Generic result rows.
//!
//! A [`Record`] is an ordered column → `sea_query::Value` map. Every query the `Dao`
//! runs comes back as records; entities and ad-hoc view objects are built from them
//! through [`FromRecord`].

use crate::executor::DaoError;
use crate::value::{is_null, TryGetable};
use may_postgres::types::Type;
use may_postgres::Row;
use sea_query::Value;
use serde_json::{Map, Value as JsonValue};

/// One result row with column names preserved in select order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    columns: Vec<(String, Value)>,
}

/// Types that can be built from a [`Record`]
///
/// Implemented by every entity, and by any view type used with the custom SQL helpers.
pub trait FromRecord: Sized {
    fn from_record(record: &Record) -> Result<Self, DaoError>;
}

impl FromRecord for Record {
    fn from_record(record: &Record) -> Result<Self, DaoError> {
        Ok(record.clone())
    }
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Record::set`]
    pub fn with<V: Into<Value>>(mut self, column: &str, value: V) -> Self {
        self.set(column, value);
        self
    }

    /// Set a column, replacing an existing value with the same (case-insensitive) name
    pub fn set<V: Into<Value>>(&mut self, column: &str, value: V) {
        let value = value.into();
        match self.position(column) {
            Some(idx) => self.columns[idx].1 = value,
            None => self.columns.push((column.to_string(), value)),
        }
    }

    fn position(&self, column: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|(name, _)| name.eq_ignore_ascii_case(column))
    }

    /// Raw value of a column; lookups ignore ASCII case like PostgreSQL identifiers do
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.position(column).map(|idx| &self.columns[idx].1)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.position(column).is_some()
    }

    /// Typed value of a column
    ///
    /// # Errors
    ///
    /// `ParseError` when the column is missing, null (for non-`Option` targets),
    /// or of an incompatible type.
    pub fn get_as<T: TryGetable>(&self, column: &str) -> Result<T, DaoError> {
        let value = self
            .get(column)
            .ok_or_else(|| DaoError::ParseError(format!("Column not found: {column}")))?;
        T::try_get(value.clone())
            .map_err(|e| DaoError::ParseError(format!("Column {column}: {e}")))
    }

    /// Like [`Record::get_as`], but a missing or null column yields `T::default()`
    ///
    /// Useful in `FromRecord` impls that must accept field-filtered selects.
    pub fn get_or_default<T: TryGetable + Default>(&self, column: &str) -> Result<T, DaoError> {
        if self.is_null(column) {
            return Ok(T::default());
        }
        self.get_as(column)
    }

    pub fn get_i64(&self, column: &str) -> Result<i64, DaoError> {
        self.get_as(column)
    }

    pub fn get_int(&self, column: &str) -> Result<i32, DaoError> {
        self.get_as(column)
    }

    pub fn get_string(&self, column: &str) -> Result<String, DaoError> {
        self.get_as(column)
    }

    pub fn is_null(&self, column: &str) -> bool {
        self.get(column).map_or(true, is_null)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Map this record into an entity or view object
    pub fn to_entity<T: FromRecord>(&self) -> Result<T, DaoError> {
        T::from_record(self)
    }

    /// Render the record as a JSON object (nulls become `null`)
    pub fn to_json(&self) -> JsonValue {
        let mut map = Map::new();
        for (name, value) in &self.columns {
            map.insert(name.clone(), value_to_json(value));
        }
        JsonValue::Object(map)
    }

    /// Convert a `may_postgres` row, decoding each column by its PostgreSQL type
    ///
    /// # Errors
    ///
    /// `ParseError` for column types without a `sea_query::Value` mapping.
    pub fn from_row(row: &Row) -> Result<Self, DaoError> {
        let mut record = Record::new();
        for (idx, column) in row.columns().iter().enumerate() {
            let value = decode_column(row, idx, column.type_())
                .map_err(|e| DaoError::ParseError(format!("Column {}: {e}", column.name())))?;
            record.columns.push((column.name().to_string(), value));
        }
        Ok(record)
    }
}

impl From<Vec<(String, Value)>> for Record {
    fn from(columns: Vec<(String, Value)>) -> Self {
        Self { columns }
    }
}

fn decode_column(row: &Row, idx: usize, ty: &Type) -> Result<Value, may_postgres::Error> {
    let value = match *ty {
        Type::BOOL => Value::from(row.try_get::<usize, Option<bool>>(idx)?),
        Type::INT2 => Value::from(row.try_get::<usize, Option<i16>>(idx)?),
        Type::INT4 => Value::from(row.try_get::<usize, Option<i32>>(idx)?),
        Type::INT8 => Value::from(row.try_get::<usize, Option<i64>>(idx)?),
        Type::FLOAT4 => Value::from(row.try_get::<usize, Option<f32>>(idx)?),
        Type::FLOAT8 => Value::from(row.try_get::<usize, Option<f64>>(idx)?),
        Type::BYTEA => Value::from(row.try_get::<usize, Option<Vec<u8>>>(idx)?),
        Type::JSON | Type::JSONB => {
            Value::from(row.try_get::<usize, Option<serde_json::Value>>(idx)?)
        }
        Type::DATE => Value::from(row.try_get::<usize, Option<chrono::NaiveDate>>(idx)?),
        Type::TIME => Value::from(row.try_get::<usize, Option<chrono::NaiveTime>>(idx)?),
        Type::TIMESTAMP => {
            Value::from(row.try_get::<usize, Option<chrono::NaiveDateTime>>(idx)?)
        }
        Type::TIMESTAMPTZ => Value::from(
            row.try_get::<usize, Option<chrono::DateTime<chrono::Utc>>>(idx)?,
        ),
        // TEXT, VARCHAR, BPCHAR, NAME and anything else that decodes as text
        _ => Value::from(row.try_get::<usize, Option<String>>(idx)?),
    };
    Ok(value)
}

fn value_to_json(value: &Value) -> JsonValue {
    if is_null(value) {
        return JsonValue::Null;
    }
    if let Some(i) = crate::value::as_i128(value) {
        return match i64::try_from(i) {
            Ok(v) => JsonValue::from(v),
            Err(_) => JsonValue::String(i.to_string()),
        };
    }
    match value {
        Value::Bool(Some(b)) => JsonValue::Bool(*b),
        Value::Float(Some(f)) => JsonValue::from(f64::from(*f)),
        Value::Double(Some(d)) => JsonValue::from(*d),
        Value::Json(_) => <serde_json::Value as TryGetable>::try_get(value.clone())
            .unwrap_or(JsonValue::Null),
        other => <String as TryGetable>::try_get(other.clone())
            .map(JsonValue::String)
            .unwrap_or_else(|_| JsonValue::String(format!("{other:?}"))),
    }
}
