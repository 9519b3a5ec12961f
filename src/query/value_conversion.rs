//! Value conversion utilities for SeaQuery to may_postgres.
//!
//! Converts the `sea_query::Values` produced by statement builders into `ToSql`
//! parameters for `may_postgres`. Every value is first converted into an owned,
//! boxed parameter; the references handed to the closure borrow from that vector,
//! so they stay valid for the whole call.
//!
//! Null values keep their column type (`Option::<T>::None`), which lets PostgreSQL
//! infer parameter types for `NULL` binds.

use crate::executor::DaoError;
use may_postgres::types::ToSql;
use sea_query::{Value, ValueType, Values};

/// Convert one value through `ValueType`, keeping `None` typed.
macro_rules! bind {
    ($value:expr, $ty:ty) => {
        Box::new(
            <Option<$ty> as ValueType>::try_from($value.clone()).map_err(|_| {
                DaoError::Other(format!(
                    "Failed to convert {:?} to {}",
                    $value,
                    stringify!($ty)
                ))
            })?,
        ) as Box<dyn ToSql>
    };
}

/// Convert SeaQuery values to may_postgres ToSql parameters and run `f` with them.
///
/// # Errors
///
/// Returns `DaoError::Other` if an unsupported value type is encountered or an
/// unsigned value does not fit the signed PostgreSQL column type.
pub fn with_converted_params<F, R>(values: &Values, f: F) -> Result<R, DaoError>
where
    F: FnOnce(&[&dyn ToSql]) -> Result<R, DaoError>,
{
    let owned = convert_values(values)?;
    let params: Vec<&dyn ToSql> = owned.iter().map(|p| p.as_ref()).collect();
    f(&params)
}

fn convert_values(values: &Values) -> Result<Vec<Box<dyn ToSql>>, DaoError> {
    let mut owned: Vec<Box<dyn ToSql>> = Vec::with_capacity(values.0.len());

    for value in values.iter() {
        let param = match value {
            Value::Bool(_) => bind!(value, bool),
            Value::TinyInt(v) => Box::new(v.map(i16::from)) as Box<dyn ToSql>,
            Value::SmallInt(_) => bind!(value, i16),
            Value::Int(_) => bind!(value, i32),
            Value::BigInt(_) => bind!(value, i64),
            Value::TinyUnsigned(v) => Box::new(v.map(i16::from)) as Box<dyn ToSql>,
            Value::SmallUnsigned(v) => Box::new(v.map(i32::from)) as Box<dyn ToSql>,
            Value::Unsigned(v) => Box::new(v.map(i64::from)) as Box<dyn ToSql>,
            Value::BigUnsigned(v) => {
                let converted = match v {
                    Some(u) => Some(i64::try_from(*u).map_err(|_| {
                        DaoError::Other(format!(
                            "BigUnsigned value {} exceeds i64::MAX ({}), cannot be safely cast to i64",
                            u,
                            i64::MAX
                        ))
                    })?),
                    None => None,
                };
                Box::new(converted) as Box<dyn ToSql>
            }
            Value::Float(_) => bind!(value, f32),
            Value::Double(_) => bind!(value, f64),
            Value::Char(v) => Box::new(v.map(|c| c.to_string())) as Box<dyn ToSql>,
            Value::String(_) => bind!(value, String),
            Value::Bytes(_) => bind!(value, Vec<u8>),
            Value::Json(_) => bind!(value, serde_json::Value),
            Value::ChronoDate(_) => bind!(value, chrono::NaiveDate),
            Value::ChronoTime(_) => bind!(value, chrono::NaiveTime),
            Value::ChronoDateTime(_) => bind!(value, chrono::NaiveDateTime),
            Value::ChronoDateTimeUtc(_) => bind!(value, chrono::DateTime<chrono::Utc>),
            _ => {
                return Err(DaoError::Other(format!(
                    "Unsupported value type in query: {value:?}"
                )));
            }
        };
        owned.push(param);
    }

    Ok(owned)
}
