//! Typed extraction from `sea_query::Value`
//!
//! Records hold raw `sea_query::Value`s; entities pull typed fields out of them through
//! [`TryGetable`]. Integer and float extraction widens across the numeric variants,
//! so an `i64` field can be read from an `INT4` column and an `f64` from `REAL`.

use sea_query::Value;

/// Error type for value extraction failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueExtractionError {
    /// The value is null (None variant)
    NullValue,
    /// The value type doesn't match the expected type
    TypeMismatch {
        expected: String,
        actual: String,
    },
    /// Value conversion failed (e.g., overflow, invalid format)
    ConversionError(String),
}

impl std::fmt::Display for ValueExtractionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueExtractionError::NullValue => write!(f, "Value is null"),
            ValueExtractionError::TypeMismatch { expected, actual } => {
                write!(f, "Type mismatch: expected {}, got {}", expected, actual)
            }
            ValueExtractionError::ConversionError(msg) => {
                write!(f, "Conversion error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ValueExtractionError {}

impl From<ValueExtractionError> for crate::executor::DaoError {
    fn from(err: ValueExtractionError) -> Self {
        crate::executor::DaoError::ParseError(err.to_string())
    }
}

/// Returns `true` when the value is any SQL `NULL`
pub fn is_null(value: &Value) -> bool {
    matches!(
        value,
        Value::Bool(None)
            | Value::TinyInt(None)
            | Value::SmallInt(None)
            | Value::Int(None)
            | Value::BigInt(None)
            | Value::TinyUnsigned(None)
            | Value::SmallUnsigned(None)
            | Value::Unsigned(None)
            | Value::BigUnsigned(None)
            | Value::Float(None)
            | Value::Double(None)
            | Value::Char(None)
            | Value::String(None)
            | Value::Bytes(None)
            | Value::Json(None)
            | Value::ChronoDate(None)
            | Value::ChronoTime(None)
            | Value::ChronoDateTime(None)
            | Value::ChronoDateTimeUtc(None)
            | Value::ChronoDateTimeLocal(None)
            | Value::ChronoDateTimeWithTimeZone(None)
    )
}

/// Numeric value of an integer variant, `None` for nulls and non-integers
pub fn as_i128(value: &Value) -> Option<i128> {
    match value {
        Value::TinyInt(Some(v)) => Some(i128::from(*v)),
        Value::SmallInt(Some(v)) => Some(i128::from(*v)),
        Value::Int(Some(v)) => Some(i128::from(*v)),
        Value::BigInt(Some(v)) => Some(i128::from(*v)),
        Value::TinyUnsigned(Some(v)) => Some(i128::from(*v)),
        Value::SmallUnsigned(Some(v)) => Some(i128::from(*v)),
        Value::Unsigned(Some(v)) => Some(i128::from(*v)),
        Value::BigUnsigned(Some(v)) => Some(i128::from(*v)),
        _ => None,
    }
}

/// `true` for `NULL` and for a numeric zero; the "not assigned yet" test for keys
pub fn is_null_or_zero(value: &Value) -> bool {
    if is_null(value) {
        return true;
    }
    match value {
        Value::Float(Some(f)) => *f == 0.0,
        Value::Double(Some(d)) => *d == 0.0,
        _ => as_i128(value) == Some(0),
    }
}

/// Trait for safe value extraction with error handling
///
/// Returns `Err(ValueExtractionError::NullValue)` for SQL `NULL`; use `Option<T>`
/// to accept nulls.
///
/// ```rust
/// use entity_service::{TryGetable, ValueExtractionError};
/// use sea_query::Value;
///
/// let value = Value::Int(Some(42));
/// assert_eq!(<i64 as TryGetable>::try_get(value), Ok(42));
///
/// let null_value = Value::Int(None);
/// assert_eq!(<Option<i32> as TryGetable>::try_get(null_value), Ok(None));
/// ```
pub trait TryGetable: Sized {
    fn try_get(value: Value) -> Result<Self, ValueExtractionError>;
}

fn mismatch(expected: &str, value: &Value) -> ValueExtractionError {
    ValueExtractionError::TypeMismatch {
        expected: expected.to_string(),
        actual: format!("{:?}", value),
    }
}

macro_rules! impl_try_getable_int {
    ($type:ty, $expected:expr) => {
        impl TryGetable for $type {
            fn try_get(value: Value) -> Result<Self, ValueExtractionError> {
                if is_null(&value) {
                    return Err(ValueExtractionError::NullValue);
                }
                let wide = as_i128(&value).ok_or_else(|| mismatch($expected, &value))?;
                <$type>::try_from(wide).map_err(|_| {
                    ValueExtractionError::ConversionError(format!(
                        "{} does not fit in {}",
                        wide,
                        stringify!($type)
                    ))
                })
            }
        }
    };
}

impl_try_getable_int!(i16, "integer");
impl_try_getable_int!(i32, "integer");
impl_try_getable_int!(i64, "integer");
impl_try_getable_int!(u32, "integer");
impl_try_getable_int!(u64, "integer");

impl TryGetable for f64 {
    fn try_get(value: Value) -> Result<Self, ValueExtractionError> {
        match value {
            Value::Double(Some(v)) => Ok(v),
            Value::Float(Some(v)) => Ok(f64::from(v)),
            ref other if is_null(other) => Err(ValueExtractionError::NullValue),
            ref other => as_i128(other)
                .map(|i| i as f64)
                .ok_or_else(|| mismatch("Double", other)),
        }
    }
}

impl TryGetable for f32 {
    fn try_get(value: Value) -> Result<Self, ValueExtractionError> {
        match value {
            Value::Float(Some(v)) => Ok(v),
            Value::Float(None) => Err(ValueExtractionError::NullValue),
            _ => Err(mismatch("Float", &value)),
        }
    }
}

impl TryGetable for bool {
    fn try_get(value: Value) -> Result<Self, ValueExtractionError> {
        match value {
            Value::Bool(Some(v)) => Ok(v),
            Value::Bool(None) => Err(ValueExtractionError::NullValue),
            _ => Err(mismatch("Bool", &value)),
        }
    }
}

impl TryGetable for String {
    fn try_get(value: Value) -> Result<Self, ValueExtractionError> {
        match value {
            Value::Char(Some(c)) => Ok(c.to_string()),
            ref other if is_null(other) => Err(ValueExtractionError::NullValue),
            Value::String(_) => <String as sea_query::ValueType>::try_from(value)
                .map_err(|e| ValueExtractionError::ConversionError(format!("{e:?}"))),
            _ => Err(mismatch("String", &value)),
        }
    }
}

/// Types that sea-query already knows how to unwrap; only null handling is added.
macro_rules! impl_try_getable_via_value_type {
    ($type:ty, $expected:expr) => {
        impl TryGetable for $type {
            fn try_get(value: Value) -> Result<Self, ValueExtractionError> {
                if is_null(&value) {
                    return Err(ValueExtractionError::NullValue);
                }
                <$type as sea_query::ValueType>::try_from(value.clone())
                    .map_err(|_| mismatch($expected, &value))
            }
        }
    };
}

impl_try_getable_via_value_type!(Vec<u8>, "Bytes");
impl_try_getable_via_value_type!(serde_json::Value, "Json");
impl_try_getable_via_value_type!(chrono::NaiveDate, "ChronoDate");
impl_try_getable_via_value_type!(chrono::NaiveTime, "ChronoTime");
impl_try_getable_via_value_type!(chrono::NaiveDateTime, "ChronoDateTime");
impl_try_getable_via_value_type!(chrono::DateTime<chrono::Utc>, "ChronoDateTimeUtc");

impl<T: TryGetable> TryGetable for Option<T> {
    fn try_get(value: Value) -> Result<Self, ValueExtractionError> {
        match T::try_get(value) {
            Ok(v) => Ok(Some(v)),
            Err(ValueExtractionError::NullValue) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
