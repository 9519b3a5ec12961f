//! Entity metadata
//!
//! An [`Entity`] describes how a Rust type maps onto a table: its name, its columns,
//! its primary-key strategy and its current column values. The `Dao` builds every
//! statement from this metadata.

use crate::executor::DaoError;
use crate::record::{FromRecord, Record};
use sea_query::Value;

/// Primary-key strategy of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryKey {
    /// Numeric surrogate key, generated by the database when inserted as null/0
    Id(&'static str),
    /// Natural text key
    Name(&'static str),
    /// Multi-column key
    Composite(&'static [&'static str]),
    /// No usable key
    None,
}

/// Fieldless classification of a [`PrimaryKey`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PkType {
    Id,
    Name,
    Composite,
    Unknown,
}

impl PrimaryKey {
    pub fn pk_type(&self) -> PkType {
        match self {
            PrimaryKey::Id(_) => PkType::Id,
            PrimaryKey::Name(_) => PkType::Name,
            PrimaryKey::Composite(cols) if !cols.is_empty() => PkType::Composite,
            PrimaryKey::Composite(_) | PrimaryKey::None => PkType::Unknown,
        }
    }

    /// Key column(s), in declaration order
    pub fn columns(&self) -> Vec<&'static str> {
        match self {
            PrimaryKey::Id(col) | PrimaryKey::Name(col) => vec![*col],
            PrimaryKey::Composite(cols) => cols.to_vec(),
            PrimaryKey::None => Vec::new(),
        }
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns().iter().any(|c| c.eq_ignore_ascii_case(column))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// At most one target row (`field` references `target_field`)
    One,
    /// Any number of target rows
    Many,
}

/// Named link from a local column to a column of another table
///
/// Links are read-only: `fetch_links` loads the target rows and hands them to
/// [`Entity::set_link`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub name: &'static str,
    pub kind: LinkKind,
    pub target_table: &'static str,
    pub field: &'static str,
    pub target_field: &'static str,
}

impl Link {
    pub fn one(name: &'static str, target_table: &'static str, field: &'static str, target_field: &'static str) -> Self {
        Self {
            name,
            kind: LinkKind::One,
            target_table,
            field,
            target_field,
        }
    }

    pub fn many(name: &'static str, target_table: &'static str, field: &'static str, target_field: &'static str) -> Self {
        Self {
            name,
            kind: LinkKind::Many,
            target_table,
            field,
            target_field,
        }
    }
}

/// A type stored in one table
///
/// # Example
///
/// ```
/// use entity_service::{DaoError, Entity, FromRecord, PrimaryKey, Record};
/// use sea_query::Value;
///
/// #[derive(Debug, Clone, Default)]
/// struct User {
///     id: i64,
///     name: String,
/// }
///
/// impl FromRecord for User {
///     fn from_record(record: &Record) -> Result<Self, DaoError> {
///         Ok(Self {
///             id: record.get_or_default("id")?,
///             name: record.get_or_default("name")?,
///         })
///     }
/// }
///
/// impl Entity for User {
///     fn table_name() -> &'static str { "users" }
///     fn columns() -> &'static [&'static str] { &["id", "name"] }
///     fn primary_key() -> PrimaryKey { PrimaryKey::Id("id") }
///     fn values(&self) -> Vec<(&'static str, Value)> {
///         vec![("id", self.id.into()), ("name", self.name.clone().into())]
///     }
///     fn set_generated_id(&mut self, id: i64) { self.id = id; }
/// }
///
/// assert_eq!(User::primary_key().columns(), vec!["id"]);
/// ```
pub trait Entity: FromRecord {
    fn table_name() -> &'static str;

    /// Every mapped column, in select order
    fn columns() -> &'static [&'static str];

    fn primary_key() -> PrimaryKey;

    /// Current value of each mapped column
    fn values(&self) -> Vec<(&'static str, Value)>;

    fn value_of(&self, column: &str) -> Option<Value> {
        self.values()
            .into_iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(column))
            .map(|(_, value)| value)
    }

    /// Values of the primary-key column(s), in key order
    fn pk_values(&self) -> Vec<(&'static str, Value)> {
        let values = self.values();
        Self::primary_key()
            .columns()
            .into_iter()
            .map(|col| {
                let value = values
                    .iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case(col))
                    .map_or(Value::BigInt(None), |(_, v)| v.clone());
                (col, value)
            })
            .collect()
    }

    /// Receive the id generated for an `Id` key on insert
    fn set_generated_id(&mut self, _id: i64) {}

    fn links() -> Vec<Link> {
        Vec::new()
    }

    /// Receive the rows loaded for link `name`
    fn set_link(&mut self, _name: &str, _records: Vec<Record>) -> Result<(), DaoError> {
        Ok(())
    }
}
