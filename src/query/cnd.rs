//! Conditions (`Cnd`) and name/value chains (`Chain`).
//!
//! `Cnd` collects a WHERE condition and an ORDER BY list. Conditions chain left to
//! right: `Cnd::where_(a).and(b).or(c)` means `(a AND b) OR c`. Operator strings are
//! the SQL ones (`=`, `!=`, `like`, `in`, `is not`, ...) and are matched
//! case-insensitively. An unknown operator does not panic; the error is kept and
//! reported when the condition is applied to a statement.

use crate::executor::DaoError;
use crate::query::Name;
use crate::value::{is_null, TryGetable};
use sea_query::{
    Condition, ConditionalStatement, Expr, ExprTrait, Order, SelectStatement, UpdateStatement,
    Value,
};

/// WHERE condition plus ORDER BY list
///
/// # Example
///
/// ```
/// use entity_service::Cnd;
///
/// let cnd = Cnd::where_("status", "=", "active")
///     .and_in("role", ["admin", "owner"])
///     .or("vip", "=", true)
///     .asc("name");
/// assert!(!cnd.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Cnd {
    condition: Option<Condition>,
    order_by: Vec<(String, Order)>,
    error: Option<String>,
}

impl Cnd {
    /// Empty condition: matches every row, no ordering
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a condition from `column op value`
    pub fn where_<V: Into<Value>>(column: &str, op: &str, value: V) -> Self {
        Self::new().and(column, op, value)
    }

    /// Start a condition from `column IN (values)`
    pub fn where_in<V, I>(column: &str, values: I) -> Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        Self::new().and_in(column, values)
    }

    /// Start from a raw SQL fragment, spliced into the WHERE clause as-is
    pub fn wrap(sql: &str) -> Self {
        Self::new().and_condition(Condition::all().add(Expr::cust(sql.to_string())))
    }

    pub fn and<V: Into<Value>>(self, column: &str, op: &str, value: V) -> Self {
        match build_condition(column, op, value.into()) {
            Ok(cond) => self.and_condition(cond),
            Err(e) => self.fail(e),
        }
    }

    pub fn or<V: Into<Value>>(self, column: &str, op: &str, value: V) -> Self {
        match build_condition(column, op, value.into()) {
            Ok(cond) => self.or_condition(cond),
            Err(e) => self.fail(e),
        }
    }

    pub fn and_in<V, I>(self, column: &str, values: I) -> Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        self.and_condition(Condition::all().add(Expr::col(Name::new(column)).is_in(values)))
    }

    pub fn and_not_in<V, I>(self, column: &str, values: I) -> Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        self.and_condition(Condition::all().add(Expr::col(Name::new(column)).is_not_in(values)))
    }

    /// AND another `Cnd`'s condition (its ordering is ignored)
    pub fn and_cnd(self, other: &Cnd) -> Self {
        let merged = self.merge_error(other);
        match other.condition.clone() {
            Some(cond) => merged.and_condition(cond),
            None => merged,
        }
    }

    /// OR another `Cnd`'s condition (its ordering is ignored)
    pub fn or_cnd(self, other: &Cnd) -> Self {
        let merged = self.merge_error(other);
        match other.condition.clone() {
            Some(cond) => merged.or_condition(cond),
            None => merged,
        }
    }

    pub fn and_condition(mut self, cond: Condition) -> Self {
        self.condition = Some(match self.condition.take() {
            Some(existing) => Condition::all().add(existing).add(cond),
            None => cond,
        });
        self
    }

    pub fn or_condition(mut self, cond: Condition) -> Self {
        self.condition = Some(match self.condition.take() {
            Some(existing) => Condition::any().add(existing).add(cond),
            None => cond,
        });
        self
    }

    pub fn asc(mut self, column: &str) -> Self {
        self.order_by.push((column.to_string(), Order::Asc));
        self
    }

    pub fn desc(mut self, column: &str) -> Self {
        self.order_by.push((column.to_string(), Order::Desc));
        self
    }

    /// `true` when there is neither a condition nor an ordering
    pub fn is_empty(&self) -> bool {
        self.condition.is_none() && self.order_by.is_empty() && self.error.is_none()
    }

    /// Append `other`'s ORDER BY list after this one
    pub(crate) fn extend_order(mut self, other: &Cnd) -> Self {
        self.order_by.extend(other.order_by.iter().cloned());
        self
    }

    fn fail(mut self, error: DaoError) -> Self {
        if self.error.is_none() {
            self.error = Some(match error {
                DaoError::IllegalArgument(msg) => msg,
                other => other.to_string(),
            });
        }
        self
    }

    fn merge_error(mut self, other: &Cnd) -> Self {
        if self.error.is_none() {
            self.error = other.error.clone();
        }
        self
    }

    fn check(&self) -> Result<(), DaoError> {
        match &self.error {
            Some(msg) => Err(DaoError::IllegalArgument(msg.clone())),
            None => Ok(()),
        }
    }

    /// Add the WHERE part to any conditional statement
    pub(crate) fn apply_where<S: ConditionalStatement>(&self, stmt: &mut S) -> Result<(), DaoError> {
        self.check()?;
        if let Some(cond) = &self.condition {
            stmt.cond_where(cond.clone());
        }
        Ok(())
    }

    /// Add WHERE and ORDER BY to a select
    pub(crate) fn apply_select(&self, stmt: &mut SelectStatement) -> Result<(), DaoError> {
        self.apply_where(stmt)?;
        for (column, order) in &self.order_by {
            stmt.order_by(Name::new(column.as_str()), order.clone());
        }
        Ok(())
    }
}

fn build_condition(column: &str, op: &str, value: Value) -> Result<Condition, DaoError> {
    let col = Expr::col(Name::new(column));
    let op_lower = op.trim().to_ascii_lowercase();
    let expr = match op_lower.as_str() {
        "=" | "==" => {
            if is_null(&value) {
                col.is_null()
            } else {
                col.eq(value)
            }
        }
        "!=" | "<>" => {
            if is_null(&value) {
                col.is_not_null()
            } else {
                col.ne(value)
            }
        }
        ">" => col.gt(value),
        ">=" => col.gte(value),
        "<" => col.lt(value),
        "<=" => col.lte(value),
        "like" => col.like(like_pattern(column, value)?),
        "not like" => col.not_like(like_pattern(column, value)?),
        "in" => col.is_in(vec![value]),
        "not in" => col.is_not_in(vec![value]),
        "is" if is_null(&value) => col.is_null(),
        "is not" if is_null(&value) => col.is_not_null(),
        "is" | "is not" => {
            return Err(DaoError::IllegalArgument(format!(
                "operator {op:?} on {column} only accepts NULL"
            )))
        }
        _ => {
            return Err(DaoError::IllegalArgument(format!(
                "unsupported operator {op:?} on {column}"
            )))
        }
    };
    Ok(Condition::all().add(expr))
}

fn like_pattern(column: &str, value: Value) -> Result<String, DaoError> {
    <String as TryGetable>::try_get(value)
        .map_err(|e| DaoError::IllegalArgument(format!("like on {column} needs a string: {e}")))
}

/// Ordered column/value pairs for `UPDATE ... SET`
///
/// ```
/// use entity_service::Chain;
///
/// let chain = Chain::make("status", "archived").add("version", 3);
/// assert_eq!(chain.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Chain {
    pairs: Vec<(String, Value)>,
}

impl Chain {
    pub fn make<V: Into<Value>>(column: &str, value: V) -> Self {
        Self::default().add(column, value)
    }

    pub fn add<V: Into<Value>>(mut self, column: &str, value: V) -> Self {
        self.pairs.push((column.to_string(), value.into()));
        self
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.pairs.iter().map(|(c, v)| (c.as_str(), v))
    }

    pub(crate) fn apply(&self, stmt: &mut UpdateStatement) {
        for (column, value) in &self.pairs {
            stmt.value(Name::new(column.as_str()), value.clone());
        }
    }
}
