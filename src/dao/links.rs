//! Read-only link loading
//!
//! For each selected [`Link`] of an entity, the rows of the target table whose
//! `target_field` equals the entity's `field` value are loaded and handed to
//! [`Entity::set_link`]. A null local value loads nothing.

use super::Dao;
use crate::entity::{Entity, Link, LinkKind};
use crate::executor::{DaoError, DaoExecutor};
use crate::query::{Cnd, Name};
use crate::record::Record;
use crate::value::is_null;
use regex::Regex;
use sea_query::{Asterisk, Query};

/// Links of `T` whose name fully matches `pattern`; a missing or blank pattern selects all
pub(crate) fn select_links<T: Entity>(pattern: Option<&str>) -> Result<Vec<Link>, DaoError> {
    let links = T::links();
    let Some(pattern) = pattern.map(str::trim).filter(|p| !p.is_empty()) else {
        return Ok(links);
    };
    let regex = Regex::new(&format!("^(?:{pattern})$"))
        .map_err(|e| DaoError::IllegalArgument(format!("invalid link pattern {pattern:?}: {e}")))?;
    Ok(links.into_iter().filter(|link| regex.is_match(link.name)).collect())
}

impl<E: DaoExecutor> Dao<E> {
    /// Load the links of every object in `objs`
    ///
    /// `cnd` further restricts (and orders) the target rows of every link.
    pub fn fetch_links<T: Entity>(&self, objs: &mut [T], pattern: Option<&str>, cnd: &Cnd) -> Result<(), DaoError> {
        let links = select_links::<T>(pattern)?;
        if links.is_empty() {
            log::debug!("no link of {} matches {pattern:?}", T::table_name());
            return Ok(());
        }
        for obj in objs.iter_mut() {
            for link in &links {
                let records = self.load_link(&*obj, link, cnd)?;
                obj.set_link(link.name, records)?;
            }
        }
        Ok(())
    }

    fn load_link<T: Entity>(&self, obj: &T, link: &Link, cnd: &Cnd) -> Result<Vec<Record>, DaoError> {
        let value = match obj.value_of(link.field) {
            Some(value) if !is_null(&value) => value,
            _ => return Ok(Vec::new()),
        };
        let link_cnd = Cnd::where_(link.target_field, "=", value)
            .and_cnd(cnd)
            .extend_order(cnd);

        let mut stmt = Query::select();
        stmt.column(Asterisk).from(Name::new(link.target_table));
        link_cnd.apply_select(&mut stmt)?;
        if link.kind == LinkKind::One {
            stmt.limit(1);
        }
        let records = self.run_query(&stmt)?;

        let matcher = self
            .field_filter()
            .and_then(|f| f.matcher(link.target_table));
        Ok(match matcher {
            Some(matcher) => records
                .into_iter()
                .map(|record| {
                    Record::from(
                        record
                            .iter()
                            .filter(|(col, _)| matcher.matches(col))
                            .map(|(col, value)| (col.to_string(), value.clone()))
                            .collect::<Vec<_>>(),
                    )
                })
                .collect(),
            None => records,
        })
    }
}
