//! Entities shared by the unit tests
//!
//! One entity per primary-key strategy: `User` (numeric id, with links), `Tag`
//! (name key), `Membership` (composite key) and `AuditLog` (no key).

use crate::entity::{Entity, Link, PrimaryKey};
use crate::executor::DaoError;
use crate::record::{FromRecord, Record};
use sea_query::Value;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
}

impl FromRecord for Post {
    fn from_record(record: &Record) -> Result<Self, DaoError> {
        Ok(Self {
            id: record.get_i64("id")?,
            user_id: record.get_i64("user_id")?,
            title: record.get_or_default("title")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub age: i32,
    pub posts: Vec<Post>,
    pub profile: Option<Record>,
}

impl User {
    pub fn new(id: i64, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            email: Some(format!("{name}@example.com")),
            age: 30,
            ..Self::default()
        }
    }

    pub fn record(id: i64, name: &str) -> Record {
        Record::new()
            .with("id", id)
            .with("name", name)
            .with("email", format!("{name}@example.com"))
            .with("age", 30i32)
    }
}

impl FromRecord for User {
    fn from_record(record: &Record) -> Result<Self, DaoError> {
        Ok(Self {
            id: record.get_i64("id")?,
            name: record.get_or_default("name")?,
            email: record.get_or_default("email")?,
            age: record.get_or_default("age")?,
            ..Self::default()
        })
    }
}

impl Entity for User {
    fn table_name() -> &'static str {
        "users"
    }

    fn columns() -> &'static [&'static str] {
        &["id", "name", "email", "age"]
    }

    fn primary_key() -> PrimaryKey {
        PrimaryKey::Id("id")
    }

    fn values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("id", self.id.into()),
            ("name", self.name.clone().into()),
            ("email", self.email.clone().into()),
            ("age", self.age.into()),
        ]
    }

    fn set_generated_id(&mut self, id: i64) {
        self.id = id;
    }

    fn links() -> Vec<Link> {
        vec![
            Link::many("posts", "posts", "id", "user_id"),
            Link::one("profile", "profiles", "id", "user_id"),
        ]
    }

    fn set_link(&mut self, name: &str, records: Vec<Record>) -> Result<(), DaoError> {
        match name {
            "posts" => {
                self.posts = records
                    .iter()
                    .map(Post::from_record)
                    .collect::<Result<_, _>>()?
            }
            "profile" => self.profile = records.into_iter().next(),
            _ => {}
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tag {
    pub code: Option<String>,
    pub label: String,
}

impl FromRecord for Tag {
    fn from_record(record: &Record) -> Result<Self, DaoError> {
        Ok(Self {
            code: record.get_as("code")?,
            label: record.get_or_default("label")?,
        })
    }
}

impl Entity for Tag {
    fn table_name() -> &'static str {
        "tags"
    }

    fn columns() -> &'static [&'static str] {
        &["code", "label"]
    }

    fn primary_key() -> PrimaryKey {
        PrimaryKey::Name("code")
    }

    fn values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("code", self.code.clone().into()),
            ("label", self.label.clone().into()),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Membership {
    pub user_id: Option<i64>,
    pub group_id: Option<i64>,
    pub role: String,
}

impl FromRecord for Membership {
    fn from_record(record: &Record) -> Result<Self, DaoError> {
        Ok(Self {
            user_id: record.get_as("user_id")?,
            group_id: record.get_as("group_id")?,
            role: record.get_or_default("role")?,
        })
    }
}

impl Entity for Membership {
    fn table_name() -> &'static str {
        "memberships"
    }

    fn columns() -> &'static [&'static str] {
        &["user_id", "group_id", "role"]
    }

    fn primary_key() -> PrimaryKey {
        PrimaryKey::Composite(&["user_id", "group_id"])
    }

    fn values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("user_id", self.user_id.into()),
            ("group_id", self.group_id.into()),
            ("role", self.role.clone().into()),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditLog {
    pub message: String,
}

impl FromRecord for AuditLog {
    fn from_record(record: &Record) -> Result<Self, DaoError> {
        Ok(Self {
            message: record.get_or_default("message")?,
        })
    }
}

impl Entity for AuditLog {
    fn table_name() -> &'static str {
        "audit_log"
    }

    fn columns() -> &'static [&'static str] {
        &["message"]
    }

    fn primary_key() -> PrimaryKey {
        PrimaryKey::None
    }

    fn values(&self) -> Vec<(&'static str, Value)> {
        vec![("message", self.message.clone().into())]
    }
}
