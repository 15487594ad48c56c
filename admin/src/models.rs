//! Domain Models
//!
//! Records handed to the templates, and the form payloads posted back by
//! them. These are independent of the database layer.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::database::{BlogFields, BlogRow, UserFields, UserRow};

#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub nickname: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            nickname: row.nickname,
            first_name: row.first_name,
            last_name: row.last_name,
            password: row.password,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Blog {
    pub id: i64,
    pub title: String,
    pub user_id: i64,
    pub owner_nickname: Option<String>,
    pub content: String,
    pub pub_date: NaiveDate,
}

impl From<BlogRow> for Blog {
    fn from(row: BlogRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            user_id: row.user_id,
            owner_nickname: row.owner_nickname,
            content: row.content,
            pub_date: row.pub_date,
        }
    }
}

// Form payloads. Field names follow the HTML forms (camelCase). A missing
// text field is stored as an empty string; ids and dates must parse.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUserForm {
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub password: String,
}

impl NewUserForm {
    pub fn fields(&self) -> UserFields<'_> {
        UserFields {
            nickname: &self.nickname,
            first_name: &self.first_name,
            last_name: &self.last_name,
            password: &self.password,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserForm {
    pub id: i64,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub password: String,
}

impl UpdateUserForm {
    pub fn fields(&self) -> UserFields<'_> {
        UserFields {
            nickname: &self.nickname,
            first_name: &self.first_name,
            last_name: &self.last_name,
            password: &self.password,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBlogForm {
    #[serde(default)]
    pub title: String,
    pub user_id: i64,
    #[serde(default)]
    pub content: String,
    pub pub_date: NaiveDate,
}

impl NewBlogForm {
    pub fn fields(&self) -> BlogFields<'_> {
        BlogFields {
            title: &self.title,
            user_id: self.user_id,
            content: &self.content,
            pub_date: self.pub_date,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBlogForm {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    pub user_id: i64,
    #[serde(default)]
    pub content: String,
    pub pub_date: NaiveDate,
}

impl UpdateBlogForm {
    pub fn fields(&self) -> BlogFields<'_> {
        BlogFields {
            title: &self.title,
            user_id: self.user_id,
            content: &self.content,
            pub_date: self.pub_date,
        }
    }
}
