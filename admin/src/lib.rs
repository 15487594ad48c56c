//! Blog Admin - User and Blog Management
//!
//! Server-rendered administration pages for two record types:
//!
//! - **Users**: nickname, first/last name and password
//! - **Blogs**: title, content and publication date, each owned by one user
//!
//! Every page is a thin pass-through from an HTTP route to a single
//! [`Database`] call, rendered through askama templates.

mod config;
mod database;
mod models;
mod web;

pub use config::Config;
pub use database::{BlogFields, BlogRow, Database, DatabaseError, UserFields, UserRow};
pub use web::{AppState, WebError, routes};
