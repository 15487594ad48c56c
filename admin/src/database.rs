//! Database Infrastructure Layer
//!
//! Handles database connection, schema initialization, and provides
//! data access methods for users and blogs.
//!
//! Every write is wrapped in its own transaction and committed before the
//! method returns, so callers never observe a half-applied change.

use std::{ops::Deref, str::FromStr};

use chrono::NaiveDate;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Database connection error: {0}")]
    Connection(sqlx::Error),

    #[error("Database query error: {0}")]
    Query(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, DatabaseError>;

/// Database row for users table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: i64,
    pub nickname: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

/// Database row for blogs table, joined with the owner's nickname.
///
/// The nickname is optional because the join is a `LEFT JOIN`: a blog whose
/// owner vanished underneath it still lists.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BlogRow {
    pub id: i64,
    pub title: String,
    pub user_id: i64,
    pub owner_nickname: Option<String>,
    pub content: String,
    pub pub_date: NaiveDate,
}

/// Column values written by `save_user` and `update_user`.
#[derive(Debug, Clone, Copy)]
pub struct UserFields<'a> {
    pub nickname: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub password: &'a str,
}

/// Column values written by `save_blog` and `update_blog`.
#[derive(Debug, Clone, Copy)]
pub struct BlogFields<'a> {
    pub title: &'a str,
    pub user_id: i64,
    pub content: &'a str,
    pub pub_date: NaiveDate,
}

const SELECT_BLOGS: &str = r#"
    SELECT b.id, b.title, b.user_id, u.nickname AS owner_nickname, b.content, b.pub_date
    FROM blogs b
    LEFT JOIN users u ON u.id = b.user_id
"#;

#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Deref for Database {
    type Target = SqlitePool;
    fn deref(&self) -> &Self::Target {
        &self.pool
    }
}

impl Database {
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let database_config = SqliteConnectOptions::from_str(database_url)
            .map_err(DatabaseError::Connection)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_lazy_with(database_config);

        let db = Self { pool };
        db.initialize_tables().await?;

        info!("Database initialized at {}", database_url);
        Ok(db)
    }

    /// A private in-memory database.
    ///
    /// Every SQLite `:memory:` connection is its own database, so the pool is
    /// pinned to a single connection that is never recycled.
    pub async fn in_memory() -> Result<Self> {
        let database_config = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(DatabaseError::Connection)?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(database_config)
            .await
            .map_err(DatabaseError::Connection)?;

        let db = Self { pool };
        db.initialize_tables().await?;
        Ok(db)
    }

    async fn initialize_tables(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                nickname TEXT NOT NULL,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                password TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS blogs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                user_id INTEGER NOT NULL,
                content TEXT NOT NULL,
                pub_date TEXT NOT NULL,
                FOREIGN KEY (user_id) REFERENCES users(id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_blogs_user_id ON blogs(user_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // ========== User Operations ==========

    pub async fn list_users(&self) -> Result<Vec<UserRow>> {
        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, nickname, first_name, last_name, password
            FROM users
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    pub async fn find_user(&self, id: i64) -> Result<Option<UserRow>> {
        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, nickname, first_name, last_name, password
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    pub async fn save_user(&self, user: UserFields<'_>) -> Result<i64> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO users (nickname, first_name, last_name, password)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(user.nickname)
        .bind(user.first_name)
        .bind(user.last_name)
        .bind(user.password)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(result.last_insert_rowid())
    }

    /// Overwrite the editable columns of a user. Returns the number of rows
    /// touched, which is zero for an unknown id.
    pub async fn update_user(&self, id: i64, user: UserFields<'_>) -> Result<u64> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE users
            SET nickname = ?, first_name = ?, last_name = ?, password = ?
            WHERE id = ?
            "#,
        )
        .bind(user.nickname)
        .bind(user.first_name)
        .bind(user.last_name)
        .bind(user.password)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_user(&self, id: i64) -> Result<u64> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected())
    }

    // ========== Blog Operations ==========

    pub async fn list_blogs(&self) -> Result<Vec<BlogRow>> {
        sqlx::query_as::<_, BlogRow>(SELECT_BLOGS)
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::Query)
    }

    pub async fn find_blog(&self, id: i64) -> Result<Option<BlogRow>> {
        let query = format!("{SELECT_BLOGS} WHERE b.id = ?");
        sqlx::query_as::<_, BlogRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::Query)
    }

    /// Insert a blog. The owner must exist; otherwise the foreign key
    /// constraint rejects the row.
    pub async fn save_blog(&self, blog: BlogFields<'_>) -> Result<i64> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO blogs (title, user_id, content, pub_date)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(blog.title)
        .bind(blog.user_id)
        .bind(blog.content)
        .bind(blog.pub_date)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn update_blog(&self, id: i64, blog: BlogFields<'_>) -> Result<u64> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE blogs
            SET title = ?, user_id = ?, content = ?, pub_date = ?
            WHERE id = ?
            "#,
        )
        .bind(blog.title)
        .bind(blog.user_id)
        .bind(blog.content)
        .bind(blog.pub_date)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_blog(&self, id: i64) -> Result<u64> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM blogs WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected())
    }
}
