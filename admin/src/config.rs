//! Configuration Management
//!
//! Runtime settings for the admin service. The binary fills these in from
//! command-line flags and environment variables; anything left unset falls
//! back to [`Config::default`].
//!
//! ## Configuration Variables
//!
//! - `DATABASE_URL`: SQLite connection string (default: `sqlite://blogadmin.db`)
//! - `BIND_ADDRESS`: HTTP server bind address (default: `0.0.0.0:3000`)
//! - `DATABASE_MAX_CONNECTIONS`: Pool size (default: `5`)

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub bind_address: String,
    pub max_connections: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://blogadmin.db".to_string(),
            bind_address: "0.0.0.0:3000".to_string(),
            max_connections: 5,
        }
    }
}
