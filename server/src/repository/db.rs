//! Database Connection and Setup
//!
//! Manages the SQLite connection and the catalog schema.

use rusqlite::{Connection, ErrorCode};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use crate::domain::{DomainError, DomainResult};

/// Connection handle shared by every repository
pub type SharedConnection = Arc<Mutex<Connection>>;

/// Database state wrapper
#[derive(Clone)]
pub struct DbState {
    conn: SharedConnection,
}

impl DbState {
    /// Get a handle to the shared connection
    pub fn connection(&self) -> SharedConnection {
        Arc::clone(&self.conn)
    }
}

/// Open the database at `db_path` (":memory:" for a private in-memory one)
/// and make sure the schema exists
pub async fn init_db(db_path: &Path) -> DomainResult<DbState> {
    let conn = if db_path == Path::new(":memory:") {
        Connection::open_in_memory()?
    } else {
        Connection::open(db_path)?
    };

    run_migrations(&conn)?;
    info!(path = %db_path.display(), "Database ready");

    Ok(DbState {
        conn: Arc::new(Mutex::new(conn)),
    })
}

/// Create the catalog tables if they do not exist yet
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    // Foreign keys are off by default in SQLite and are per connection
    conn.execute_batch(
        "PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            category_name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS product (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            product_name TEXT NOT NULL,
            price REAL NOT NULL CHECK (price >= 0),
            stock INTEGER NOT NULL DEFAULT 10 CHECK (stock >= 0),
            category_id INTEGER REFERENCES category(id) ON DELETE SET NULL
        );

        CREATE TABLE IF NOT EXISTS tag (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            tag_name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS product_tag (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            product_id INTEGER NOT NULL REFERENCES product(id) ON DELETE CASCADE,
            tag_id INTEGER NOT NULL REFERENCES tag(id) ON DELETE CASCADE,
            UNIQUE (product_id, tag_id)
        );

        CREATE INDEX IF NOT EXISTS idx_product_category ON product(category_id);
        CREATE INDEX IF NOT EXISTS idx_product_tag_tag ON product_tag(tag_id);",
    )?;

    Ok(())
}

impl From<rusqlite::Error> for DomainError {
    fn from(e: rusqlite::Error) -> Self {
        match e.sqlite_error_code() {
            Some(ErrorCode::ConstraintViolation) => DomainError::InvalidInput(e.to_string()),
            _ => DomainError::Internal(e.to_string()),
        }
    }
}
