//! SQLite database setup and connection management for the registry
//! Handles opening the data file and keeping the `pessoas` table in shape.

use anyhow::{Context, Result, anyhow};
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use super::repository::{DbConn, PersonRepository, lock};

/// Latest schema: name, age, sex and the optional birth date.
const SCHEMA_VERSION: i32 = 2;

/// Database wrapper that owns the SQLite connection
pub struct Database {
    conn: DbConn,
    path: Option<PathBuf>,
}

impl Database {
    /// Create an in-memory database (useful for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
            path: None,
        };
        db.ensure_schema()?;
        Ok(db)
    }

    /// Create or open the database at a specific path
    pub fn open_at(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }

        let conn = Connection::open(&path)
            .with_context(|| format!("opening database {}", path.display()))?;
        log::debug!("Opened registry database at {}", path.display());

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
            path: Some(path),
        };
        db.ensure_schema()?;
        Ok(db)
    }

    /// Get the default database path
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("REGISTRY_DB_PATH") {
            return PathBuf::from(path);
        }
        crate::infra::app_config::app_data_dir().join("cadastro.db")
    }

    /// File backing this database, `None` when in memory.
    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }

    /// Create the `pessoas` table if it is missing and upgrade files written
    /// by the three-column revision. Safe to call before every operation.
    pub fn ensure_schema(&self) -> Result<()> {
        let conn = lock(&self.conn)?;

        let existing_version: i32 =
            conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

        if existing_version > SCHEMA_VERSION {
            log::warn!(
                "Database schema version {} is newer than supported version {}",
                existing_version,
                SCHEMA_VERSION
            );
        }

        // Files from the first revision never set user_version; an existing
        // table at version 0 is the legacy layout.
        if Self::table_exists(&conn)? && existing_version < SCHEMA_VERSION {
            for version in (existing_version.max(1) + 1)..=SCHEMA_VERSION {
                Self::run_migration(&conn, version)?;
            }
        }

        Self::create_schema(&conn)?;

        if existing_version < SCHEMA_VERSION {
            conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        }

        Ok(())
    }

    /// Get a reference to the connection
    pub fn connection(&self) -> DbConn {
        self.conn.clone()
    }

    pub fn person_repo(&self) -> PersonRepository {
        PersonRepository::new(self.connection())
    }

    fn create_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS pessoas (
                nome TEXT NOT NULL,
                idade INTEGER,
                sexo TEXT,
                data_nascimento TEXT
            );
            "#,
        )?;
        Ok(())
    }

    fn table_exists(conn: &Connection) -> Result<bool> {
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='pessoas'",
            [],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn has_column(conn: &Connection, column: &str) -> Result<bool> {
        let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('pessoas')")?;
        let names = stmt.query_map([], |row| row.get::<_, String>(0))?;
        for name in names {
            if name? == column {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Execute a migration for the specified version.
    fn run_migration(conn: &Connection, version: i32) -> Result<()> {
        let sql = match version {
            2 => {
                // A file from the second revision already has the column.
                if Self::has_column(conn, "data_nascimento")? {
                    return Ok(());
                }
                include_str!("../../../migrations/0002_add_birth_date.sql")
            }
            _ => {
                return Err(anyhow!(
                    "Unknown migration version: {}. Add the migration to run_migration() in database.rs",
                    version
                ));
            }
        };

        conn.execute_batch(sql)
            .map_err(|e| anyhow!("Failed to execute migration {}: {}", version, e))?;
        log::info!("Applied registry schema migration {}", version);

        Ok(())
    }
}
