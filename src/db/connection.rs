use crate::error::{Result, TripCastError};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Handle to the SQLite store. Opened once at the start of a batch or a
/// recommendation call and closed explicitly when the caller is done.
pub struct Database {
    conn: Arc<Mutex<Connection>>,
    path: PathBuf,
}

impl Database {
    /// Open (creating if needed) the store file and bring its schema up to date.
    ///
    /// WAL lets a scorer keep reading while a forecast batch writes; the busy
    /// timeout covers the short window where both want the write lock.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))?;
        conn.busy_timeout(Duration::from_secs(5))?;
        Self::from_connection(conn, path.to_path_buf())
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?, PathBuf::from(":memory:"))
    }

    fn from_connection(conn: Connection, path: PathBuf) -> Result<Self> {
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
            path,
        };
        super::migrations::run(&db)?;
        tracing::debug!(path = %db.path.display(), "Store ready");
        Ok(db)
    }

    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|_| TripCastError::InvalidData("database lock poisoned".into()))?;
        f(&conn)
    }

    pub fn with_conn_mut<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T>,
    {
        let mut conn = self
            .conn
            .lock()
            .map_err(|_| TripCastError::InvalidData("database lock poisoned".into()))?;
        f(&mut conn)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Close the underlying connection. Clones still alive keep it open.
    pub fn close(self) -> Result<()> {
        match Arc::try_unwrap(self.conn) {
            Ok(mutex) => {
                let conn = mutex
                    .into_inner()
                    .map_err(|_| TripCastError::InvalidData("database lock poisoned".into()))?;
                conn.close().map_err(|(_, e)| e.into())
            }
            Err(_) => {
                tracing::debug!("Database handle still shared, leaving connection open");
                Ok(())
            }
        }
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
            path: self.path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tripcast.db");

        let db = Database::open(&path).unwrap();
        db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO festivals (festival_name, festival_date, recommended_places)
                 VALUES ('Onam', '2025-09-05', 'Kochi')",
                [],
            )?;
            Ok(())
        })
        .unwrap();
        db.close().unwrap();

        let reopened = Database::open(&path).unwrap();
        let count: i64 = reopened
            .with_conn(|conn| {
                Ok(conn.query_row("SELECT COUNT(*) FROM festivals", [], |r| r.get(0))?)
            })
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(reopened.path(), path.as_path());
    }

    #[test]
    fn close_with_live_clone_is_not_an_error() {
        let db = Database::open_in_memory().unwrap();
        let other = db.clone();
        db.close().unwrap();
        assert!(other.with_conn(|_| Ok(())).is_ok());
    }
}
