//! Full storage reset.
//!
//! One entry point, two structurally different paths:
//!
//! - **memory mode** drops every user table and clears residual catalog
//!   metadata inside a single transaction, leaving the handle open;
//! - **file mode** closes the handle, unlinks the backing file and its
//!   WAL/shared-memory sidecars, and reopens fresh at the same location.
//!
//! The two paths are deliberately not unified: callers depend on the
//! memory path's stay-open guarantee and on the file path's
//! close-delete-reopen guarantee, which have different failure semantics.

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::types::Value;
use tracing::debug;

use crate::error::StoreError;
use crate::store::connection::Store;

impl Store {
    /// Destroy all persisted state: user tables, catalog metadata, and the
    /// version counter.
    ///
    /// Both paths end in the same externally observable state: no user
    /// tables, version counter 0, and an open, usable handle. The file
    /// deletions are irreversible and not synchronized with other
    /// processes that might hold the same file open.
    pub fn destroy_everything(&self) -> Result<(), StoreError> {
        if self.is_memory()? {
            self.destroy_in_memory()
        } else {
            self.destroy_on_disk()
        }
    }

    /// Memory-mode reset: the handle stays open throughout.
    fn destroy_in_memory(&self) -> Result<(), StoreError> {
        let tables: Vec<String> = self
            .query_all("SELECT name FROM sqlite_master WHERE type = 'table'", [])
            .into_iter()
            .filter_map(|mut row| match row.remove("name") {
                Some(Value::Text(name)) => Some(name),
                _ => None,
            })
            .collect();

        self.in_transaction(|| {
            for table in &tables {
                // internal tables (sqlite_sequence etc.) cannot be dropped;
                // the catalog delete below clears their entries instead
                if table.starts_with("sqlite_") {
                    continue;
                }
                self.execute(
                    &format!("DROP TABLE IF EXISTS {}", quote_identifier(table)),
                    [],
                )?;
            }

            self.execute("PRAGMA writable_schema=1", [])?;
            // deleting from an already-empty sqlite_master is itself an
            // engine error, so this check is a required guard
            let residual = self.query_all("SELECT * FROM sqlite_master", []).len();
            if residual > 0 {
                self.execute("DELETE FROM sqlite_master", [])?;
            }
            self.execute("PRAGMA user_version=0", [])?;
            self.execute("PRAGMA writable_schema=0", [])?;
            Ok(())
        })?;

        debug!("destroyed in-memory store state");
        Ok(())
    }

    /// File-mode reset: close, delete, reopen.
    fn destroy_on_disk(&self) -> Result<(), StoreError> {
        // a handle that refuses to close must never proceed to deletion:
        // unlinking a still-mapped store would corrupt it
        self.close()?;

        if let Some(path) = self.location().as_path() {
            remove_store_files(path)?;
        }

        self.reopen()
    }
}

/// Unlink the primary store file and its engine-maintained sidecars.
///
/// Each deletion is independently guarded: absence of any of the files,
/// sidecars in particular, is normal and not an error.
fn remove_store_files(path: &Path) -> Result<(), StoreError> {
    for file in [path.to_path_buf(), sidecar(path, "-wal"), sidecar(path, "-shm")] {
        if file.exists() {
            fs::remove_file(&file)?;
            debug!(path = %file.display(), "removed store file");
        }
    }
    Ok(())
}

/// Path of an engine-maintained sidecar next to the primary file.
fn sidecar(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

/// Double-quote an identifier for safe interpolation into DDL.
fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_schema(store: &Store) {
        store
            .execute_script(
                "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT);
                 CREATE TABLE posts (id INTEGER PRIMARY KEY, body TEXT);
                 CREATE INDEX idx_posts_body ON posts(body);
                 INSERT INTO users (id, name) VALUES (1, 'ada');
                 INSERT INTO posts (id, body) VALUES (1, 'hello');",
            )
            .unwrap();
        store.set_user_version(5).unwrap();
    }

    fn user_table_count(store: &Store) -> usize {
        store
            .query_all("SELECT name FROM sqlite_master WHERE type = 'table'", [])
            .len()
    }

    #[test]
    fn test_memory_reset_clears_everything_and_stays_open() {
        let store = Store::in_memory().unwrap();
        seed_schema(&store);
        assert_eq!(user_table_count(&store), 2);

        store.destroy_everything().unwrap();

        assert!(store.is_open());
        assert_eq!(user_table_count(&store), 0);
        assert_eq!(store.user_version().unwrap(), 0);

        // the same handle is immediately usable
        store
            .execute("CREATE TABLE fresh (id INTEGER PRIMARY KEY)", [])
            .unwrap();
        store
            .execute("INSERT INTO fresh (id) VALUES (1)", [])
            .unwrap();
        assert_eq!(
            store.count("SELECT COUNT(*) AS count FROM fresh", []).unwrap(),
            1
        );
    }

    #[test]
    fn test_memory_reset_clears_residual_catalog_entries() {
        let store = Store::in_memory().unwrap();
        seed_schema(&store);
        // a view survives the table drops and exercises the catalog delete
        store
            .execute("CREATE VIEW user_names AS SELECT name FROM users", [])
            .unwrap();

        store.destroy_everything().unwrap();

        assert!(store.query_all("SELECT * FROM sqlite_master", []).is_empty());
        assert_eq!(store.user_version().unwrap(), 0);
    }

    #[test]
    fn test_memory_reset_on_empty_store_is_a_no_op() {
        let store = Store::in_memory().unwrap();
        store.destroy_everything().unwrap();

        assert!(store.is_open());
        assert_eq!(user_table_count(&store), 0);
        assert_eq!(store.user_version().unwrap(), 0);
    }

    #[test]
    fn test_file_reset_recreates_an_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.db");
        let store = Store::new(path.to_str().unwrap()).unwrap();
        seed_schema(&store);

        store.destroy_everything().unwrap();

        // reopened at the same path, with nothing left of the old state
        assert!(store.is_open());
        assert_eq!(user_table_count(&store), 0);
        assert_eq!(store.user_version().unwrap(), 0);

        store
            .execute("CREATE TABLE fresh (id INTEGER PRIMARY KEY)", [])
            .unwrap();
        assert_eq!(
            store.count("SELECT COUNT(*) AS count FROM fresh", []).unwrap(),
            0
        );
    }

    #[test]
    fn test_remove_store_files_unlinks_primary_and_sidecars() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.db");
        fs::write(&path, b"db").unwrap();
        fs::write(sidecar(&path, "-wal"), b"wal").unwrap();
        fs::write(sidecar(&path, "-shm"), b"shm").unwrap();

        remove_store_files(&path).unwrap();

        assert!(!path.exists());
        assert!(!sidecar(&path, "-wal").exists());
        assert!(!sidecar(&path, "-shm").exists());
    }

    #[test]
    fn test_remove_store_files_tolerates_absent_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("never-created.db");
        remove_store_files(&path).unwrap();

        // primary without sidecars is the common clean-shutdown case
        fs::write(&path, b"db").unwrap();
        remove_store_files(&path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_sidecar_paths() {
        let path = Path::new("/tmp/app.db");
        assert_eq!(sidecar(path, "-wal"), PathBuf::from("/tmp/app.db-wal"));
        assert_eq!(sidecar(path, "-shm"), PathBuf::from("/tmp/app.db-shm"));
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("users"), "\"users\"");
        assert_eq!(quote_identifier("we\"ird"), "\"we\"\"ird\"");
    }
}
