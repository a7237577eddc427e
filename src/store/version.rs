//! The persisted schema-version counter.
//!
//! SQLite keeps `user_version` in the database header itself, so the value
//! survives close/reopen for file-backed stores and resets to 0 whenever
//! the backing file is recreated. External migration logic owns the
//! meaning of the counter; this adapter only moves it.

use crate::error::StoreError;
use crate::store::connection::Store;

impl Store {
    /// Read the persisted version counter.
    pub fn user_version(&self) -> Result<i64, StoreError> {
        self.with_conn(|conn| {
            Ok(conn.query_row("PRAGMA user_version", [], |row| row.get(0))?)
        })
    }

    /// Write the version counter and return the value the engine actually
    /// persisted.
    ///
    /// The engine stores the counter as a signed 32-bit field and may
    /// silently truncate; the read-back is authoritative, not an echo of
    /// the input.
    pub fn set_user_version(&self, version: i64) -> Result<i64, StoreError> {
        self.with_conn(|conn| {
            conn.execute(&format!("PRAGMA user_version={version}"), [])?;
            Ok(())
        })?;
        self.user_version()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    #[test]
    fn test_fresh_store_starts_at_zero() {
        let store = Store::in_memory().unwrap();
        assert_eq!(store.user_version().unwrap(), 0);
    }

    #[test]
    fn test_read_after_write_round_trips() {
        let store = Store::in_memory().unwrap();
        for v in [0, 7, 42, 2_147_483_647] {
            assert_eq!(store.set_user_version(v).unwrap(), v);
            assert_eq!(store.user_version().unwrap(), v);
        }
    }

    #[test]
    fn test_version_persists_across_reopen_for_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.db");
        let raw = path.to_str().unwrap();

        let store = Store::new(raw).unwrap();
        store.set_user_version(7).unwrap();
        store.close().unwrap();

        let store = Store::new(raw).unwrap();
        assert_eq!(store.user_version().unwrap(), 7);
    }

    #[test]
    fn test_version_fails_fast_when_closed() {
        let store = Store::in_memory().unwrap();
        store.close().unwrap();
        assert!(matches!(store.user_version(), Err(StoreError::Closed)));
        assert!(matches!(store.set_user_version(1), Err(StoreError::Closed)));
    }
}
