//! Connection lifecycle management.
//!
//! [`Store`] owns exactly one logical connection handle. The handle is
//! opened eagerly on construction and is only ever torn down explicitly,
//! either by [`Store::close`] or by the file-mode path of
//! [`Store::destroy_everything`](Store::destroy_everything), which closes,
//! deletes the backing files, and reopens at the same location.

use std::cell::RefCell;

use rusqlite::Connection;
use tracing::debug;

use crate::error::StoreError;
use crate::store::location::{Location, MEMORY_SENTINEL};

/// Adapter over a single embedded SQLite store.
///
/// The connection is held behind a [`RefCell`] so that a reset can replace
/// it in place; every operation re-fetches the current handle through an
/// internal accessor instead of caching it, so a close/reopen cycle can
/// never leave a stale reference behind.
///
/// `Store` is single-threaded by design. It is not safe for unsynchronized
/// concurrent use; callers in a multi-threaded system must provide their
/// own mutual exclusion.
#[derive(Debug)]
pub struct Store {
    location: Location,
    conn: RefCell<Option<Connection>>,
}

impl Store {
    /// Open a store at the given location, eagerly.
    ///
    /// The raw location string is normalized once (see [`Location::parse`]):
    /// `"file::memory:"` and any string containing `"?mode=memory"` become
    /// the in-memory sentinel. Fails with [`StoreError::Open`] if the engine
    /// does not produce an open handle.
    pub fn new(raw_location: &str) -> Result<Self, StoreError> {
        let location = Location::parse(raw_location);
        let conn = Self::establish(&location)?;
        Ok(Store {
            location,
            conn: RefCell::new(Some(conn)),
        })
    }

    /// Open a private in-memory store.
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::new(MEMORY_SENTINEL)
    }

    fn establish(location: &Location) -> Result<Connection, StoreError> {
        let conn = match location {
            Location::InMemory => Connection::open_in_memory(),
            Location::File(path) => Connection::open(path),
        }
        .map_err(|e| StoreError::Open(format!("'{location}': {e}")))?;

        configure(&conn).map_err(|e| StoreError::Open(format!("'{location}': {e}")))?;
        debug!(%location, "opened store");
        Ok(conn)
    }

    /// Replace the held handle with a fresh one at the stored location.
    ///
    /// Used by the file-mode reset after the backing files are gone.
    pub(crate) fn reopen(&self) -> Result<(), StoreError> {
        let conn = Self::establish(&self.location)?;
        *self.conn.borrow_mut() = Some(conn);
        Ok(())
    }

    /// Run `f` against the current handle.
    ///
    /// Fails fast with [`StoreError::Closed`] when no handle is open; this
    /// is the single access path for every statement-level operation.
    pub(crate) fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let guard = self.conn.borrow();
        match guard.as_ref() {
            Some(conn) => f(conn),
            None => Err(StoreError::Closed),
        }
    }

    /// The normalized location this store was opened at.
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Whether a handle is currently open.
    pub fn is_open(&self) -> bool {
        self.conn.borrow().is_some()
    }

    /// Whether the store is memory-backed.
    ///
    /// Delegates to the engine's own introspection rather than the location
    /// string: SQLite reports an empty filename for in-memory databases.
    pub fn is_memory(&self) -> Result<bool, StoreError> {
        self.with_conn(|conn| Ok(conn.path().is_none_or(str::is_empty)))
    }

    /// Close the handle and verify the engine confirms closure.
    ///
    /// A close the engine refuses leaves the handle in place and fails with
    /// [`StoreError::Close`]; proceeding as if it had closed would let a
    /// reset delete a file the engine still has mapped.
    pub fn close(&self) -> Result<(), StoreError> {
        let Some(conn) = self.conn.borrow_mut().take() else {
            return Err(StoreError::Closed);
        };
        match conn.close() {
            Ok(()) => {
                debug!(location = %self.location, "closed store");
                Ok(())
            }
            Err((conn, e)) => {
                *self.conn.borrow_mut() = Some(conn);
                Err(StoreError::Close(e.to_string()))
            }
        }
    }
}

/// Connection settings applied to every fresh handle.
fn configure(conn: &Connection) -> rusqlite::Result<()> {
    // WAL keeps readers unblocked during writes; for file-backed stores it
    // also produces the -wal/-shm sidecar layout the reset engine cleans up.
    let _: String = conn.query_row("PRAGMA journal_mode=WAL", [], |row| row.get(0))?;
    conn.execute("PRAGMA synchronous=NORMAL", [])?;
    Ok(())
}
