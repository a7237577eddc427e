//! Cellar - an embedded-store connection and query adapter
//!
//! Cellar wraps a single SQLite connection for a higher-level persistence
//! layer that issues SQL text and expects normalized results, atomic
//! multi-statement execution, and a reliable way to fully reset storage
//! state between test runs or schema migrations.
//!
//! # Architecture
//!
//! The crate is one cohesive unit around the [`Store`] type:
//!
//! ```text
//! store/
//! ├── location    # location parsing, in-memory alias normalization
//! ├── connection  # handle lifecycle: open, close, reopen, mode
//! ├── executor    # execute / execute_script / query_all / count / in_transaction
//! ├── version     # persisted user_version counter
//! └── reset       # destroy_everything (memory and file paths)
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use cellar::Store;
//!
//! // ":memory:", "file::memory:" and "...?mode=memory" all open in memory
//! let store = Store::new("/tmp/app.db")?;
//!
//! store.execute_script("CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT)")?;
//! store.in_transaction(|| {
//!     store.execute("INSERT INTO users (id, name) VALUES (?1, ?2)", (1, "ada"))?;
//!     store.execute("INSERT INTO users (id, name) VALUES (?1, ?2)", (2, "grace"))?;
//!     Ok(())
//! })?;
//!
//! let n = store.count("SELECT COUNT(*) AS count FROM users", [])?;
//! assert_eq!(n, 2);
//!
//! // wipe everything: tables, catalog metadata, version counter
//! store.destroy_everything()?;
//! ```
//!
//! # Concurrency
//!
//! The adapter is single-threaded: one logical connection, every call
//! blocking until the engine completes it. It is not safe for
//! unsynchronized concurrent use; a multi-threaded caller must provide
//! external mutual exclusion around the [`Store`].

pub mod error;
pub mod store;

pub use error::{CountQueryError, StoreError};
pub use store::{Location, QueryResult, Row, Store, MEMORY_SENTINEL};
