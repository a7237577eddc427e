//! Store adapter internals
//!
//! This module groups the adapter around one `Store` type, organized by
//! concern:
//!
//! - **location**: location parsing and in-memory alias normalization
//! - **connection**: handle lifecycle (open, close, reopen, mode)
//! - **executor**: statement primitives and transaction scoping
//! - **version**: the persisted `user_version` counter
//! - **reset**: full storage destruction for both backing modes

mod connection;
mod executor;
mod location;
mod reset;
mod version;

pub use connection::Store;
pub use executor::{QueryResult, Row};
pub use location::{Location, MEMORY_SENTINEL};
