//! Statement execution primitives.
//!
//! Writes and scripts propagate engine errors unmodified. Reads through
//! [`Store::query_all`] are deliberately lenient: any failure collapses to
//! an empty result (see the method docs). The [`Store::count`] helper is
//! the strict counterpart for the one query shape with a known contract.

use std::collections::HashMap;

use rusqlite::types::Value;
use rusqlite::Params;
use tracing::debug;

use crate::error::{CountQueryError, StoreError};
use crate::store::connection::Store;

/// A single result row: column name to value.
///
/// Query text is arbitrary and not known at compile time, so rows are open
/// mappings; callers are expected to know their own column names.
pub type Row = HashMap<String, Value>;

/// An ordered sequence of result rows. Empty is a valid, non-error result.
pub type QueryResult = Vec<Row>;

impl Store {
    /// Run a single parameterized statement for its side effects.
    pub fn execute<P: Params>(&self, sql: &str, params: P) -> Result<(), StoreError> {
        self.with_conn(|conn| {
            conn.prepare(sql)?.execute(params)?;
            Ok(())
        })
    }

    /// Run a multi-statement script verbatim (e.g. a DDL batch).
    ///
    /// No parameterization; same failure semantics as [`Store::execute`].
    pub fn execute_script(&self, sql: &str) -> Result<(), StoreError> {
        self.with_conn(|conn| Ok(conn.execute_batch(sql)?))
    }

    /// Run a parameterized read and return every matching row.
    ///
    /// Best-effort by contract: if the read fails for any reason, including
    /// malformed SQL, the failure is logged at debug level and an empty
    /// sequence is returned. Callers cannot distinguish "no rows" from
    /// "query failed" here; this leniency is load-bearing for existence
    /// probes in the layers above and must not be tightened.
    pub fn query_all<P: Params>(&self, sql: &str, params: P) -> QueryResult {
        match self.try_query_all(sql, params) {
            Ok(rows) => rows,
            Err(e) => {
                debug!(error = %e, sql, "query_all absorbed a failed read");
                Vec::new()
            }
        }
    }

    fn try_query_all<P: Params>(
        &self,
        sql: &str,
        params: P,
    ) -> Result<QueryResult, StoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(sql)?;
            let columns: Vec<String> = stmt
                .column_names()
                .into_iter()
                .map(str::to_string)
                .collect();

            let mut rows = stmt.query(params)?;
            let mut out = Vec::new();
            while let Some(row) = rows.next()? {
                let mut record = Row::with_capacity(columns.len());
                for (idx, name) in columns.iter().enumerate() {
                    record.insert(name.clone(), row.get::<_, Value>(idx)?);
                }
                out.push(record);
            }
            Ok(out)
        })
    }

    /// Run a read expected to yield one row with a column named `count`,
    /// and coerce that column to an integer.
    ///
    /// Unlike [`Store::query_all`] this is strict: engine errors propagate
    /// as [`StoreError::Statement`], and a result that does not match the
    /// expected shape fails with [`StoreError::InvalidCountQuery`].
    pub fn count<P: Params>(&self, sql: &str, params: P) -> Result<i64, StoreError> {
        let rows = self.try_query_all(sql, params)?;
        let row = rows.first().ok_or(CountQueryError::NoRows)?;
        let value = row.get("count").ok_or(CountQueryError::MissingCountColumn)?;
        Ok(coerce_count(value)?)
    }

    /// Run `work` inside one atomic transaction.
    ///
    /// All effects of `work` commit together or not at all: an error from
    /// `work` rolls the transaction back and propagates to the caller
    /// unmodified. Nesting is not supported; `work` must not start another
    /// transaction on the same store.
    pub fn in_transaction<T, F>(&self, work: F) -> Result<T, StoreError>
    where
        F: FnOnce() -> Result<T, StoreError>,
    {
        self.with_conn(|conn| {
            let tx = conn.unchecked_transaction()?;
            // dropping `tx` on the error path rolls back
            let out = work()?;
            tx.commit()?;
            Ok(out)
        })
    }
}

/// Coerce a `count` column value with truncating, base-10 semantics.
fn coerce_count(value: &Value) -> Result<i64, CountQueryError> {
    match value {
        Value::Integer(n) => Ok(*n),
        Value::Real(f) => Ok(*f as i64),
        Value::Text(s) => {
            let trimmed = s.trim();
            if let Ok(n) = trimmed.parse::<i64>() {
                Ok(n)
            } else if let Ok(f) = trimmed.parse::<f64>() {
                Ok(f as i64)
            } else {
                Err(CountQueryError::NotNumeric(s.clone()))
            }
        }
        other => Err(CountQueryError::NotNumeric(format!("{other:?}"))),
    }
}
