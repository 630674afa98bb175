//! SQLite storage implementation

use std::path::Path;
use rusqlite::{Connection, OptionalExtension, params, params_from_iter};
use crate::{Error, Result};
use crate::record::{Record, RecordPatch};
use super::schema::{self, RECORD_COLUMNS};
use super::update::UpdateBuilder;

/// Result of a partial update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    NotFound,
    /// The patch was empty; storage was not touched
    NoFieldsGiven,
}

/// Result of a delete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

/// SQLite-backed storage for catalog records
#[derive(Debug)]
pub struct RecordStore {
    conn: Connection,
}

impl RecordStore {
    /// Open a database file (creates if doesn't exist).
    ///
    /// The schema is not touched; call [`RecordStore::ensure_schema`].
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        tracing::debug!(path = %path.display(), "opened database");
        Ok(Self { conn })
    }

    /// Open an in-memory database with the schema in place (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Create the records table if it does not exist. Safe to call repeatedly.
    pub fn ensure_schema(&self) -> Result<()> {
        let result = schema::all_schema_statements()
            .into_iter()
            .try_for_each(|stmt| self.conn.execute(stmt, []).map(|_| ()));
        logged("ensure_schema", result)?;
        tracing::debug!("schema ready");
        Ok(())
    }

    // ========== Record Operations ==========

    /// Insert a record and return its assigned id
    pub fn create(&self, name: &str, price: f64, qty: i64) -> Result<i64> {
        let result = (|| -> rusqlite::Result<i64> {
            let tx = self.conn.unchecked_transaction()?;
            tx.execute(
                "INSERT INTO records (name, price, qty) VALUES (?1, ?2, ?3)",
                params![name, price, qty],
            )?;
            let id = tx.last_insert_rowid();
            tx.commit()?;
            Ok(id)
        })();
        let id = logged("create", result)?;
        tracing::debug!(id, "record created");
        Ok(id)
    }

    /// Get a record by id
    pub fn fetch_one(&self, id: i64) -> Result<Option<Record>> {
        let result = self
            .conn
            .query_row(
                &format!("SELECT {} FROM records WHERE id = ?1", RECORD_COLUMNS),
                [id],
                Self::row_to_record,
            )
            .optional();
        let record = logged("fetch_one", result)?;
        tracing::debug!(id, found = record.is_some(), "fetch finished");
        Ok(record)
    }

    /// All records ordered by ascending id
    pub fn fetch_all(&self) -> Result<Vec<Record>> {
        let result = (|| -> rusqlite::Result<Vec<Record>> {
            let mut stmt = self
                .conn
                .prepare(&format!("SELECT {} FROM records ORDER BY id", RECORD_COLUMNS))?;
            let records = stmt
                .query_map([], Self::row_to_record)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(records)
        })();
        let records = logged("fetch_all", result)?;
        tracing::debug!(count = records.len(), "fetched all records");
        Ok(records)
    }

    /// Change only the fields present in `patch`
    pub fn update(&self, id: i64, patch: &RecordPatch) -> Result<UpdateOutcome> {
        let Some(stmt) = UpdateBuilder::for_patch(patch).build(id) else {
            return Ok(UpdateOutcome::NoFieldsGiven);
        };

        let result = (|| -> rusqlite::Result<UpdateOutcome> {
            let tx = self.conn.unchecked_transaction()?;
            let changed = tx.execute(&stmt.sql, params_from_iter(stmt.params.iter()))?;
            if changed == 0 {
                return Ok(UpdateOutcome::NotFound);
            }
            tx.commit()?;
            Ok(UpdateOutcome::Updated)
        })();
        let outcome = logged("update", result)?;
        tracing::debug!(id, fields = patch.len(), ?outcome, "update finished");
        Ok(outcome)
    }

    /// Remove a record by id
    pub fn delete(&self, id: i64) -> Result<DeleteOutcome> {
        let result = (|| -> rusqlite::Result<DeleteOutcome> {
            let tx = self.conn.unchecked_transaction()?;
            let changed = tx.execute("DELETE FROM records WHERE id = ?1", [id])?;
            if changed == 0 {
                return Ok(DeleteOutcome::NotFound);
            }
            tx.commit()?;
            Ok(DeleteOutcome::Deleted)
        })();
        let outcome = logged("delete", result)?;
        tracing::debug!(id, ?outcome, "delete finished");
        Ok(outcome)
    }

    /// Count all records
    pub fn count(&self) -> Result<usize> {
        let result = self
            .conn
            .query_row("SELECT COUNT(*) FROM records", [], |row| row.get::<_, i64>(0));
        Ok(logged("count", result)? as usize)
    }

    /// Helper to convert a row to a Record
    fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<Record> {
        Ok(Record {
            id: row.get(0)?,
            name: row.get(1)?,
            price: row.get(2)?,
            qty: row.get(3)?,
        })
    }
}

/// Log a storage fault with the operation name and convert it.
fn logged<T>(operation: &'static str, result: rusqlite::Result<T>) -> Result<T> {
    result.map_err(|e| {
        tracing::error!(operation, error = %e, "storage operation failed");
        Error::from(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> RecordStore {
        RecordStore::open_in_memory().unwrap()
    }

    #[test]
    fn test_create_then_fetch() {
        let store = store();
        let id = store.create("Widget", 9.99, 10).unwrap();

        let record = store.fetch_one(id).unwrap().unwrap();
        assert_eq!(
            record,
            Record { id, name: "Widget".into(), price: 9.99, qty: 10 }
        );
    }

    #[test]
    fn test_fetch_missing_is_none() {
        let store = store();
        assert!(store.fetch_one(999).unwrap().is_none());
    }

    #[test]
    fn test_ensure_schema_is_idempotent() {
        let store = store();
        store.create("Keep", 1.0, 1).unwrap();
        store.ensure_schema().unwrap();
        store.ensure_schema().unwrap();
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_fetch_all_empty() {
        let store = store();
        assert!(store.fetch_all().unwrap().is_empty());
    }

    #[test]
    fn test_fetch_all_ordered_by_id() {
        let store = store();
        let a = store.create("a", 1.0, 1).unwrap();
        let b = store.create("b", 2.0, 2).unwrap();
        let c = store.create("c", 3.0, 3).unwrap();
        store.delete(b).unwrap();
        let d = store.create("d", 4.0, 4).unwrap();
        store.update(a, &RecordPatch::new().with_name("a2")).unwrap();

        let ids: Vec<i64> = store.fetch_all().unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![a, c, d]);
    }

    #[test]
    fn test_ids_are_not_reused() {
        let store = store();
        let first = store.create("first", 1.0, 1).unwrap();
        store.delete(first).unwrap();
        let second = store.create("second", 1.0, 1).unwrap();
        assert!(second > first);
    }

    #[test]
    fn test_update_changes_only_given_field() {
        let store = store();
        let id = store.create("Widget", 9.99, 10).unwrap();

        let outcome = store.update(id, &RecordPatch::new().with_price(4.5)).unwrap();
        assert_eq!(outcome, UpdateOutcome::Updated);

        let record = store.fetch_one(id).unwrap().unwrap();
        assert_eq!(record.name, "Widget");
        assert_eq!(record.price, 4.5);
        assert_eq!(record.qty, 10);
    }

    #[test]
    fn test_update_touches_only_target_row() {
        let store = store();
        let a = store.create("a", 1.0, 1).unwrap();
        let b = store.create("b", 2.0, 2).unwrap();

        store.update(a, &RecordPatch::new().with_qty(50)).unwrap();
        assert_eq!(store.fetch_one(b).unwrap().unwrap().qty, 2);
    }

    #[test]
    fn test_update_without_fields() {
        let store = store();
        let id = store.create("Widget", 9.99, 10).unwrap();

        assert_eq!(
            store.update(id, &RecordPatch::new()).unwrap(),
            UpdateOutcome::NoFieldsGiven
        );
        assert_eq!(
            store.update(12345, &RecordPatch::new()).unwrap(),
            UpdateOutcome::NoFieldsGiven
        );
        assert_eq!(store.fetch_one(id).unwrap().unwrap().qty, 10);
    }

    #[test]
    fn test_update_missing_record() {
        let store = store();
        let outcome = store.update(5, &RecordPatch::new().with_name("ghost")).unwrap();
        assert_eq!(outcome, UpdateOutcome::NotFound);
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_delete() {
        let store = store();
        let id = store.create("Widget", 9.99, 10).unwrap();

        assert_eq!(store.delete(id).unwrap(), DeleteOutcome::Deleted);
        assert!(store.fetch_one(id).unwrap().is_none());
        assert_eq!(store.delete(id).unwrap(), DeleteOutcome::NotFound);
    }

    #[test]
    fn test_widget_lifecycle() {
        let store = store();
        let id = store.create("Widget", 9.99, 10).unwrap();
        assert_eq!(id, 1);

        assert_eq!(
            store.update(1, &RecordPatch::new().with_qty(5)).unwrap(),
            UpdateOutcome::Updated
        );
        assert_eq!(
            store.fetch_one(1).unwrap().unwrap(),
            Record { id: 1, name: "Widget".into(), price: 9.99, qty: 5 }
        );
        assert_eq!(store.delete(1).unwrap(), DeleteOutcome::Deleted);
        assert!(store.fetch_one(1).unwrap().is_none());
    }

    #[test]
    fn test_storage_fault_is_reported() {
        let store = store();
        store.conn.execute("DROP TABLE records", []).unwrap();

        assert!(matches!(store.fetch_all(), Err(Error::Storage(_))));
        assert!(matches!(store.create("x", 1.0, 1), Err(Error::Storage(_))));
        assert!(matches!(
            store.update(1, &RecordPatch::new().with_qty(1)),
            Err(Error::Storage(_))
        ));

        store.ensure_schema().unwrap();
        assert!(store.fetch_all().unwrap().is_empty());
    }

    /// Collects formatted log lines emitted while `f` runs.
    fn capture_logs(f: impl FnOnce()) -> String {
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct Sink(Arc<Mutex<Vec<u8>>>);

        impl std::io::Write for Sink {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let sink = Sink::default();
        let writer = sink.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);

        let bytes = sink.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_every_operation_logs_on_success() {
        let logs = capture_logs(|| {
            let store = store();
            let id = store.create("Widget", 9.99, 10).unwrap();
            store.fetch_one(id).unwrap();
            store.fetch_one(999).unwrap();
            store.fetch_all().unwrap();
            store.update(id, &RecordPatch::new().with_qty(1)).unwrap();
            store.delete(id).unwrap();
        });

        assert!(logs.contains("schema ready"));
        assert!(logs.contains("record created"));
        assert!(logs.contains("fetch finished"));
        assert!(logs.contains("found=true"));
        assert!(logs.contains("found=false"));
        assert!(logs.contains("fetched all records"));
        assert!(logs.contains("count=1"));
        assert!(logs.contains("update finished"));
        assert!(logs.contains("delete finished"));
    }

    #[test]
    fn test_storage_fault_logs_operation() {
        let logs = capture_logs(|| {
            let store = store();
            store.conn.execute("DROP TABLE records", []).unwrap();
            assert!(store.fetch_all().is_err());
        });

        assert!(logs.contains("storage operation failed"));
        assert!(logs.contains("fetch_all"));
    }

    #[test]
    fn test_records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.db");

        let id = {
            let store = RecordStore::open(&path).unwrap();
            store.ensure_schema().unwrap();
            store.create("Persisted", 3.0, 4).unwrap()
        };

        let store = RecordStore::open(&path).unwrap();
        store.ensure_schema().unwrap();
        assert_eq!(store.fetch_one(id).unwrap().unwrap().name, "Persisted");
    }
}
