use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};
use tracing::info;
use waymark_common::{Error, Result};

/// One row in the version ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationRecord {
    pub id: i64,
    pub version: i64,
}

/// Append/remove log of applied migration versions.
///
/// The current version is the `version` of the most recently inserted row
/// (highest `id`); an empty ledger has no current version. The handle owns
/// its connection: it is opened for one runner invocation and released when
/// dropped, on every exit path.
pub struct Ledger {
    conn: Connection,
}

impl Ledger {
    /// Open the ledger at `db_path`, provisioning the backing table if it
    /// does not exist yet.
    pub fn open(db_path: &Path) -> Result<Self> {
        info!("opening version ledger at {}", db_path.display());
        let conn = Connection::open(db_path)
            .map_err(|e| Error::Connectivity(format!("failed to open ledger store: {e}")))?;

        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .map_err(|e| Error::Connectivity(format!("failed to set pragmas: {e}")))?;

        let ledger = Self { conn };
        ledger.ensure_table()?;
        Ok(ledger)
    }

    /// In-memory ledger for tests.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::Connectivity(format!("failed to open in-memory ledger: {e}")))?;

        let ledger = Self { conn };
        ledger.ensure_table()?;
        Ok(ledger)
    }

    /// Idempotent table provisioning, run once per open ahead of any other
    /// ledger operation.
    fn ensure_table(&self) -> Result<()> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS schema_migrations (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    version INTEGER NOT NULL
                );",
            )
            .map_err(|e| Error::Data(format!("failed to provision ledger table: {e}")))
    }

    /// Version of the most recently inserted record, or `None` when the
    /// ledger is empty.
    pub fn current_version(&self) -> Result<Option<i64>> {
        Ok(self.latest_record()?.map(|record| record.version))
    }

    /// Append a record for `version`. The next `current_version` call
    /// returns `version`.
    pub fn record_version(&self, version: i64) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO schema_migrations (version) VALUES (?1)",
                params![version],
            )
            .map_err(|e| Error::Data(format!("failed to record version {version}: {e}")))?;
        Ok(())
    }

    /// Delete the most recently inserted record. Fails with `NotFound` when
    /// the ledger is empty.
    pub fn remove_latest_version(&self) -> Result<()> {
        let record = self
            .latest_record()?
            .ok_or_else(|| Error::NotFound("no recorded version to remove".to_string()))?;

        self.conn
            .execute(
                "DELETE FROM schema_migrations WHERE id = ?1",
                params![record.id],
            )
            .map_err(|e| {
                Error::Data(format!("failed to remove version {}: {e}", record.version))
            })?;
        Ok(())
    }

    /// All records in insertion order.
    pub fn history(&self) -> Result<Vec<MigrationRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, version FROM schema_migrations ORDER BY id ASC")
            .map_err(|e| Error::Data(format!("failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(MigrationRecord {
                    id: row.get(0)?,
                    version: row.get(1)?,
                })
            })
            .map_err(|e| Error::Data(format!("failed to query ledger history: {e}")))?;

        let mut records = Vec::new();
        for row in rows {
            records
                .push(row.map_err(|e| Error::Data(format!("failed to read ledger row: {e}")))?);
        }
        Ok(records)
    }

    fn latest_record(&self) -> Result<Option<MigrationRecord>> {
        self.conn
            .query_row(
                "SELECT id, version FROM schema_migrations ORDER BY id DESC LIMIT 1",
                [],
                |row| {
                    Ok(MigrationRecord {
                        id: row.get(0)?,
                        version: row.get(1)?,
                    })
                },
            )
            .optional()
            .map_err(|e| Error::Data(format!("failed to read current version: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use waymark_common::Error;

    use super::Ledger;

    #[test]
    fn empty_ledger_has_no_current_version() {
        let ledger = Ledger::in_memory().unwrap();
        assert_eq!(ledger.current_version().unwrap(), None);
    }

    #[test]
    fn record_then_read_round_trip() {
        let ledger = Ledger::in_memory().unwrap();
        ledger.record_version(1234567890).unwrap();
        assert_eq!(ledger.current_version().unwrap(), Some(1234567890));
    }

    #[test]
    fn current_version_is_latest_insert_not_highest_value() {
        let ledger = Ledger::in_memory().unwrap();
        ledger.record_version(5555).unwrap();
        ledger.record_version(3333).unwrap();
        assert_eq!(ledger.current_version().unwrap(), Some(3333));
    }

    #[test]
    fn remove_latest_steps_back_one_record() {
        let ledger = Ledger::in_memory().unwrap();
        ledger.record_version(1111).unwrap();
        ledger.record_version(2222).unwrap();

        ledger.remove_latest_version().unwrap();
        assert_eq!(ledger.current_version().unwrap(), Some(1111));

        ledger.remove_latest_version().unwrap();
        assert_eq!(ledger.current_version().unwrap(), None);
    }

    #[test]
    fn remove_on_empty_ledger_is_not_found() {
        let ledger = Ledger::in_memory().unwrap();
        let err = ledger.remove_latest_version().unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn history_preserves_insertion_order() {
        let ledger = Ledger::in_memory().unwrap();
        ledger.record_version(9).unwrap();
        ledger.record_version(7).unwrap();
        ledger.record_version(8).unwrap();

        let history = ledger.history().unwrap();
        let versions: Vec<i64> = history.iter().map(|r| r.version).collect();
        assert_eq!(versions, vec![9, 7, 8]);

        // Surrogate keys are strictly increasing with insertion.
        assert!(history.windows(2).all(|w| w[0].id < w[1].id));
    }
}
