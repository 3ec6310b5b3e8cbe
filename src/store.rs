//! Append-only scan store
//!
//! Backed by a single SQLite database. Records are buffered in memory
//! and flushed in one transaction per mailbox, so a crash mid-mailbox
//! loses at most that mailbox's batch.

use rusqlite::{params, Connection};
use tracing::debug;

use crate::error::{Error, Result};
use crate::record::ScanRecord;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS scans (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    ts        TEXT NOT NULL,
    host      TEXT NOT NULL,
    user      TEXT NOT NULL,
    mailbox   TEXT NOT NULL,
    uid       TEXT NOT NULL,
    mid       TEXT,
    otherhost TEXT,
    found     INTEGER NOT NULL DEFAULT 0
);
";

/// Store of scan records, append-only during a run.
pub struct ScanStore {
    conn: Connection,
    pending: Vec<ScanRecord>,
}

impl ScanStore {
    /// Open (creating if needed) the store at `url`.
    ///
    /// `url` is either a filesystem path, optionally prefixed with
    /// `sqlite:`, or `:memory:` for a throwaway in-process store.
    /// When `clear` is set any existing records are dropped first.
    pub fn open(url: &str, clear: bool) -> Result<Self> {
        let path = url
            .strip_prefix("sqlite://")
            .or_else(|| url.strip_prefix("sqlite:"))
            .unwrap_or(url);
        if path.is_empty() {
            return Err(Error::Config(format!("empty store url {url:?}")));
        }
        let conn = if path == ":memory:" {
            Connection::open_in_memory()?
        } else {
            Connection::open(path)?
        };
        conn.execute_batch(SCHEMA)?;
        if clear {
            let dropped = conn.execute("DELETE FROM scans", [])?;
            debug!(dropped, "cleared existing scan records");
        }
        Ok(Self {
            conn,
            pending: Vec::new(),
        })
    }

    /// Buffer a record for the next [`commit_batch`](Self::commit_batch).
    pub fn append(&mut self, record: ScanRecord) {
        self.pending.push(record);
    }

    /// Number of records buffered but not yet committed.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Write all buffered records in a single transaction.
    ///
    /// A no-op when nothing is buffered.
    pub fn commit_batch(&mut self) -> Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO scans (ts, host, user, mailbox, uid, mid, otherhost, found)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;
            for rec in &self.pending {
                stmt.execute(params![
                    rec.ts,
                    rec.host,
                    rec.user,
                    rec.mailbox,
                    rec.uid,
                    rec.mid,
                    rec.otherhost,
                    rec.found,
                ])?;
            }
        }
        tx.commit()?;
        debug!(count = self.pending.len(), "committed scan batch");
        self.pending.clear();
        Ok(())
    }

    /// Total number of committed records.
    pub fn record_count(&self) -> Result<u64> {
        let count: u64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM scans", [], |row| row.get(0))?;
        Ok(count)
    }

    /// All committed records in insertion order.
    pub fn records(&self) -> Result<Vec<ScanRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT ts, host, user, mailbox, uid, mid, otherhost, found
             FROM scans ORDER BY id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(ScanRecord {
                ts: row.get(0)?,
                host: row.get(1)?,
                user: row.get(2)?,
                mailbox: row.get(3)?,
                uid: row.get(4)?,
                mid: row.get(5)?,
                otherhost: row.get(6)?,
                found: row.get(7)?,
            })
        })?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }
}
