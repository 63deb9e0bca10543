//! SQLite session journal.
//!
//! RULE: Only journal.rs talks to the database.
//! The journal is append-only: it records what happened for replay
//! comparison and post-session review. Nothing restores GameState from it.

use crate::{
    error::SimResult,
    types::{Day, EventId, SessionId},
};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

/// One journaled outcome.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JournalEntry {
    pub id:         Option<i64>,
    pub session_id: SessionId,
    pub day:        Day,
    pub phase:      String,
    pub event_id:   Option<EventId>,
    pub payload:    String, // JSON-serialized EventOutcome
}

pub struct SessionJournal {
    conn: Connection,
}

impl SessionJournal {
    /// Open (or create) the journal database at `path`.
    pub fn open(path: &str) -> SimResult<Self> {
        let conn = Connection::open(path)?;
        // WAL only matters for real files; in-memory ignores it.
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory journal (used in tests and default runs).
    pub fn in_memory() -> SimResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> SimResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_journal.sql"))?;
        Ok(())
    }

    // ── Session ────────────────────────────────────────────────

    pub fn insert_session(&self, session_id: &str, seed: u32, version: &str) -> SimResult<()> {
        self.conn.execute(
            "INSERT INTO session (session_id, seed, version, started_at) VALUES (?1, ?2, ?3, ?4)",
            params![session_id, i64::from(seed), version, chrono::Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    // ── Entries ────────────────────────────────────────────────

    pub fn append(&self, entry: &JournalEntry) -> SimResult<()> {
        self.conn.execute(
            "INSERT INTO journal_entry (session_id, day, phase, event_id, payload, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                entry.session_id,
                i64::from(entry.day),
                entry.phase,
                entry.event_id,
                entry.payload,
                chrono::Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn entries_for_day(&self, session_id: &str, day: Day) -> SimResult<Vec<JournalEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, session_id, day, phase, event_id, payload
             FROM journal_entry WHERE session_id = ?1 AND day = ?2
             ORDER BY id ASC",
        )?;
        let entries = stmt
            .query_map(params![session_id, i64::from(day)], row_to_entry)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    pub fn entries(&self, session_id: &str) -> SimResult<Vec<JournalEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, session_id, day, phase, event_id, payload
             FROM journal_entry WHERE session_id = ?1
             ORDER BY id ASC",
        )?;
        let entries = stmt
            .query_map(params![session_id], row_to_entry)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    pub fn entry_count(&self, session_id: &str) -> SimResult<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM journal_entry WHERE session_id = ?1",
            params![session_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// How often each event fired in a session, most frequent first.
    pub fn event_counts(&self, session_id: &str) -> SimResult<Vec<(EventId, i64)>> {
        let mut stmt = self.conn.prepare(
            "SELECT event_id, COUNT(*) AS n FROM journal_entry
             WHERE session_id = ?1 AND event_id IS NOT NULL
             GROUP BY event_id ORDER BY n DESC, event_id ASC",
        )?;
        let counts = stmt
            .query_map(params![session_id], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(counts)
    }
}

fn row_to_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<JournalEntry> {
    Ok(JournalEntry {
        id:         Some(row.get(0)?),
        session_id: row.get(1)?,
        day:        row.get::<_, i64>(2)? as Day,
        phase:      row.get(3)?,
        event_id:   row.get(4)?,
        payload:    row.get(5)?,
    })
}
