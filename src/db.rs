use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rusqlite::{Connection, ErrorCode, OptionalExtension, Row};
use tracing::warn;

use crate::error::{QuizError, Result};
use crate::models::{HistoryEntry, NewQuiz, QuizPayload, QuizRecord};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub fn connect(path: &Path) -> Result<Connection> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    let conn = Connection::open(path)?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS quizzes (
            id          INTEGER PRIMARY KEY,
            url         TEXT UNIQUE NOT NULL,
            title       TEXT NOT NULL,
            summary     TEXT NOT NULL,
            raw_markup  TEXT,
            quiz_data   TEXT,
            created_at  TEXT NOT NULL
        );
        ",
    )?;
    Ok(())
}

// ── Store handle ──

/// Location of the quiz database. Every unit of work opens its own
/// connection, which is dropped when the work finishes or fails.
#[derive(Clone, Debug)]
pub struct Store {
    path: Arc<PathBuf>,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the database file and schema if missing.
    pub fn init(&self) -> Result<()> {
        let conn = connect(&self.path)?;
        init_schema(&conn)
    }

    pub fn open(&self) -> Result<Connection> {
        connect(&self.path)
    }

    /// Run `f` against a fresh connection on the blocking pool.
    pub async fn run<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = self.clone();
        tokio::task::spawn_blocking(move || {
            let conn = store.open()?;
            f(&conn)
        })
        .await?
    }
}

// ── Quizzes ──

const RECORD_COLUMNS: &str = "id, url, title, summary, quiz_data, created_at";

pub fn find_by_url(conn: &Connection, url: &str) -> Result<Option<QuizRecord>> {
    let sql = format!("SELECT {} FROM quizzes WHERE url = ?1", RECORD_COLUMNS);
    let record = conn
        .query_row(&sql, rusqlite::params![url], record_from_row)
        .optional()?;
    Ok(record)
}

pub fn get(conn: &Connection, id: i64) -> Result<QuizRecord> {
    let sql = format!("SELECT {} FROM quizzes WHERE id = ?1", RECORD_COLUMNS);
    conn.query_row(&sql, rusqlite::params![id], record_from_row)
        .optional()?
        .ok_or(QuizError::NotFound(id))
}

/// Insert a new quiz. The UNIQUE constraint on `url` rejects a second
/// record for the same source with [`QuizError::DuplicateUrl`].
pub fn create(conn: &Connection, quiz: &NewQuiz) -> Result<QuizRecord> {
    let payload = QuizPayload {
        quiz: quiz.questions.clone(),
        related_topics: quiz.related_topics.clone(),
    };
    let quiz_data = serde_json::to_string(&payload)?;
    let created_at = Utc::now();

    let inserted = conn.execute(
        "INSERT INTO quizzes (url, title, summary, raw_markup, quiz_data, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        rusqlite::params![
            quiz.url, quiz.title, quiz.summary, quiz.raw_markup, quiz_data, created_at,
        ],
    );
    match inserted {
        Ok(_) => {}
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == ErrorCode::ConstraintViolation
                && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            return Err(QuizError::DuplicateUrl(quiz.url.clone()));
        }
        Err(e) => return Err(e.into()),
    }

    Ok(QuizRecord {
        id: conn.last_insert_rowid(),
        url: quiz.url.clone(),
        title: quiz.title.clone(),
        summary: quiz.summary.clone(),
        questions: payload.quiz,
        related_topics: payload.related_topics,
        created_at,
    })
}

/// Most recent first.
pub fn list_history(conn: &Connection, limit: Option<usize>) -> Result<Vec<HistoryEntry>> {
    let sql = format!(
        "SELECT id, url, title, created_at FROM quizzes ORDER BY id DESC{}",
        match limit {
            Some(n) => format!(" LIMIT {}", n),
            None => String::new(),
        }
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(HistoryEntry {
                id: row.get(0)?,
                url: row.get(1)?,
                title: row.get(2)?,
                date_generated: row.get(3)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn raw_markup(conn: &Connection, id: i64) -> Result<Option<String>> {
    conn.query_row(
        "SELECT raw_markup FROM quizzes WHERE id = ?1",
        rusqlite::params![id],
        |row| row.get(0),
    )
    .optional()?
    .ok_or(QuizError::NotFound(id))
}

fn record_from_row(row: &Row) -> rusqlite::Result<QuizRecord> {
    let id: i64 = row.get(0)?;
    let quiz_data: Option<String> = row.get(4)?;
    let payload = decode_payload(id, quiz_data.as_deref());
    Ok(QuizRecord {
        id,
        url: row.get(1)?,
        title: row.get(2)?,
        summary: row.get(3)?,
        questions: payload.quiz,
        related_topics: payload.related_topics,
        created_at: row.get(5)?,
    })
}

/// Malformed payloads read back as an empty quiz rather than failing.
fn decode_payload(id: i64, raw: Option<&str>) -> QuizPayload {
    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        return QuizPayload::default();
    };
    serde_json::from_str(raw).unwrap_or_else(|e| {
        warn!("Quiz {} has an unreadable payload: {}", id, e);
        QuizPayload::default()
    })
}

// ── Tests ──
