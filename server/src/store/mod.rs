//! SQLite-backed todo storage.
//!
//! [`TodoStore`] owns the only connection to the `todos` table. Ids come from
//! `AUTOINCREMENT`, so a deleted id is never handed out again. `created_at`
//! is written as a fixed-width RFC 3339 string with microsecond precision,
//! which keeps lexical order equal to chronological order.

mod error;
mod schema;

pub use error::StoreError;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::model::{Todo, TodoFields};

const SELECT_TODO: &str = "SELECT id, title, completed, created_at FROM todos";

/// Persistent store for todo records.
pub struct TodoStore {
    conn: Connection,
}

impl TodoStore {
    /// Opens (or creates) the database file at `path`.
    pub fn open(path: &str) -> Result<Self, StoreError> {
        let conn = schema::open_database(path)?;
        Ok(TodoStore { conn })
    }

    /// Opens a private in-memory database (for tests).
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = schema::open_in_memory()?;
        Ok(TodoStore { conn })
    }

    /// Closes the underlying connection.
    pub fn close(self) -> Result<(), StoreError> {
        self.conn.close().map_err(|(_, e)| StoreError::Sqlite(e))
    }

    /// All todos, newest first. Ties on `created_at` fall back to the higher id.
    pub fn list_all(&self) -> Result<Vec<Todo>, StoreError> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("{SELECT_TODO} ORDER BY created_at DESC, id DESC"))?;
        let todos = stmt
            .query_map([], TodoRow::from_row)?
            .map(|row| row.map_err(StoreError::from).and_then(TodoRow::into_todo))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(todos)
    }

    /// Inserts a new todo. `title` is required; `completed` defaults to false.
    pub fn create(&mut self, fields: TodoFields) -> Result<Todo, StoreError> {
        let (title, completed) = fields.for_create()?;
        let created_at = Utc::now().trunc_subsecs(6);

        self.conn.execute(
            "INSERT INTO todos (title, completed, created_at) VALUES (?1, ?2, ?3)",
            params![title, completed, encode_timestamp(&created_at)],
        )?;

        Ok(Todo {
            id: self.conn.last_insert_rowid(),
            title,
            completed,
            created_at,
        })
    }

    pub fn get(&self, id: i64) -> Result<Todo, StoreError> {
        fetch(&self.conn, id)
    }

    /// Applies the supplied fields to an existing todo and returns the result.
    pub fn update(&mut self, id: i64, fields: TodoFields) -> Result<Todo, StoreError> {
        let changes = fields.for_update()?;

        let tx = self.conn.transaction()?;
        let matched = tx.execute(
            "UPDATE todos
                SET title = COALESCE(?2, title),
                    completed = COALESCE(?3, completed)
              WHERE id = ?1",
            params![id, changes.title, changes.completed],
        )?;
        if matched == 0 {
            return Err(StoreError::NotFound(id));
        }
        let todo = fetch(&tx, id)?;
        tx.commit()?;

        Ok(todo)
    }

    pub fn delete(&mut self, id: i64) -> Result<(), StoreError> {
        let removed = self
            .conn
            .execute("DELETE FROM todos WHERE id = ?1", params![id])?;
        if removed == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}

fn fetch(conn: &Connection, id: i64) -> Result<Todo, StoreError> {
    conn.prepare_cached(&format!("{SELECT_TODO} WHERE id = ?1"))?
        .query_row(params![id], TodoRow::from_row)
        .optional()?
        .ok_or(StoreError::NotFound(id))?
        .into_todo()
}

/// Raw column values, before the timestamp is decoded.
struct TodoRow {
    id: i64,
    title: String,
    completed: bool,
    created_at: String,
}

impl TodoRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(TodoRow {
            id: row.get(0)?,
            title: row.get(1)?,
            completed: row.get(2)?,
            created_at: row.get(3)?,
        })
    }

    fn into_todo(self) -> Result<Todo, StoreError> {
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| StoreError::Corrupt {
                id: self.id,
                reason: format!("bad created_at {:?}: {e}", self.created_at),
            })?
            .with_timezone(&Utc);

        Ok(Todo {
            id: self.id,
            title: self.title,
            completed: self.completed,
            created_at,
        })
    }
}

fn encode_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}
