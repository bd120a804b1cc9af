//! SQLite settings table.

use crate::{Result, SettingsStore, StoreError};
use camino::Utf8Path;
use failgrade_settings::{expand_table_refs, is_valid_table_prefix, settings_sql};
use failgrade_types::{QuizId, QuizPolicyConfig, ids};
use rusqlite::{Connection, OptionalExtension, params, params_from_iter};
use std::collections::BTreeMap;

/// Ids bound per bulk-load statement; keeps well under SQLite's variable limit.
const LOAD_CHUNK: usize = 500;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS {quizaccess_failgrade} (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    quizid INTEGER NOT NULL UNIQUE,
    failgradeenabled INTEGER NOT NULL DEFAULT 0
)";

#[derive(Debug)]
pub struct SqliteSettingsStore {
    conn: Connection,
    prefix: String,
    table: String,
}

impl SqliteSettingsStore {
    /// Open (or create) the database at `path` and make sure the table exists.
    pub fn open(path: &Utf8Path, prefix: &str) -> Result<Self> {
        if !is_valid_table_prefix(prefix) {
            return Err(StoreError::InvalidPrefix(prefix.to_string()));
        }
        let conn = Connection::open(path.as_std_path())?;
        Self::with_connection(conn, prefix)
    }

    pub fn open_in_memory(prefix: &str) -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?, prefix)
    }

    /// Use `conn` for a store whose table names start with `prefix`.
    pub fn with_connection(conn: Connection, prefix: &str) -> Result<Self> {
        if !is_valid_table_prefix(prefix) {
            return Err(StoreError::InvalidPrefix(prefix.to_string()));
        }
        let store = Self {
            conn,
            prefix: prefix.to_string(),
            table: format!("{prefix}{}", ids::TABLE_SETTINGS),
        };
        store.conn.execute_batch(&store.expand(SCHEMA))?;
        Ok(store)
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    fn expand(&self, sql: &str) -> String {
        expand_table_refs(sql, &self.prefix)
    }

    fn exists(&self, quiz: QuizId) -> Result<bool> {
        let sql = format!("SELECT 1 FROM {} WHERE quizid = ?1 LIMIT 1", self.table);
        let found = self
            .conn
            .query_row(&sql, params![quiz.0], |_| Ok(()))
            .optional()?;
        Ok(found.is_some())
    }

    fn delete_rows(&self, quiz: QuizId) -> Result<usize> {
        let sql = format!("DELETE FROM {} WHERE quizid = ?1", self.table);
        Ok(self.conn.execute(&sql, params![quiz.0])?)
    }

    /// `SELECT quiz.id, <fields> FROM quiz <joins>` over a VALUES list standing in for the
    /// host's quiz table.
    fn bulk_select(&self, count: usize) -> String {
        let contract = settings_sql();
        let values = vec!["(?)"; count].join(", ");
        format!(
            "WITH {quiz}(id) AS (VALUES {values}) SELECT {quiz}.id, {fields} FROM {quiz} {joins}",
            quiz = ids::QUIZ_TABLE_ALIAS,
            fields = contract.fields.join(", "),
            joins = self.expand(&contract.joins),
        )
    }
}

impl SettingsStore for SqliteSettingsStore {
    fn save(&mut self, quiz: QuizId, enabled: bool) -> Result<()> {
        if !enabled {
            let removed = self.delete_rows(quiz)?;
            tracing::debug!(quiz = %quiz, removed, "policy disabled");
            return Ok(());
        }
        if self.exists(quiz)? {
            return Ok(());
        }
        let sql = format!(
            "INSERT INTO {} (quizid, failgradeenabled) VALUES (?1, 1)",
            self.table
        );
        self.conn.execute(&sql, params![quiz.0])?;
        tracing::debug!(quiz = %quiz, "policy enabled");
        Ok(())
    }

    fn delete(&mut self, quiz: QuizId) -> Result<()> {
        let removed = self.delete_rows(quiz)?;
        tracing::debug!(quiz = %quiz, removed, "settings deleted");
        Ok(())
    }

    fn get(&self, quiz: QuizId) -> Result<Option<QuizPolicyConfig>> {
        let sql = format!(
            "SELECT failgradeenabled FROM {} WHERE quizid = ?1 LIMIT 1",
            self.table
        );
        let enabled: Option<bool> = self
            .conn
            .query_row(&sql, params![quiz.0], |row| row.get(0))
            .optional()?;
        Ok(enabled.map(|enabled| QuizPolicyConfig::new(quiz, enabled)))
    }

    fn load_for_quiz_list(&self, quizzes: &[QuizId]) -> Result<BTreeMap<QuizId, bool>> {
        let mut out = BTreeMap::new();
        for chunk in quizzes.chunks(LOAD_CHUNK) {
            let sql = self.bulk_select(chunk.len());
            let mut stmt = self.conn.prepare(&sql)?;
            let rows = stmt.query_map(params_from_iter(chunk.iter().map(|q| q.0)), |row| {
                let id: i64 = row.get(0)?;
                let enabled: Option<bool> = row.get(1)?;
                Ok((QuizId(id), enabled.unwrap_or(false)))
            })?;
            for row in rows {
                let (quiz, enabled) = row?;
                out.insert(quiz, enabled);
            }
        }
        Ok(out)
    }

    fn row_count(&self, quiz: QuizId) -> Result<usize> {
        let sql = format!("SELECT COUNT(*) FROM {} WHERE quizid = ?1", self.table);
        let count: i64 = self.conn.query_row(&sql, params![quiz.0], |row| row.get(0))?;
        Ok(count as usize)
    }
}
