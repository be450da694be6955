// SQLite-backed stat store.

use std::sync::{Mutex, MutexGuard};

use anyhow::{Context, Result};
use rusqlite::types::{Value, ValueRef};
use rusqlite::{params, params_from_iter, Connection, Row};
use tracing::debug;

use crate::metric::{Metric, SortDirection};
use crate::stat::{PitcherSeasonStat, StatValue};
use crate::store::{Filter, StatQuery, StatStore, StoreError, WriteAction};

/// A bulk load recorded in the `load_runs` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRun {
    pub run_id: String,
    pub collection: String,
    pub documents: usize,
    pub loaded_at: String,
}

/// SQLite persistence for pitcher season documents. Each collection is one
/// table; metric columns carry no declared type so integer and real cells
/// come back exactly as they were written.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) a SQLite database at `path`. Pass `":memory:"` for an
    /// ephemeral database.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database at {path}"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )
        .context("failed to set database pragmas")?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS load_runs (
                id         INTEGER PRIMARY KEY AUTOINCREMENT,
                run_id     TEXT NOT NULL,
                collection TEXT NOT NULL,
                documents  INTEGER NOT NULL,
                loaded_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
            );
            CREATE INDEX IF NOT EXISTS idx_load_runs_run_id ON load_runs(run_id);
            ",
        )
        .context("failed to create database schema")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the database connection.
    ///
    /// Panics if the mutex is poisoned.
    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().expect("database mutex poisoned")
    }

    /// Create the table backing `collection` if it does not exist yet.
    pub fn create_collection(&self, collection: &str) -> Result<(), StoreError> {
        let conn = self.conn();
        create_collection_table(&conn, collection)
    }

    /// Generate a load run id from the current UTC time, e.g.
    /// `load_20251018_093012_481`. Not unique: loads within the same
    /// millisecond share it, the `load_runs` row id tells them apart.
    pub fn generate_run_id() -> String {
        chrono::Utc::now().format("load_%Y%m%d_%H%M%S_%3f").to_string()
    }

    /// The most recent load run, if any load has been recorded.
    pub fn latest_load_run(&self) -> Result<Option<LoadRun>, StoreError> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT run_id, collection, documents, loaded_at
             FROM load_runs ORDER BY id DESC LIMIT 1",
        )?;
        let mut rows = stmt.query_map([], |row| {
            let documents: i64 = row.get(2)?;
            Ok(LoadRun {
                run_id: row.get(0)?,
                collection: row.get(1)?,
                documents: documents as usize,
                loaded_at: row.get(3)?,
            })
        })?;
        let run = rows.next().transpose()?;
        Ok(run)
    }
}

impl StatStore for Database {
    fn search(&self, query: &StatQuery) -> Result<Vec<PitcherSeasonStat>, StoreError> {
        let table = quote_collection(&query.collection)?;
        let (clause, mut values) = where_clause(&query.filters);
        let sql = format!(
            "SELECT season, team, player_name, {columns} FROM {table}{clause}
             ORDER BY {order} LIMIT ?",
            columns = metric_columns(),
            order = order_clause(query.sort.metric, query.sort.direction),
        );
        values.push(Value::Integer(query.size as i64));
        debug!("search: {sql}");

        let conn = self.conn();
        let mut stmt = conn.prepare(&sql)?;
        let docs = stmt
            .query_map(params_from_iter(values), read_document)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(docs)
    }

    fn bulk_write(&self, actions: &[WriteAction]) -> Result<usize, StoreError> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        let run_id = Self::generate_run_id();
        let mut per_collection: Vec<(&str, usize)> = Vec::new();

        for action in actions {
            let collection = action.collection.as_str();
            match per_collection.iter_mut().find(|(c, _)| *c == collection) {
                Some((_, count)) => *count += 1,
                None => {
                    create_collection_table(&tx, collection)?;
                    per_collection.push((collection, 1));
                }
            }
            insert_document(&tx, collection, &action.document)?;
        }

        for (collection, count) in &per_collection {
            tx.execute(
                "INSERT INTO load_runs (run_id, collection, documents) VALUES (?1, ?2, ?3)",
                params![run_id, collection, *count as i64],
            )?;
        }

        tx.commit()?;
        Ok(actions.len())
    }

    fn collection_exists(&self, collection: &str) -> Result<bool, StoreError> {
        validate_collection(collection)?;
        let conn = self.conn();
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
            params![collection],
            |row| row.get(0),
        )?;
        Ok(exists)
    }
}

// ---------------------------------------------------------------------------
// SQL helpers
// ---------------------------------------------------------------------------

/// Collection names become table names, so only identifiers are allowed.
fn validate_collection(collection: &str) -> Result<(), StoreError> {
    let valid = !collection.is_empty()
        && collection != "load_runs"
        && collection
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidCollection(collection.to_string()))
    }
}

fn quote_collection(collection: &str) -> Result<String, StoreError> {
    validate_collection(collection)?;
    Ok(format!("\"{collection}\""))
}

fn quote_metric(metric: Metric) -> String {
    format!("\"{}\"", metric.as_key())
}

fn metric_columns() -> String {
    Metric::ALL
        .iter()
        .map(|m| quote_metric(*m))
        .collect::<Vec<_>>()
        .join(", ")
}

fn create_collection_table(conn: &Connection, collection: &str) -> Result<(), StoreError> {
    let table = quote_collection(collection)?;
    let sql = format!(
        "CREATE TABLE IF NOT EXISTS {table} (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            season      INTEGER NOT NULL,
            team        TEXT NOT NULL,
            player_name TEXT NOT NULL,
            {columns}
        );",
        columns = metric_columns(),
    );
    conn.execute_batch(&sql)?;
    Ok(())
}

fn insert_document(
    conn: &Connection,
    collection: &str,
    doc: &PitcherSeasonStat,
) -> Result<(), StoreError> {
    let table = quote_collection(collection)?;
    let placeholders = (1..=Metric::ALL.len() + 3)
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "INSERT INTO {table} (season, team, player_name, {columns}) VALUES ({placeholders})",
        columns = metric_columns(),
    );

    let mut values = vec![
        Value::Integer(doc.season.into()),
        Value::Text(doc.team.clone()),
        Value::Text(doc.player_name.clone()),
    ];
    values.extend(Metric::ALL.iter().map(|m| match doc.get(*m) {
        Some(StatValue::Int(v)) => Value::Integer(v),
        Some(StatValue::Float(v)) => Value::Real(v),
        None => Value::Null,
    }));

    conn.execute(&sql, params_from_iter(values))?;
    Ok(())
}

fn where_clause(filters: &[Filter]) -> (String, Vec<Value>) {
    let mut terms = Vec::with_capacity(filters.len());
    let mut values = Vec::with_capacity(filters.len() + 1);
    for filter in filters {
        match filter {
            Filter::Season(season) => {
                terms.push("season = ?".to_string());
                values.push(Value::Integer((*season).into()));
            }
            Filter::Team(team) => {
                terms.push("team = ?".to_string());
                values.push(Value::Text(team.clone()));
            }
            Filter::AtLeast { metric, min } => {
                terms.push(format!("{} >= ?", quote_metric(*metric)));
                values.push(Value::Real(*min));
            }
        }
    }
    if terms.is_empty() {
        (String::new(), values)
    } else {
        (format!(" WHERE {}", terms.join(" AND ")), values)
    }
}

/// Absent values sort last regardless of direction; ties keep load order.
fn order_clause(metric: Metric, direction: SortDirection) -> String {
    let column = quote_metric(metric);
    let dir = match direction {
        SortDirection::Ascending => "ASC",
        SortDirection::Descending => "DESC",
    };
    format!("{column} IS NULL, {column} {dir}, id")
}

fn read_document(row: &Row<'_>) -> rusqlite::Result<PitcherSeasonStat> {
    let mut doc = PitcherSeasonStat::new(row.get(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?);
    for (offset, metric) in Metric::ALL.iter().enumerate() {
        match row.get_ref(offset + 3)? {
            ValueRef::Integer(v) => {
                doc.stats.insert(*metric, StatValue::Int(v));
            }
            ValueRef::Real(v) => {
                doc.stats.insert(*metric, StatValue::Float(v));
            }
            _ => {}
        }
    }
    Ok(doc)
}
