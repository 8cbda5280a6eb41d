//! # Database Module
//!
//! Thin SQLite wrapper built on SQLx.
//!
//! One database file, one connection. Tables are created from
//! caller-supplied column definitions (`"id INTEGER"`, `"name TEXT"`),
//! rows are inserted with bound parameters and read back as ordered
//! column/value lists.

use crate::error::{Error, Result};
use serde::Serialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Column, Row, TypeInfo, ValueRef};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Database value types
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DbValue {
    /// Null value
    Null,
    /// Integer value
    Int(i64),
    /// Float value
    Float(f64),
    /// String value
    String(String),
    /// Binary data
    Bytes(Vec<u8>),
}

impl From<i64> for DbValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for DbValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for DbValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for DbValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for DbValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Vec<u8>> for DbValue {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl<T: Into<Self>> From<Option<T>> for DbValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// A fetched row: column name and value, in column order
pub type DbRow = Vec<(String, DbValue)>;

/// SQLite handle over a single connection
#[derive(Clone)]
pub struct Orm {
    pool: SqlitePool,
}

impl Orm {
    /// Open (creating if missing) the database file at `path`
    ///
    /// # Errors
    ///
    /// Returns `Error::Database` if the file can't be opened.
    pub async fn connect(path: impl AsRef<Path>) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true);
        debug!(path = %path.as_ref().display(), "Opening SQLite database");
        Self::open(options).await
    }

    /// Open a private in-memory database
    ///
    /// # Errors
    ///
    /// Returns `Error::Database` if SQLite can't be initialised.
    pub async fn memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        Self::open(options).await
    }

    async fn open(options: SqliteConnectOptions) -> Result<Self> {
        // An in-memory database lives and dies with its connection, so the
        // pool must never recycle it.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| Error::Database {
                message: format!("SQLite connection failed: {e}"),
            })?;
        Ok(Self { pool })
    }

    /// `CREATE TABLE IF NOT EXISTS table (columns...)`
    ///
    /// Each column is a definition such as `"age INTEGER"`; its first word
    /// must be a plain identifier.
    ///
    /// # Errors
    ///
    /// Returns `Error::Database` for invalid identifiers or SQL errors.
    pub async fn create_table(&self, table: &str, columns: &[&str]) -> Result<()> {
        check_identifier(table)?;
        if columns.is_empty() {
            return Err(Error::Database {
                message: format!("Table {table} needs at least one column"),
            });
        }
        for column in columns {
            let name = column.split_whitespace().next().unwrap_or_default();
            check_identifier(name)?;
        }

        let query = format!("CREATE TABLE IF NOT EXISTS {table} ({})", columns.join(", "));
        debug!(%query, "Creating table");
        sqlx::query(&query).execute(&self.pool).await?;
        Ok(())
    }

    /// Insert one row of `(column, value)` pairs
    ///
    /// Returns the number of inserted rows.
    ///
    /// # Errors
    ///
    /// Returns `Error::Database` for invalid identifiers or SQL errors.
    pub async fn insert(&self, table: &str, row: &[(&str, DbValue)]) -> Result<u64> {
        check_identifier(table)?;
        if row.is_empty() {
            return Err(Error::Database {
                message: format!("Insert into {table} without values"),
            });
        }
        for (column, _) in row {
            check_identifier(column)?;
        }

        let columns = row.iter().map(|(c, _)| *c).collect::<Vec<_>>().join(", ");
        let placeholders = vec!["?"; row.len()].join(", ");
        let query = format!("INSERT INTO {table} ({columns}) VALUES ({placeholders})");

        let mut statement = sqlx::query(&query);
        for (_, value) in row {
            statement = match value {
                DbValue::Null => statement.bind(None::<i64>),
                DbValue::Int(v) => statement.bind(*v),
                DbValue::Float(v) => statement.bind(*v),
                DbValue::String(v) => statement.bind(v.clone()),
                DbValue::Bytes(v) => statement.bind(v.clone()),
            };
        }
        let result = statement.execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    /// `SELECT * FROM table [WHERE condition]`
    ///
    /// `condition` is raw SQL and must come from trusted code.
    ///
    /// # Errors
    ///
    /// Returns `Error::Database` for an invalid table name or SQL errors.
    pub async fn fetch(&self, table: &str, condition: Option<&str>) -> Result<Vec<DbRow>> {
        check_identifier(table)?;
        let query = match condition {
            Some(cond) => format!("SELECT * FROM {table} WHERE {cond}"),
            None => format!("SELECT * FROM {table}"),
        };

        let rows: Vec<SqliteRow> = sqlx::query(&query).fetch_all(&self.pool).await?;
        Ok(rows.iter().map(row_values).collect())
    }

    /// Close the connection
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
fn check_identifier(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(Error::Database {
            message: format!("Invalid identifier: {name:?}"),
        })
    }
}

fn row_values(row: &SqliteRow) -> DbRow {
    row.columns()
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let null = row.try_get_raw(i).map_or(true, |raw| raw.is_null());
            let value = if null {
                DbValue::Null
            } else {
                match column.type_info().name() {
                    "INTEGER" => row.try_get::<i64, _>(i).map_or(DbValue::Null, DbValue::Int),
                    "REAL" => row.try_get::<f64, _>(i).map_or(DbValue::Null, DbValue::Float),
                    "BLOB" => row.try_get::<Vec<u8>, _>(i).map_or(DbValue::Null, DbValue::Bytes),
                    _ => row.try_get::<String, _>(i).map_or(DbValue::Null, DbValue::String),
                }
            };
            (column.name().to_string(), value)
        })
        .collect()
}
