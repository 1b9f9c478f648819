//! Generic row access for [`Record`] types.

use log::debug;
use rusqlite::{Connection, OptionalExtension, Params, ToSql};

use crate::error::Result;
use crate::record::Record;

fn column_list<R: Record>() -> String {
    R::COLUMNS
        .iter()
        .map(|c| format!("\"{}\"", c))
        .collect::<Vec<_>>()
        .join(", ")
}

fn select_sql<R: Record>(clause: &str) -> String {
    format!("SELECT {} FROM \"{}\" {}", column_list::<R>(), R::TABLE, clause)
}

/// `SELECT <all columns> FROM <table> <clause>`.
pub(super) fn select<R: Record, P: Params>(conn: &Connection, clause: &str, params: P) -> Result<Vec<R>> {
    let sql = select_sql::<R>(clause);
    debug!("{}", sql);
    let mut statement = conn.prepare_cached(&sql)?;
    let rows = statement.query_map(params, R::from_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<R>>>()?)
}

pub(super) fn select_one<R: Record, P: Params>(
    conn: &Connection,
    clause: &str,
    params: P,
) -> Result<Option<R>> {
    let sql = select_sql::<R>(clause);
    debug!("{}", sql);
    let mut statement = conn.prepare_cached(&sql)?;
    Ok(statement.query_row(params, R::from_row).optional()?)
}

/// Insert a record. Returns the store-assigned id for generated keys.
pub(super) fn insert<R: Record>(conn: &Connection, record: &R) -> Result<Option<i64>> {
    let values: Vec<(&'static str, &dyn ToSql)> = record
        .values()
        .into_iter()
        .filter(|(column, _)| !(R::GENERATED_KEY && R::KEY.contains(column)))
        .collect();

    let columns = values
        .iter()
        .map(|(column, _)| format!("\"{}\"", column))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = (1..=values.len())
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!("INSERT INTO \"{}\" ({}) VALUES ({})", R::TABLE, columns, placeholders);
    debug!("{}", sql);

    let params: Vec<&dyn ToSql> = values.iter().map(|(_, value)| *value).collect();
    conn.prepare_cached(&sql)?.execute(&params[..])?;

    Ok(R::GENERATED_KEY.then(|| conn.last_insert_rowid()))
}

/// Overwrite every non-key column of the row with the record's key.
/// Returns the number of rows changed.
pub(super) fn update<R: Record>(conn: &Connection, record: &R) -> Result<usize> {
    let values = record.values();
    let (keys, columns): (Vec<_>, Vec<_>) = values
        .into_iter()
        .partition(|(column, _)| R::KEY.contains(column));

    let assignments = columns
        .iter()
        .enumerate()
        .map(|(i, (column, _))| format!("\"{}\" = ?{}", column, i + 1))
        .collect::<Vec<_>>()
        .join(", ");
    let conditions = keys
        .iter()
        .enumerate()
        .map(|(i, (column, _))| format!("\"{}\" = ?{}", column, columns.len() + i + 1))
        .collect::<Vec<_>>()
        .join(" AND ");
    let sql = format!("UPDATE \"{}\" SET {} WHERE {}", R::TABLE, assignments, conditions);
    debug!("{}", sql);

    let params: Vec<&dyn ToSql> = columns
        .iter()
        .chain(keys.iter())
        .map(|(_, value)| *value)
        .collect();
    Ok(conn.prepare_cached(&sql)?.execute(&params[..])?)
}

/// Delete by key values given in `R::KEY` order. Returns the number of rows removed.
pub(super) fn delete<R: Record>(conn: &Connection, key: &[&dyn ToSql]) -> Result<usize> {
    let conditions = R::KEY
        .iter()
        .enumerate()
        .map(|(i, column)| format!("\"{}\" = ?{}", column, i + 1))
        .collect::<Vec<_>>()
        .join(" AND ");
    let sql = format!("DELETE FROM \"{}\" WHERE {}", R::TABLE, conditions);
    debug!("{}", sql);
    Ok(conn.prepare_cached(&sql)?.execute(key)?)
}

/// `?1, ?2, ...` for `count` values starting at `?first`.
pub(super) fn placeholders(first: usize, count: usize) -> String {
    (first..first + count)
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ")
}
