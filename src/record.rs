//! Record - mapping between domain structs and relational rows.
//!
//! Implemented with `#[derive(Record)]`; the SQLite repositories build their
//! column lists, inserts and updates from this metadata.

/// A struct stored as one row of one table.
pub trait Record: Sized {
    /// Table name, e.g. `"Members"`.
    const TABLE: &'static str;

    /// All columns, in field order (the order `from_row` reads them).
    const COLUMNS: &'static [&'static str];

    /// Primary key columns.
    const KEY: &'static [&'static str];

    /// Whether the (single) key column is assigned by the store on insert.
    const GENERATED_KEY: bool;

    /// Read a row whose columns are selected in `COLUMNS` order.
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self>;

    /// Column/value pairs, in `COLUMNS` order.
    fn values(&self) -> Vec<(&'static str, &dyn rusqlite::ToSql)>;
}
