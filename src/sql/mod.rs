//! A small SQL AST: one `SELECT` with joins, a predicate tree, ordering and
//! limit/offset, rendered to parameterized text.
//!
//! Every value is a bound parameter; only identifiers chosen by the crate
//! itself are written into the statement text.

mod render;

use crate::record::Record;

pub use render::Statement;

/// Target SQL dialect: placeholder syntax and substring function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Sqlite,
    Postgres,
}

/// A bound parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Integer(i64),
    Text(String),
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Integer(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

/// `alias."Column"`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub table: &'static str,
    pub name: &'static str,
}

pub const fn col(table: &'static str, name: &'static str) -> Column {
    Column { table, name }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Column(Column),
    Param(SqlValue),
    /// First non-null column.
    Coalesce(Vec<Column>),
}

impl From<Column> for Operand {
    fn from(column: Column) -> Self {
        Operand::Column(column)
    }
}

pub fn param(value: impl Into<SqlValue>) -> Operand {
    Operand::Param(value.into())
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Eq(Operand, Operand),
    IsNotNull(Operand),
    /// Case-sensitive substring match of a bound needle.
    Contains(Column, SqlValue),
    /// Case-insensitive equality with a bound value.
    EqIgnoreCase(Column, SqlValue),
    In(Column, Box<Select>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn eq(left: impl Into<Operand>, right: impl Into<Operand>) -> Self {
        Expr::Eq(left.into(), right.into())
    }

    pub fn and(a: Self, b: Self) -> Self {
        Expr::And(Box::new(a), Box::new(b))
    }

    pub fn or(a: Self, b: Self) -> Self {
        Expr::Or(Box::new(a), Box::new(b))
    }

    pub fn in_select(column: Column, select: Select) -> Self {
        Expr::In(column, Box::new(select))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub kind: JoinKind,
    pub table: &'static str,
    pub alias: &'static str,
    pub on: Expr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub key: Operand,
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    Columns(Vec<Column>),
    Count,
}

impl Projection {
    /// Every column of a record, qualified by `alias`.
    pub fn record<R: Record>(alias: &'static str) -> Self {
        Projection::Columns(R::COLUMNS.iter().map(|name| col(alias, name)).collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    pub skip: u32,
    pub take: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub projection: Projection,
    pub table: &'static str,
    pub alias: &'static str,
    pub joins: Vec<Join>,
    pub filter: Option<Expr>,
    pub order_by: Vec<OrderBy>,
    pub limit: Option<Limit>,
}

impl Select {
    pub fn from(table: &'static str, alias: &'static str, projection: Projection) -> Self {
        Self {
            projection,
            table,
            alias,
            joins: Vec::new(),
            filter: None,
            order_by: Vec::new(),
            limit: None,
        }
    }

    pub fn join(mut self, kind: JoinKind, table: &'static str, alias: &'static str, on: Expr) -> Self {
        self.joins.push(Join {
            kind,
            table,
            alias,
            on,
        });
        self
    }

    /// AND `expr` into the WHERE clause.
    pub fn filter(mut self, expr: Expr) -> Self {
        self.filter = match self.filter.take() {
            Some(existing) => Some(Expr::and(existing, expr)),
            None => Some(expr),
        };
        self
    }

    pub fn order_by(mut self, key: impl Into<Operand>, direction: Direction) -> Self {
        self.order_by.push(OrderBy {
            key: key.into(),
            direction,
        });
        self
    }

    pub fn limit(mut self, skip: u32, take: u32) -> Self {
        self.limit = Some(Limit { skip, take });
        self
    }

    pub fn render(&self, dialect: Dialect) -> Statement {
        render::render(self, dialect)
    }
}
