use super::{Column, Dialect, Expr, JoinKind, Operand, Projection, Select, SqlValue};

/// Rendered statement text plus its parameters in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

struct Writer {
    dialect: Dialect,
    sql: String,
    params: Vec<SqlValue>,
}

pub(super) fn render(select: &Select, dialect: Dialect) -> Statement {
    let mut writer = Writer {
        dialect,
        sql: String::new(),
        params: Vec::new(),
    };
    writer.select(select);
    Statement {
        sql: writer.sql,
        params: writer.params,
    }
}

impl Writer {
    fn select(&mut self, select: &Select) {
        self.sql.push_str("SELECT ");
        match &select.projection {
            Projection::Count => self.sql.push_str("COUNT(*)"),
            Projection::Columns(columns) => {
                for (i, column) in columns.iter().enumerate() {
                    if i > 0 {
                        self.sql.push_str(", ");
                    }
                    self.column(column);
                }
            }
        }

        self.sql.push_str(" FROM ");
        self.table(select.table, select.alias);

        for join in &select.joins {
            self.sql.push_str(match join.kind {
                JoinKind::Inner => " INNER JOIN ",
                JoinKind::Left => " LEFT JOIN ",
            });
            self.table(join.table, join.alias);
            self.sql.push_str(" ON ");
            self.expr(&join.on);
        }

        if let Some(filter) = &select.filter {
            self.sql.push_str(" WHERE ");
            self.expr(filter);
        }

        if !select.order_by.is_empty() {
            self.sql.push_str(" ORDER BY ");
            for (i, order) in select.order_by.iter().enumerate() {
                if i > 0 {
                    self.sql.push_str(", ");
                }
                self.operand(&order.key);
                self.sql.push(' ');
                self.sql.push_str(order.direction.as_sql());
            }
        }

        if let Some(limit) = select.limit {
            self.sql.push_str(" LIMIT ");
            self.bind(SqlValue::Integer(i64::from(limit.take)));
            self.sql.push_str(" OFFSET ");
            self.bind(SqlValue::Integer(i64::from(limit.skip)));
        }
    }

    fn table(&mut self, table: &str, alias: &str) {
        self.quoted(table);
        self.sql.push(' ');
        self.sql.push_str(alias);
    }

    fn quoted(&mut self, identifier: &str) {
        self.sql.push('"');
        self.sql.push_str(identifier);
        self.sql.push('"');
    }

    fn column(&mut self, column: &Column) {
        self.sql.push_str(column.table);
        self.sql.push('.');
        self.quoted(column.name);
    }

    fn bind(&mut self, value: SqlValue) {
        self.params.push(value);
        let index = self.params.len();
        match self.dialect {
            Dialect::Sqlite => self.sql.push_str(&format!("?{}", index)),
            Dialect::Postgres => self.sql.push_str(&format!("${}", index)),
        }
    }

    fn operand(&mut self, operand: &Operand) {
        match operand {
            Operand::Column(column) => self.column(column),
            Operand::Param(value) => self.bind(value.clone()),
            Operand::Coalesce(columns) => {
                self.sql.push_str("COALESCE(");
                for (i, column) in columns.iter().enumerate() {
                    if i > 0 {
                        self.sql.push_str(", ");
                    }
                    self.column(column);
                }
                self.sql.push(')');
            }
        }
    }

    fn expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Eq(left, right) => {
                self.operand(left);
                self.sql.push_str(" = ");
                self.operand(right);
            }
            Expr::IsNotNull(operand) => {
                self.operand(operand);
                self.sql.push_str(" IS NOT NULL");
            }
            Expr::Contains(column, needle) => {
                // instr/strpos compare bytes, unlike LIKE which SQLite folds for ASCII
                self.sql.push_str(match self.dialect {
                    Dialect::Sqlite => "instr(",
                    Dialect::Postgres => "strpos(",
                });
                self.column(column);
                self.sql.push_str(", ");
                self.bind(needle.clone());
                self.sql.push_str(") > 0");
            }
            Expr::EqIgnoreCase(column, value) => {
                self.sql.push_str("lower(");
                self.column(column);
                self.sql.push_str(") = lower(");
                self.bind(value.clone());
                self.sql.push(')');
            }
            Expr::In(column, select) => {
                self.column(column);
                self.sql.push_str(" IN (");
                self.select(select);
                self.sql.push(')');
            }
            Expr::And(a, b) => {
                self.nested(a, true);
                self.sql.push_str(" AND ");
                self.nested(b, true);
            }
            Expr::Or(a, b) => {
                self.sql.push('(');
                self.nested(a, false);
                self.sql.push_str(" OR ");
                self.nested(b, false);
                self.sql.push(')');
            }
        }
    }

    /// Flatten chains of the same connective; OR groups carry their own parentheses.
    fn nested(&mut self, expr: &Expr, in_and: bool) {
        match expr {
            Expr::And(_, _) if !in_and => {
                self.sql.push('(');
                self.expr(expr);
                self.sql.push(')');
            }
            Expr::Or(a, b) if !in_and => {
                self.nested(a, false);
                self.sql.push_str(" OR ");
                self.nested(b, false);
            }
            _ => self.expr(expr),
        }
    }
}
