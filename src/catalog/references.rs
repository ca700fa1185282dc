use compact_str::CompactString;
use indexmap::IndexSet;
use sqlparser::{
    ast::{Query, SetExpr, Statement, TableFactor, TableWithJoins},
    dialect::SQLiteDialect,
    parser::Parser
};

use crate::error::{AppResult, query_parse_error};

/// Collect the base tables a statement reads from.
///
/// Derived tables (`FROM (SELECT ...) AS alias`) are walked recursively and
/// their alias is not reported. Names are lowercased since SQLite resolves
/// table names case-insensitively.
pub fn referenced_tables(name: &str, sql: &str) -> AppResult<IndexSet<CompactString>> {
    let statements =
        Parser::parse_sql(&SQLiteDialect {}, sql).map_err(|e| query_parse_error(name, e.to_string()))?;
    let mut tables = IndexSet::new();
    for statement in &statements {
        if let Statement::Query(query) = statement {
            collect_from_query(query, &mut tables);
        }
    }
    Ok(tables)
}

fn collect_from_query(query: &Query, tables: &mut IndexSet<CompactString>) {
    collect_from_set_expr(&query.body, tables);
}

fn collect_from_set_expr(set_expr: &SetExpr, tables: &mut IndexSet<CompactString>) {
    match set_expr {
        SetExpr::Select(select) => {
            for table in &select.from {
                collect_from_table_with_joins(table, tables);
            }
        }
        SetExpr::SetOperation {
            left,
            right,
            ..
        } => {
            collect_from_set_expr(left, tables);
            collect_from_set_expr(right, tables);
        }
        SetExpr::Query(query) => collect_from_query(query, tables),
        _ => {}
    }
}

fn collect_from_table_with_joins(table: &TableWithJoins, tables: &mut IndexSet<CompactString>) {
    collect_from_table_factor(&table.relation, tables);
    for join in &table.joins {
        collect_from_table_factor(&join.relation, tables);
    }
}

fn collect_from_table_factor(table_factor: &TableFactor, tables: &mut IndexSet<CompactString>) {
    match table_factor {
        TableFactor::Table {
            name, ..
        } => {
            tables.insert(name.to_string().to_lowercase().into());
        }
        TableFactor::Derived {
            subquery, ..
        } => collect_from_query(subquery, tables),
        TableFactor::NestedJoin {
            table_with_joins, ..
        } => collect_from_table_with_joins(table_with_joins, tables),
        _ => {}
    }
}
