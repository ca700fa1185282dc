//! Schema inspection and missing-value profiling.
//!
//! Lists the tables of the database, reads their column metadata, verifies
//! that every table the analysis needs is present, previews the head of the
//! expected tables and counts NULLs per column.

use compact_str::CompactString;
use indexmap::IndexSet;
use serde::Serialize;
use tracing::{info, warn};

use crate::{
    catalog::required_tables,
    error::{AppResult, missing_tables_error},
    store::SqliteStore
};

/// Column metadata from `pragma_table_info`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnInfo {
    pub name:        CompactString,
    /// Declared type, empty when the column has none
    pub data_type:   CompactString,
    pub not_null:    bool,
    pub primary_key: bool
}

/// A table and its columns.
#[derive(Debug, Clone, Serialize)]
pub struct TableSchema {
    pub name:    CompactString,
    pub columns: Vec<ColumnInfo>
}

/// First rows of a table, every value rendered as text.
#[derive(Debug, Clone, Serialize)]
pub struct TablePreview {
    pub table:   CompactString,
    pub columns: Vec<CompactString>,
    pub rows:    Vec<Vec<String>>
}

/// NULL count of a single column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NullCount {
    pub column: CompactString,
    pub nulls:  i64
}

/// Missing-value profile of a table.
#[derive(Debug, Clone, Serialize)]
pub struct NullProfile {
    pub table:     CompactString,
    pub row_count: i64,
    pub columns:   Vec<NullCount>
}

impl NullProfile {
    /// Total NULL cells across all columns
    pub fn total_nulls(&self) -> i64 {
        self.columns.iter().map(|c| c.nulls).sum()
    }
}

/// Everything the inspector learned about the database.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Inspection {
    pub tables:        Vec<TableSchema>,
    pub previews:      Vec<TablePreview>,
    pub null_profiles: Vec<NullProfile>
}

/// Tables from `required` that are absent from `listed`.
///
/// Comparison is case-insensitive; the result keeps the spelling of
/// `required` and drops duplicates.
pub fn missing_tables<I, S>(listed: &[CompactString], required: I) -> Vec<CompactString>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>
{
    let present: IndexSet<String> = listed.iter().map(|t| t.as_str().to_lowercase()).collect();
    let mut missing = IndexSet::new();
    for table in required {
        let table = table.as_ref();
        if !present.contains(&table.to_lowercase()) {
            missing.insert(CompactString::from(table));
        }
    }
    missing.into_iter().collect()
}

/// Check that the metric queries and the expected tables can run.
///
/// # Errors
///
/// Returns a missing-table error naming every absent table
pub fn preflight(listed: &[CompactString], expected: &[String]) -> AppResult<()> {
    let mut required: IndexSet<CompactString> = expected.iter().map(|t| t.as_str().into()).collect();
    required.extend(required_tables()?);
    let missing = missing_tables(listed, &required);
    if missing.is_empty() {
        Ok(())
    } else {
        warn!(missing = ?missing, "required tables absent");
        Err(missing_tables_error(&missing))
    }
}

/// Column metadata for every listed table
pub fn describe_tables(store: &SqliteStore, listed: &[CompactString]) -> AppResult<Vec<TableSchema>> {
    listed
        .iter()
        .map(|name| {
            Ok(TableSchema {
                name:    name.clone(),
                columns: store.table_columns(name)?
            })
        })
        .collect()
}

/// Run the full inspection: list, preflight, preview, describe, profile.
pub fn inspect_database(
    store: &SqliteStore,
    expected: &[String],
    head_rows: usize
) -> AppResult<Inspection> {
    let listed = store.list_tables()?;
    info!(tables = listed.len(), "listed tables");
    preflight(&listed, expected)?;

    let previews = expected
        .iter()
        .map(|table| store.preview(table, head_rows))
        .collect::<AppResult<Vec<_>>>()?;

    let tables = describe_tables(store, &listed)?;
    let null_profiles = tables
        .iter()
        .map(|schema| store.null_profile(&schema.name, &schema.columns))
        .collect::<AppResult<Vec<_>>>()?;
    info!(
        profiled = null_profiles.len(),
        "inspection complete"
    );

    Ok(Inspection {
        tables,
        previews,
        null_profiles
    })
}
