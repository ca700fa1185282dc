pub use masterror::{AppError, AppResult};

/// Create file read error
pub fn file_read_error(path: &str, source: std::io::Error) -> AppError {
    AppError::internal(format!("Failed to read file '{}': {}", path, source))
}

/// Create database open error
///
/// Raised when the database file is missing or SQLite refuses to open it.
pub fn database_open_error(path: &str, source: impl std::fmt::Display) -> AppError {
    AppError::service(format!("Failed to open database '{}': {}", path, source))
}

/// Create error for tables required by the analysis but absent from the
/// database
pub fn missing_tables_error(tables: &[impl AsRef<str>]) -> AppError {
    let names: Vec<&str> = tables.iter().map(|t| t.as_ref()).collect();
    AppError::bad_request(format!(
        "Database is missing required table(s): {}",
        names.join(", ")
    ))
}

/// Create query execution error
pub fn query_error(query_name: &str, source: rusqlite::Error) -> AppError {
    AppError::service(format_query_error(query_name, &source))
}

/// Create catalog query parse error
pub fn query_parse_error(query_name: &str, message: impl Into<String>) -> AppError {
    AppError::internal(format!(
        "Query '{}' could not be parsed:\n  {}",
        query_name,
        message.into()
    ))
}

/// Create error for identifiers that cannot be safely interpolated
pub fn invalid_identifier_error(name: &str) -> AppError {
    AppError::bad_request(format!("Invalid SQL identifier: '{}'", name))
}

/// Create error for booking dates that do not start with `YYYY-MM-DD`
pub fn date_parse_error(value: &str) -> AppError {
    AppError::bad_request(format!("Invalid booking date: '{}'", value))
}

/// Create config error
pub fn config_error(message: impl Into<String>) -> AppError {
    AppError::bad_request(message.into())
}

/// Create logging setup error
pub fn logging_error(message: impl Into<String>) -> AppError {
    AppError::internal(message.into())
}

fn format_query_error(query_name: &str, source: &rusqlite::Error) -> String {
    // SQLite reports schema problems as "no such table: x" / "no such column: x"
    let detail = source.to_string();
    if let Some(object) = extract_missing_object(&detail) {
        format!(
            "Query '{}' failed, {} does not exist:\n  {}",
            query_name, object, detail
        )
    } else {
        format!("Query '{}' failed:\n  {}", query_name, detail)
    }
}

fn extract_missing_object(message: &str) -> Option<String> {
    for kind in ["table", "column"] {
        let marker = format!("no such {}: ", kind);
        if let Some(start) = message.find(&marker) {
            let name = message[start + marker.len()..]
                .split_whitespace()
                .next()
                .unwrap_or_default();
            if !name.is_empty() {
                return Some(format!("{} '{}'", kind, name));
            }
        }
    }
    None
}
