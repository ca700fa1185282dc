use std::sync::LazyLock;

use regex::Regex;

use crate::error::{AppResult, invalid_identifier_error};

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid")
});

/// Quote a table or column name for interpolation into SQL text.
///
/// Only plain identifiers are accepted; anything else is rejected rather
/// than escaped.
pub fn quote_identifier(name: &str) -> AppResult<String> {
    if IDENTIFIER.is_match(name) {
        Ok(format!("\"{}\"", name))
    } else {
        Err(invalid_identifier_error(name))
    }
}
