use colored::Colorize;

/// Render rows as an aligned text table with a header line.
///
/// Every row should have as many cells as there are headers; missing cells
/// render empty and extra cells are dropped.
pub fn render_table(headers: &[&str], rows: &[Vec<String>], colored: bool) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (idx, cell) in row.iter().take(headers.len()).enumerate() {
            widths[idx] = widths[idx].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header = join_padded(headers.iter().copied(), &widths);
    if colored {
        out.push_str(&header.bold().to_string());
    } else {
        out.push_str(&header);
    }
    out.push('\n');
    for row in rows {
        let cells = (0..headers.len()).map(|idx| row.get(idx).map(String::as_str).unwrap_or(""));
        out.push_str(&join_padded(cells, &widths));
        out.push('\n');
    }
    out
}

fn join_padded<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let line = cells
        .zip(widths)
        .map(|(cell, &width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join("  ");
    format!("  {}", line.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_aligned() {
        let table = render_table(
            &["code", "seats"],
            &[
                vec!["A".to_string(), "2".to_string()],
                vec!["773".to_string(), "402".to_string()],
            ],
            false
        );
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "  code  seats");
        assert_eq!(lines[1], "  A     2");
        assert_eq!(lines[2], "  773   402");
    }

    #[test]
    fn test_short_row_padded() {
        let table = render_table(&["a", "b"], &[vec!["x".to_string()]], false);
        assert_eq!(table.lines().nth(1), Some("  x"));
    }

    #[test]
    fn test_empty_rows_header_only() {
        let table = render_table(&["only"], &[], false);
        assert_eq!(table, "  only\n");
    }
}
