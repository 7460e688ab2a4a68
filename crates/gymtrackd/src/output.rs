//! Rendering of export tables as CSV or aligned text

use gymtrack_core::ExportTable;
use std::io::{self, Write};

fn csv_quote(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn csv_line<S: AsRef<str>>(cells: &[S]) -> String {
    cells
        .iter()
        .map(|c| csv_quote(c.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Header line then one line per row. Nothing at all for an empty table.
pub fn to_csv(table: &ExportTable) -> String {
    if table.rows.is_empty() {
        return String::new();
    }

    let mut out = csv_line(&table.headers);
    for row in &table.rows {
        out.push('\n');
        out.push_str(&csv_line(row));
    }
    out.push('\n');
    out
}

/// Space-padded columns for terminal output
pub fn to_text(table: &ExportTable) -> String {
    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.chars().count()).collect();
    for row in &table.rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let pad = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, &w)| format!("{c:<w$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = pad(table.headers.clone());
    out.push('\n');
    for row in &table.rows {
        out.push_str(&pad(row.iter().map(String::as_str).collect()));
        out.push('\n');
    }
    out
}

pub fn write_stdout(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()
}
