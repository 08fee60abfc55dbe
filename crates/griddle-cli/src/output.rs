//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use griddle_core::RenderedTable;

/// Print a value as compact JSON.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a rendered table as aligned plain text.
pub fn table(table: &RenderedTable) {
    let mut widths: Vec<usize> = table.headers.iter().map(str::len).collect();
    for row in &table.rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.len());
            }
        }
    }

    let header_line = table
        .headers
        .iter()
        .zip(&widths)
        .map(|(label, &width)| format!("{label:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    println!("{}", header_line.bold());
    println!("{}", "-".repeat(header_line.len()).dimmed());

    for row in &table.rows {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        println!("{line}");
    }
}
