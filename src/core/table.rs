use crate::record::Record;

/// Cells longer than this are cut and end in `...`
pub const MAX_CELL_WIDTH: usize = 60;

/// Render records as a fixed-width text table with a header row
pub fn format_table(records: &[Record]) -> String {
    let rows: Vec<[String; 3]> = records
        .iter()
        .map(|record| record.cells().map(truncate_cell))
        .collect();

    let mut widths = Record::COLUMNS.map(|title| title.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &Record::COLUMNS, &widths);
    let rule_len = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    out.push_str(&"-".repeat(rule_len));
    out.push('\n');
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row<S: AsRef<str>>(out: &mut String, cells: &[S], widths: &[usize; 3]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| format!("{:<width$}", cell.as_ref(), width = width))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

fn truncate_cell(cell: &str) -> String {
    // Table cells are single-line.
    let flat: String = cell.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= MAX_CELL_WIDTH {
        return flat;
    }
    let kept: String = flat.chars().take(MAX_CELL_WIDTH - 3).collect();
    format!("{}...", kept)
}
