use crate::services::excel::{CellValue, Sheet};

/// The column holding the most recent reporting period.
#[derive(Debug, Clone, PartialEq)]
pub struct LatestColumn {
    pub index: usize,
    pub label: String,
}

// A zero-valued header reads as no header at all.
fn is_period_header(cell: &CellValue) -> bool {
    match cell {
        CellValue::Number(n) => *n != 0.0,
        other => !other.is_blank(),
    }
}

/// Scans header row 0 right to left and takes the first cell holding a header.
pub fn select_latest_column(sheet: &Sheet) -> Option<LatestColumn> {
    sheet
        .row(0)
        .iter()
        .enumerate()
        .rev()
        .find(|(_, cell)| is_period_header(cell))
        .map(|(index, cell)| LatestColumn {
            index,
            label: cell.trimmed_text(),
        })
}
