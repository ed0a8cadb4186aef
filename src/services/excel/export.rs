use super::types::CellValue;
use crate::error::ExtractError;
use crate::models::ReportRow;
use rust_xlsxwriter::Workbook;

pub const DEFAULT_SHEET_NAME: &str = "Sheet1";
pub const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Writes a header row plus one row per record into a fresh single-sheet
/// workbook and returns the xlsx bytes.
///
/// Absent values and non-finite numbers are left as blank cells.
pub fn write_report<R: ReportRow>(rows: &[R]) -> Result<Vec<u8>, ExtractError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(DEFAULT_SHEET_NAME)?;

    for (col_idx, name) in R::COLUMNS.iter().enumerate() {
        let col_num = u16::try_from(col_idx)
            .map_err(|_| ExtractError::Export("Column index overflow".to_string()))?;
        worksheet.write_string(0, col_num, *name)?;
    }

    for (row_idx, row) in rows.iter().enumerate() {
        let row_num = u32::try_from(row_idx + 1)
            .map_err(|_| ExtractError::Export("Row index overflow".to_string()))?;

        for (col_idx, cell) in row.cells().iter().enumerate() {
            let col_num = u16::try_from(col_idx)
                .map_err(|_| ExtractError::Export("Column index overflow".to_string()))?;

            match cell {
                CellValue::Empty => {}
                CellValue::Number(n) if !n.is_finite() => {}
                CellValue::Number(n) => {
                    worksheet.write_number(row_num, col_num, *n)?;
                }
                CellValue::Text(s) | CellValue::Error(s) => {
                    worksheet.write_string(row_num, col_num, s)?;
                }
            }
        }
    }

    tracing::debug!("Exported {} rows x {} columns", rows.len(), R::COLUMNS.len());
    Ok(workbook.save_to_buffer()?)
}
