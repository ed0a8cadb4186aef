use super::types::{RawWorkbook, Sheet};
use std::io::Cursor;
use bytes::Bytes;
use calamine::{open_workbook_auto_from_rs, Reader};
use crate::error::ExtractError;

pub struct WorkbookReader;

impl WorkbookReader {
    /// Reads every sheet of an in-memory workbook. The format (xls, xlsx,
    /// xlsb, ods) is detected from the content.
    pub fn from_bytes(file_data: Bytes) -> Result<RawWorkbook, ExtractError> {
        let start = std::time::Instant::now();
        let cursor = Cursor::new(file_data);

        let mut workbook = open_workbook_auto_from_rs(cursor)
            .map_err(|e| {
                tracing::error!("Failed to open workbook: {}", e);
                ExtractError::Workbook(e.to_string())
            })?;

        let sheet_names = workbook.sheet_names().to_vec();
        tracing::debug!("Found {} sheets: {:?}", sheet_names.len(), sheet_names);

        let mut sheets = Vec::with_capacity(sheet_names.len());
        for sheet_name in &sheet_names {
            match workbook.worksheet_range(sheet_name) {
                Ok(range) => sheets.push(Sheet::from_range(sheet_name, &range)),
                Err(e) => {
                    tracing::warn!("Failed to read worksheet {}: {}", sheet_name, e);
                    continue;
                }
            }
        }

        tracing::debug!("Workbook loaded in {:?}", start.elapsed());
        Ok(RawWorkbook::new(sheets))
    }
}
