pub mod export;
pub mod frame;
pub mod types;
pub mod workbook;

pub use types::{CellValue, RawWorkbook, Sheet};
pub use workbook::WorkbookReader;
