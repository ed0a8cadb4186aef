use calamine::{Data, Range};

static EMPTY_CELL: CellValue = CellValue::Empty;

/// A single cell as the extractors see it.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Error(String),
}

impl CellValue {
    /// Numeric content, without any string-to-number parsing.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Error(e) => e.clone(),
        }
    }

    pub fn trimmed_text(&self) -> String {
        self.text().trim().to_string()
    }

    /// Blank means no content at all. Whitespace-only text is content.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            CellValue::Number(_) | CellValue::Error(_) => false,
        }
    }
}

impl From<&Data> for CellValue {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => CellValue::Empty,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Float(f) => CellValue::Number(*f),
            Data::Int(i) => CellValue::Number(*i as f64),
            // legacy .xls readers hand booleans back as 0/1
            Data::Bool(b) => CellValue::Number(if *b { 1.0 } else { 0.0 }),
            // serial day number, same as the old xls reader
            Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
            Data::Error(e) => CellValue::Error(e.to_string()),
        }
    }
}

/// One worksheet as an absolute, zero-based grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self { name: name.into(), rows }
    }

    /// calamine ranges start at the first used cell; pad them back out to A1.
    pub fn from_range(name: &str, range: &Range<Data>) -> Self {
        let (start_row, start_col) = range.start().unwrap_or((0, 0));
        let mut rows: Vec<Vec<CellValue>> = vec![Vec::new(); start_row as usize];

        for row in range.rows() {
            let mut cells = vec![CellValue::Empty; start_col as usize];
            cells.extend(row.iter().map(CellValue::from));
            rows.push(cells);
        }

        Self::new(name, rows)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Out-of-range positions read as empty.
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .unwrap_or(&EMPTY_CELL)
    }

    pub fn row(&self, row: usize) -> &[CellValue] {
        self.rows.get(row).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellValue]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Trimmed text of column 0.
    pub fn row_label(&self, row: usize) -> String {
        self.cell(row, 0).trimmed_text()
    }
}

/// Every sheet of one uploaded workbook, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawWorkbook {
    sheets: Vec<Sheet>,
}

impl RawWorkbook {
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.name() == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(Sheet::name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn out_of_range_cells_are_empty() {
        let sheet = Sheet::new("Data", vec![vec![text("a"), CellValue::Number(1.0)]]);
        assert_eq!(sheet.cell(0, 1), &CellValue::Number(1.0));
        assert_eq!(sheet.cell(0, 5), &CellValue::Empty);
        assert_eq!(sheet.cell(9, 0), &CellValue::Empty);
        assert!(sheet.row(3).is_empty());
    }

    #[test]
    fn range_offset_is_restored() {
        let mut range: Range<Data> = Range::new((1, 2), (1, 3));
        range.set_value((1, 2), Data::String("Net Revenue".to_string()));
        range.set_value((1, 3), Data::Float(1000.0));

        let sheet = Sheet::from_range("Standalone Financial Data", &range);
        assert_eq!(sheet.height(), 2);
        assert_eq!(sheet.cell(1, 2), &text("Net Revenue"));
        assert_eq!(sheet.cell(1, 3).as_number(), Some(1000.0));
        assert_eq!(sheet.cell(0, 0), &CellValue::Empty);
    }

    #[test]
    fn whitespace_text_is_not_blank() {
        assert!(CellValue::Empty.is_blank());
        assert!(text("").is_blank());
        assert!(!text("  ").is_blank());
        assert!(!CellValue::Number(0.0).is_blank());
    }

    #[test]
    fn only_numbers_coerce() {
        assert_eq!(text("1000").as_number(), None);
        assert_eq!(CellValue::Error("#DIV/0!".to_string()).as_number(), None);
        assert_eq!(CellValue::from(&Data::Int(7)).as_number(), Some(7.0));
    }
}
