#![allow(dead_code)]

use probe_metrics::services::catalog::{ABOUT_SHEET, FINANCIAL_SHEET};
use probe_metrics::services::probe::InputFile;
use rust_xlsxwriter::Workbook;

pub enum Cell {
    Text(&'static str),
    Number(f64),
    Blank,
}

/// Builds an in-memory report workbook.
#[derive(Default)]
pub struct ReportBuilder {
    about: Option<Vec<(&'static str, &'static str)>>,
    company: Option<&'static str>,
    headers: Vec<&'static str>,
    lines: Vec<(&'static str, Vec<Cell>)>,
    skip_financials: bool,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn company(mut self, name: &'static str) -> Self {
        self.company = Some(name);
        self.about.get_or_insert_with(Vec::new);
        self
    }

    pub fn about_row(mut self, label: &'static str, value: &'static str) -> Self {
        self.about.get_or_insert_with(Vec::new).push((label, value));
        self
    }

    pub fn headers(mut self, headers: &[&'static str]) -> Self {
        self.headers = headers.to_vec();
        self
    }

    pub fn line(mut self, label: &'static str, values: &[f64]) -> Self {
        self.lines.push((label, values.iter().map(|v| Cell::Number(*v)).collect()));
        self
    }

    pub fn raw_line(mut self, label: &'static str, cells: Vec<Cell>) -> Self {
        self.lines.push((label, cells));
        self
    }

    pub fn without_financials(mut self) -> Self {
        self.skip_financials = true;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut workbook = Workbook::new();

        if let Some(about_rows) = &self.about {
            let sheet = workbook.add_worksheet();
            sheet.set_name(ABOUT_SHEET).unwrap();
            sheet.write_string(0, 0, "Company Name").unwrap();
            if let Some(name) = self.company {
                sheet.write_string(0, 1, name).unwrap();
            }
            for (i, (label, value)) in about_rows.iter().enumerate() {
                let row = i as u32 + 1;
                sheet.write_string(row, 0, *label).unwrap();
                sheet.write_string(row, 1, *value).unwrap();
            }
        }

        if !self.skip_financials {
            let sheet = workbook.add_worksheet();
            sheet.set_name(FINANCIAL_SHEET).unwrap();
            for (col, header) in self.headers.iter().enumerate() {
                if !header.is_empty() {
                    sheet.write_string(0, col as u16, *header).unwrap();
                }
            }
            for (i, (label, cells)) in self.lines.iter().enumerate() {
                let row = i as u32 + 1;
                sheet.write_string(row, 0, *label).unwrap();
                for (j, cell) in cells.iter().enumerate() {
                    let col = j as u16 + 1;
                    match cell {
                        Cell::Text(s) => {
                            sheet.write_string(row, col, *s).unwrap();
                        }
                        Cell::Number(n) => {
                            sheet.write_number(row, col, *n).unwrap();
                        }
                        Cell::Blank => {}
                    }
                }
            }
        }

        workbook.save_to_buffer().unwrap()
    }

    pub fn into_input(self, name: &str) -> InputFile {
        InputFile::new(name.to_string(), self.build())
    }
}

pub fn multi_year_headers() -> Vec<&'static str> {
    vec!["Particulars", "31 Mar, 2021", "31 Mar, 2022", "31 Mar, 2023", "31 Mar, 2024"]
}
