use polars::frame::DataFrame;
use serde::Serialize;
use crate::error::ExtractError;
use crate::services::excel::{export, frame, CellValue};
use crate::services::three_year::ChartData;

pub const SUMMARY_COLUMNS: [&str; 21] = [
    "Company Name",
    "Net Revenue",
    "Gross Margin(%)",
    "EBITDA (%)",
    "Depreciation (% of sales)",
    "Finance Cost (% of sales)",
    "PAT %",
    "TOL",
    "TNW",
    "Current Ratio",
    "TOL/TNW",
    "Debt",
    "Debt/EBITDA",
    "Interest Coverage Ratio",
    "ROCE (%)",
    "ROE (%)",
    "Fixed Asset Turnover Ratio",
    "Net Fixed Assets",
    "Vintage (Years)",
    "Date of Incorporation",
    "Date of Report",
];

pub const THREE_YEAR_COLUMNS: [&str; 7] = [
    "Year",
    "Net Revenue",
    "Total Equity",
    "Debt",
    "Net Fixed Asset",
    "EBITDA (%)",
    "PAT (%)",
];

/// A row that can be laid out under a fixed header, in column order.
pub trait ReportRow {
    const COLUMNS: &'static [&'static str];

    fn cells(&self) -> Vec<CellValue>;
}

fn number(value: Option<f64>) -> CellValue {
    value.map_or(CellValue::Empty, CellValue::Number)
}

fn text(value: &Option<String>) -> CellValue {
    value.clone().map_or(CellValue::Empty, CellValue::Text)
}

/// One company's summary. `None` means the metric could not be determined.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyRecord {
    #[serde(rename = "Company Name")]
    pub company_name: Option<String>,
    #[serde(rename = "Net Revenue")]
    pub net_revenue: Option<f64>,
    #[serde(rename = "Gross Margin(%)")]
    pub gross_margin_pct: Option<f64>,
    #[serde(rename = "EBITDA (%)")]
    pub ebitda_pct: Option<f64>,
    #[serde(rename = "Depreciation (% of sales)")]
    pub depreciation_pct: Option<f64>,
    #[serde(rename = "Finance Cost (% of sales)")]
    pub finance_cost_pct: Option<f64>,
    #[serde(rename = "PAT %")]
    pub pat_pct: Option<f64>,
    #[serde(rename = "TOL")]
    pub total_outside_liabilities: f64,
    #[serde(rename = "TNW")]
    pub tangible_net_worth: f64,
    #[serde(rename = "Current Ratio")]
    pub current_ratio: Option<f64>,
    #[serde(rename = "TOL/TNW")]
    pub tol_tnw: Option<f64>,
    #[serde(rename = "Debt")]
    pub total_debt: f64,
    #[serde(rename = "Debt/EBITDA")]
    pub debt_ebitda: Option<f64>,
    #[serde(rename = "Interest Coverage Ratio")]
    pub interest_coverage: Option<f64>,
    #[serde(rename = "ROCE (%)")]
    pub roce_pct: Option<f64>,
    #[serde(rename = "ROE (%)")]
    pub roe_pct: Option<f64>,
    #[serde(rename = "Fixed Asset Turnover Ratio")]
    pub fixed_asset_turnover: Option<f64>,
    #[serde(rename = "Net Fixed Assets")]
    pub net_fixed_assets: Option<f64>,
    #[serde(rename = "Vintage (Years)")]
    pub vintage_years: Option<i32>,
    #[serde(rename = "Date of Incorporation")]
    pub date_of_incorporation: Option<String>,
    #[serde(rename = "Date of Report")]
    pub date_of_report: Option<String>,
}

impl ReportRow for CompanyRecord {
    const COLUMNS: &'static [&'static str] = &SUMMARY_COLUMNS;

    fn cells(&self) -> Vec<CellValue> {
        vec![
            text(&self.company_name),
            number(self.net_revenue),
            number(self.gross_margin_pct),
            number(self.ebitda_pct),
            number(self.depreciation_pct),
            number(self.finance_cost_pct),
            number(self.pat_pct),
            CellValue::Number(self.total_outside_liabilities),
            CellValue::Number(self.tangible_net_worth),
            number(self.current_ratio),
            number(self.tol_tnw),
            CellValue::Number(self.total_debt),
            number(self.debt_ebitda),
            number(self.interest_coverage),
            number(self.roce_pct),
            number(self.roe_pct),
            number(self.fixed_asset_turnover),
            number(self.net_fixed_assets),
            number(self.vintage_years.map(f64::from)),
            text(&self.date_of_incorporation),
            text(&self.date_of_report),
        ]
    }
}

/// Output of the single-company extractor, in input file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryTable {
    pub records: Vec<CompanyRecord>,
}

impl SummaryTable {
    pub fn new(records: Vec<CompanyRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn columns(&self) -> &'static [&'static str] {
        CompanyRecord::COLUMNS
    }

    pub fn to_xlsx_bytes(&self) -> Result<Vec<u8>, ExtractError> {
        export::write_report(&self.records)
    }

    pub fn to_dataframe(&self) -> polars::error::PolarsResult<DataFrame> {
        frame::to_dataframe(&self.records)
    }
}

/// One fiscal year of the three-year view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearRow {
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Net Revenue")]
    pub net_revenue: Option<f64>,
    #[serde(rename = "Total Equity")]
    pub total_equity: Option<f64>,
    #[serde(rename = "Debt")]
    pub debt: Option<f64>,
    #[serde(rename = "Net Fixed Asset")]
    pub net_fixed_asset: Option<f64>,
    #[serde(rename = "EBITDA (%)")]
    pub ebitda_pct: Option<f64>,
    #[serde(rename = "PAT (%)")]
    pub pat_pct: Option<f64>,
}

impl ReportRow for YearRow {
    const COLUMNS: &'static [&'static str] = &THREE_YEAR_COLUMNS;

    fn cells(&self) -> Vec<CellValue> {
        vec![
            CellValue::Text(self.year.clone()),
            number(self.net_revenue),
            number(self.total_equity),
            number(self.debt),
            number(self.net_fixed_asset),
            number(self.ebitda_pct),
            number(self.pat_pct),
        ]
    }
}

/// Year-indexed table, oldest selected year first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ThreeYearTable {
    pub rows: Vec<YearRow>,
}

impl ThreeYearTable {
    pub fn new(rows: Vec<YearRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn years(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.year.as_str()).collect()
    }

    pub fn columns(&self) -> &'static [&'static str] {
        YearRow::COLUMNS
    }

    pub fn to_xlsx_bytes(&self) -> Result<Vec<u8>, ExtractError> {
        export::write_report(&self.rows)
    }

    pub fn to_dataframe(&self) -> polars::error::PolarsResult<DataFrame> {
        frame::to_dataframe(&self.rows)
    }
}

/// Everything the three-year tool hands back: the table and the series a
/// chart renderer needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreeYearReport {
    pub table: ThreeYearTable,
    pub chart: ChartData,
}
