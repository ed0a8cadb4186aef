//! Single-company extractor: one summary record per uploaded report.

pub mod batch;
pub mod columns;
pub mod lookup;
pub mod metadata;
pub mod ratios;

use chrono::Datelike;
use crate::error::ExtractError;
use crate::models::CompanyRecord;
use crate::services::catalog::{labels, FieldCatalog, ABOUT_SHEET, FINANCIAL_SHEET};
use crate::services::excel::{RawWorkbook, WorkbookReader};

pub use batch::{CollectingReporter, ErrorReporter, FileError, InputFile, TracingReporter};
pub use columns::{select_latest_column, LatestColumn};
pub use lookup::{lookup_fields, FinancialFields};
pub use metadata::{extract_metadata, CompanyMetadata, IncorporationYear};
pub use ratios::{compute_ratios, safe_ratio, DerivedRatios};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractorOptions {
    /// Year that vintage is measured against.
    pub current_year: i32,
    /// Extract the files of a batch on the rayon pool.
    pub parallel: bool,
}

impl Default for ExtractorOptions {
    fn default() -> Self {
        Self {
            current_year: chrono::Local::now().year(),
            parallel: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProbeExtractor {
    catalog: FieldCatalog,
    options: ExtractorOptions,
}

impl ProbeExtractor {
    pub fn new(catalog: FieldCatalog, options: ExtractorOptions) -> Self {
        Self { catalog, options }
    }

    pub fn catalog(&self) -> &FieldCatalog {
        &self.catalog
    }

    pub fn options(&self) -> &ExtractorOptions {
        &self.options
    }

    pub fn extract_file(&self, file: &InputFile) -> Result<CompanyRecord, ExtractError> {
        let start = std::time::Instant::now();
        tracing::info!("Processing file: {} ({}KB)", file.name, file.data.len() / 1024);

        let workbook = WorkbookReader::from_bytes(file.data.clone())?;
        let record = self.extract_workbook(&workbook)?;

        tracing::info!("Summarized {} in {:?}", file.name, start.elapsed());
        Ok(record)
    }

    /// Builds the summary record for one workbook. Only a missing
    /// financial-data sheet is fatal; everything else degrades to absent.
    pub fn extract_workbook(&self, workbook: &RawWorkbook) -> Result<CompanyRecord, ExtractError> {
        let about = workbook.sheet(ABOUT_SHEET);
        if about.is_none() {
            tracing::warn!("Sheet '{}' not found, company metadata left empty", ABOUT_SHEET);
        }
        let metadata = extract_metadata(about, self.options.current_year);

        let financials = workbook.sheet(FINANCIAL_SHEET).ok_or_else(|| ExtractError::MissingSheet {
            name: FINANCIAL_SHEET.to_string(),
        })?;

        let latest = select_latest_column(financials);
        match &latest {
            Some(column) => tracing::debug!("Latest period '{}' in column {}", column.label, column.index),
            None => tracing::warn!("No reporting period header in '{}'", FINANCIAL_SHEET),
        }

        let fields = lookup_fields(financials, latest.as_ref().map(|c| c.index), &self.catalog);
        let ratios = compute_ratios(&fields);

        Ok(assemble_record(metadata, latest, &fields, ratios))
    }
}

fn assemble_record(
    metadata: CompanyMetadata,
    latest: Option<LatestColumn>,
    fields: &FinancialFields,
    ratios: DerivedRatios,
) -> CompanyRecord {
    CompanyRecord {
        company_name: metadata.company_name,
        net_revenue: fields.get(labels::NET_REVENUE),
        gross_margin_pct: fields.get(labels::GROSS_PROFIT_MARGIN),
        ebitda_pct: fields.get(labels::EBITDA_MARGIN),
        depreciation_pct: ratios.depreciation_pct,
        finance_cost_pct: ratios.finance_cost_pct,
        pat_pct: ratios.pat_pct,
        total_outside_liabilities: ratios.total_outside_liabilities,
        tangible_net_worth: ratios.tangible_net_worth,
        current_ratio: fields.get(labels::CURRENT_RATIO),
        tol_tnw: ratios.tol_tnw,
        total_debt: ratios.total_debt,
        debt_ebitda: ratios.debt_ebitda,
        interest_coverage: fields.get(labels::INTEREST_COVERAGE),
        roce_pct: fields.get(labels::ROCE),
        roe_pct: fields.get(labels::ROE),
        fixed_asset_turnover: ratios.fixed_asset_turnover,
        net_fixed_assets: fields.get(labels::TOTAL_NET_FIXED_ASSETS),
        vintage_years: metadata.vintage_years,
        date_of_incorporation: metadata.incorporation_date,
        date_of_report: latest.map(|column| column.label),
    }
}
