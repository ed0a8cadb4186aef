//! Row labels the extractors recognise in the financial-data sheet.
//!
//! Matching is exact on trimmed text, so upstream label drift breaks lookups
//! silently. The catalog is versioned data and can be swapped out from a JSON
//! file without touching code.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use crate::error::ExtractError;

pub const ABOUT_SHEET: &str = "About the Company";
pub const FINANCIAL_SHEET: &str = "Standalone Financial Data";

pub const BUILTIN_CATALOG_VERSION: &str = "probe-2024.1";

pub mod labels {
    pub const NET_REVENUE: &str = "Net Revenue";
    pub const COST_OF_MATERIALS: &str = "Cost of Materials Consumed";
    pub const GROSS_PROFIT_MARGIN: &str = "Gross Profit Margin (%)";
    pub const EBITDA_MARGIN: &str = "EBITDA Margin (%)";
    pub const DEPRECIATION: &str = "Depreciation and Amortization Expense";
    pub const FINANCE_COSTS: &str = "Finance Costs";
    pub const PROFIT_FOR_PERIOD: &str = "Profit for the Period";
    pub const TOTAL_NON_CURRENT_LIABILITIES: &str = "Total Non-current Liabilities";
    pub const TOTAL_CURRENT_LIABILITIES: &str = "Total Current Liabilities";
    pub const TOTAL_EQUITY: &str = "Total Equity";
    pub const INTANGIBLE_ASSETS: &str = "Intangible Assets";
    pub const CURRENT_RATIO: &str = "Current Ratio";
    pub const SHORT_TERM_BORROWINGS: &str = "Short Term Borrowings";
    pub const LONG_TERM_BORROWINGS: &str = "Long Term Borrowings";
    pub const EBITDA: &str = "Operating Profit ( EBITDA )";
    pub const INTEREST_COVERAGE: &str = "Interest Coverage Ratio";
    pub const PAYABLES_DAYS: &str = "Payables / Sales (Days)";
    pub const DEBTORS_DAYS: &str = "Debtors / Sales (Days)";
    pub const INVENTORY_DAYS: &str = "Inventory / Sales (Days)";
    pub const CASH_CONVERSION_CYCLE: &str = "Cash Conversion Cycle (Days)";
    pub const ROCE: &str = "Return on Capital Employed (%)";
    pub const ROE: &str = "Return on Equity (%)";
    pub const TOTAL_NET_FIXED_ASSETS: &str = "Total Net Fixed Assets";
}

const BUILTIN_FIELDS: [&str; 23] = [
    labels::NET_REVENUE,
    labels::COST_OF_MATERIALS,
    labels::GROSS_PROFIT_MARGIN,
    labels::EBITDA_MARGIN,
    labels::DEPRECIATION,
    labels::FINANCE_COSTS,
    labels::PROFIT_FOR_PERIOD,
    labels::TOTAL_NON_CURRENT_LIABILITIES,
    labels::TOTAL_CURRENT_LIABILITIES,
    labels::TOTAL_EQUITY,
    labels::INTANGIBLE_ASSETS,
    labels::CURRENT_RATIO,
    labels::SHORT_TERM_BORROWINGS,
    labels::LONG_TERM_BORROWINGS,
    labels::EBITDA,
    labels::INTEREST_COVERAGE,
    labels::PAYABLES_DAYS,
    labels::DEBTORS_DAYS,
    labels::INVENTORY_DAYS,
    labels::CASH_CONVERSION_CYCLE,
    labels::ROCE,
    labels::ROE,
    labels::TOTAL_NET_FIXED_ASSETS,
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldCatalog {
    version: String,
    fields: Vec<String>,
}

impl Default for FieldCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FieldCatalog {
    pub fn builtin() -> Self {
        Self {
            version: BUILTIN_CATALOG_VERSION.to_string(),
            fields: BUILTIN_FIELDS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Parses `{ "version": "...", "fields": ["...", ...] }`.
    pub fn from_json(json: &str) -> Result<Self, ExtractError> {
        let mut catalog: FieldCatalog = serde_json::from_str(json)
            .map_err(|e| ExtractError::Catalog(e.to_string()))?;

        catalog.fields = catalog
            .fields
            .iter()
            .map(|field| field.trim().to_string())
            .filter(|field| !field.is_empty())
            .collect();
        let mut seen = HashSet::new();
        catalog.fields.retain(|field| seen.insert(field.clone()));

        if catalog.fields.is_empty() {
            return Err(ExtractError::Catalog("catalog lists no fields".to_string()));
        }
        if catalog.version.trim().is_empty() {
            return Err(ExtractError::Catalog("catalog version is empty".to_string()));
        }

        Ok(catalog)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ExtractError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| ExtractError::Catalog(format!("{}: {}", path.display(), e)))?;
        let catalog = Self::from_json(&json)?;
        tracing::info!(
            "Loaded field catalog {} ({} fields) from {}",
            catalog.version,
            catalog.fields.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn contains(&self, label: &str) -> bool {
        self.fields.iter().any(|field| field == label)
    }
}
