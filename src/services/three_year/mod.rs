//! Multi-year reshaper: the latest three fiscal years of one report, one row
//! per year.

pub mod chart;
pub mod relabel;

use crate::error::ExtractError;
use crate::models::{ThreeYearReport, ThreeYearTable, YearRow};
use crate::services::catalog::{labels, FINANCIAL_SHEET};
use crate::services::excel::{Sheet, WorkbookReader};
use crate::services::probe::InputFile;

pub use chart::ChartData;
pub use relabel::{select_recent_years, to_fiscal_year_label, YearColumn};

pub const LINE_ITEMS: [&str; 7] = [
    labels::NET_REVENUE,
    labels::TOTAL_EQUITY,
    labels::LONG_TERM_BORROWINGS,
    labels::SHORT_TERM_BORROWINGS,
    labels::EBITDA_MARGIN,
    labels::PROFIT_FOR_PERIOD,
    labels::TOTAL_NET_FIXED_ASSETS,
];

/// Row index of every line item, first occurrence wins.
fn locate_line_items(sheet: &Sheet) -> Result<[usize; 7], ExtractError> {
    let mut found = [None; 7];
    for row in 1..sheet.height() {
        let label = sheet.row_label(row);
        if let Some(slot) = LINE_ITEMS.iter().position(|item| *item == label) {
            if found[slot].is_none() {
                found[slot] = Some(row);
            }
        }
    }

    let mut rows = [0; 7];
    for (slot, row) in found.iter().enumerate() {
        rows[slot] = row.ok_or_else(|| ExtractError::MissingLineItem {
            label: LINE_ITEMS[slot].to_string(),
        })?;
    }
    Ok(rows)
}

/// Reshapes the financial-data sheet into the three-year table.
///
/// Debt and PAT % are computed without a zero guard: a zero revenue gives
/// an infinite or NaN margin. A non-numeric cell leaves the value absent.
pub fn reshape_three_years(sheet: &Sheet) -> Result<ThreeYearTable, ExtractError> {
    let headers: Vec<YearColumn> = (1..sheet.width())
        .map(|index| YearColumn {
            label: to_fiscal_year_label(&sheet.cell(0, index).text()),
            index,
        })
        .collect();

    let years = select_recent_years(&headers);
    tracing::debug!(
        "Selected fiscal years: {:?}",
        years.iter().map(|y| y.label.as_str()).collect::<Vec<_>>()
    );

    let [revenue, equity, long_term, short_term, ebitda_margin, profit, fixed_assets] = locate_line_items(sheet)?;
    let value = |row: usize, col: usize| sheet.cell(row, col).as_number();

    let rows = years
        .iter()
        .map(|year| {
            let col = year.index;
            let net_revenue = value(revenue, col);
            let debt = value(long_term, col).zip(value(short_term, col)).map(|(lt, st)| lt + st);
            let pat_pct = value(profit, col).zip(net_revenue).map(|(p, r)| p / r * 100.0);

            YearRow {
                year: year.label.clone(),
                net_revenue,
                total_equity: value(equity, col),
                debt,
                net_fixed_asset: value(fixed_assets, col),
                ebitda_pct: value(ebitda_margin, col),
                pat_pct,
            }
        })
        .collect();

    Ok(ThreeYearTable::new(rows))
}

/// Table plus chart series for one uploaded report.
pub fn process_three_years(file: &InputFile) -> Result<ThreeYearReport, ExtractError> {
    let start = std::time::Instant::now();
    tracing::info!("Building three-year view for {}", file.name);

    let workbook = WorkbookReader::from_bytes(file.data.clone())?;
    let sheet = workbook.sheet(FINANCIAL_SHEET).ok_or_else(|| ExtractError::MissingSheet {
        name: FINANCIAL_SHEET.to_string(),
    })?;

    let table = reshape_three_years(sheet)?;
    let chart = ChartData::from_table(&table);

    tracing::info!("Three-year view for {} ({} years) built in {:?}", file.name, table.len(), start.elapsed());
    Ok(ThreeYearReport { table, chart })
}
