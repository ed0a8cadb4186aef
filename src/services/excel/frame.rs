use super::types::CellValue;
use crate::models::ReportRow;
use polars::prelude::*;

/// Lays report rows out as a DataFrame. A column whose cells are all numeric
/// or empty becomes a nullable f64 column; anything else is a string column.
pub fn to_dataframe<R: ReportRow>(rows: &[R]) -> PolarsResult<DataFrame> {
    let cells: Vec<Vec<CellValue>> = rows.iter().map(ReportRow::cells).collect();
    let empty = CellValue::Empty;
    let mut columns = Vec::with_capacity(R::COLUMNS.len());

    for (col_idx, header) in R::COLUMNS.iter().enumerate() {
        let values: Vec<&CellValue> = cells
            .iter()
            .map(|row| row.get(col_idx).unwrap_or(&empty))
            .collect();

        let numeric = values
            .iter()
            .all(|v| matches!(v, CellValue::Number(_) | CellValue::Empty));

        let series = if numeric {
            let nums: Vec<Option<f64>> = values.iter().map(|v| v.as_number()).collect();
            Series::new(header, nums)
        } else {
            let strings: Vec<Option<String>> = values
                .iter()
                .map(|v| if v.is_blank() { None } else { Some(v.text()) })
                .collect();
            Series::new(header, strings)
        };

        columns.push(series);
    }

    DataFrame::new(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CompanyRecord, SummaryTable};

    fn record(name: &str, revenue: Option<f64>) -> CompanyRecord {
        CompanyRecord {
            company_name: Some(name.to_string()),
            net_revenue: revenue,
            gross_margin_pct: None,
            ebitda_pct: None,
            depreciation_pct: None,
            finance_cost_pct: None,
            pat_pct: None,
            total_outside_liabilities: 0.0,
            tangible_net_worth: 0.0,
            current_ratio: None,
            tol_tnw: None,
            total_debt: 0.0,
            debt_ebitda: None,
            interest_coverage: None,
            roce_pct: None,
            roe_pct: None,
            fixed_asset_turnover: None,
            net_fixed_assets: None,
            vintage_years: Some(12),
            date_of_incorporation: None,
            date_of_report: Some("Mar 2024".to_string()),
        }
    }

    #[test]
    fn summary_frame_keeps_column_names_and_types() {
        let table = SummaryTable::new(vec![record("Acme", Some(1000.0)), record("Globex", None)]);
        let df = table.to_dataframe().unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 21);
        assert_eq!(df.get_column_names()[0], "Company Name");
        assert_eq!(df.column("Net Revenue").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("Net Revenue").unwrap().null_count(), 1);
        assert_eq!(df.column("Company Name").unwrap().dtype(), &DataType::String);
    }
}
