use super::lookup::FinancialFields;
use crate::services::catalog::labels;

#[derive(Debug, Clone, PartialEq)]
pub struct DerivedRatios {
    pub total_outside_liabilities: f64,
    pub tangible_net_worth: f64,
    pub tol_tnw: Option<f64>,
    pub total_debt: f64,
    pub debt_ebitda: Option<f64>,
    pub depreciation_pct: Option<f64>,
    pub finance_cost_pct: Option<f64>,
    pub pat_pct: Option<f64>,
    pub fixed_asset_turnover: Option<f64>,
}

/// `numerator / denominator`, or `None` when the denominator is zero or
/// absent. A non-finite quotient is also `None`.
pub fn safe_ratio(numerator: f64, denominator: Option<f64>) -> Option<f64> {
    let denominator = denominator.filter(|d| *d != 0.0)?;
    let ratio = numerator / denominator;
    ratio.is_finite().then_some(ratio)
}

pub fn compute_ratios(fields: &FinancialFields) -> DerivedRatios {
    let net_revenue = fields.or_zero(labels::NET_REVENUE);

    let total_outside_liabilities = fields.or_zero(labels::TOTAL_NON_CURRENT_LIABILITIES)
        + fields.or_zero(labels::TOTAL_CURRENT_LIABILITIES);
    let tangible_net_worth = fields.or_zero(labels::TOTAL_EQUITY) - fields.or_zero(labels::INTANGIBLE_ASSETS);
    let total_debt = fields.or_zero(labels::SHORT_TERM_BORROWINGS) + fields.or_zero(labels::LONG_TERM_BORROWINGS);

    DerivedRatios {
        total_outside_liabilities,
        tangible_net_worth,
        tol_tnw: safe_ratio(total_outside_liabilities, Some(tangible_net_worth)),
        total_debt,
        debt_ebitda: safe_ratio(total_debt, Some(fields.or_zero(labels::EBITDA))),
        depreciation_pct: safe_ratio(fields.or_zero(labels::DEPRECIATION), Some(net_revenue)),
        finance_cost_pct: safe_ratio(fields.or_zero(labels::FINANCE_COSTS), Some(net_revenue)),
        pat_pct: safe_ratio(fields.or_zero(labels::PROFIT_FOR_PERIOD), Some(net_revenue)),
        fixed_asset_turnover: safe_ratio(net_revenue, fields.get(labels::TOTAL_NET_FIXED_ASSETS)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(values: &[(&str, Option<f64>)]) -> FinancialFields {
        let mut fields = FinancialFields::default();
        for (label, value) in values {
            fields.insert(*label, *value);
        }
        fields
    }

    #[test]
    fn tangible_net_worth_and_pat_margin() {
        let ratios = compute_ratios(&fields(&[
            (labels::NET_REVENUE, Some(1000.0)),
            (labels::PROFIT_FOR_PERIOD, Some(100.0)),
            (labels::TOTAL_EQUITY, Some(500.0)),
            (labels::INTANGIBLE_ASSETS, Some(100.0)),
        ]));

        assert_eq!(ratios.tangible_net_worth, 400.0);
        assert_eq!(ratios.pat_pct, Some(0.1));
        assert_eq!(ratios.total_outside_liabilities, 0.0);
        assert_eq!(ratios.tol_tnw, Some(0.0));
    }

    #[test]
    fn zero_ebitda_leaves_debt_ratio_absent() {
        let ratios = compute_ratios(&fields(&[
            (labels::EBITDA, Some(0.0)),
            (labels::SHORT_TERM_BORROWINGS, Some(50.0)),
            (labels::LONG_TERM_BORROWINGS, Some(50.0)),
        ]));

        assert_eq!(ratios.total_debt, 100.0);
        assert_eq!(ratios.debt_ebitda, None);
    }

    #[test]
    fn missing_revenue_leaves_margins_absent() {
        let ratios = compute_ratios(&fields(&[
            (labels::DEPRECIATION, Some(20.0)),
            (labels::FINANCE_COSTS, Some(5.0)),
            (labels::PROFIT_FOR_PERIOD, Some(-3.0)),
            (labels::TOTAL_NET_FIXED_ASSETS, Some(250.0)),
        ]));

        assert_eq!(ratios.depreciation_pct, None);
        assert_eq!(ratios.finance_cost_pct, None);
        assert_eq!(ratios.pat_pct, None);
        assert_eq!(ratios.fixed_asset_turnover, Some(0.0));
    }

    #[test]
    fn non_numeric_denominators_are_absent() {
        let ratios = compute_ratios(&fields(&[
            (labels::NET_REVENUE, Some(1000.0)),
            (labels::TOTAL_NET_FIXED_ASSETS, None),
            (labels::TOTAL_EQUITY, Some(100.0)),
            (labels::INTANGIBLE_ASSETS, Some(100.0)),
            (labels::TOTAL_CURRENT_LIABILITIES, Some(40.0)),
        ]));

        assert_eq!(ratios.fixed_asset_turnover, None);
        assert_eq!(ratios.tangible_net_worth, 0.0);
        assert_eq!(ratios.tol_tnw, None);
    }

    #[test]
    fn full_statement() {
        let ratios = compute_ratios(&fields(&[
            (labels::NET_REVENUE, Some(2000.0)),
            (labels::DEPRECIATION, Some(100.0)),
            (labels::FINANCE_COSTS, Some(50.0)),
            (labels::PROFIT_FOR_PERIOD, Some(200.0)),
            (labels::TOTAL_NON_CURRENT_LIABILITIES, Some(300.0)),
            (labels::TOTAL_CURRENT_LIABILITIES, Some(200.0)),
            (labels::TOTAL_EQUITY, Some(1100.0)),
            (labels::INTANGIBLE_ASSETS, Some(100.0)),
            (labels::SHORT_TERM_BORROWINGS, Some(150.0)),
            (labels::LONG_TERM_BORROWINGS, Some(250.0)),
            (labels::EBITDA, Some(400.0)),
            (labels::TOTAL_NET_FIXED_ASSETS, Some(800.0)),
        ]));

        assert_eq!(ratios.total_outside_liabilities, 500.0);
        assert_eq!(ratios.tangible_net_worth, 1000.0);
        assert_eq!(ratios.tol_tnw, Some(0.5));
        assert_eq!(ratios.total_debt, 400.0);
        assert_eq!(ratios.debt_ebitda, Some(1.0));
        assert_eq!(ratios.depreciation_pct, Some(0.05));
        assert_eq!(ratios.finance_cost_pct, Some(0.025));
        assert_eq!(ratios.pat_pct, Some(0.1));
        assert_eq!(ratios.fixed_asset_turnover, Some(2.5));
    }

    #[test]
    fn safe_ratio_never_returns_non_finite() {
        assert_eq!(safe_ratio(1.0, Some(0.0)), None);
        assert_eq!(safe_ratio(1.0, Some(-0.0)), None);
        assert_eq!(safe_ratio(1.0, None), None);
        assert_eq!(safe_ratio(f64::MAX, Some(f64::MIN_POSITIVE)), None);
        assert_eq!(safe_ratio(3.0, Some(2.0)), Some(1.5));
    }
}
