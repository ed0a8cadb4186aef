use once_cell::sync::Lazy;
use regex::Regex;
use smallvec::SmallVec;

pub const FISCAL_YEAR_END_MARKER: &str = "31 Mar";
pub const FISCAL_YEAR_PREFIX: &str = "FY";
pub const YEARS_SHOWN: usize = 3;

static YEAR_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{4})").expect("valid year pattern"));

/// "31 Mar, 2023" becomes "FY23". Anything else comes back unchanged.
pub fn to_fiscal_year_label(header: &str) -> String {
    if header.contains(FISCAL_YEAR_END_MARKER) {
        if let Some(year) = YEAR_PATTERN.captures(header).and_then(|c| c.get(1)) {
            let digits: Vec<char> = year.as_str().chars().collect();
            let short: String = digits[digits.len() - 2..].iter().collect();
            return format!("{}{}", FISCAL_YEAR_PREFIX, short);
        }
    }
    header.to_string()
}

/// A relabeled header and the sheet column it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct YearColumn {
    pub label: String,
    pub index: usize,
}

/// Keeps the "FY" columns, drops repeated labels (leftmost wins), sorts by
/// label and returns the latest three, oldest first.
pub fn select_recent_years(columns: &[YearColumn]) -> SmallVec<[YearColumn; YEARS_SHOWN]> {
    let mut fiscal: Vec<&YearColumn> = Vec::new();
    for column in columns.iter().filter(|c| c.label.starts_with(FISCAL_YEAR_PREFIX)) {
        if fiscal.iter().all(|seen| seen.label != column.label) {
            fiscal.push(column);
        }
    }
    fiscal.sort_by(|a, b| a.label.cmp(&b.label));

    let skip = fiscal.len().saturating_sub(YEARS_SHOWN);
    fiscal.into_iter().skip(skip).cloned().collect()
}
