use chrono::{Datelike, NaiveDate};
use crate::services::excel::Sheet;

pub const INCORPORATION_LABEL: &str = "Date of Incorporation";
const INCORPORATION_FORMAT: &str = "%d %b, %Y";

/// Incorporation year as read from the sheet. A date that does not parse is
/// kept verbatim rather than dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum IncorporationYear {
    Parsed(i32),
    Unparsed(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyMetadata {
    pub company_name: Option<String>,
    pub incorporation_date: Option<String>,
    pub incorporation_year: Option<IncorporationYear>,
    pub vintage_years: Option<i32>,
}

/// Reads identity and vintage from the "About the Company" sheet.
///
/// Never fails: a missing sheet, label or date just leaves fields empty.
pub fn extract_metadata(sheet: Option<&Sheet>, current_year: i32) -> CompanyMetadata {
    let Some(sheet) = sheet else {
        return CompanyMetadata::default();
    };

    let name_cell = sheet.cell(0, 1);
    let company_name = (!name_cell.is_blank()).then(|| name_cell.text());

    let incorporation_date = (0..sheet.height())
        .find(|&row| sheet.row_label(row) == INCORPORATION_LABEL)
        .map(|row| sheet.cell(row, 1).trimmed_text())
        .filter(|date| !date.is_empty());

    let (incorporation_year, vintage_years) = match incorporation_date.as_deref() {
        Some(date) => match NaiveDate::parse_from_str(date, INCORPORATION_FORMAT) {
            Ok(parsed) => (
                Some(IncorporationYear::Parsed(parsed.year())),
                Some(current_year - parsed.year()),
            ),
            Err(e) => {
                tracing::warn!("Could not parse incorporation date '{}': {}", date, e);
                (Some(IncorporationYear::Unparsed(date.to_string())), None)
            }
        },
        None => (None, None),
    };

    CompanyMetadata {
        company_name,
        incorporation_date,
        incorporation_year,
        vintage_years,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::excel::CellValue;

    fn about_sheet(date: CellValue) -> Sheet {
        Sheet::new(
            "About the Company",
            vec![
                vec![CellValue::Text("Company".into()), CellValue::Text("Acme Industries Ltd".into())],
                vec![CellValue::Text("CIN".into()), CellValue::Text("U12345".into())],
                vec![CellValue::Text("  Date of Incorporation ".into()), date],
            ],
        )
    }

    #[test]
    fn parses_vintage_from_incorporation_date() {
        let sheet = about_sheet(CellValue::Text(" 05 Jun, 1998 ".into()));
        let meta = extract_metadata(Some(&sheet), 2024);

        assert_eq!(meta.company_name.as_deref(), Some("Acme Industries Ltd"));
        assert_eq!(meta.incorporation_date.as_deref(), Some("05 Jun, 1998"));
        assert_eq!(meta.incorporation_year, Some(IncorporationYear::Parsed(1998)));
        assert_eq!(meta.vintage_years, Some(26));
    }

    #[test]
    fn unparseable_date_is_kept_raw() {
        let sheet = about_sheet(CellValue::Text("1998-06-05".into()));
        let meta = extract_metadata(Some(&sheet), 2024);

        assert_eq!(meta.incorporation_date.as_deref(), Some("1998-06-05"));
        assert_eq!(meta.incorporation_year, Some(IncorporationYear::Unparsed("1998-06-05".into())));
        assert_eq!(meta.vintage_years, None);
    }

    #[test]
    fn missing_label_leaves_dates_absent() {
        let sheet = Sheet::new(
            "About the Company",
            vec![vec![CellValue::Empty, CellValue::Text("Nameless Co".into())]],
        );
        let meta = extract_metadata(Some(&sheet), 2024);

        assert_eq!(meta.company_name.as_deref(), Some("Nameless Co"));
        assert_eq!(meta.incorporation_date, None);
        assert_eq!(meta.incorporation_year, None);
        assert_eq!(meta.vintage_years, None);
    }

    #[test]
    fn missing_sheet_yields_empty_metadata() {
        assert_eq!(extract_metadata(None, 2024), CompanyMetadata::default());
    }
}
