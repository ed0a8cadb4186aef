use std::collections::HashMap;
use crate::services::catalog::FieldCatalog;
use crate::services::excel::Sheet;

/// Catalog fields found in the sheet. A label maps to `None` when its row
/// exists but the cell was not numeric; labels that never appeared are simply
/// missing. Both read back as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FinancialFields {
    values: HashMap<String, Option<f64>>,
}

impl FinancialFields {
    pub fn get(&self, label: &str) -> Option<f64> {
        self.values.get(label).copied().flatten()
    }

    /// Zero-default, for the arithmetic sites only.
    pub fn or_zero(&self, label: &str) -> f64 {
        self.get(label).unwrap_or(0.0)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.values.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn insert(&mut self, label: impl Into<String>, value: Option<f64>) {
        self.values.insert(label.into(), value);
    }
}

/// Reads every catalog row's value out of `column`. With no column, every
/// matched label is present but absent.
pub fn lookup_fields(sheet: &Sheet, column: Option<usize>, catalog: &FieldCatalog) -> FinancialFields {
    let mut fields = FinancialFields::default();

    for row in 0..sheet.height() {
        let label = sheet.row_label(row);
        if !catalog.contains(&label) {
            continue;
        }

        let value = column.and_then(|col| sheet.cell(row, col).as_number());
        if value.is_none() {
            tracing::debug!("No numeric value for '{}' at row {}", label, row);
        }
        // later rows overwrite earlier ones
        fields.insert(label, value);
    }

    fields
}
