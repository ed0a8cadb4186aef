//! Series a chart renderer needs to draw the three-year combo chart: grouped
//! bars for the amounts, two lines on a secondary axis for the margins.

use serde::Serialize;
use crate::models::{ThreeYearTable, YearRow};

pub const CHART_TITLE: &str = "Financial Performance (Last 3 FYs)";
pub const PRIMARY_AXIS_LABEL: &str = "INR (₹ Cr)";
pub const SECONDARY_AXIS_LABEL: &str = "Percentage (%)";
pub const BAR_WIDTH: f64 = 0.2;

type Metric = fn(&YearRow) -> Option<f64>;

fn net_revenue(row: &YearRow) -> Option<f64> {
    row.net_revenue
}

fn total_equity(row: &YearRow) -> Option<f64> {
    row.total_equity
}

fn debt(row: &YearRow) -> Option<f64> {
    row.debt
}

fn net_fixed_asset(row: &YearRow) -> Option<f64> {
    row.net_fixed_asset
}

fn ebitda_pct(row: &YearRow) -> Option<f64> {
    row.ebitda_pct
}

fn pat_pct(row: &YearRow) -> Option<f64> {
    row.pat_pct
}

// name, color, offset in bar widths, value
const BARS: [(&str, &str, f64, Metric); 4] = [
    ("Net Revenue", "teal", -1.5, net_revenue),
    ("Total Equity", "navy", -0.5, total_equity),
    ("Debt", "lightsteelblue", 0.5, debt),
    ("Net Fixed Asset", "indigo", 1.5, net_fixed_asset),
];

const LINES: [(&str, &str, Metric); 2] = [
    ("EBITDA %", "powderblue", ebitda_pct),
    ("PAT %", "limegreen", pat_pct),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: f64,
    pub value: Option<f64>,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSeries {
    pub name: String,
    pub color: String,
    pub width: f64,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    pub name: String,
    pub color: String,
    pub marker: String,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub title: String,
    pub x_labels: Vec<String>,
    pub primary_axis_label: String,
    pub secondary_axis_label: String,
    pub bars: Vec<BarSeries>,
    pub lines: Vec<LineSeries>,
}

impl ChartData {
    pub fn from_table(table: &ThreeYearTable) -> Self {
        let bars = BARS
            .iter()
            .map(|(name, color, offset, metric)| BarSeries {
                name: name.to_string(),
                color: color.to_string(),
                width: BAR_WIDTH,
                points: table
                    .rows
                    .iter()
                    .enumerate()
                    .map(|(i, row)| {
                        let value = metric(row);
                        ChartPoint {
                            x: i as f64 + offset * BAR_WIDTH,
                            value,
                            label: value.map(|v| format!("{:.0}", v)),
                        }
                    })
                    .collect(),
            })
            .collect();

        let lines = LINES
            .iter()
            .map(|(name, color, metric)| LineSeries {
                name: name.to_string(),
                color: color.to_string(),
                marker: "o".to_string(),
                points: table
                    .rows
                    .iter()
                    .enumerate()
                    .map(|(i, row)| {
                        let value = metric(row);
                        ChartPoint {
                            x: i as f64,
                            value,
                            label: value.map(|v| format!("{:.0}%", v)),
                        }
                    })
                    .collect(),
            })
            .collect();

        Self {
            title: CHART_TITLE.to_string(),
            x_labels: table.rows.iter().map(|row| row.year.clone()).collect(),
            primary_axis_label: PRIMARY_AXIS_LABEL.to_string(),
            secondary_axis_label: SECONDARY_AXIS_LABEL.to_string(),
            bars,
            lines,
        }
    }
}
