//! Report Generator
//! Turns one user selection into the ordered chart specifications for that
//! report, aggregating the shared sales table on every request.

use polars::prelude::PolarsResult;
use std::ops::RangeInclusive;

use crate::charts::{ChartPoint, ChartSpec};
use crate::data::{
    SalesTable, COL_AD_SPEND, COL_MONTH, COL_SALES, COL_UNEMPLOYMENT, COL_VEHICLE_TYPE, COL_YEAR,
};
use crate::stats::{self, Reducer};

/// Dropdown labels offered by the UI collaborator.
pub const YEARLY_LABEL: &str = "Yearly Statistics";
pub const RECESSION_LABEL: &str = "Recession Period Statistics";

/// Years the yearly report accepts.
pub const YEAR_RANGE: RangeInclusive<i32> = 1980..=2023;

/// The two report types the dashboard offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    Yearly,
    RecessionPeriod,
}

impl ReportMode {
    /// Parse a dropdown value. Accepts the full label or a short alias;
    /// anything else is not a report type.
    pub fn from_label(label: &str) -> Option<ReportMode> {
        match label.trim() {
            YEARLY_LABEL | "Yearly" => Some(ReportMode::Yearly),
            RECESSION_LABEL | "Recession" => Some(ReportMode::RecessionPeriod),
            _ => None,
        }
    }
}

/// Whether the year control should be usable for the given dropdown value.
pub fn year_control_enabled(label: &str) -> bool {
    matches!(ReportMode::from_label(label), Some(ReportMode::Yearly))
}

/// One resolved user selection.
///
/// `Unset` covers the initial placeholder state and any unrecognized
/// dropdown value, so the pipeline can match exhaustively instead of
/// sniffing for empty strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Unset,
    Yearly { year: Option<i32> },
    RecessionPeriod,
}

impl Selection {
    /// Build a selection from the raw control values. A year outside the
    /// dropdown range is discarded rather than reported as an error; the
    /// request boundary never fails on bad input.
    pub fn from_inputs(report_label: Option<&str>, year: Option<i32>) -> Selection {
        match report_label.and_then(ReportMode::from_label) {
            Some(ReportMode::Yearly) => Selection::Yearly {
                year: year.filter(|y| YEAR_RANGE.contains(y)),
            },
            Some(ReportMode::RecessionPeriod) => Selection::RecessionPeriod,
            None => Selection::Unset,
        }
    }
}

/// Compute the dashboard charts for one selection.
///
/// Pure with respect to its inputs: the same table and selection always
/// produce the same specs, and no selection is remembered between calls.
/// Selections that cannot drive a report yield an empty sequence.
pub fn compute_charts(table: &SalesTable, selection: Selection) -> PolarsResult<Vec<ChartSpec>> {
    match selection {
        Selection::RecessionPeriod => recession_charts(table),
        Selection::Yearly { year: Some(year) } => yearly_charts(table, year),
        Selection::Yearly { year: None } | Selection::Unset => Ok(Vec::new()),
    }
}

fn recession_charts(table: &SalesTable) -> PolarsResult<Vec<ChartSpec>> {
    let recession = table.recession_only()?;
    tracing::debug!(rows = recession.height(), "building recession period report");

    let yearly_trend = stats::by_int_key(&recession, COL_YEAR, COL_SALES, Reducer::Mean)?;
    let sales_by_type = stats::by_str_key(&recession, COL_VEHICLE_TYPE, COL_SALES, Reducer::Mean)?;
    let ad_share = stats::by_str_key(&recession, COL_VEHICLE_TYPE, COL_AD_SPEND, Reducer::Sum)?;
    let by_unemployment = stats::by_str_float_key(
        &recession,
        COL_VEHICLE_TYPE,
        COL_UNEMPLOYMENT,
        COL_SALES,
        Reducer::Mean,
    )?;

    Ok(vec![
        ChartSpec::line(
            "Average Automobile Sales Fluctuation Over Recession Period",
            COL_YEAR,
            COL_SALES,
            yearly_trend
                .into_iter()
                .map(|(year, mean)| ChartPoint::new(year, mean))
                .collect(),
        ),
        ChartSpec::bar(
            "Average Vehicles Sold by Vehicle Type During Recession",
            COL_VEHICLE_TYPE,
            COL_SALES,
            sales_by_type
                .into_iter()
                .map(|(vehicle, mean)| ChartPoint::new(vehicle, mean))
                .collect(),
        ),
        ChartSpec::pie(
            "Advertising Expenditure Share by Vehicle Type During Recession",
            COL_VEHICLE_TYPE,
            COL_AD_SPEND,
            ad_share
                .into_iter()
                .map(|(vehicle, total)| ChartPoint::new(vehicle, total))
                .collect(),
        ),
        ChartSpec::bar(
            "Effect of Unemployment Rate on Vehicle Type and Sales",
            COL_UNEMPLOYMENT,
            COL_SALES,
            by_unemployment
                .into_iter()
                .map(|((vehicle, rate), mean)| ChartPoint::with_series(rate, mean, vehicle))
                .collect(),
        )
        .with_color_field(COL_VEHICLE_TYPE)
        .with_axis_labels("Unemployment Rate", "Average Automobile Sales"),
    ])
}

fn yearly_charts(table: &SalesTable, year: i32) -> PolarsResult<Vec<ChartSpec>> {
    let selected = table.for_year(year)?;
    tracing::debug!(year, rows = selected.height(), "building yearly report");

    // The all-years trend reads the full table on purpose, so the first
    // chart shows the same overview whichever year is picked.
    let trend = stats::by_int_key(table, COL_YEAR, COL_SALES, Reducer::Mean)?;
    let monthly = stats::by_str_key(&selected, COL_MONTH, COL_SALES, Reducer::Sum)?;
    let by_type = stats::by_str_key(&selected, COL_VEHICLE_TYPE, COL_SALES, Reducer::Mean)?;
    let ad_totals = stats::by_str_key(&selected, COL_VEHICLE_TYPE, COL_AD_SPEND, Reducer::Sum)?;

    Ok(vec![
        ChartSpec::line(
            "Yearly Automobile Sales",
            COL_YEAR,
            COL_SALES,
            trend
                .into_iter()
                .map(|(y, mean)| ChartPoint::new(y, mean))
                .collect(),
        ),
        ChartSpec::line(
            "Total Monthly Automobile Sales",
            COL_MONTH,
            COL_SALES,
            monthly
                .into_iter()
                .map(|(month, total)| ChartPoint::new(month, total))
                .collect(),
        ),
        ChartSpec::bar(
            format!("Average Vehicles Sold by Vehicle Type in {year}"),
            COL_VEHICLE_TYPE,
            COL_SALES,
            by_type
                .into_iter()
                .map(|(vehicle, mean)| ChartPoint::new(vehicle, mean))
                .collect(),
        ),
        ChartSpec::pie(
            format!("Total Advertisement Expenditure per Vehicle Type in {year}"),
            COL_VEHICLE_TYPE,
            COL_AD_SPEND,
            ad_totals
                .into_iter()
                .map(|(vehicle, total)| ChartPoint::new(vehicle, total))
                .collect(),
        ),
    ])
}
