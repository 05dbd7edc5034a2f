//! Group-by reducers for the report pipeline.
//!
//! Groups are accumulated into ordered maps so chart data always comes out
//! ascending by group key, which keeps report output stable across runs.

use ordered_float::OrderedFloat;
use polars::prelude::*;
use std::collections::BTreeMap;

use crate::data::SalesTable;

/// How a group of values collapses to a single number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reducer {
    Mean,
    Sum,
}

#[derive(Default)]
struct Accum {
    sum: f64,
    count: usize,
}

impl Accum {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn finish(&self, reducer: Reducer) -> f64 {
        match reducer {
            Reducer::Sum => self.sum,
            // Groups only exist once a value has been pushed, so count >= 1.
            Reducer::Mean => self.sum / self.count as f64,
        }
    }
}

/// Core group-by-reduce. Rows with a missing key or a missing/NaN value are
/// skipped.
fn group_reduce<K: Ord>(
    height: usize,
    key_at: impl Fn(usize) -> Option<K>,
    value_at: impl Fn(usize) -> Option<f64>,
    reducer: Reducer,
) -> Vec<(K, f64)> {
    let mut groups: BTreeMap<K, Accum> = BTreeMap::new();
    for i in 0..height {
        let (Some(key), Some(value)) = (key_at(i), value_at(i)) else {
            continue;
        };
        if value.is_nan() {
            continue;
        }
        groups.entry(key).or_default().push(value);
    }
    groups
        .into_iter()
        .map(|(key, acc)| (key, acc.finish(reducer)))
        .collect()
}

/// Reduce a measure column grouped by an integer key column (e.g. Year),
/// ascending by key.
pub fn by_int_key(
    table: &SalesTable,
    key_col: &str,
    value_col: &str,
    reducer: Reducer,
) -> PolarsResult<Vec<(i32, f64)>> {
    let df = table.frame();
    let keys = df.column(key_col)?.i32()?;
    let values = df.column(value_col)?.f64()?;
    Ok(group_reduce(
        df.height(),
        |i| keys.get(i),
        |i| values.get(i),
        reducer,
    ))
}

/// Reduce a measure column grouped by a string key column (e.g.
/// Vehicle_Type), ascending lexicographically.
pub fn by_str_key(
    table: &SalesTable,
    key_col: &str,
    value_col: &str,
    reducer: Reducer,
) -> PolarsResult<Vec<(String, f64)>> {
    let df = table.frame();
    let keys = df.column(key_col)?.str()?;
    let values = df.column(value_col)?.f64()?;
    Ok(group_reduce(
        df.height(),
        |i| keys.get(i).map(|s| s.to_string()),
        |i| values.get(i),
        reducer,
    ))
}

/// Reduce a measure column grouped by a (label, numeric) key pair, ordered
/// by label first, then ascending by the numeric part. Used for the
/// unemployment chart, where each vehicle type forms a series over rates.
pub fn by_str_float_key(
    table: &SalesTable,
    label_col: &str,
    rate_col: &str,
    value_col: &str,
    reducer: Reducer,
) -> PolarsResult<Vec<((String, f64), f64)>> {
    let df = table.frame();
    let labels = df.column(label_col)?.str()?;
    let rates = df.column(rate_col)?.f64()?;
    let values = df.column(value_col)?.f64()?;
    let grouped = group_reduce(
        df.height(),
        |i| match (labels.get(i), rates.get(i)) {
            (Some(label), Some(rate)) if !rate.is_nan() => {
                Some((label.to_string(), OrderedFloat(rate)))
            }
            _ => None,
        },
        |i| values.get(i),
        reducer,
    );
    Ok(grouped
        .into_iter()
        .map(|((label, rate), value)| ((label, rate.into_inner()), value))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn table() -> SalesTable {
        let df = df!(
            "Year" => &[2010i32, 2009, 2009, 2010],
            "Vehicle_Type" => &["Sedan", "SUV", "Sedan", "SUV"],
            "unemployment_rate" => &[5.1, 6.5, 6.5, 5.1],
            "Automobile_Sales" => &[40.0, 100.0, 50.0, 200.0],
        )
        .unwrap();
        SalesTable::new(df)
    }

    #[test]
    fn mean_groups_come_out_ascending_by_year() {
        let grouped = by_int_key(&table(), "Year", "Automobile_Sales", Reducer::Mean).unwrap();
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].0, 2009);
        assert_eq!(grouped[1].0, 2010);
        assert_relative_eq!(grouped[0].1, 75.0);
        assert_relative_eq!(grouped[1].1, 120.0);
    }

    #[test]
    fn sum_reducer_totals_each_group() {
        let grouped = by_str_key(&table(), "Vehicle_Type", "Automobile_Sales", Reducer::Sum).unwrap();
        // ASCII order puts "SUV" before "Sedan".
        assert_eq!(grouped[0], ("SUV".to_string(), 300.0));
        assert_eq!(grouped[1], ("Sedan".to_string(), 90.0));
    }

    #[test]
    fn pair_key_orders_by_label_then_rate() {
        let df = df!(
            "Vehicle_Type" => &["Sedan", "SUV", "SUV", "Sedan"],
            "unemployment_rate" => &[6.5, 6.5, 5.1, 5.1],
            "Automobile_Sales" => &[50.0, 100.0, 200.0, 40.0],
        )
        .unwrap();
        let grouped = by_str_float_key(
            &SalesTable::new(df),
            "Vehicle_Type",
            "unemployment_rate",
            "Automobile_Sales",
            Reducer::Mean,
        )
        .unwrap();
        let keys: Vec<(String, f64)> = grouped.iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(
            keys,
            vec![
                ("SUV".to_string(), 5.1),
                ("SUV".to_string(), 6.5),
                ("Sedan".to_string(), 5.1),
                ("Sedan".to_string(), 6.5),
            ]
        );
    }

    #[test]
    fn nan_values_are_skipped() {
        let df = df!(
            "Year" => &[2009i32, 2009, 2009],
            "Automobile_Sales" => &[100.0, f64::NAN, 50.0],
        )
        .unwrap();
        let grouped = by_int_key(
            &SalesTable::new(df),
            "Year",
            "Automobile_Sales",
            Reducer::Mean,
        )
        .unwrap();
        assert_relative_eq!(grouped[0].1, 75.0);
    }

    #[test]
    fn null_keys_are_skipped() {
        let df = df!(
            "Vehicle_Type" => &[Some("SUV"), None, Some("SUV")],
            "Automobile_Sales" => &[100.0, 30.0, 200.0],
        )
        .unwrap();
        let grouped = by_str_key(
            &SalesTable::new(df),
            "Vehicle_Type",
            "Automobile_Sales",
            Reducer::Sum,
        )
        .unwrap();
        assert_eq!(grouped, vec![("SUV".to_string(), 300.0)]);
    }

    #[test]
    fn empty_table_reduces_to_no_groups() {
        let df = df!(
            "Year" => &Vec::<i32>::new(),
            "Automobile_Sales" => &Vec::<f64>::new(),
        )
        .unwrap();
        let grouped = by_int_key(
            &SalesTable::new(df),
            "Year",
            "Automobile_Sales",
            Reducer::Mean,
        )
        .unwrap();
        assert!(grouped.is_empty());
    }
}
