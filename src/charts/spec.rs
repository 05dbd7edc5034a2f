//! Chart Specification Types
//! The data contract handed to the external rendering collaborator: chart
//! kind, field roles, and fully materialized data. No styling concerns.

use serde::Serialize;

/// Kind of visual a spec asks the renderer for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
}

/// A value on the x (or category) axis. Serializes untagged, so years come
/// out as numbers and vehicle types as strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AxisValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<i32> for AxisValue {
    fn from(value: i32) -> Self {
        AxisValue::Int(i64::from(value))
    }
}

impl From<i64> for AxisValue {
    fn from(value: i64) -> Self {
        AxisValue::Int(value)
    }
}

impl From<f64> for AxisValue {
    fn from(value: f64) -> Self {
        AxisValue::Float(value)
    }
}

impl From<String> for AxisValue {
    fn from(value: String) -> Self {
        AxisValue::Text(value)
    }
}

impl From<&str> for AxisValue {
    fn from(value: &str) -> Self {
        AxisValue::Text(value.to_string())
    }
}

/// One aggregated data point. `series` is set only for charts that split a
/// measure across a color dimension.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: AxisValue,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
}

impl ChartPoint {
    pub fn new(x: impl Into<AxisValue>, y: f64) -> Self {
        Self {
            x: x.into(),
            y,
            series: None,
        }
    }

    pub fn with_series(x: impl Into<AxisValue>, y: f64, series: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y,
            series: Some(series.into()),
        }
    }
}

/// A complete chart description, decoupled from any plotting library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    /// Dataset column feeding the x axis (categories for pie charts).
    pub x_field: String,
    /// Dataset column the reduced values came from.
    pub y_field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_field: Option<String>,
    /// Axis display overrides; renderers fall back to the field names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_label: Option<String>,
    pub data: Vec<ChartPoint>,
}

impl ChartSpec {
    fn new(
        kind: ChartKind,
        title: impl Into<String>,
        x_field: &str,
        y_field: &str,
        data: Vec<ChartPoint>,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            x_field: x_field.to_string(),
            y_field: y_field.to_string(),
            color_field: None,
            x_label: None,
            y_label: None,
            data,
        }
    }

    pub fn line(
        title: impl Into<String>,
        x_field: &str,
        y_field: &str,
        data: Vec<ChartPoint>,
    ) -> Self {
        Self::new(ChartKind::Line, title, x_field, y_field, data)
    }

    pub fn bar(
        title: impl Into<String>,
        x_field: &str,
        y_field: &str,
        data: Vec<ChartPoint>,
    ) -> Self {
        Self::new(ChartKind::Bar, title, x_field, y_field, data)
    }

    pub fn pie(
        title: impl Into<String>,
        x_field: &str,
        y_field: &str,
        data: Vec<ChartPoint>,
    ) -> Self {
        Self::new(ChartKind::Pie, title, x_field, y_field, data)
    }

    pub fn with_color_field(mut self, field: &str) -> Self {
        self.color_field = Some(field.to_string());
        self
    }

    pub fn with_axis_labels(mut self, x_label: &str, y_label: &str) -> Self {
        self.x_label = Some(x_label.to_string());
        self.y_label = Some(y_label.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_the_shape_renderers_expect() {
        let spec = ChartSpec::line(
            "Yearly Automobile Sales",
            "Year",
            "Automobile_Sales",
            vec![ChartPoint::new(2009, 75.0)],
        );
        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["kind"], "line");
        assert_eq!(value["title"], "Yearly Automobile Sales");
        assert_eq!(value["x_field"], "Year");
        assert_eq!(value["data"][0]["x"], 2009);
        assert_eq!(value["data"][0]["y"], 75.0);
        assert!(value["data"][0].get("series").is_none());
        assert!(value.get("color_field").is_none());
    }

    #[test]
    fn series_and_color_field_round_out_stacked_bars() {
        let spec = ChartSpec::bar(
            "Effect of Unemployment Rate on Vehicle Type and Sales",
            "unemployment_rate",
            "Automobile_Sales",
            vec![ChartPoint::with_series(5.1, 200.0, "SUV")],
        )
        .with_color_field("Vehicle_Type")
        .with_axis_labels("Unemployment Rate", "Average Automobile Sales");

        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["kind"], "bar");
        assert_eq!(value["color_field"], "Vehicle_Type");
        assert_eq!(value["x_label"], "Unemployment Rate");
        assert_eq!(value["data"][0]["x"], 5.1);
        assert_eq!(value["data"][0]["series"], "SUV");
    }
}
