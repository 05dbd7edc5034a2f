//! Charts module - renderer-agnostic chart specifications

mod spec;

pub use spec::{AxisValue, ChartKind, ChartPoint, ChartSpec};
