//! Report module - selection handling and chart generation

mod generator;

pub use generator::{
    compute_charts, year_control_enabled, ReportMode, Selection, RECESSION_LABEL, YEARLY_LABEL,
    YEAR_RANGE,
};
