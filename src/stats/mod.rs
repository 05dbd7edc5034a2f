//! Stats module - ordered group-by aggregation

mod aggregator;

pub use aggregator::{by_int_key, by_str_float_key, by_str_key, Reducer};
