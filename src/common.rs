pub mod coerce;
pub mod date_utils;
pub mod error;
pub mod money;
