//! Utility functions and helpers.

pub mod fs;
pub mod http;
pub mod natural;

pub use natural::compare_unit_names;
