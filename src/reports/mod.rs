//! Console report generation for user analyses

mod console;

pub use console::{generate_comparison, generate_separator, generate_user};
