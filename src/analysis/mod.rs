mod analyzer;
mod error;

pub use analyzer::{Analyzer, UserAnalysis};
pub use error::AnalyzeError;
