mod aggregate;
mod scorer;
mod signal;

pub use aggregate::{UserStats, aggregate};
pub use scorer::{MAX_SCORE, ScoredRepository, evaluate, score, score_repository};
pub use signal::Signal;
