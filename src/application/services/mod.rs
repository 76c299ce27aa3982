//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.

mod scoring;

pub use scoring::{load_message, ScoreReport, ScoringService};
