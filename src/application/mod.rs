//! Application layer: services and use cases
//!
//! This layer applies settings to the domain and owns the only I/O the
//! library performs (reading messages from files).

pub mod error;
pub mod error_ext;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use services::{load_message, ScoreReport, ScoringService};
