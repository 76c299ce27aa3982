//! Scoring service
//!
//! Applies the scoring settings to a candidate/reference message pair.

use std::path::Path;

use tracing::{debug, info, instrument};

use crate::application::{ApplicationResult, IoResultExt};
use crate::config::ScoringConfig;
use crate::domain::{abstract_names, parse, trees_equal, tree_accuracy, tree_f_score};

/// Scores of one generated message against its reference.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreReport {
    pub equal: bool,
    pub accuracy: f64,
    pub f_score: f64,
    /// Whether the F-score compared structure only
    pub abstract_names: bool,
}

/// Service for comparing generated messages against references.
pub struct ScoringService {
    config: ScoringConfig,
}

impl ScoringService {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Score `candidate` against `reference` with the configured settings.
    pub fn score(&self, candidate: &str, reference: &str) -> ScoreReport {
        self.score_with(candidate, reference, None)
    }

    /// Score with an optional override of the configured name abstraction.
    ///
    /// Each message is parsed once; the F-score works on abstracted copies
    /// when abstraction is on.
    #[instrument(level = "debug", skip(self))]
    pub fn score_with(
        &self,
        candidate: &str,
        reference: &str,
        abstract_names_override: Option<bool>,
    ) -> ScoreReport {
        let abstract_power_names = abstract_names_override.unwrap_or(self.config.abstract_names);
        let candidate_tree = parse(candidate);
        let reference_tree = parse(reference);

        let equal = trees_equal(Some(&candidate_tree), Some(&reference_tree));
        let accuracy = tree_accuracy(&candidate_tree, &reference_tree);
        let f_score = if abstract_power_names {
            let (mut candidate_tree, mut reference_tree) = (candidate_tree, reference_tree);
            abstract_names(&mut candidate_tree);
            abstract_names(&mut reference_tree);
            tree_f_score(&candidate_tree, &reference_tree)
        } else {
            tree_f_score(&candidate_tree, &reference_tree)
        };

        info!(equal, accuracy, f_score, "scored message");
        ScoreReport {
            equal,
            accuracy,
            f_score,
            abstract_names: abstract_power_names,
        }
    }
}

/// Read a message from `path`, trimming surrounding whitespace.
pub fn load_message(path: &Path) -> ApplicationResult<String> {
    debug!("load_message: {}", path.display());
    let content = std::fs::read_to_string(path).with_path_context("read message", path)?;
    Ok(content.trim().to_string())
}
