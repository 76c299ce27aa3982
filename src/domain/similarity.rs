//! Similarity scores between two canonical trees.
//!
//! Both scores are approximations that callers rely on as-is:
//! accuracy pairs children by position and ignores surplus children on the
//! longer side, and the F-score counts every pattern of `a` found anywhere in
//! `b`, so duplicates on the `a` side each count as a hit.

use generational_arena::Index;
use itertools::Itertools;
use std::collections::HashSet;
use tracing::{debug, instrument};

use crate::domain::arena::DaideTree;
use crate::domain::canon::parse;
use crate::domain::vocabulary::{self, POWER_PLACEHOLDER, PROVINCE_PLACEHOLDER};

/// Fraction of nodes in `a` whose positional counterpart in `b` has the same
/// name and the same number of children.
pub fn tree_accuracy(a: &DaideTree, b: &DaideTree) -> f64 {
    let (matches, total) = count_matches(a, a.root(), b, b.root());
    debug!(matches, total, "accuracy");
    matches as f64 / total as f64
}

fn count_matches(a: &DaideTree, a_idx: Index, b: &DaideTree, b_idx: Index) -> (usize, usize) {
    let (a_children, b_children) = (a.children(a_idx), b.children(b_idx));
    let mut matches = usize::from(a.name(a_idx) == b.name(b_idx) && a_children.len() == b_children.len());
    let mut total = 1;
    for (&ac, &bc) in a_children.iter().zip(b_children) {
        let (m, t) = count_matches(a, ac, b, bc);
        matches += m;
        total += t;
    }
    (matches, total)
}

/// Parses both messages and scores them with [`tree_accuracy`].
#[instrument(level = "debug")]
pub fn accuracy(a: &str, b: &str) -> f64 {
    tree_accuracy(&parse(a), &parse(b))
}

/// Pre-order list of parent-children patterns: `name` for a leaf,
/// `name-child-child...` (direct child names) for an inner node.
pub fn subtree_patterns(tree: &DaideTree) -> Vec<String> {
    tree.iter()
        .map(|(_, node)| {
            if node.children.is_empty() {
                node.data.name.clone()
            } else {
                let children = node.children.iter().map(|&c| tree.name(c)).join("-");
                format!("{}-{}", node.data.name, children)
            }
        })
        .collect()
}

/// Replaces power codes with `POWER` and province codes with `PROVINCE`,
/// then re-derives the labels of every node created from a parenthesis.
#[instrument(level = "debug", skip(tree))]
pub fn abstract_names(tree: &mut DaideTree) {
    let order: Vec<Index> = tree.iter_postorder().map(|(idx, _)| idx).collect();
    for idx in order {
        let name = tree.name(idx);
        if vocabulary::is_power(name) {
            tree.rename(idx, POWER_PLACEHOLDER);
        } else if vocabulary::is_province(name) {
            tree.rename(idx, PROVINCE_PLACEHOLDER);
        } else if tree.data(idx).from_group_token() {
            let joined = tree.children(idx).iter().map(|&c| tree.name(c)).join("-");
            tree.rename(idx, joined);
        }
    }
}

/// Harmonic mean of pattern precision and recall between `a` and `b`.
pub fn tree_f_score(a: &DaideTree, b: &DaideTree) -> f64 {
    let patterns_a = subtree_patterns(a);
    let patterns_b = subtree_patterns(b);
    let present_in_b: HashSet<&str> = patterns_b.iter().map(String::as_str).collect();

    let true_positives = patterns_a
        .iter()
        .filter(|p| present_in_b.contains(p.as_str()))
        .count();
    let precision = true_positives as f64 / patterns_a.len() as f64;
    let recall = true_positives as f64 / patterns_b.len() as f64;
    debug!(true_positives, precision, recall, "f-score");

    if precision + recall == 0.0 {
        return 0.0;
    }
    2.0 * precision * recall / (precision + recall)
}

/// Parses both messages and scores them with [`tree_f_score`], optionally
/// comparing structure only.
#[instrument(level = "debug")]
pub fn f_score(a: &str, b: &str, abstract_power_names: bool) -> f64 {
    let (mut tree_a, mut tree_b) = (parse(a), parse(b));
    if abstract_power_names {
        abstract_names(&mut tree_a);
        abstract_names(&mut tree_b);
    }
    tree_f_score(&tree_a, &tree_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_move_order_then_patterns_are_listed_in_preorder() {
        let tree = parse("XDO (FRA FLT LON MTO NTH)");
        assert_eq!(
            subtree_patterns(&tree),
            ["root-XDO", "XDO-FRA-FLT-LON-MTO-NTH", "FRA", "FLT", "LON", "MTO", "NTH"]
        );
    }

    #[test]
    fn given_abstracted_tree_then_powers_and_provinces_are_placeholders() {
        let mut tree = parse("DMZ (GER FRA) (PIC BUR)");
        abstract_names(&mut tree);
        assert_eq!(
            subtree_patterns(&tree),
            [
                "root-DMZ",
                "DMZ-POWER-POWER-PROVINCE-PROVINCE",
                "POWER-POWER-POWER-POWER",
                "POWER",
                "POWER",
                "PROVINCE-PROVINCE-PROVINCE-PROVINCE",
                "PROVINCE",
                "PROVINCE",
            ]
        );
    }

    #[test]
    fn given_ownership_group_then_abstraction_treats_it_as_a_power() {
        let mut tree = parse("SCD (FRA PAR BRE)");
        abstract_names(&mut tree);
        assert_eq!(
            subtree_patterns(&tree),
            ["root-SCD", "SCD-POWER", "POWER-PROVINCE-PROVINCE", "PROVINCE", "PROVINCE"]
        );
    }

    #[test]
    fn given_truncated_arity_then_surplus_children_are_not_counted() {
        // PCE[FRA GER] against PCE[FRA GER RUS]: PCE mismatches on arity,
        // RUS has no partner and is skipped
        let a = parse("PCE (FRA GER RUS)");
        let b = parse("PCE (FRA GER)");
        assert_eq!(tree_accuracy(&b, &a), 3.0 / 4.0);
        assert_eq!(tree_accuracy(&a, &b), 3.0 / 4.0);
    }

    #[test]
    fn given_repeated_pattern_then_each_occurrence_counts_as_hit() {
        let a = parse("AND (PCE (FRA GER)) (PCE (FRA GER))");
        let b = parse("PCE (FRA GER)");
        // a: root-AND, AND-PCE-PCE, PCE-FRA-GER, FRA, GER, PCE-FRA-GER, FRA, GER
        // b: root-PCE, PCE-FRA-GER, FRA, GER
        // precision 6/8, recall 6/4
        assert_eq!(tree_f_score(&a, &b), 1.0);
    }
}
