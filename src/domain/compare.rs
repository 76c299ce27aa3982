//! Structural equality of canonical trees.
//!
//! Comparison is strictly positional; order-insensitive keywords already had
//! their arguments sorted during canonicalization.

use generational_arena::Index;
use tracing::instrument;

use crate::domain::arena::DaideTree;
use crate::domain::canon::parse;

/// False if either tree is absent, otherwise true iff both trees have the same
/// names and child counts at every position.
pub fn trees_equal(a: Option<&DaideTree>, b: Option<&DaideTree>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => subtrees_equal(a, a.root(), b, b.root()),
        _ => false,
    }
}

pub(crate) fn subtrees_equal(a: &DaideTree, a_idx: Index, b: &DaideTree, b_idx: Index) -> bool {
    let (a_children, b_children) = (a.children(a_idx), b.children(b_idx));
    a.name(a_idx) == b.name(b_idx)
        && a_children.len() == b_children.len()
        && a_children
            .iter()
            .zip(b_children)
            .all(|(&ac, &bc)| subtrees_equal(a, ac, b, bc))
}

impl PartialEq for DaideTree {
    fn eq(&self, other: &Self) -> bool {
        subtrees_equal(self, self.root(), other, other.root())
    }
}

/// Canonicalizes both messages and compares the results.
#[instrument(level = "debug")]
pub fn equal(a: &str, b: &str) -> bool {
    let (a, b) = (parse(a), parse(b));
    trees_equal(Some(&a), Some(&b))
}
