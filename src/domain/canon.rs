//! Canonical naming and order normalization.
//!
//! The passes are strictly sequenced: restructure, compute signatures, sort,
//! rename. Signatures are taken before sorting and are never touched again,
//! so they stay the sort key while renamed labels reflect the final order.

use generational_arena::Index;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::domain::arena::DaideTree;
use crate::domain::builder::TreeBuilder;
use crate::domain::rules::restructure;
use crate::domain::tokenizer::tokenize;
use crate::domain::vocabulary;

/// Parses DAIDE text into a canonical tree.
///
/// Absent or empty text yields a bare `root`. Malformed parenthesization is
/// tolerated and unknown tokens pass through as leaves.
#[instrument(level = "debug", skip_all)]
pub fn parse<'a>(text: impl Into<Option<&'a str>>) -> DaideTree {
    let text = match text.into() {
        None | Some("") => return DaideTree::new(),
        Some(text) => text,
    };
    debug!("parsing {:?}", text);
    let tokens = tokenize(text);
    let mut tree = TreeBuilder::new().build(&tokens);
    canonicalize(&mut tree);
    tree
}

/// Turns a raw built tree into its canonical form.
pub fn canonicalize(tree: &mut DaideTree) {
    restructure(tree);
    compute_signatures(tree);
    sort_tree(tree);
    rename_groups(tree);
}

/// Bottom-up: a leaf's signature is its name, a group's is the hyphen-join of
/// its children's signatures, a keyword's is its name followed by those.
#[instrument(level = "debug", skip(tree))]
pub fn compute_signatures(tree: &mut DaideTree) {
    let order: Vec<Index> = tree.iter_postorder().map(|(idx, _)| idx).collect();
    for idx in order {
        let children = tree.children(idx);
        if children.is_empty() {
            let name = tree.name(idx).to_string();
            tree.set_signature(idx, name);
            continue;
        }
        let joined = children.iter().map(|&c| tree.signature(c)).join("-");
        let signature = if tree.data(idx).is_group() {
            joined
        } else {
            format!("{}-{}", tree.name(idx), joined)
        };
        tree.set_signature(idx, signature);
    }
}

/// Sorts arguments of order-insensitive keywords by signature, and the
/// per-power province lists of `SCD` and `DMZ` one level deeper.
#[instrument(level = "debug", skip(tree))]
pub fn sort_tree(tree: &mut DaideTree) {
    let root = tree.root();
    sort_node(tree, root);
}

fn sort_node(tree: &mut DaideTree, idx: Index) {
    let name = tree.name(idx);
    let order_insensitive = vocabulary::is_order_insensitive(name);
    let per_power_lists = vocabulary::has_per_power_lists(name);

    if order_insensitive {
        sort_children(tree, idx);
    }
    if per_power_lists {
        for child in tree.children(idx).to_vec() {
            sort_children(tree, child);
        }
    }
    for child in tree.children(idx).to_vec() {
        sort_node(tree, child);
    }
}

fn sort_children(tree: &mut DaideTree, idx: Index) {
    let sorted: Vec<Index> = tree
        .children(idx)
        .iter()
        .copied()
        .sorted_by(|&a, &b| tree.signature(a).cmp(tree.signature(b)))
        .collect();
    tree.set_children(idx, sorted);
}

/// Bottom-up: every anonymous group with children takes the hyphen-join of its
/// children's names. Named nodes keep their name.
#[instrument(level = "debug", skip(tree))]
pub fn rename_groups(tree: &mut DaideTree) {
    let order: Vec<Index> = tree.iter_postorder().map(|(idx, _)| idx).collect();
    for idx in order {
        if !tree.data(idx).is_group() || tree.children(idx).is_empty() {
            continue;
        }
        let name = tree.children(idx).iter().map(|&c| tree.name(c)).join("-");
        tree.rename(idx, name);
    }
}
