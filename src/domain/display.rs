use generational_arena::Index;
use std::fmt;
use termtree::Tree;

use crate::domain::arena::DaideTree;

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
    fn to_signature_tree(&self) -> Tree<String>;
}

impl TreeNodeConvert for DaideTree {
    fn to_tree_string(&self) -> Tree<String> {
        build_tree(self, self.root(), &|tree, idx| tree.name(idx).to_string())
    }

    /// Node names annotated with the signature used as sort key.
    fn to_signature_tree(&self) -> Tree<String> {
        build_tree(self, self.root(), &|tree, idx| {
            format!("{} [{}]", tree.name(idx), tree.signature(idx))
        })
    }
}

fn build_tree(
    tree: &DaideTree,
    node_idx: Index,
    label: &dyn Fn(&DaideTree, Index) -> String,
) -> Tree<String> {
    let leaves: Vec<_> = tree
        .children(node_idx)
        .iter()
        .map(|&child| build_tree(tree, child, label))
        .collect();
    Tree::new(label(tree, node_idx)).with_leaves(leaves)
}

impl fmt::Display for DaideTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_tree_string())
    }
}
