//! Domain layer: DAIDE message trees, canonicalization and scoring
//!
//! Pure and synchronous: no I/O, no configuration, no shared state. Every
//! parse allocates its own independent tree.

pub mod arena;
pub mod builder;
pub mod canon;
pub mod compare;
pub mod display;
pub mod rules;
pub mod similarity;
pub mod tokenizer;
pub mod vocabulary;

pub use arena::{DaideTree, NodeData, TreeNode};
pub use builder::TreeBuilder;
pub use canon::{canonicalize, compute_signatures, parse, rename_groups, sort_tree};
pub use compare::{equal, trees_equal};
pub use display::TreeNodeConvert;
pub use rules::{restructure, RewriteRule};
pub use similarity::{abstract_names, accuracy, f_score, subtree_patterns, tree_accuracy, tree_f_score};
pub use tokenizer::{tokenize, Token};
