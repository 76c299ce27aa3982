//! Builds the raw (not yet restructured) tree from a token sequence.

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::{DaideTree, NodeData, GROUP_TOKEN};
use crate::domain::tokenizer::Token;

/// Constructs raw trees: one anonymous group per parenthesis level,
/// words as plain children of the innermost open group.
pub struct TreeBuilder {
    open_groups: Vec<Index>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            open_groups: Vec::new(),
        }
    }

    /// A word never becomes an open parent: `XDO (...)` yields two siblings,
    /// the keyword and its group. Restructuring nests them later.
    #[instrument(level = "debug", skip(self, tokens), fields(tokens = tokens.len()))]
    pub fn build(&mut self, tokens: &[Token]) -> DaideTree {
        let mut tree = DaideTree::new();
        self.open_groups.clear();
        self.open_groups.push(tree.root());

        for token in tokens {
            let current = self.current();
            match token {
                Token::Open => {
                    let group = tree.insert_node(NodeData::new(GROUP_TOKEN), current);
                    self.open_groups.push(group);
                }
                Token::Close => {
                    // a close at root level has nothing to pop
                    if self.open_groups.len() > 1 {
                        self.open_groups.pop();
                    } else {
                        debug!("ignoring close paren at root level");
                    }
                }
                Token::Word(word) => {
                    tree.insert_node(NodeData::new(word), current);
                }
            }
        }
        if self.open_groups.len() > 1 {
            debug!("{} groups left open at end of input", self.open_groups.len() - 1);
        }
        tree
    }

    fn current(&self) -> Index {
        self.open_groups[self.open_groups.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tokenizer::tokenize;

    fn shape(tree: &DaideTree, idx: Index) -> String {
        let children = tree.children(idx);
        if children.is_empty() {
            tree.name(idx).to_string()
        } else {
            let inner: Vec<String> = children.iter().map(|&c| shape(tree, c)).collect();
            format!("{}[{}]", tree.name(idx), inner.join(" "))
        }
    }

    #[test]
    fn given_keyword_and_group_then_they_are_built_as_siblings() {
        let tree = TreeBuilder::new().build(&tokenize("XDO (FRA AMY PAR)"));
        assert_eq!(shape(&tree, tree.root()), "root[([XDO ([FRA AMY PAR])])]");
    }

    #[test]
    fn given_unclosed_group_then_it_is_closed_at_end_of_input() {
        let tree = TreeBuilder::new().build(&tokenize("AND (FRA"));
        assert_eq!(shape(&tree, tree.root()), "root[([AND ([FRA])])]");
    }

    #[test]
    fn given_close_at_root_level_then_builder_stays_at_root() {
        let tree = TreeBuilder::new().build(&tokenize("FRA ) ) ( ( GER"));
        assert_eq!(shape(&tree, tree.root()), "root[([FRA]) ([([GER])])]");
    }

    #[test]
    fn given_builder_reused_then_trees_are_independent() {
        let mut builder = TreeBuilder::new();
        let first = builder.build(&tokenize("FRA"));
        let second = builder.build(&tokenize("GER ENG"));
        assert_eq!(shape(&first, first.root()), "root[([FRA])]");
        assert_eq!(shape(&second, second.root()), "root[([GER ENG])]");
    }
}
