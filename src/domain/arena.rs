use generational_arena::{Arena, Index};
use std::collections::HashSet;
use std::fmt;
use tracing::instrument;

/// Token of the synthetic node every tree hangs from.
pub const ROOT_TOKEN: &str = "root";
/// Token of an anonymous group created for each parenthesis level.
pub const GROUP_TOKEN: &str = "(";

/// Data payload for tree nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    /// Current display label, synthetic hyphen-joined label for renamed groups
    pub name: String,
    /// Raw token the node was created from
    pub token: String,
    /// Canonical subtree fingerprint, fixed once signatures are computed
    pub signature: String,
}

impl NodeData {
    pub fn new(token: &str) -> Self {
        Self {
            name: token.to_string(),
            token: token.to_string(),
            signature: token.to_string(),
        }
    }

    /// True while the node still carries the anonymous group label.
    pub fn is_group(&self) -> bool {
        self.name == GROUP_TOKEN
    }

    /// True if the node was created for a parenthesis, whatever its label now is.
    pub fn from_group_token(&self) -> bool {
        self.token == GROUP_TOKEN
    }
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Tree node in the arena-based message structure.
#[derive(Debug)]
pub struct TreeNode {
    pub data: NodeData,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena
    pub children: Vec<Index>,
}

/// Arena-based tree for one DAIDE message.
///
/// Children are owned through index lists, parents are plain back-references.
/// Rewrites move indices around; nodes that end up unreachable from the root
/// are freed by [`DaideTree::prune_unreachable`].
#[derive(Debug)]
pub struct DaideTree {
    arena: Arena<TreeNode>,
    root: Index,
}

impl Default for DaideTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DaideTree {
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(TreeNode {
            data: NodeData::new(ROOT_TOKEN),
            parent: None,
            children: Vec::new(),
        });
        Self { arena, root }
    }

    /// Inserts a node as the last child of `parent`.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, data: NodeData, parent: Index) -> Index {
        let node_idx = self.arena.insert(TreeNode {
            data,
            parent: Some(parent),
            children: Vec::new(),
        });
        if let Some(parent) = self.arena.get_mut(parent) {
            parent.children.push(node_idx);
        }
        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn get_node_mut(&mut self, idx: Index) -> Option<&mut TreeNode> {
        self.arena.get_mut(idx)
    }

    pub fn root(&self) -> Index {
        self.root
    }

    /// Number of live nodes, including nodes not yet pruned.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children(self.root).is_empty()
    }

    pub fn data(&self, idx: Index) -> &NodeData {
        &self.arena[idx].data
    }

    pub fn name(&self, idx: Index) -> &str {
        &self.arena[idx].data.name
    }

    pub fn signature(&self, idx: Index) -> &str {
        &self.arena[idx].data.signature
    }

    pub fn children(&self, idx: Index) -> &[Index] {
        &self.arena[idx].children
    }

    pub fn parent(&self, idx: Index) -> Option<Index> {
        self.arena[idx].parent
    }

    pub fn rename(&mut self, idx: Index, name: impl Into<String>) {
        self.arena[idx].data.name = name.into();
    }

    pub fn set_signature(&mut self, idx: Index, signature: String) {
        self.arena[idx].data.signature = signature;
    }

    /// Appends `child` to `idx` and points the child back at `idx`.
    #[instrument(level = "trace", skip(self))]
    pub fn append_child(&mut self, idx: Index, child: Index) {
        self.arena[child].parent = Some(idx);
        self.arena[idx].children.push(child);
    }

    /// Replaces the whole child list of `idx`, reparenting the new children.
    ///
    /// The previous children are dropped from the list but keep their own
    /// links; they are freed on the next prune if nothing else holds them.
    #[instrument(level = "trace", skip(self))]
    pub fn set_children(&mut self, idx: Index, children: Vec<Index>) {
        for &child in &children {
            self.arena[child].parent = Some(idx);
        }
        self.arena[idx].children = children;
    }

    /// Swaps `old` for `new` at the same position in `parent`'s child list.
    #[instrument(level = "trace", skip(self))]
    pub fn replace_child(&mut self, parent: Index, old: Index, new: Index) -> bool {
        let Some(position) = self.arena[parent].children.iter().position(|&c| c == old) else {
            return false;
        };
        self.arena[parent].children[position] = new;
        self.arena[new].parent = Some(parent);
        true
    }

    /// Removes the child at `position` from `idx`'s list only.
    #[instrument(level = "trace", skip(self))]
    pub fn detach_child(&mut self, idx: Index, position: usize) -> Option<Index> {
        let children = &mut self.arena[idx].children;
        if position < children.len() {
            Some(children.remove(position))
        } else {
            None
        }
    }

    /// Keeps the first `len` children of `idx`.
    pub fn truncate_children(&mut self, idx: Index, len: usize) {
        self.arena[idx].children.truncate(len);
    }

    /// Frees every node no longer reachable from the root, returning how many went.
    #[instrument(level = "debug", skip(self))]
    pub fn prune_unreachable(&mut self) -> usize {
        let reachable: HashSet<Index> = self.iter().map(|(idx, _)| idx).collect();
        let orphans: Vec<Index> = self
            .arena
            .iter()
            .map(|(idx, _)| idx)
            .filter(|idx| !reachable.contains(idx))
            .collect();
        for &idx in &orphans {
            self.arena.remove(idx);
        }
        orphans.len()
    }

    pub fn iter(&self) -> TreeIterator {
        TreeIterator::new(self)
    }

    pub fn iter_postorder(&self) -> PostOrderIterator {
        PostOrderIterator::new(self)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.calculate_depth(self.root)
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Collects the names of all leaf nodes, left to right.
    ///
    /// A tree without messages returns the root name.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_names(&self) -> Vec<String> {
        let mut leaves = Vec::new();
        self.collect_leaves(self.root, &mut leaves);
        leaves
    }

    fn collect_leaves(&self, node_idx: Index, leaves: &mut Vec<String>) {
        if let Some(node) = self.get_node(node_idx) {
            if node.children.is_empty() {
                leaves.push(node.data.name.clone());
            } else {
                for &child in &node.children {
                    self.collect_leaves(child, leaves);
                }
            }
        }
    }
}

pub struct TreeIterator<'a> {
    tree: &'a DaideTree,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a DaideTree) -> Self {
        Self {
            tree,
            stack: vec![tree.root()],
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    tree: &'a DaideTree,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(tree: &'a DaideTree) -> Self {
        Self {
            tree,
            stack: vec![(tree.root(), false)],
        }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    for &child in node.children.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}
