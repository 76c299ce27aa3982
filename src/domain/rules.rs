//! Grammar-specific restructuring of raw trees.
//!
//! The builder leaves keywords as siblings of their argument groups. The
//! rules below nest arguments under their keywords and resolve the special
//! shapes of ownership lists, peace proposals and alliances. All rules are
//! tried in [`RewriteRule::ORDERED`] order at every node of one pre-order
//! traversal; each rule sees the result of the ones before it.

use generational_arena::Index;
use std::fmt;
use tracing::{debug, instrument};

use crate::domain::arena::DaideTree;
use crate::domain::vocabulary::{self, ALY, PCE, SCD, VSS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteRule {
    /// `[KEY (args)]` with a single-argument keyword becomes `[KEY[args]]`.
    SingleArgumentWrap,
    /// `[KEY a b c]` with a multi-argument keyword becomes `[KEY[a b c]]`.
    MultiArgumentFlatten,
    /// An anonymous group with one child is replaced by that child.
    SpliceSingleChildGroup,
    /// Under `SCD`, `(FRA PAR BRE)` becomes `FRA[PAR BRE]`.
    PowerOwnership,
    /// `PCE[(FRA GER)]` becomes `PCE[FRA GER]`.
    PeaceCollapse,
    /// `[ALY (powers) VSS (powers)]` becomes `[ALY[powers] VSS[powers]]`.
    AllianceSupport,
}

impl RewriteRule {
    pub const ORDERED: [RewriteRule; 6] = [
        RewriteRule::SingleArgumentWrap,
        RewriteRule::MultiArgumentFlatten,
        RewriteRule::SpliceSingleChildGroup,
        RewriteRule::PowerOwnership,
        RewriteRule::PeaceCollapse,
        RewriteRule::AllianceSupport,
    ];

    /// Applies the rule at `idx`, returning whether it fired.
    pub fn apply(self, tree: &mut DaideTree, idx: Index) -> bool {
        match self {
            RewriteRule::SingleArgumentWrap => single_argument_wrap(tree, idx),
            RewriteRule::MultiArgumentFlatten => multi_argument_flatten(tree, idx),
            RewriteRule::SpliceSingleChildGroup => splice_single_child_group(tree, idx),
            RewriteRule::PowerOwnership => power_ownership(tree, idx),
            RewriteRule::PeaceCollapse => peace_collapse(tree, idx),
            RewriteRule::AllianceSupport => alliance_support(tree, idx),
        }
    }
}

impl fmt::Display for RewriteRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RewriteRule::SingleArgumentWrap => "single-argument-wrap",
            RewriteRule::MultiArgumentFlatten => "multi-argument-flatten",
            RewriteRule::SpliceSingleChildGroup => "splice-single-child-group",
            RewriteRule::PowerOwnership => "power-ownership",
            RewriteRule::PeaceCollapse => "peace-collapse",
            RewriteRule::AllianceSupport => "alliance-support",
        };
        write!(f, "{}", name)
    }
}

/// Runs every rule over the whole tree, then frees the nodes the rewrites orphaned.
#[instrument(level = "debug", skip(tree))]
pub fn restructure(tree: &mut DaideTree) {
    let root = tree.root();
    restructure_node(tree, root);
    let pruned = tree.prune_unreachable();
    debug!("restructured, {} orphaned nodes pruned", pruned);
}

fn restructure_node(tree: &mut DaideTree, idx: Index) {
    for rule in RewriteRule::ORDERED {
        if rule.apply(tree, idx) {
            debug!(rule = %rule, node = %tree.name(idx), "rule fired");
        }
    }
    // A node spliced out above still walks its own child list, so the child
    // that took its place is visited exactly once.
    let children = tree.children(idx).to_vec();
    for child in children {
        restructure_node(tree, child);
    }
}

fn single_argument_wrap(tree: &mut DaideTree, idx: Index) -> bool {
    let &[keyword, group] = tree.children(idx) else {
        return false;
    };
    if !vocabulary::is_single_argument(tree.name(keyword)) {
        return false;
    }
    let arguments = tree.children(group).to_vec();
    tree.set_children(keyword, arguments);
    tree.detach_child(idx, 1);
    true
}

fn multi_argument_flatten(tree: &mut DaideTree, idx: Index) -> bool {
    let children = tree.children(idx).to_vec();
    if children.len() < 2 || !vocabulary::is_multi_argument(tree.name(children[0])) {
        return false;
    }
    let keyword = children[0];
    for &sibling in &children[1..] {
        tree.append_child(keyword, sibling);
    }
    tree.truncate_children(idx, 1);
    true
}

fn splice_single_child_group(tree: &mut DaideTree, idx: Index) -> bool {
    if !tree.data(idx).is_group() {
        return false;
    }
    let &[only] = tree.children(idx) else {
        return false;
    };
    match tree.parent(idx) {
        Some(parent) => tree.replace_child(parent, idx, only),
        None => false,
    }
}

fn power_ownership(tree: &mut DaideTree, idx: Index) -> bool {
    let Some(parent) = tree.parent(idx) else {
        return false;
    };
    if tree.name(parent) != SCD {
        return false;
    }
    let Some(&power) = tree.children(idx).first() else {
        return false;
    };
    let power_name = tree.name(power).to_string();
    tree.rename(idx, power_name);
    tree.detach_child(idx, 0);
    true
}

fn peace_collapse(tree: &mut DaideTree, idx: Index) -> bool {
    if tree.name(idx) != PCE {
        return false;
    }
    let &[only] = tree.children(idx) else {
        return false;
    };
    let powers = tree.children(only).to_vec();
    tree.set_children(idx, powers);
    true
}

fn alliance_support(tree: &mut DaideTree, idx: Index) -> bool {
    let children = tree.children(idx).to_vec();
    if children.first().map(|&c| tree.name(c)) != Some(ALY) {
        return false;
    }
    // a bare ALY without its power list is left alone
    if children.len() > 1 {
        let allies = tree.children(children[1]).to_vec();
        tree.set_children(children[0], allies);

        if children.len() > 3 && tree.name(children[2]) == VSS {
            let opponents = tree.children(children[3]).to_vec();
            tree.set_children(children[2], opponents);
            tree.detach_child(idx, 3);
        }
        tree.detach_child(idx, 1);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::builder::TreeBuilder;
    use crate::domain::tokenizer::tokenize;

    fn raw(text: &str) -> DaideTree {
        TreeBuilder::new().build(&tokenize(text))
    }

    fn shape(tree: &DaideTree, idx: Index) -> String {
        let children = tree.children(idx);
        if children.is_empty() {
            tree.name(idx).to_string()
        } else {
            let inner: Vec<String> = children.iter().map(|&c| shape(tree, c)).collect();
            format!("{}[{}]", tree.name(idx), inner.join(" "))
        }
    }

    fn outer_group(tree: &DaideTree) -> Index {
        tree.children(tree.root())[0]
    }

    #[test]
    fn given_single_argument_keyword_then_group_children_move_under_keyword() {
        let mut tree = raw("NOT (FRA GER)");
        let group = outer_group(&tree);
        assert!(RewriteRule::SingleArgumentWrap.apply(&mut tree, group));
        assert_eq!(shape(&tree, group), "([NOT[FRA GER]])");
    }

    #[test]
    fn given_single_argument_keyword_with_extra_argument_then_wrap_does_not_fire() {
        let mut tree = raw("NOT (FRA) (GER)");
        let group = outer_group(&tree);
        assert!(!RewriteRule::SingleArgumentWrap.apply(&mut tree, group));
    }

    #[test]
    fn given_multi_argument_keyword_then_all_siblings_move_under_it() {
        let mut tree = raw("AND (FRA) (GER) ENG");
        let group = outer_group(&tree);
        assert!(RewriteRule::MultiArgumentFlatten.apply(&mut tree, group));
        assert_eq!(shape(&tree, group), "([AND[([FRA]) ([GER]) ENG]])");
    }

    #[test]
    fn given_multi_argument_keyword_alone_then_flatten_does_not_fire() {
        let mut tree = raw("AND");
        let group = outer_group(&tree);
        assert!(!RewriteRule::MultiArgumentFlatten.apply(&mut tree, group));
    }

    #[test]
    fn given_group_with_one_child_then_child_takes_its_place() {
        let mut tree = raw("FRA");
        let group = outer_group(&tree);
        assert!(RewriteRule::SpliceSingleChildGroup.apply(&mut tree, group));
        assert_eq!(shape(&tree, tree.root()), "root[FRA]");
    }

    #[test]
    fn given_root_with_one_child_then_it_is_not_spliced() {
        let mut tree = raw("FRA");
        let root = tree.root();
        assert!(!RewriteRule::SpliceSingleChildGroup.apply(&mut tree, root));
    }

    #[test]
    fn given_group_under_scd_then_it_is_named_after_its_power() {
        let mut tree = raw("SCD (FRA PAR BRE)");
        let group = outer_group(&tree);
        RewriteRule::MultiArgumentFlatten.apply(&mut tree, group);
        let scd = tree.children(group)[0];
        let list = tree.children(scd)[0];
        assert!(RewriteRule::PowerOwnership.apply(&mut tree, list));
        assert_eq!(shape(&tree, scd), "SCD[FRA[PAR BRE]]");
    }

    #[test]
    fn given_peace_with_one_group_then_powers_are_hoisted() {
        let mut tree = raw("PCE (FRA GER)");
        let group = outer_group(&tree);
        RewriteRule::MultiArgumentFlatten.apply(&mut tree, group);
        let pce = tree.children(group)[0];
        assert!(RewriteRule::PeaceCollapse.apply(&mut tree, pce));
        assert_eq!(shape(&tree, pce), "PCE[FRA GER]");
    }

    #[test]
    fn given_alliance_with_support_clause_then_both_keywords_own_their_powers() {
        let mut tree = raw("ALY (FRA ENG) VSS (GER RUS)");
        let group = outer_group(&tree);
        assert!(RewriteRule::AllianceSupport.apply(&mut tree, group));
        assert_eq!(shape(&tree, group), "([ALY[FRA ENG] VSS[GER RUS]])");
    }

    #[test]
    fn given_alliance_without_support_clause_then_only_allies_move() {
        let mut tree = raw("ALY (FRA ENG)");
        let group = outer_group(&tree);
        assert!(RewriteRule::AllianceSupport.apply(&mut tree, group));
        assert_eq!(shape(&tree, group), "([ALY[FRA ENG]])");
    }

    #[test]
    fn given_bare_alliance_then_rule_leaves_tree_alone() {
        let mut tree = raw("ALY");
        let group = outer_group(&tree);
        assert!(RewriteRule::AllianceSupport.apply(&mut tree, group));
        assert_eq!(shape(&tree, group), "([ALY])");
    }

    #[test]
    fn given_proposal_when_restructuring_then_keyword_chain_is_nested() {
        let mut tree = raw("PRP (XDO (FRA FLT LON MTO NTH))");
        restructure(&mut tree);
        assert_eq!(shape(&tree, tree.root()), "root[PRP[XDO[FRA FLT LON MTO NTH]]]");
        assert_eq!(tree.len(), 8);
    }

    #[test]
    fn given_conjunction_of_peace_proposals_when_restructuring_then_groups_vanish() {
        let mut tree = raw("AND (PCE (FRA GER)) (PCE (FRA RUS))");
        restructure(&mut tree);
        assert_eq!(shape(&tree, tree.root()), "root[AND[PCE[FRA GER] PCE[FRA RUS]]]");
    }

    #[test]
    fn given_ownership_list_when_restructuring_then_each_power_owns_its_provinces() {
        let mut tree = raw("SCD (FRA PAR BRE) (GER)");
        restructure(&mut tree);
        assert_eq!(shape(&tree, tree.root()), "root[SCD[FRA[PAR BRE] GER]]");
    }

    #[test]
    fn given_proposed_alliance_when_restructuring_then_alliance_sits_under_proposal() {
        let mut tree = raw("PRP (ALY (FRA ENG) VSS (GER RUS))");
        restructure(&mut tree);
        assert_eq!(shape(&tree, tree.root()), "root[PRP[ALY[FRA ENG] VSS[GER RUS]]]");
    }

    #[test]
    fn given_rule_names_then_display_is_kebab_case() {
        let names: Vec<String> = RewriteRule::ORDERED.iter().map(|r| r.to_string()).collect();
        assert_eq!(names[0], "single-argument-wrap");
        assert_eq!(names[5], "alliance-support");
    }
}
