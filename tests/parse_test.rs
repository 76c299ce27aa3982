//! Parsing DAIDE text into canonical trees

use daidetree::domain::TreeNodeConvert;
use daidetree::util::testing;
use daidetree::{parse, DaideTree};
use generational_arena::Index;
use rstest::rstest;

fn shape(tree: &DaideTree, idx: Index) -> String {
    let children = tree.children(idx);
    if children.is_empty() {
        tree.name(idx).to_string()
    } else {
        let inner: Vec<String> = children.iter().map(|&c| shape(tree, c)).collect();
        format!("{}[{}]", tree.name(idx), inner.join(" "))
    }
}

fn canonical(text: &str) -> String {
    testing::init_test_setup();
    let tree = parse(text);
    shape(&tree, tree.root())
}

// ============================================================
// Degenerate input
// ============================================================

#[test]
fn given_empty_and_absent_input_when_parsing_then_root_has_no_children() {
    testing::init_test_setup();
    for tree in [parse(""), parse(None::<&str>)] {
        assert_eq!(tree.name(tree.root()), "root");
        assert!(tree.children(tree.root()).is_empty());
    }
}

#[test]
fn given_unmatched_closing_paren_when_parsing_then_tree_is_still_built() {
    testing::init_test_setup();
    let tree = parse("PRP (XDO (FRA FLT LON MTO NTH)))");
    assert_eq!(tree.children(tree.root()).len(), 1);
    assert_eq!(canonical("PRP (XDO (FRA FLT LON MTO NTH)))"), "root[PRP[XDO[FRA FLT LON MTO NTH]]]");
}

#[test]
fn given_unclosed_group_when_parsing_then_it_is_closed_at_end_of_input() {
    assert_eq!(canonical("PRP (XDO (FRA FLT LON MTO NTH"), "root[PRP[XDO[FRA FLT LON MTO NTH]]]");
}

#[test]
fn given_unknown_tokens_when_parsing_then_they_pass_through_as_leaves() {
    assert_eq!(canonical("FOO (BAR BAZ)"), "root[FOO-BAR-BAZ[FOO BAR-BAZ[BAR BAZ]]]");
}

// ============================================================
// Grammar shapes
// ============================================================

#[rstest]
#[case::proposal("PRP (XDO (FRA FLT LON MTO NTH))", "root[PRP[XDO[FRA FLT LON MTO NTH]]]")]
#[case::conjunction(
    "PRP (AND (XDO (FRA AMY PAR MTO BUR)) (XDO (GER AMY MUN MTO RUH)))",
    "root[PRP[AND[XDO[FRA AMY PAR MTO BUR] XDO[GER AMY MUN MTO RUH]]]]"
)]
#[case::alliance("PRP (ALY (FRA ENG) VSS (GER RUS))", "root[PRP[ALY[ENG FRA] VSS[GER RUS]]]")]
#[case::ownership("PRP (SCD (FRA PAR BRE) (GER MUN BER))", "root[PRP[SCD[FRA[BRE PAR] GER[BER MUN]]]]")]
#[case::disjunction_with_dmz(
    "PRP (ORR (XDO (FRA AMY PAR MTO BUR)) (DMZ (FRA GER) (BUR)))",
    "root[PRP[ORR[DMZ[FRA-GER[FRA GER] BUR] XDO[FRA AMY PAR MTO BUR]]]]"
)]
#[case::loose_tokens("FRA GER (ENG)", "root[FRA-GER-ENG[FRA GER ENG]]")]
#[case::peace_without_group("PCE FRA", "root[PCE]")]
#[case::negation_without_group("NOT FRA", "root[NOT]")]
#[case::empty_group("()", "root[(]")]
fn given_message_when_parsing_then_canonical_shape_matches(#[case] text: &str, #[case] expected: &str) {
    assert_eq!(canonical(text), expected);
}

#[test]
fn given_alliances_under_conjunction_when_parsing_then_alliance_groups_are_named() {
    assert_eq!(
        canonical("AND (ALY (FRA ENG) VSS (GER)) (ALY (ENG FRA) VSS (GER))"),
        "root[AND[ALY-VSS[ALY[ENG FRA] VSS[GER]] ALY-VSS[ALY[ENG FRA] VSS[GER]]]]"
    );
}

#[test]
fn given_doubly_wrapped_ownership_when_parsing_then_inner_group_stays_anonymous() {
    // The outer group is spliced out before its child is restructured, so the
    // inner list is never claimed by a power and keeps a synthetic name.
    assert_eq!(canonical("SCD ((FRA PAR BRE))"), "root[SCD[BRE-FRA-PAR[BRE FRA PAR]]]");
}

#[test]
fn given_parsed_tree_then_spliced_nodes_are_freed() {
    testing::init_test_setup();
    let tree = parse("AND (PCE (FRA GER)) (PCE (FRA RUS))");
    // root, AND, 2x PCE, 4 powers
    assert_eq!(tree.len(), 8);
    assert_eq!(tree.iter().count(), tree.len());
    assert_eq!(tree.depth(), 4);
    assert_eq!(tree.leaf_names(), ["FRA", "GER", "FRA", "RUS"]);
}

#[test]
fn given_parsed_tree_when_rendering_then_every_node_gets_a_line() {
    testing::init_test_setup();
    let tree = parse("PRP (XDO (FRA FLT LON MTO NTH))");
    assert_eq!(tree.to_tree_string().to_string().lines().count(), 8);
    assert!(tree.to_signature_tree().to_string().contains("XDO [XDO-FRA-FLT-LON-MTO-NTH]"));
}
