//! Traversal behavior over the shared fixture.

mod common;

use common::{make_gmod, make_locations};
use vista_gmod::traversal::{self, TraversalOptions, TraverseControl};
use vista_gmod::{Gmod, GmodNode};

fn collect_codes(gmod: &Gmod, options: &TraversalOptions) -> Vec<String> {
    let mut codes: Vec<String> = Vec::new();
    let completed = traversal::traverse(
        gmod,
        &mut codes,
        |codes, _parents, node| {
            codes.push(node.code().to_string());
            TraverseControl::Continue
        },
        options,
    )
    .unwrap();
    assert!(completed);
    codes
}

#[test]
fn test_traversal_visits_installed_nodes() {
    let gmod = make_gmod();
    let codes = collect_codes(&gmod, &TraversalOptions::default());

    for expected in [
        "VE", "400a", "410", "411", "411i", "411.1", "CS1", "C101", "C101.3", "C101.31",
        "C101.7", "C101.72", "I101",
    ] {
        assert!(codes.contains(&expected.to_string()), "missing {expected}");
    }
}

#[test]
fn test_traversal_prunes_uninstalled_substructure() {
    let gmod = make_gmod();
    let codes = collect_codes(&gmod, &TraversalOptions::default());
    assert!(!codes.contains(&"412".to_string()));
    assert!(!codes.contains(&"C103".to_string()));
}

#[test]
fn test_occurrence_budget_bounds_reentry() {
    // CS1 is reused below C101.31, so C101 is reachable again through
    // its own subtree; the budget cuts the cycle after the visit.
    let gmod = make_gmod();

    let count =
        |options: &TraversalOptions| collect_codes(&gmod, options).iter().filter(|c| *c == "C101").count();

    assert_eq!(count(&TraversalOptions::default()), 2);
    assert_eq!(
        count(&TraversalOptions {
            max_traversal_occurrence: 2
        }),
        3
    );
}

#[test]
fn test_product_selection_assignment_bypasses_budget() {
    // CS1 appears under both 411.1 and C101.31; both entries are
    // product-selection assignments, so CS1 itself is never budgeted.
    let gmod = make_gmod();
    let codes = collect_codes(&gmod, &TraversalOptions::default());
    assert_eq!(codes.iter().filter(|c| *c == "CS1").count(), 2);
}

#[test]
fn test_stop_aborts_traversal() {
    let gmod = make_gmod();
    let mut seen = 0usize;
    let completed = traversal::traverse(
        &gmod,
        &mut seen,
        |seen, _parents, node| {
            *seen += 1;
            if node.code() == "C101" {
                TraverseControl::Stop
            } else {
                TraverseControl::Continue
            }
        },
        &TraversalOptions::default(),
    )
    .unwrap();
    assert!(!completed);
    assert!(seen < gmod.len());
}

#[test]
fn test_skip_subtree_is_local() {
    let gmod = make_gmod();
    let mut codes: Vec<String> = Vec::new();
    let completed = traversal::traverse(
        &gmod,
        &mut codes,
        |codes, _parents, node| {
            if node.code() == "CS1" {
                return TraverseControl::SkipSubtree;
            }
            codes.push(node.code().to_string());
            TraverseControl::Continue
        },
        &TraversalOptions::default(),
    )
    .unwrap();
    assert!(completed);
    assert!(!codes.contains(&"C101".to_string()));
    assert!(codes.contains(&"411.1".to_string()));
}

#[test]
fn test_traverse_from_subtree() {
    let gmod = make_gmod();
    let start = gmod.get("C101").unwrap();
    let mut codes: Vec<String> = Vec::new();
    let completed = traversal::traverse_from(
        &gmod,
        start,
        &mut codes,
        |codes: &mut Vec<String>, _parents: &[&GmodNode], node: &GmodNode| {
            codes.push(node.code().to_string());
            TraverseControl::Continue
        },
        &TraversalOptions::default(),
    );
    assert!(completed);
    assert!(codes.contains(&"C101.72".to_string()));
    assert!(!codes.contains(&"411.1".to_string()));
}

#[test]
fn test_stateless_traversal() {
    let gmod = make_gmod();
    let completed =
        traversal::traverse_stateless(&gmod, |_parents, _node| TraverseControl::Continue, &TraversalOptions::default())
            .unwrap();
    assert!(completed);
}

#[test]
fn test_parents_stack_matches_depth() {
    let gmod = make_gmod();
    let mut checked = false;
    traversal::traverse(
        &gmod,
        &mut checked,
        |checked, parents, node| {
            if node.code() == "C101.72" {
                let chain: Vec<&str> = parents.iter().map(|p| p.code()).collect();
                assert_eq!(
                    chain,
                    ["VE", "400a", "410", "411", "411i", "411.1", "CS1", "C101", "C101.7"]
                );
                *checked = true;
            }
            TraverseControl::Continue
        },
        &TraversalOptions::default(),
    )
    .unwrap();
    assert!(checked);
}

#[test]
fn test_path_exists_between_returns_suffix() {
    let gmod = make_gmod();
    let locations = make_locations();
    let from = gmod
        .parse_from_full_path("VE/400a/410/411/411i/411.1", &locations)
        .unwrap();
    let from_refs: Vec<&GmodNode> = from.iter().map(|(_, node)| node).collect();
    let to = gmod.get("C101.72").unwrap();

    let (exists, remaining) = traversal::path_exists_between(&gmod, &from_refs, to).unwrap();
    assert!(exists);
    let codes: Vec<&str> = remaining.iter().map(|n| n.code()).collect();
    assert_eq!(codes, ["CS1", "C101", "C101.7"]);
}

#[test]
fn test_path_exists_between_misses_pruned_branch() {
    let gmod = make_gmod();
    let root = gmod.root_node().unwrap();
    let to = gmod.get("412").unwrap();
    let (exists, remaining) =
        traversal::path_exists_between(&gmod, &[root], to).unwrap();
    assert!(!exists);
    assert!(remaining.is_empty());
}
