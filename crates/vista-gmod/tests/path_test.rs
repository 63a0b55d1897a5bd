//! Path parsing, rendering and individualization over the shared
//! fixture.

mod common;

use common::{make_gmod, make_locations};
use vista_gmod::{GmodPath, GmodPathParseError};

const FULL_I101: &str = "VE/400a/410/411/411i/411.1/CS1/C101/C101.7/C101.72/I101";

#[test]
fn test_short_parse_with_location() {
    let gmod = make_gmod();
    let locations = make_locations();

    let path = gmod.parse_path("411.1/C101.31-2", &locations).unwrap();
    assert_eq!(path.node().code(), "C101.31");
    assert_eq!(path.node().location().unwrap().as_str(), "2");
    assert_eq!(path.to_string(), "411.1/C101.31-2");
    assert_eq!(
        path.to_full_path_string(),
        "VE/400a/410/411/411i/411.1/CS1/C101/C101.3/C101.31-2"
    );
}

#[test]
fn test_full_parse() {
    let gmod = make_gmod();
    let locations = make_locations();

    let path = gmod.parse_from_full_path(FULL_I101, &locations).unwrap();
    assert_eq!(path.length(), 11);
    assert_eq!(path.node().code(), "I101");
    assert_eq!(path.to_string(), "411.1/C101.72/I101");
    assert_eq!(path.to_full_path_string(), FULL_I101);
}

#[test]
fn test_parse_round_trips() {
    let gmod = make_gmod();
    let locations = make_locations();

    for item in ["411.1/C101.31-2", "411.1/C101.72/I101", "411.1/C101"] {
        let path = gmod.parse_path(item, &locations).unwrap();
        let reparsed = gmod.parse_path(&path.to_string(), &locations).unwrap();
        assert_eq!(reparsed, path, "short round trip of {item}");

        let full = gmod
            .parse_from_full_path(&path.to_full_path_string(), &locations)
            .unwrap();
        assert_eq!(full, path, "full round trip of {item}");
    }
}

#[test]
fn test_short_parse_tolerates_whitespace_and_leading_slash() {
    let gmod = make_gmod();
    let locations = make_locations();
    let canonical = gmod.parse_path("411.1/C101", &locations).unwrap();
    for item in ["/411.1/C101", "  411.1/C101  ", " /411.1/C101"] {
        // A leading slash survives the trim, then the slash strip.
        let path = gmod.parse_path(item, &locations).unwrap();
        assert_eq!(path, canonical, "item {item:?}");
    }
}

#[test]
fn test_parse_failures() {
    let gmod = make_gmod();
    let locations = make_locations();

    assert_eq!(
        gmod.parse_path("", &locations).unwrap_err(),
        GmodPathParseError::Empty
    );
    assert!(matches!(
        gmod.parse_path("X99/C101", &locations).unwrap_err(),
        GmodPathParseError::NodeLookup(_)
    ));
    assert!(matches!(
        gmod.parse_path("411.1/C101.31-XYZ", &locations).unwrap_err(),
        GmodPathParseError::LocationParse(_)
    ));
    // The seed resolves but nothing below it matches.
    assert_eq!(
        gmod.parse_path("C101.72/C101.31", &locations).unwrap_err(),
        GmodPathParseError::NotFound
    );

    assert!(matches!(
        gmod.parse_from_full_path("400a/410", &locations).unwrap_err(),
        GmodPathParseError::MissingRoot(_)
    ));
    // VE/410 skips 400a: broken link at index 0.
    assert_eq!(
        gmod.parse_from_full_path("VE/410/411", &locations).unwrap_err(),
        GmodPathParseError::InvalidSequence {
            missing_link_at: Some(0)
        }
    );
}

#[test]
fn test_full_parse_spreads_location_across_set() {
    let gmod = make_gmod();
    let locations = make_locations();

    // The location sits on 411.1 only; its set spans 411i..411.1.
    let path = gmod
        .parse_from_full_path("VE/400a/410/411/411i/411.1-2/CS1/C101/C101.3/C101.31-2", &locations)
        .unwrap();
    assert_eq!(path[4].to_string(), "411i-2");
    assert_eq!(path[5].to_string(), "411.1-2");
    assert_eq!(path.node().to_string(), "C101.31-2");
    assert_eq!(path.to_string(), "411.1-2/C101.31-2");
}

#[test]
fn test_full_parse_rejects_location_outside_sets() {
    let gmod = make_gmod();
    let locations = make_locations();

    // 410 is a plain group: it individualizes with nothing.
    let err = gmod
        .parse_from_full_path("VE/400a/410-1/411/411i/411.1/CS1/C101/C101.3/C101.31", &locations)
        .unwrap_err();
    assert!(matches!(err, GmodPathParseError::InvalidIndividualization(_)));
}

#[test]
fn test_indexing_and_iteration() {
    let gmod = make_gmod();
    let locations = make_locations();
    let path = gmod.parse_from_full_path(FULL_I101, &locations).unwrap();

    assert_eq!(path[0].code(), "VE");
    assert_eq!(path[10].code(), "I101");
    assert_eq!(path.get(11), None);

    let items: Vec<(usize, &str)> = path.iter().map(|(d, n)| (d, n.code())).collect();
    assert_eq!(items.len(), path.length());
    assert_eq!(items[0], (0, "VE"));
    assert_eq!(items[10], (10, "I101"));
    for (depth, node) in path.iter() {
        assert_eq!(&path[depth], node);
    }

    let tail: Vec<&str> = path.iter_from(8).map(|(_, n)| n.code()).collect();
    assert_eq!(tail, ["C101.7", "C101.72", "I101"]);
}

#[test]
fn test_without_locations_is_idempotent() {
    let gmod = make_gmod();
    let locations = make_locations();
    let path = gmod.parse_path("411.1/C101.31-2", &locations).unwrap();

    let stripped = path.without_locations();
    assert!(stripped.iter().all(|(_, node)| node.location().is_none()));
    assert_eq!(stripped.without_locations(), stripped);
    assert_eq!(stripped.to_string(), "411.1/C101.31");
}

#[test]
fn test_individualizable_sets_are_contiguous() {
    let gmod = make_gmod();
    let locations = make_locations();
    let path = gmod.parse_path("411.1/C101.31-2", &locations).unwrap();

    let sets = path.individualizable_sets();
    assert_eq!(sets.len(), 2);
    for set in &sets {
        let indices = set.node_indices();
        assert!(indices.windows(2).all(|w| w[1] == w[0] + 1));
    }
    // 411i..411.1 individualize together; the target stands alone.
    assert_eq!(sets[0].node_indices(), [4, 5]);
    assert_eq!(sets[1].node_indices(), [9]);
    assert_eq!(sets[1].location().unwrap().as_str(), "2");
    assert!(path.is_individualizable());
}

#[test]
fn test_set_location_installs_on_every_member() {
    let gmod = make_gmod();
    let locations = make_locations();
    let path = gmod.parse_path("411.1/C101.31", &locations).unwrap();

    let mut sets = path.individualizable_sets();
    let mut set = sets.remove(0);
    assert_eq!(set.node_indices(), [4, 5]);
    set.set_location(Some(locations.parse("1").unwrap()));
    let built = set.build();
    assert_eq!(built[4].location().unwrap().as_str(), "1");
    assert_eq!(built[5].location().unwrap().as_str(), "1");
    assert_eq!(built.to_string(), "411.1-1/C101.31");
}

#[test]
fn test_equality_is_pairwise() {
    let gmod = make_gmod();
    let locations = make_locations();
    let plain = gmod.parse_path("411.1/C101.31", &locations).unwrap();
    let located = gmod.parse_path("411.1/C101.31-2", &locations).unwrap();
    assert_ne!(plain, located);
    assert_eq!(plain, located.without_locations());
}

#[test]
fn test_normal_assignment_name() {
    let gmod = make_gmod();
    let locations = make_locations();
    let path = gmod.parse_path("411.1/C101", &locations).unwrap();

    // 411.1 sits at depth 5 and assigns a name to its product C101.
    assert_eq!(path.normal_assignment_name(5), Some("propulsion engine"));
    assert_eq!(path.normal_assignment_name(0), None);
    assert_eq!(path.normal_assignment_name(99), None);
}

#[test]
fn test_common_names_prefer_assignments() {
    let gmod = make_gmod();
    let locations = make_locations();
    let path = gmod.parse_path("411.1/C101.31", &locations).unwrap();

    let names = path.common_names();
    // 411.1 renames itself after its assigned product; C101.31 keeps
    // its common name.
    assert_eq!(names.len(), 2);
    assert_eq!(names[0], (5, "propulsion engine".to_string()));
    assert_eq!(names[1], (9, "Fuel system".to_string()));
}

#[test]
fn test_validated_construction() {
    let gmod = make_gmod();
    let locations = make_locations();
    let path = gmod.parse_from_full_path(FULL_I101, &locations).unwrap();

    let rebuilt = GmodPath::new(path.node().clone(), path.parents().to_vec()).unwrap();
    assert_eq!(rebuilt, path);

    // Dropping an intermediate parent breaks the chain.
    let mut parents = path.parents().to_vec();
    parents.remove(3);
    assert!(GmodPath::new(path.node().clone(), parents).is_err());
}
