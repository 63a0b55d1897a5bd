//! Shared fixture: a small GMOD shaped like the real model.
//!
//! The hierarchy covers the structures the algorithms care about:
//! grouped asset functions, a composition node, a product selection
//! reused deeper in the model (so traversal must budget occurrences),
//! product function leaves and a pruned (`installSubstructure: false`)
//! branch.
//!
//! ```text
//! VE ── 400a ── 410 ─┬─ 411 ── 411i ── 411.1 ── CS1 ── C101 ─┬─ C101.3 ── C101.31 ── CS1 (reused)
//!                    │                                        └─ C101.7 ── C101.72 ── I101
//!                    └─ 412 (not installed) ── C103
//! ```

use vista_gmod::{Gmod, GmodDto, GmodNodeDto};
use vista_locations::{Locations, LocationsDto, RelativeLocationDto};
use vista_types::VisVersion;

pub fn node(category: &str, node_type: &str, code: &str, name: &str) -> GmodNodeDto {
    GmodNodeDto {
        category: category.into(),
        node_type: node_type.into(),
        code: code.into(),
        name: name.into(),
        common_name: None,
        definition: None,
        common_definition: None,
        install_substructure: None,
        normal_assignment_names: None,
    }
}

pub fn gmod_dto() -> GmodDto {
    let mut items = vec![
        node("ASSET", "TYPE", "VE", "Vessel"),
        node("ASSET FUNCTION", "GROUP", "400a", "Machinery main components"),
        node("ASSET FUNCTION", "GROUP", "410", "Prime movers"),
        node("ASSET FUNCTION", "GROUP", "411", "Propulsion engine arrangement"),
        node("ASSET FUNCTION", "COMPOSITION", "411i", "Propulsion engines"),
        node("ASSET FUNCTION", "LEAF", "411.1", "Propulsion driver"),
        node("PRODUCT", "SELECTION", "CS1", "Combustion engine selection"),
        node("PRODUCT", "TYPE", "C101", "Propulsion engine"),
        node("PRODUCT FUNCTION", "GROUP", "C101.3", "Engine fuel arrangement"),
        node("PRODUCT FUNCTION", "LEAF", "C101.31", "Fuel system"),
        node("PRODUCT FUNCTION", "GROUP", "C101.7", "Engine monitoring arrangement"),
        node("PRODUCT FUNCTION", "LEAF", "C101.72", "Engine shutdown system"),
        node("PRODUCT", "TYPE", "I101", "Shutdown instrumentation"),
        node("ASSET FUNCTION", "LEAF", "412", "Auxiliary engine arrangement"),
        node("PRODUCT", "TYPE", "C103", "Auxiliary engine"),
    ];

    // 411.1 names its assigned product; used by the naming operations.
    items[5].common_name = Some("Main engine driver".into());
    items[5].normal_assignment_names =
        Some([("C101".to_string(), "propulsion engine".to_string())].into());
    items[9].common_name = Some("Fuel system".into());
    // 412 and its subtree are pruned during traversal.
    items[13].install_substructure = Some(false);

    let relations = [
        ("VE", "400a"),
        ("400a", "410"),
        ("410", "411"),
        ("411", "411i"),
        ("411i", "411.1"),
        ("411.1", "CS1"),
        ("CS1", "C101"),
        ("C101", "C101.3"),
        ("C101.3", "C101.31"),
        ("C101", "C101.7"),
        ("C101.7", "C101.72"),
        ("C101.72", "I101"),
        ("C101.31", "CS1"),
        ("410", "412"),
        ("412", "C103"),
    ];

    GmodDto {
        vis_release: "3-4a".into(),
        items,
        relations: relations
            .iter()
            .map(|(parent, child)| vec![parent.to_string(), child.to_string()])
            .collect(),
    }
}

pub fn make_gmod() -> Gmod {
    Gmod::new(VisVersion::V3_4a, &gmod_dto()).unwrap()
}

pub fn locations_dto() -> LocationsDto {
    let items = [
        ('N', "Number"),
        ('P', "Port"),
        ('C', "Centre"),
        ('S', "Starboard"),
        ('U', "Upper"),
        ('M', "Middle"),
        ('L', "Lower"),
        ('I', "Inboard"),
        ('O', "Outboard"),
        ('F', "Forward"),
        ('A', "Aft"),
        ('H', "Horizontal"),
        ('V', "Vertical"),
    ];
    LocationsDto {
        vis_release: "3-4a".into(),
        items: items
            .into_iter()
            .map(|(code, name)| RelativeLocationDto {
                code,
                name: name.into(),
                definition: None,
            })
            .collect(),
    }
}

pub fn make_locations() -> Locations {
    Locations::new(VisVersion::V3_4a, &locations_dto()).unwrap()
}
