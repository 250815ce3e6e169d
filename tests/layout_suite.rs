use std::path::{Path, PathBuf};

use dagre_group_layout::layout_dump::LayoutDump;
use dagre_group_layout::{
    LayoutConfig, LayoutEngine, LayoutError, LayoutRequest, RankDir, apply_group_layout,
    parse_request,
};

fn fixture_path(rel: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(rel)
}

fn load_fixture(rel: &str) -> LayoutRequest {
    let input = std::fs::read_to_string(fixture_path(rel)).expect("fixture read failed");
    parse_request(&input).expect("fixture parse failed")
}

fn ranked() -> LayoutConfig {
    LayoutConfig {
        engine: LayoutEngine::Ranked,
        rankdir: RankDir::TB,
        margin_x: 0.0,
        margin_y: 0.0,
        ..LayoutConfig::default()
    }
}

fn laid_out(rel: &str) -> LayoutRequest {
    let mut request = load_fixture(rel);
    apply_group_layout(&mut request, &ranked()).expect("layout failed");
    request
}

fn position_of(request: &LayoutRequest, id: &str) -> (f32, f32) {
    let record = request
        .data
        .nodes
        .iter()
        .chain(&request.data.groups)
        .find(|record| record.id.as_str() == id)
        .unwrap_or_else(|| panic!("no record {id}"));
    (
        record.top.unwrap_or_else(|| panic!("{id} has no top")),
        record.left.unwrap_or_else(|| panic!("{id} has no left")),
    )
}

#[test]
fn places_every_fixture_entity() {
    // Keep this list explicit so new fixtures must be added intentionally.
    let candidates = [
        "flat.json",
        "single_group.json",
        "nested.json",
        "siblings.json",
        "numeric_ids.json5",
    ];

    for rel in candidates {
        assert!(fixture_path(rel).exists(), "fixture missing: {rel}");
        let request = laid_out(rel);
        let dump = LayoutDump::from_request(&request);
        let unplaced: Vec<_> = dump.unplaced().map(|e| e.id.clone()).collect();
        assert!(unplaced.is_empty(), "{rel}: unplaced {unplaced:?}");
    }
}

#[test]
fn flat_fixture_skips_grouping() {
    let request = laid_out("flat.json");
    assert_eq!(position_of(&request, "a"), (0.0, 0.0));
    assert_eq!(position_of(&request, "b"), (90.0, 0.0));
    assert_eq!(position_of(&request, "c"), (90.0, 120.0));
}

#[test]
fn single_group_offsets_members() {
    let request = laid_out("single_group.json");
    assert_eq!(position_of(&request, "a"), (0.0, 0.0));
    assert_eq!(position_of(&request, "g1"), (90.0, 0.0));
    assert_eq!(position_of(&request, "b"), (90.0, 0.0));
    assert_eq!(position_of(&request, "c"), (90.0, 120.0));

    let group = &request.data.groups[0];
    assert_eq!(group.extra["label"], "Cluster");
    assert_eq!(request.data.edges[0].payload["label"], "calls");
    assert_eq!(request.data.edges[0].target.as_str(), "b");
}

#[test]
fn nested_groups_accumulate_offsets() {
    let request = laid_out("nested.json");
    assert_eq!(position_of(&request, "a"), (0.0, 0.0));
    assert_eq!(position_of(&request, "g1"), (90.0, 0.0));
    assert_eq!(position_of(&request, "b"), (90.0, 0.0));
    assert_eq!(position_of(&request, "g2"), (180.0, 0.0));
    assert_eq!(position_of(&request, "d"), (180.0, 0.0));
    assert_eq!(position_of(&request, "e"), (270.0, 0.0));
}

#[test]
fn sibling_groups_both_land() {
    let request = laid_out("siblings.json");
    assert_eq!(position_of(&request, "outer"), (0.0, 0.0));
    assert_eq!(position_of(&request, "left"), (0.0, 0.0));
    assert_eq!(position_of(&request, "right"), (120.0, 0.0));
    assert_eq!(position_of(&request, "x"), (0.0, 0.0));
    assert_eq!(position_of(&request, "y"), (120.0, 0.0));
}

#[test]
fn numeric_and_string_ids_match() {
    let request = laid_out("numeric_ids.json5");
    assert_eq!(request.ranksep, 10.0);
    assert_eq!(position_of(&request, "1"), (0.0, 0.0));
    assert_eq!(position_of(&request, "10"), (50.0, 0.0));
    assert_eq!(position_of(&request, "2"), (50.0, 0.0));
}

#[test]
fn cyclic_fixture_is_rejected() {
    let mut request = load_fixture("cycle.json");
    let err = apply_group_layout(&mut request, &ranked()).unwrap_err();
    assert!(matches!(err, LayoutError::NestingCycle { .. }));
    assert!(request.data.nodes[0].top.is_none());
}

#[test]
fn depth_limit_from_config() {
    let mut request = load_fixture("nested.json");
    let config = LayoutConfig {
        max_depth: Some(1),
        ..ranked()
    };
    let err = apply_group_layout(&mut request, &config).unwrap_err();
    assert_eq!(
        err.to_string(),
        "group `g2` is nested 2 levels deep, exceeding the limit of 1"
    );
}

#[cfg(feature = "dagre")]
#[test]
fn dagre_places_nested_fixture() {
    let mut request = load_fixture("nested.json");
    apply_group_layout(&mut request, &LayoutConfig::default()).expect("layout failed");

    for id in ["a", "b", "d", "e", "g1", "g2"] {
        let (top, left) = position_of(&request, id);
        assert!(top.is_finite() && left.is_finite(), "{id}: ({top}, {left})");
    }
    let (a_top, _) = position_of(&request, "a");
    let (g1_top, _) = position_of(&request, "g1");
    assert!(g1_top > a_top);
}
