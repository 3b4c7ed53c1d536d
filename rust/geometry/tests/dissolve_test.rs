// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use adjacency_dissolve_core::{GroupLabel, MergeStrategy};
use adjacency_dissolve_geometry::{
    adjacency_dissolve, AttrValue, AttributeMerge, DissolveOptions, Error, Feature, Polygon,
};
use approx::assert_relative_eq;

fn square(id: u32, x: f64, y: f64) -> Feature<u32> {
    Feature::new(id, Polygon::rectangle(x, y, x + 1.0, y + 1.0))
}

fn members(out: &[adjacency_dissolve_geometry::DissolvedFeature<u32>]) -> Vec<Vec<u32>> {
    out.iter().map(|f| f.members.clone()).collect()
}

#[test]
fn edge_sharing_grid_dissolves_to_one_feature() {
    let mut features = Vec::new();
    for row in 0..3 {
        for col in 0..3 {
            features.push(square(row * 3 + col, col as f64, row as f64));
        }
    }

    let out = adjacency_dissolve(features, &DissolveOptions::default()).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].label, GroupLabel(0));
    assert_eq!(out[0].members, (0..9).collect::<Vec<_>>());
    assert_eq!(out[0].geometry.len(), 1);
    assert_relative_eq!(out[0].area(), 9.0, epsilon = 1e-9);
}

#[test]
fn corner_touch_follows_point_filter() {
    let features = || vec![square(1, 0.0, 0.0), square(2, 1.0, 1.0)];

    let with_points = adjacency_dissolve(features(), &DissolveOptions::default()).unwrap();
    assert_eq!(members(&with_points), vec![vec![1, 2]]);
    assert_relative_eq!(with_points[0].area(), 2.0, epsilon = 1e-9);

    let options = DissolveOptions::default().with_point_adjacency(false);
    let without_points = adjacency_dissolve(features(), &options).unwrap();
    assert_eq!(members(&without_points), vec![vec![1], vec![2]]);
    assert_eq!(without_points[0].label, GroupLabel(0));
    assert_eq!(without_points[1].label, GroupLabel(1));
}

#[test]
fn isolated_features_follow_clusters() {
    let features = vec![
        square(9, 20.0, 20.0),
        square(5, 0.0, 0.0),
        square(7, 1.0, 0.0),
        square(3, 10.0, 10.0),
    ];

    let out = adjacency_dissolve(features, &DissolveOptions::default()).unwrap();
    assert_eq!(members(&out), vec![vec![5, 7], vec![3], vec![9]]);
    let labels: Vec<u32> = out.iter().map(|f| f.label.0).collect();
    assert_eq!(labels, vec![0, 1, 2]);
    assert_relative_eq!(out[0].area(), 2.0, epsilon = 1e-9);
    assert_relative_eq!(out[1].area(), 1.0, epsilon = 1e-9);
}

#[test]
fn strategies_give_same_groups() {
    let features = || {
        vec![
            square(1, 0.0, 0.0),
            square(2, 1.0, 0.0),
            square(3, 5.0, 0.0),
            square(4, 6.0, 0.0),
            square(5, 2.0, 0.0),
            square(6, 12.0, 0.0),
        ]
    };

    let union_find = DissolveOptions {
        grouping: adjacency_dissolve_core::DissolveConfig::default()
            .with_merge_strategy(MergeStrategy::UnionFind),
        ..DissolveOptions::default()
    };
    let incremental = DissolveOptions {
        grouping: adjacency_dissolve_core::DissolveConfig::default()
            .with_merge_strategy(MergeStrategy::Incremental),
        ..DissolveOptions::default()
    };

    let a = adjacency_dissolve(features(), &union_find).unwrap();
    let b = adjacency_dissolve(features(), &incremental).unwrap();
    assert_eq!(members(&a), vec![vec![1, 2, 5], vec![3, 4], vec![6]]);
    assert_eq!(members(&a), members(&b));
}

#[test]
fn attributes_follow_policy() {
    let features = || {
        vec![
            square(2, 1.0, 0.0).with_attribute("zone", AttrValue::String("C2".to_string())),
            square(1, 0.0, 0.0).with_attribute("zone", AttrValue::String("R1".to_string())),
        ]
    };

    let first = adjacency_dissolve(features(), &DissolveOptions::default()).unwrap();
    assert_eq!(
        first[0].attributes.get("zone"),
        Some(&AttrValue::String("R1".to_string()))
    );
    assert!(!first[0].attributes.contains_key("dissolve_assignment"));
    assert!(!first[0].attributes.contains_key("index"));

    let options = DissolveOptions::default().with_attributes(AttributeMerge::Drop);
    let dropped = adjacency_dissolve(features(), &options).unwrap();
    assert!(dropped[0].attributes.is_empty());
    assert_eq!(dropped[0].label, GroupLabel(0));
}

#[test]
fn line_through_polygon_groups_without_point_adjacency() {
    let features = || {
        vec![
            Feature::new(1u32, Polygon::rectangle(0.0, 0.0, 4.0, 4.0)),
            Feature::new(2u32, Polygon::from_coords(&[[-1.0, 2.0], [5.0, 2.0]])),
            Feature::new(3u32, Polygon::from_coords(&[[2.0, 1.0], [6.0, 1.0]])),
        ]
    };

    let options = DissolveOptions::default().with_point_adjacency(false);
    let out = adjacency_dissolve(features(), &options).unwrap();
    assert_eq!(members(&out), vec![vec![1, 2, 3]]);
}

#[test]
fn overlapping_features_merge_area() {
    let features = vec![
        Feature::new(1u32, Polygon::rectangle(0.0, 0.0, 2.0, 2.0)),
        Feature::new(2u32, Polygon::rectangle(1.0, 1.0, 3.0, 3.0)),
    ];

    let out = adjacency_dissolve(features, &DissolveOptions::default()).unwrap();
    assert_eq!(members(&out), vec![vec![1, 2]]);
    assert_relative_eq!(out[0].area(), 7.0, epsilon = 1e-9);
}

#[test]
fn empty_input_gives_empty_output() {
    let out = adjacency_dissolve(Vec::<Feature<u32>>::new(), &DissolveOptions::default()).unwrap();
    assert!(out.is_empty());
}

#[test]
fn string_ids_are_supported() {
    let features = vec![
        Feature::new("b".to_string(), Polygon::rectangle(1.0, 0.0, 2.0, 1.0)),
        Feature::new("a".to_string(), Polygon::rectangle(0.0, 0.0, 1.0, 1.0)),
        Feature::new("c".to_string(), Polygon::rectangle(4.0, 0.0, 5.0, 1.0)),
    ];

    let out = adjacency_dissolve(features, &DissolveOptions::default()).unwrap();
    assert_eq!(out[0].members, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(out[1].members, vec!["c".to_string()]);
}

#[test]
fn duplicate_ids_are_rejected() {
    let features = vec![square(1, 0.0, 0.0), square(1, 4.0, 0.0)];
    let err = adjacency_dissolve(features, &DissolveOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::Grouping(adjacency_dissolve_core::Error::DuplicateIdentifier(_))
    ));
}

#[test]
fn reserved_attribute_names_are_rejected() {
    let features = vec![square(1, 0.0, 0.0).with_attribute("index", AttrValue::Int(0))];
    let err = adjacency_dissolve(features, &DissolveOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::Grouping(adjacency_dissolve_core::Error::ReservedName(_))
    ));
}
