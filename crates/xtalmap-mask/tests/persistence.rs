//! Integration tests: masks survive mask → tree → JSON → tree → mask with
//! identical membership, and apply cleanly to fixture maps.

use nalgebra::{Vector2, Vector3};
use proptest::prelude::*;
use xtalmap_core::{Extent, Point, Size};
use xtalmap_map::AnyMap;
use xtalmap_mask::{apply_mask, from_tree, to_tree, CompositeOp, Mask, TreeGroup};
use xtalmap_test_utils::{ramp_map, ramp_value};

fn through_json(mask: &Mask) -> Mask {
    let json = serde_json::to_string(&to_tree(mask)).unwrap();
    let tree: TreeGroup = serde_json::from_str(&json).unwrap();
    from_tree(&tree).unwrap()
}

#[test]
fn json_shape_is_the_named_group_tree() {
    let mask = Mask::invert(Mask::Extent {
        start: [0, 1],
        end: [2, 3],
    });
    let value = serde_json::to_value(to_tree(&mask)).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "name": "Invert",
            "groups": [{
                "name": "Extent",
                "groups": [
                    { "name": "Start", "items": { "x": 0, "y": 1 } },
                    { "name": "End", "items": { "x": 2, "y": 3 } }
                ]
            }]
        })
    );
}

#[test]
fn nested_composite_round_trips() {
    let mask = Mask::composite(
        CompositeOp::Or,
        Mask::Sphere {
            origin: Vector3::new(1.0, 2.0, 3.0),
            radius: 2.5,
        },
        Mask::composite(
            CompositeOp::Xor,
            Mask::Circle {
                center: Vector2::new(0.0, 0.0),
                radius: 4.0,
            },
            Mask::Polygon {
                nodes: vec![
                    Vector2::new(-1.0, -1.0),
                    Vector2::new(3.0, -1.0),
                    Vector2::new(3.0, 0.5),
                ],
            },
        ),
    );
    assert_eq!(through_json(&mask), mask);
}

#[test]
fn apply_to_ramp_keeps_inside_values() {
    let extent = Extent::at_origin(Size::new(4, 4, 4));
    let mut map = AnyMap::from(ramp_map(extent));
    let ball = Mask::Sphere {
        origin: Vector3::new(0.0, 0.0, 0.0),
        radius: 1.5,
    };
    apply_mask(&mut map, &ball, -1.0);
    assert_eq!(map.get_real(Point::new(1, 1, 0)), ramp_value(Point::new(1, 1, 0)));
    assert_eq!(map.get_real(Point::new(0, 0, 1)), ramp_value(Point::new(0, 0, 1)));
    assert_eq!(map.get_real(Point::new(1, 1, 2)), -1.0);
    assert_eq!(map.get_real(Point::new(3, 3, 3)), -1.0);
}

// ── Properties ──────────────────────────────────────────────────────

fn arb_leaf() -> impl Strategy<Value = Mask> {
    prop_oneof![
        (-8.0f64..8.0, -8.0f64..8.0, 0.0f64..6.0).prop_map(|(x, y, r)| Mask::Circle {
            center: Vector2::new(x, y),
            radius: r,
        }),
        (-8i64..8, -8i64..8, 0i64..8, 0i64..8).prop_map(|(x, y, w, h)| Mask::Extent {
            start: [x, y],
            end: [x + w, y + h],
        }),
        prop::collection::vec((-8.0f64..8.0, -8.0f64..8.0), 3..7).prop_map(|pts| {
            Mask::Polygon {
                nodes: pts.into_iter().map(|(x, y)| Vector2::new(x, y)).collect(),
            }
        }),
        (-8.0f64..8.0, -8.0f64..8.0, -8.0f64..8.0, 0.0f64..6.0).prop_map(|(x, y, z, r)| {
            Mask::Sphere {
                origin: Vector3::new(x, y, z),
                radius: r,
            }
        }),
    ]
}

fn arb_mask() -> impl Strategy<Value = Mask> {
    arb_leaf().prop_recursive(3, 12, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(Mask::invert),
            (
                prop_oneof![
                    Just(CompositeOp::And),
                    Just(CompositeOp::Or),
                    Just(CompositeOp::Xor)
                ],
                inner.clone(),
                inner,
            )
                .prop_map(|(op, a, b)| Mask::composite(op, a, b)),
        ]
    })
}

proptest! {
    #[test]
    fn round_trip_preserves_membership(
        mask in arb_mask(),
        queries in prop::collection::vec((-10.0f64..10.0, -10.0f64..10.0, -10.0f64..10.0), 16),
    ) {
        let back = through_json(&mask);
        for (x, y, z) in queries {
            let p = Vector3::new(x, y, z);
            prop_assert_eq!(back.is_inside(&p), mask.is_inside(&p));
        }
    }
}
