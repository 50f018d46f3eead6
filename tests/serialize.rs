#![cfg(feature = "serde")]

use nalgebra::Point3;
use tubular::prelude::*;

fn path() -> CubicPath<f64> {
    let mut path = CubicPath::from_points_with_continuities(
        [
            Point3::new(0., 0., 0.),
            Point3::new(1., 2., 0.),
            Point3::new(3., 1., -1.),
        ],
        [Continuity::C0, Continuity::C1, Continuity::C2],
        true,
    );
    path.try_change_left_interpolant(1, Point3::new(0.5, 1.5, 0.5))
        .unwrap();
    path
}

#[test]
fn path_round_trips_through_json() {
    let path = path();
    let json = serde_json::to_string_pretty(&path).unwrap();
    let restored: CubicPath<f64> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, path);
    assert_eq!(restored.try_continuity(2).unwrap(), Continuity::C2);
    assert_eq!(restored.observer_count(), 0);
}

#[test]
fn continuity_is_stored_as_its_tag() {
    let json = serde_json::to_value(path()).unwrap();
    assert_eq!(json["points"][0]["continuity"], 0);
    assert_eq!(json["points"][2]["continuity"], 2);
    assert_eq!(json["is_loop"], true);
}

#[test]
fn unknown_continuity_tag_is_rejected() {
    let mut json = serde_json::to_value(path()).unwrap();
    json["points"][1]["continuity"] = serde_json::json!(99);
    let restored = serde_json::from_value::<CubicPath<f64>>(json);
    assert!(restored.is_err());
}
