use std::f64::consts::PI;

use approx::assert_relative_eq;
use nalgebra::{Point2, Point3, Vector3};

use crate::{
    curve::{Continuity, CubicPath},
    error::PathError,
    extrude::{PathExtruder, PathExtruderOption},
    profile::{Circle, Polyline},
};

fn straight() -> CubicPath<f64> {
    CubicPath::from_points(
        [Point3::new(0., 0., 0.), Point3::new(5., 0., 0.)],
        Continuity::C1,
        false,
    )
}

fn triangle_loop() -> CubicPath<f64> {
    CubicPath::from_points(
        [
            Point3::new(1., 0., 0.),
            Point3::new(-0.5, 0.87, 0.),
            Point3::new(-0.5, -0.87, 0.),
        ],
        Continuity::C1,
        true,
    )
}

fn open_profile() -> Polyline<f64> {
    Polyline::try_new(
        vec![
            Point2::new(-1., 0.),
            Point2::new(0., 1.),
            Point2::new(1., 0.),
        ],
        false,
    )
    .unwrap()
}

fn assert_indices_in_range(extruder: &PathExtruder<f64>) {
    let count = extruder.mesh().vertices().len();
    assert!(extruder
        .mesh()
        .faces()
        .iter()
        .flatten()
        .all(|index| *index < count));
}

#[test]
fn open_path_closed_profile_counts() {
    let mut path = straight();
    let mut extruder = PathExtruder::new(
        PathExtruderOption::default()
            .with_resolution(6)
            .with_subdivisions(5),
    );
    extruder.enable(&mut path).unwrap();
    assert_eq!(extruder.mesh().vertices().len(), 6 * 6);
    assert_eq!(extruder.mesh().faces().len(), 2 * 5 * 6);
    assert_indices_in_range(&extruder);
}

#[test]
fn looped_path_closed_profile_counts() {
    let mut path = triangle_loop();
    let mut extruder = PathExtruder::new(
        PathExtruderOption::default()
            .with_resolution(4)
            .with_subdivisions(6)
            .with_uniform_scale(0.1),
    );
    extruder.enable(&mut path).unwrap();
    assert_eq!(extruder.mesh().vertices().len(), 6 * 4);
    assert_eq!(extruder.mesh().faces().len(), 2 * 6 * 4);
    assert_indices_in_range(&extruder);

    // the last ring links back to the first, so every vertex is shaded
    for normal in extruder.mesh().normals() {
        assert_relative_eq!(normal.norm(), 1., epsilon = 1e-9);
    }
}

#[test]
fn single_subdivision_loop_sweeps_three_rings() {
    let path = triangle_loop();
    let mut extruder = PathExtruder::new(
        PathExtruderOption::default()
            .with_resolution(4)
            .with_subdivisions(1)
            .with_uniform_scale(0.1),
    );
    extruder.try_rebuild(&path).unwrap();
    assert_eq!(extruder.option().subdivisions(), 1);
    assert_eq!(extruder.mesh().vertices().len(), 3 * 4);
    assert_eq!(extruder.mesh().faces().len(), 2 * 3 * 4);
    assert!(extruder.mesh().area() > 0.);
    for normal in extruder.mesh().normals() {
        assert_relative_eq!(normal.norm(), 1., epsilon = 1e-9);
    }

    // an open path keeps the single subdivision
    extruder.try_rebuild(&straight()).unwrap();
    assert_eq!(extruder.mesh().vertices().len(), 2 * 4);
    assert_eq!(extruder.mesh().faces().len(), 2 * 4);
}

#[test]
fn open_profile_counts() {
    let mut extruder = PathExtruder::new(
        PathExtruderOption::default()
            .with_resolution(5)
            .with_subdivisions(4),
    )
    .with_profile(open_profile());

    let mut path = straight();
    extruder.enable(&mut path).unwrap();
    assert_eq!(extruder.mesh().vertices().len(), 5 * 6);
    assert_eq!(extruder.mesh().faces().len(), 2 * 4 * 4);
    assert_indices_in_range(&extruder);

    let path = triangle_loop();
    extruder.set_subdivisions(7);
    extruder.try_rebuild(&path).unwrap();
    assert_eq!(extruder.mesh().vertices().len(), 7 * 6);
    assert_eq!(extruder.mesh().faces().len(), 2 * 7 * 4);
    assert_indices_in_range(&extruder);
}

#[test]
fn parameters_are_clamped() {
    let extruder = PathExtruder::<f64>::new(
        PathExtruderOption::default()
            .with_resolution(1)
            .with_subdivisions(0)
            .with_uniform_scale(-2.),
    );
    assert_eq!(extruder.option().resolution(), 3);
    assert_eq!(extruder.option().subdivisions(), 1);
    assert_eq!(extruder.option().uniform_scale(), 0.);

    let mut extruder = PathExtruder::<f64>::default();
    assert_eq!(extruder.option(), &PathExtruderOption::default());
    extruder.set_resolution(2);
    extruder.set_uniform_scale(f64::NAN);
    assert_eq!(extruder.option().resolution(), 3);
    assert_eq!(extruder.option().uniform_scale(), 0.);
}

#[test]
fn ring_vertices_follow_the_frame_basis() {
    let mut path = straight();
    let mut extruder = PathExtruder::new(
        PathExtruderOption::default()
            .with_resolution(4)
            .with_subdivisions(2)
            .with_uniform_scale(0.5),
    )
    .with_profile(Circle::new(2.));
    extruder.enable(&mut path).unwrap();

    // reference +z, up +y on a path heading along +x
    let vertices = extruder.mesh().vertices();
    assert_relative_eq!(vertices[0], Point3::new(0., 0., 1.), epsilon = 1e-12);
    assert_relative_eq!(vertices[1], Point3::new(0., 1., 0.), epsilon = 1e-12);
    assert_relative_eq!(vertices[2], Point3::new(0., 0., -1.), epsilon = 1e-12);
    assert_relative_eq!(vertices[8], Point3::new(5., 0., 1.), epsilon = 1e-12);
}

#[test]
fn straight_tube_normals_point_outward() {
    let mut path = straight();
    let mut extruder = PathExtruder::new(
        PathExtruderOption::default()
            .with_resolution(16)
            .with_subdivisions(4),
    );
    extruder.enable(&mut path).unwrap();
    let mesh = extruder.mesh();
    for (vertex, normal) in mesh.vertices().iter().zip(mesh.normals()) {
        let radial = Vector3::new(0., vertex.y, vertex.z).normalize();
        assert!(normal.dot(&radial) > 0.99);
        assert!(normal.x.abs() < 1e-9);
    }
}

#[test]
fn tube_area_matches_prism() {
    let mut path = straight();
    let n = 64;
    let mut extruder = PathExtruder::new(
        PathExtruderOption::default()
            .with_resolution(n)
            .with_subdivisions(8)
            .with_uniform_scale(0.5),
    );
    extruder.enable(&mut path).unwrap();
    let chord = 2. * 0.5 * (PI / n as f64).sin();
    let prism = 5. * n as f64 * chord;
    assert_relative_eq!(extruder.mesh().area(), prism, epsilon = 1e-9);
    assert_relative_eq!(extruder.mesh().area(), 2. * PI * 0.5 * 5., max_relative = 1e-2);
}

#[test]
fn path_changes_rebuild_lazily() {
    let mut path = straight();
    let mut extruder = PathExtruder::new(PathExtruderOption::default().with_subdivisions(3));
    extruder.enable(&mut path).unwrap();
    assert_eq!(path.observer_count(), 1);
    assert!(!extruder.is_dirty());
    assert!(!extruder.update(&path).unwrap());

    path.try_change_point(1, Point3::new(0., 5., 0.)).unwrap();
    assert!(extruder.is_dirty());
    assert!(extruder.update(&path).unwrap());
    assert!(!extruder.update(&path).unwrap());
    let end = extruder.mesh().vertices().last().copied().unwrap();
    assert!(end.y > 4.);

    extruder.set_subdivisions(6);
    assert!(extruder.update(&path).unwrap());
    assert_eq!(extruder.mesh().vertices().len(), 7 * 4);
}

#[test]
fn disable_releases_mesh_and_subscription() {
    let mut path = straight();
    let mut extruder = PathExtruder::new(PathExtruderOption::default());
    extruder.enable(&mut path).unwrap();
    assert!(!extruder.mesh().is_empty());

    extruder.disable(&mut path);
    assert!(!extruder.is_enabled());
    assert!(extruder.mesh().is_empty());
    assert_eq!(path.observer_count(), 0);

    path.add_point(Point3::new(5., 5., 0.));
    assert!(!extruder.update(&path).unwrap());
    assert!(extruder.mesh().is_empty());

    extruder.enable(&mut path).unwrap();
    assert_eq!(extruder.mesh().vertices().len(), 11 * 4);
}

#[test]
fn enabling_on_a_short_path_retries_after_changes() {
    let mut path = CubicPath::new();
    path.add_point(Point3::new(0., 0., 0.));
    let mut extruder = PathExtruder::new(PathExtruderOption::default());
    let err = extruder.enable(&mut path).unwrap_err();
    assert_eq!(
        err.downcast_ref::<PathError>(),
        Some(&PathError::InsufficientPoints { count: 1 })
    );
    assert!(extruder.is_enabled());
    assert!(extruder.mesh().is_empty());

    path.add_point(Point3::new(0., 0., 3.));
    assert!(extruder.update(&path).unwrap());
    assert_eq!(extruder.mesh().faces().len(), 2 * 10 * 4);
}
