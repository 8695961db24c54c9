//! Scenario tests for visibility polygons.

use approx::assert_relative_eq;
use sightline::polygon::polygon_signed_area;
use sightline::visibility::{compute_visibility, compute_visibility_with, Scene, VisibilityOptions};
use sightline::{Point2, Polygon, SegmentDefect, Segment2, VisibilityError};

fn init() {
    env_logger::try_init().ok();
}

fn segs(coords: &[(f64, f64, f64, f64)]) -> Vec<Segment2<f64>> {
    coords
        .iter()
        .map(|&(x1, y1, x2, y2)| Segment2::from_coords(x1, y1, x2, y2))
        .collect()
}

fn room() -> Vec<Segment2<f64>> {
    segs(&[
        (-5.0, -5.0, 5.0, -5.0),
        (5.0, -5.0, 5.0, 5.0),
        (5.0, 5.0, -5.0, 5.0),
        (-5.0, 5.0, -5.0, -5.0),
    ])
}

fn count(ring: &[Point2<f64>], p: Point2<f64>) -> usize {
    ring.iter().filter(|&&q| q == p).count()
}

fn assert_well_formed(ring: &[Point2<f64>]) {
    assert!(ring.len() >= 4, "ring too short: {:?}", ring);
    assert_eq!(ring.first(), ring.last());
    for pair in ring.windows(2) {
        assert!(pair[0].distance(pair[1]) > 1e-9, "repeated vertex {:?}", pair[0]);
    }
    assert!(polygon_signed_area(ring) > 0.0);
}

#[test]
fn test_wall_east_of_viewpoint() {
    init();
    let wall = segs(&[(1.0, -1.0, 1.0, 1.0)]);
    let ring = compute_visibility(Point2::new(0.0, 0.0), &wall, Some(10.0)).unwrap();
    assert_well_formed(&ring);

    assert_eq!(count(&ring, Point2::new(1.0, -1.0)), 1);
    assert_eq!(count(&ring, Point2::new(1.0, 1.0)), 1);
    for p in ring.iter().filter(|p| p.x != 1.0) {
        assert_relative_eq!(p.distance(Point2::origin()), 10.0, epsilon = 1e-9);
    }
}

#[test]
fn test_nearer_wall_occludes_farther() {
    init();
    let walls = segs(&[(2.0, -2.0, 2.0, 2.0), (1.0, -1.0, 1.0, 1.0)]);
    let far = walls[0];
    let ring = compute_visibility(Point2::new(0.0, 0.0), &walls, Some(10.0)).unwrap();
    assert_well_formed(&ring);

    assert!(ring.iter().all(|&p| far.distance_to_point(p) > 1e-6));
    assert_eq!(count(&ring, Point2::new(1.0, -1.0)), 1);
    assert_eq!(count(&ring, Point2::new(1.0, 1.0)), 1);
}

#[test]
fn test_step_between_walls() {
    init();
    // The far wall is visible above the near one from 45° on
    let walls = segs(&[(1.0, -1.0, 1.0, 1.0), (3.0, 0.0, 3.0, 4.0)]);
    let ring = compute_visibility(Point2::new(0.0, 0.0), &walls, Some(10.0)).unwrap();
    assert_well_formed(&ring);

    let i = ring.iter().position(|&p| p == Point2::new(1.0, 1.0)).unwrap();
    assert_relative_eq!(ring[i + 1].x, 3.0, epsilon = 1e-12);
    assert_relative_eq!(ring[i + 1].y, 3.0, epsilon = 1e-12);
    assert_eq!(ring[i + 2], Point2::new(3.0, 4.0));
    assert_eq!(count(&ring, Point2::new(3.0, 0.0)), 0);
}

#[test]
fn test_segment_straddling_seam() {
    init();
    let a = 179.0f64.to_radians();
    let b = -179.0f64.to_radians();
    let pa = Point2::new(5.0 * a.cos(), 5.0 * a.sin());
    let pb = Point2::new(5.0 * b.cos(), 5.0 * b.sin());
    let wall = Segment2::new(pa, pb);

    let ring = compute_visibility(Point2::new(0.0, 0.0), &[wall], Some(10.0)).unwrap();
    assert_well_formed(&ring);

    // Starts on the wall, no duplicate at the seam
    assert!(wall.distance_to_point(ring[0]) < 1e-12);
    assert_eq!(count(&ring, pa), 1);
    assert_eq!(count(&ring, pb), 1);
    assert_eq!(ring[1], pb);
    assert_eq!(ring[ring.len() - 2], pa);
    for p in &ring[2..ring.len() - 2] {
        assert_relative_eq!(p.distance(Point2::origin()), 10.0, epsilon = 1e-9);
    }
}

#[test]
fn test_empty_scene_is_circle() {
    init();
    let center = Point2::new(-2.0, 7.5);
    let ring = compute_visibility::<f64>(center, &[], Some(3.0)).unwrap();
    assert_well_formed(&ring);
    assert_eq!(ring.len(), 65);
    for p in &ring {
        assert_relative_eq!(p.distance(center), 3.0, epsilon = 1e-12);
    }

    let n = 64.0;
    let expected = 0.5 * n * 9.0 * (2.0 * std::f64::consts::PI / n).sin();
    assert_relative_eq!(polygon_signed_area(&ring), expected, epsilon = 1e-9);
}

#[test]
fn test_closed_room() {
    init();
    let ring = compute_visibility(Point2::new(1.0, 2.0), &room(), None).unwrap();
    assert_well_formed(&ring);
    assert_relative_eq!(polygon_signed_area(&ring), 100.0, epsilon = 1e-9);
    for corner in [(-5.0, -5.0), (5.0, -5.0), (5.0, 5.0), (-5.0, 5.0)] {
        assert_eq!(count(&ring, Point2::new(corner.0, corner.1)), 1);
    }
    // Nothing reaches the bounding circle
    assert!(ring.iter().all(|p| p.x.abs() <= 5.0 + 1e-9 && p.y.abs() <= 5.0 + 1e-9));
}

#[test]
fn test_shared_corner_hides_what_is_behind() {
    init();
    let walls = segs(&[
        (2.0, -2.0, 2.0, 2.0),
        (2.0, 2.0, -2.0, 2.0),
        (5.0, 0.0, 0.0, 5.0),
    ]);
    let behind = walls[2];
    let ring = compute_visibility(Point2::new(0.0, 0.0), &walls, Some(10.0)).unwrap();
    assert_well_formed(&ring);

    assert_eq!(count(&ring, Point2::new(2.0, 2.0)), 1);
    assert!(ring.iter().all(|&p| behind.distance_to_point(p) > 1e-6));
}

#[test]
fn test_crossing_segments() {
    init();
    let walls = segs(&[(1.0, -1.0, 3.0, 1.0), (1.0, 1.0, 3.0, -1.0)]);
    let ring = compute_visibility(Point2::new(0.0, 0.0), &walls, Some(10.0)).unwrap();
    assert_well_formed(&ring);

    // The near halves of the X form the boundary
    let i = ring.iter().position(|&p| p == Point2::new(1.0, -1.0)).unwrap();
    assert_eq!(ring[i + 1], Point2::new(2.0, 0.0));
    assert_eq!(ring[i + 2], Point2::new(1.0, 1.0));
    assert_eq!(count(&ring, Point2::new(3.0, 1.0)), 0);
    assert_eq!(count(&ring, Point2::new(3.0, -1.0)), 0);
}

#[test]
fn test_edge_on_segment_is_ignored() {
    init();
    let pointing_at_viewpoint = segs(&[(2.0, 0.0, 4.0, 0.0)]);
    let ring = compute_visibility(Point2::new(0.0, 0.0), &pointing_at_viewpoint, Some(10.0)).unwrap();
    let open = compute_visibility::<f64>(Point2::new(0.0, 0.0), &[], Some(10.0)).unwrap();
    assert_eq!(ring, open);
}

#[test]
fn test_invalid_segments() {
    init();
    let v = Point2::new(0.0, 0.0);

    let walls = segs(&[(1.0, -1.0, 1.0, 1.0), (3.0, 3.0, 3.0, 3.0)]);
    assert_eq!(
        compute_visibility(v, &walls, Some(10.0)),
        Err(VisibilityError::InvalidSegment {
            index: 1,
            defect: SegmentDefect::ZeroLength
        })
    );

    let walls = segs(&[(1.0, -1.0, 1.0, 1.0), (2.0, 2.0, 3.0, 3.0), (f64::NAN, 0.0, 1.0, 0.0)]);
    assert_eq!(
        compute_visibility(v, &walls, Some(10.0)),
        Err(VisibilityError::InvalidSegment {
            index: 2,
            defect: SegmentDefect::NonFinite
        })
    );
}

#[test]
fn test_viewpoint_on_segment() {
    init();
    let walls = segs(&[(1.0, -1.0, 1.0, 1.0), (-1.0, -1.0, 1.0, 1.0)]);
    let err = compute_visibility(Point2::new(0.0, 0.0), &walls, Some(10.0)).unwrap_err();
    assert_eq!(err, VisibilityError::ViewpointOnSegment { index: 1 });
    assert_eq!(err.to_string(), "viewpoint lies on segment 1");

    // Touching an endpoint counts too
    let err = compute_visibility(Point2::new(1.0, 1.0), &walls, Some(10.0)).unwrap_err();
    assert_eq!(err, VisibilityError::ViewpointOnSegment { index: 0 });
}

#[test]
fn test_invalid_viewpoint_and_radius() {
    init();
    let walls = segs(&[(1.0, -1.0, 1.0, 1.0)]);
    assert_eq!(
        compute_visibility(Point2::new(0.0, f64::INFINITY), &walls, Some(10.0)),
        Err(VisibilityError::InvalidViewpoint)
    );
    for radius in [0.0, -3.0, f64::NAN, f64::INFINITY] {
        assert_eq!(
            compute_visibility(Point2::new(0.0, 0.0), &walls, Some(radius)),
            Err(VisibilityError::InvalidBoundingRadius)
        );
    }
}

#[test]
fn test_derived_radius_encloses_scene() {
    init();
    let walls = segs(&[(1.0, -1.0, 1.0, 1.0), (-4.0, 3.0, -2.0, 3.0)]);
    let ring = compute_visibility(Point2::new(0.0, 0.0), &walls, None).unwrap();
    // Farthest obstacle point is 5 away
    let far = ring.iter().map(|p| p.distance(Point2::origin())).fold(0.0, f64::max);
    assert_relative_eq!(far, 10.0, epsilon = 1e-9);
}

#[test]
fn test_idempotent() {
    init();
    let walls = segs(&[
        (1.0, -1.0, 1.0, 1.0),
        (-3.0, 2.0, 3.0, 2.5),
        (-2.0, -2.0, -1.0, -3.0),
    ]);
    let v = Point2::new(0.25, 0.1);
    let first = compute_visibility(v, &walls, Some(8.0)).unwrap();
    let second = compute_visibility(v, &walls, Some(8.0)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_box_obstacle_from_polygon() {
    init();
    let block = Polygon::new(vec![
        Point2::new(2.0, -1.0),
        Point2::new(4.0, -1.0),
        Point2::new(4.0, 1.0),
        Point2::new(2.0, 1.0),
    ]);
    let scene = Scene::from_polygons(&[block.clone()], VisibilityOptions::with_bounding_radius(10.0)).unwrap();

    let ring = scene.visibility_from(Point2::new(0.0, 0.0)).unwrap();
    assert_well_formed(&ring);
    let i = ring.iter().position(|&p| p == Point2::new(2.0, -1.0)).unwrap();
    assert_eq!(ring[i + 1], Point2::new(2.0, 1.0));
    assert_eq!(count(&ring, Point2::new(4.0, -1.0)), 0);
    assert_eq!(count(&ring, Point2::new(4.0, 1.0)), 0);

    assert!(!scene.is_visible(Point2::new(0.0, 0.0), Point2::new(5.0, 0.0)));
    assert!(scene.is_visible(Point2::new(0.0, 0.0), Point2::new(0.0, 5.0)));

    // From inside the block only the block is visible
    let inside = scene.polygon_from(Point2::new(3.0, 0.0)).unwrap();
    assert_relative_eq!(inside.area(), block.area(), epsilon = 1e-9);
    assert!(inside.signed_area() > 0.0);
}

#[test]
fn test_polygon_result_is_implicitly_closed() {
    init();
    let scene = Scene::new(&room(), VisibilityOptions::default()).unwrap();
    let ring = scene.visibility_from(Point2::new(-1.0, 0.5)).unwrap();
    let poly = scene.polygon_from(Point2::new(-1.0, 0.5)).unwrap();
    assert_eq!(poly.len(), ring.len() - 1);
    assert_eq!(poly.vertices[..], ring[..ring.len() - 1]);
    assert!(poly.contains(Point2::new(0.0, 0.0)));
}

#[test]
fn test_f32_scene() {
    init();
    let wall = [Segment2::from_coords(1.0f32, -1.0, 1.0, 1.0)];
    let ring = compute_visibility(Point2::new(0.0f32, 0.0), &wall, Some(10.0)).unwrap();
    assert_eq!(ring.first(), ring.last());
    assert!(ring.contains(&Point2::new(1.0, -1.0)));
    assert!(ring.contains(&Point2::new(1.0, 1.0)));
    assert!(polygon_signed_area(&ring) > 0.0);
}

#[test]
fn test_options_tolerance_applies_to_validation() {
    init();
    let short = segs(&[(1.0, 0.0, 1.0, 0.001)]);
    let loose = VisibilityOptions::with_bounding_radius(10.0).epsilon(0.01);
    assert_eq!(
        compute_visibility_with(Point2::new(0.0, 0.0), &short, &loose),
        Err(VisibilityError::InvalidSegment {
            index: 0,
            defect: SegmentDefect::ZeroLength
        })
    );
    assert!(compute_visibility(Point2::new(0.0, 0.0), &short, Some(10.0)).is_ok());
}

#[test]
fn test_crossing_walls_need_splitting() {
    init();
    let walls = segs(&[(1.0, -2.0, 3.0, 2.0), (3.0, -2.0, 1.0, 2.0)]);
    let viewpoint = Point2::new(0.0, 0.0);

    let strict = VisibilityOptions::with_bounding_radius(10.0).split_crossings(false);
    assert_eq!(
        compute_visibility_with(viewpoint, &walls, &strict),
        Err(VisibilityError::DegenerateGeometry { first: 0, second: 1 })
    );

    let ring = compute_visibility(viewpoint, &walls, Some(10.0)).unwrap();
    assert_well_formed(&ring);
    let region = Polygon::from_closed_ring(ring.clone());
    assert_eq!(count(&ring, Point2::new(2.0, 0.0)), 1);
    assert!(!region.contains(Point2::new(2.1, 0.4)));
    assert!(!region.contains(Point2::new(2.1, -0.4)));
    assert!(region.contains(Point2::new(1.5, 0.2)));

    // Walls that only touch are fine either way
    let touching = segs(&[(1.0, -2.0, 2.0, 0.0), (2.0, 0.0, 1.0, 2.0)]);
    assert_eq!(
        compute_visibility_with(viewpoint, &touching, &strict).unwrap(),
        compute_visibility(viewpoint, &touching, Some(10.0)).unwrap()
    );
}

#[test]
fn test_bad_epsilon_rejected() {
    init();
    let walls = segs(&[(1.0, -1.0, 1.0, 1.0), (2.0, 2.0, 2.0, 2.0)]);
    for eps in [f64::NAN, f64::NEG_INFINITY, -0.5] {
        let options = VisibilityOptions::with_bounding_radius(10.0).epsilon(eps);
        assert_eq!(
            compute_visibility_with(Point2::new(0.0, 0.0), &walls, &options),
            Err(VisibilityError::InvalidEpsilon)
        );
    }
}

#[test]
fn test_arc_step_has_a_floor() {
    init();
    let options = VisibilityOptions::with_bounding_radius(1.0).max_arc_step(1e-7);
    let ring = compute_visibility_with::<f64>(Point2::new(0.0, 0.0), &[], &options).unwrap();
    assert_eq!(ring.len(), 4097);
}

#[test]
fn test_open_arc_follows_rotation() {
    init();
    let wall = Segment2::from_coords(1.0, -1.0, 1.0, 1.0);
    let center = Point2::origin();
    let ring = compute_visibility(center, &[wall], Some(10.0)).unwrap();
    let boundary = Polygon::from_closed_ring(ring.clone());
    let sag = 10.0 * (1.0 - (std::f64::consts::PI / 64.0).cos());

    for k in 0..11 {
        let theta = 0.5 + 0.5 * k as f64;
        let turned_wall = Segment2::new(
            wall.start.rotated_about(center, theta),
            wall.end.rotated_about(center, theta),
        );
        let turned = compute_visibility(center, &[turned_wall], Some(10.0)).unwrap();
        assert_well_formed(&turned);

        // Every vertex but the one on the start ray is a vertex of the unturned ring
        for p in &turned[1..turned.len() - 1] {
            let back = p.rotated_about(center, -theta);
            let nearest = ring.iter().map(|q| q.distance(back)).fold(f64::INFINITY, f64::min);
            assert!(nearest < 1e-9, "theta {}: {:?} is {} from any vertex", theta, back, nearest);
        }
        let seam = turned[0].rotated_about(center, -theta);
        let off = boundary.edges().map(|e| e.distance_to_point(seam)).fold(f64::INFINITY, f64::min);
        assert!(off <= sag + 1e-9);
    }
}

#[test]
fn test_many_obstacles_open_at_once() {
    init();
    // 500 nested walls, every one crossing the ray at 0, all behind the first
    let walls: Vec<_> = (0..500)
        .map(|i| {
            let x = 1.0 + 0.01 * i as f64;
            Segment2::from_coords(x, -(x + 2.0), x, x + 2.0)
        })
        .collect();
    let ring = compute_visibility(Point2::new(0.0, 0.0), &walls, Some(20.0)).unwrap();
    let nearest_only = compute_visibility(Point2::new(0.0, 0.0), &walls[..1], Some(20.0)).unwrap();
    assert_eq!(ring, nearest_only);
    assert_eq!(count(&ring, Point2::new(1.0, -3.0)), 1);
    assert_eq!(count(&ring, Point2::new(1.0, 3.0)), 1);
}

#[test]
fn test_derived_radius_must_be_finite() {
    init();
    let far = segs(&[(1e308, -1.0, 1e308, 1.0)]);
    assert_eq!(
        compute_visibility(Point2::new(0.0, 0.0), &far, None),
        Err(VisibilityError::InvalidBoundingRadius)
    );
}
