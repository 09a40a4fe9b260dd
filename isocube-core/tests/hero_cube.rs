//! End-to-end properties of the hero cube geometry and animation

use approx::assert_relative_eq;
use isocube_core::projection::ISO_ANGLE;
use isocube_core::topology::{DOT_PATHS, DOT_PERIOD, EDGES, FACES};
use isocube_core::{build_cube, project, HeroScene, IsoProjection, Point3D, SceneConfig};

#[test]
fn origin_projects_to_center() {
    let p = project(&Point3D::new(0.0, 0.0, 0.0), 300.0, 280.0, ISO_ANGLE, ISO_ANGLE);
    assert_eq!((p.x, p.y), (300.0, 280.0));
}

#[test]
fn projection_is_bit_identical_across_calls() {
    let points = [
        Point3D::new(-100.0, -140.0, -100.0),
        Point3D::new(1e-300, -7.25, 3.5e12),
        Point3D::new(-0.0, 42.0, 0.1),
    ];
    for point in &points {
        let a = project(point, 300.0, 280.0, ISO_ANGLE, ISO_ANGLE);
        let b = project(point, 300.0, 280.0, ISO_ANGLE, ISO_ANGLE);
        assert_eq!(a.x.to_bits(), b.x.to_bits());
        assert_eq!(a.y.to_bits(), b.y.to_bits());
    }
}

#[test]
fn inner_cube_is_half_scale_about_center() {
    let projection = IsoProjection::default();
    let outer = build_cube(100.0, 140.0, 100.0, 1.0, &projection);
    let inner = build_cube(100.0, 140.0, 100.0, 0.5, &projection);
    let center = projection.center;
    for (o, i) in outer.vertices.iter().zip(inner.vertices.iter()) {
        let expected = center + (*o - center) * 0.5;
        assert_relative_eq!(*i, expected, epsilon = 1e-9);
    }
}

#[test]
fn every_table_index_is_a_corner() {
    for edge in &EDGES {
        assert!(edge.a < 8 && edge.b < 8 && edge.a != edge.b);
    }
    for face in &FACES {
        assert!(face.indices.iter().all(|&i| i < 8));
    }
    for dot in &DOT_PATHS {
        assert!(dot.start < 8 && dot.end < 8);
    }
}

#[test]
fn dots_loop_every_period() {
    let scene = HeroScene::default();
    for dot in &DOT_PATHS {
        for step in 0..40 {
            let t = dot.delay + step as f64 * 0.37;
            let now = scene.dot_position(dot, t);
            let later = scene.dot_position(dot, t + DOT_PERIOD);
            assert_relative_eq!(now, later, epsilon = 1e-6);
        }
    }
}

#[test]
fn dots_start_each_cycle_at_start_vertex() {
    let scene = HeroScene::default();
    for dot in &DOT_PATHS {
        let start = scene.outer().vertex(dot.start);
        for cycle in 0..4 {
            let t = dot.delay + cycle as f64 * DOT_PERIOD;
            assert_eq!(scene.dot_position(dot, t), start);
        }
    }
}

#[test]
fn custom_config_moves_the_scene() {
    let config = SceneConfig::from_json(r#"{ "center_x": 100, "center_y": 50 }"#).unwrap();
    let scene = HeroScene::new(&config);
    // corners 0 and 6 sit on opposite ends of the x == z diagonal
    let a = scene.outer().vertex(0);
    let b = scene.outer().vertex(6);
    assert_relative_eq!(a.x, 100.0);
    assert_relative_eq!(b.x, 100.0);
    assert_relative_eq!((a.y + b.y) / 2.0, 50.0, epsilon = 1e-9);
}

#[test]
fn frames_are_pure_functions_of_time() {
    let scene = HeroScene::default();
    assert_eq!(scene.frame(7.3), scene.frame(7.3));
}
