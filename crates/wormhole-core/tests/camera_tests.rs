use glam::Vec3;
use std::rc::Rc;
use wormhole_core::constants::{INITIAL_EYE, ORBIT_MAX_DISTANCE, ORBIT_MIN_DISTANCE, PROGRESS_MAX};
use wormhole_core::orbit::OrbitRig;
use wormhole_core::{Camera, CameraDirector, CameraParams, CameraPose, Curve};

const DT: f32 = 1.0 / 60.0;

fn path() -> Rc<Curve> {
    Rc::new(Curve::build(wormhole_core::dataset::camera_path_points(), false).unwrap())
}

#[test]
fn idle_director_never_writes_the_camera() {
    let mut director = CameraDirector::new(CameraPose::default(), CameraParams::default());
    let mut camera = Camera::default();
    camera.eye = Vec3::new(1.0, 2.0, 3.0);
    for _ in 0..120 {
        assert!(director.tick(DT).is_none());
        assert!(!director.drive(DT, &mut camera));
    }
    assert_eq!(camera.eye, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(director.progress(), 0.0);
    assert!(director.pose().is_none());
}

#[test]
fn armed_director_places_the_eye_on_the_path() {
    let path = path();
    let mut director = CameraDirector::new(CameraPose::default(), CameraParams::default());
    director.arm(path.clone());
    assert!(director.is_active());

    let mut camera = Camera::default();
    for _ in 0..90 {
        assert!(director.drive(DT, &mut camera));
        let p = director.progress();
        assert!((camera.eye - path.position_at(p)).length() < 1e-5);
        // Aiming ahead along the path.
        let forward = (camera.target - camera.eye).normalize();
        assert!(forward.dot(path.tangent_at(p)) > 0.5);
        assert!((camera.up.length() - 1.0).abs() < 1e-4);
    }
}

#[test]
fn progress_rate_meets_arrival_after_travel_duration() {
    let params = CameraParams::default();
    let mut director = CameraDirector::new(CameraPose::default(), params.clone());
    director.arm(path());
    for _ in 0..360 {
        director.tick(DT);
    }
    assert!((director.progress() - 0.995).abs() < 1e-3);
}

#[test]
fn progress_clamps_and_latch_holds() {
    let path = path();
    let mut director = CameraDirector::new(CameraPose::default(), CameraParams::default());
    director.arm(path.clone());
    let mut last = 0.0;
    for _ in 0..2000 {
        let pose = director.tick(DT).unwrap();
        assert!(pose.eye.is_finite() && pose.target.is_finite() && pose.up.is_finite());
        assert!(pose.target.distance(pose.eye) > 1e-4);
        assert!(director.progress() >= last);
        last = director.progress();
    }
    assert_eq!(director.progress(), PROGRESS_MAX);
    assert!(director.is_active());

    // Look-ahead has collapsed; the aim falls back to the tangent.
    let pose = director.pose().unwrap();
    let aim = pose.target - pose.eye;
    assert!((aim.length() - 1.0).abs() < 1e-3);
    assert!(aim.dot(path.tangent_at(PROGRESS_MAX)) > 0.99);

    // Re-arming a running flight is ignored.
    director.arm(path);
    assert_eq!(director.progress(), PROGRESS_MAX);
}

#[test]
fn reset_releases_and_restores_initial_pose() {
    let start = CameraPose {
        eye: Vec3::new(0.0, 1.0, 4.0),
        target: Vec3::ZERO,
        up: Vec3::Y,
    };
    let mut director = CameraDirector::new(start, CameraParams::default());
    director.arm(path());
    director.tick(0.5);
    let pose = director.reset();
    assert_eq!(pose, start);
    assert_eq!(director.initial_pose(), start);
    assert!(!director.is_active());
    assert_eq!(director.progress(), 0.0);
    assert!(director.tick(DT).is_none());
}

#[test]
fn bank_is_small_and_bounded() {
    let params = CameraParams::default();
    let mut director = CameraDirector::new(CameraPose::default(), params.clone());
    director.arm(path());
    for _ in 0..600 {
        director.tick(DT);
        assert!(director.bank_angle().abs() <= params.bank_amplitude + 1e-6);
        let pose = director.pose().unwrap();
        assert!(pose.up.dot(Vec3::Y) > 0.9);
    }
}

#[test]
fn camera_matrices_are_finite() {
    let camera = Camera::default();
    assert!(camera.view_proj().is_finite());
    assert_eq!(camera.pose(), CameraPose::default());
}

#[test]
fn orbit_round_trips_the_initial_pose() {
    let rig = OrbitRig::from_pose(CameraPose::default());
    assert!((rig.eye() - INITIAL_EYE).length() < 1e-5);
    assert!((rig.distance() - 3.0).abs() < 1e-5);
}

#[test]
fn orbit_zoom_is_clamped() {
    let mut rig = OrbitRig::from_pose(CameraPose::default());
    for _ in 0..500 {
        rig.zoom(5.0);
    }
    assert_eq!(rig.distance(), ORBIT_MAX_DISTANCE);
    for _ in 0..500 {
        rig.zoom(-5.0);
    }
    assert_eq!(rig.distance(), ORBIT_MIN_DISTANCE);
}

#[test]
fn orbit_rotation_keeps_distance() {
    let mut rig = OrbitRig::from_pose(CameraPose::default());
    rig.rotate(0.25, 0.1);
    let eye = rig.eye();
    assert!((eye.length() - 3.0).abs() < 1e-4);
    assert!(eye.x.abs() > 0.1);
    // Pitch stops short of the pole.
    rig.rotate(0.0, 10.0);
    assert!(rig.eye().y < 3.0);
}

#[test]
fn disabled_orbit_does_not_touch_the_camera() {
    let mut rig = OrbitRig::from_pose(CameraPose::default());
    let mut camera = Camera::default();
    camera.eye = Vec3::new(5.0, 5.0, 5.0);
    rig.set_enabled(false);
    rig.rotate(0.3, 0.3);
    rig.zoom(4.0);
    assert!(!rig.apply(&mut camera));
    assert_eq!(camera.eye, Vec3::new(5.0, 5.0, 5.0));
    assert!((rig.distance() - 3.0).abs() < 1e-5);

    rig.set_enabled(true);
    assert!(rig.apply(&mut camera));
    assert!((camera.eye - INITIAL_EYE).length() < 1e-5);
}

#[test]
fn orbit_pan_slides_target_and_eye_together() {
    let mut rig = OrbitRig::from_pose(CameraPose::default());
    let eye = rig.eye();
    rig.pan(0.1, 0.0);
    let shift = rig.target();
    // Looking down -Z, a rightward drag moves the target to -X.
    assert!(shift.x < -0.1);
    assert!(shift.y.abs() < 1e-5 && shift.z.abs() < 1e-5);
    assert!((rig.eye() - eye - shift).length() < 1e-5);
    assert!((rig.distance() - 3.0).abs() < 1e-5);

    rig.pan(0.0, 0.1);
    assert!(rig.target().y > 0.1);
}

#[test]
fn disabled_orbit_ignores_pan() {
    let mut rig = OrbitRig::from_pose(CameraPose::default());
    rig.set_enabled(false);
    rig.pan(0.5, 0.5);
    assert_eq!(rig.target(), Vec3::ZERO);
    assert!((rig.eye() - INITIAL_EYE).length() < 1e-5);
}
