use std::f32::consts::PI;
use glam::{Mat4, Quat, Vec2, Vec3};
use super::*;

fn approx(a: Vec3, b: Vec3) -> bool {
    a.abs_diff_eq(b, 1e-4)
}

/// Two portals facing each other across the origin
fn facing_pair() -> (Portal, Portal) {
    let a = Portal::new(
        Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0)) * Mat4::from_rotation_y(PI),
        Vec2::ONE,
    );
    let b = Portal::new(Mat4::from_translation(Vec3::new(0.0, 0.0, 5.0)), Vec2::ONE);
    (a, b)
}

/// Same orientation, destination shifted along X
fn shifted_pair() -> (Portal, Portal) {
    let a = Portal::new(Mat4::IDENTITY, Vec2::ONE);
    let b = Portal::new(Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0)), Vec2::ONE);
    (a, b)
}

#[test]
fn test_facing_pair_link_is_pure_translation() {
    let (a, b) = facing_pair();
    let link = PortalLink::between(&a, &b);

    assert!(link.matrix().abs_diff_eq(Mat4::from_translation(Vec3::new(0.0, 0.0, 10.0)), 1e-4));
}

#[test]
fn test_source_center_maps_to_exit() {
    let (a, b) = shifted_pair();
    let link = PortalLink::between(&a, &b);

    assert!(approx(link.transform_point(a.center()), b.exit_position()));
}

#[test]
fn test_entering_direction_maps_to_exit_direction() {
    let (a, b) = shifted_pair();
    let link = PortalLink::between(&a, &b);

    // Walking into A (along its forward) means walking out of B
    assert!(approx(link.transform_direction(a.forward()), b.exit_forward()));
}

#[test]
fn test_directions_ignore_translation() {
    let (a, b) = shifted_pair();
    let link = PortalLink::between(&a, &b);

    assert!(approx(link.transform_direction(Vec3::new(0.0, 0.0, 3.0)), Vec3::new(0.0, 0.0, -3.0)));
    assert!(approx(link.transform_direction(Vec3::Y), Vec3::Y));
    assert!(approx(link.transform_direction(Vec3::X), Vec3::NEG_X));
}

#[test]
fn test_round_trip_is_identity() {
    let (a, b) = shifted_pair();
    let there = PortalLink::between(&a, &b);
    let back = PortalLink::between(&b, &a);

    let pose = Mat4::from_rotation_translation(
        Quat::from_rotation_x(0.3),
        Vec3::new(1.0, 2.0, -1.0),
    );
    let round_trip = back.transform_pose(&there.transform_pose(&pose));

    assert!(round_trip.abs_diff_eq(pose, 1e-4));
}

#[test]
fn test_rotation_is_half_turn_for_aligned_pair() {
    let (a, b) = shifted_pair();
    let link = PortalLink::between(&a, &b);

    assert!(link.rotation().abs_diff_eq(Quat::from_rotation_y(PI), 1e-4)
        || link.rotation().abs_diff_eq(-Quat::from_rotation_y(PI), 1e-4));
}
