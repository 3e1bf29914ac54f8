//! Helper functions

use nalgebra::Isometry3;
use crate::jacobian::Jacobian;
use crate::kinematic_traits::Joints;

/// Checks if all joint values are finite
pub fn is_valid(qs: &[f64]) -> bool {
    qs.iter().all(|q| q.is_finite())
}

/// Print joint values, converting radians to degrees.
pub fn dump_joints(joints: &[f64]) {
    let row: Vec<String> = joints.iter().map(|q| format!("{:5.2}", q.to_degrees())).collect();
    println!("[{}]", row.join(" "));
}

/// Print translation and orientation (roll, pitch, yaw in degrees)
pub fn dump_pose(isometry: &Isometry3<f64>) {
    let translation = isometry.translation.vector;
    let (roll, pitch, yaw) = isometry.rotation.euler_angles();
    println!(
        "x: {:.5}, y: {:.5}, z: {:.5},  rpy: {:.3}, {:.3}, {:.3}",
        translation.x, translation.y, translation.z,
        roll.to_degrees(), pitch.to_degrees(), yaw.to_degrees()
    );
}

/// Print the Jacobian one row at a time, linear rows first.
pub fn dump_jacobian(jacobian: &Jacobian) {
    let labels = ["vx", "vy", "vz", "wx", "wy", "wz"];
    for (label, row) in labels.iter().zip(jacobian.matrix().row_iter()) {
        let values: Vec<String> = row.iter().map(|v| format!("{:8.4}", v)).collect();
        println!("{}: {}", label, values.join(" "));
    }
}

/// Allows to specify joint values in degrees (converts to radians)
pub fn as_radians(degrees: &[f64]) -> Joints {
    degrees.iter().map(|d| d.to_radians()).collect()
}

/// True if translations differ by no more than `distance_tolerance` and orientations by
/// no more than `angular_tolerance` radians.
pub fn pose_approx_eq(ta: &Isometry3<f64>, tb: &Isometry3<f64>,
                      distance_tolerance: f64, angular_tolerance: f64) -> bool {
    let translation_distance = (ta.translation.vector - tb.translation.vector).norm();
    let angular_distance = ta.rotation.angle_to(&tb.rotation);
    translation_distance <= distance_tolerance && angular_distance <= angular_tolerance
}

/// Panicking version of [`pose_approx_eq`] that prints both poses first, for tests.
pub fn assert_pose_eq(ta: &Isometry3<f64>, tb: &Isometry3<f64>,
                      distance_tolerance: f64, angular_tolerance: f64) {
    if !pose_approx_eq(ta, tb, distance_tolerance, angular_tolerance) {
        dump_pose(ta);
        dump_pose(tb);
        panic!("Poses differ more than {} m / {} rad", distance_tolerance, angular_tolerance);
    }
}
