//! Hardcoded chains for a few arms, plus a frame constructor from Denavit-Hartenberg parameters

use nalgebra::{Isometry3, Vector3};
use crate::chain::Chain;
use crate::joint::{Joint, JointType};
use crate::kinematic_traits::Pose;
use crate::segment::Segment;

/// Frame from modified Denavit-Hartenberg parameters (Craig, 1989):
/// rotation `alpha` about x, offset `a` along x, rotation `theta` about z, offset `d` along z.
pub fn dh_craig1989(a: f64, alpha: f64, d: f64, theta: f64) -> Pose {
    Isometry3::rotation(Vector3::x() * alpha)
        * Isometry3::translation(a, 0.0, 0.0)
        * Isometry3::rotation(Vector3::z() * theta)
        * Isometry3::translation(0.0, 0.0, d)
}

/// Six joints stacked along z, all pointing straight up at zero. The wrist joints 4, 5
/// and 6 intersect at (0, 0, 3.6), the tip is 0.4 above that.
pub fn six_axis_stack() -> Chain {
    let layout = [
        (JointType::RotateZ, 0.0),
        (JointType::RotateX, 0.9),
        (JointType::RotateX, 1.2),
        (JointType::RotateZ, 1.5),
        (JointType::RotateX, 0.0),
        (JointType::RotateZ, 0.4),
    ];
    layout.iter().enumerate()
        .map(|(i, (joint_type, z))| Segment::new(
            format!("link_{}", i + 1),
            Joint::new(format!("joint_{}", i + 1), *joint_type),
            Isometry3::translation(0.0, 0.0, *z),
        ))
        .collect()
}

/// Motoman SIA10, seven axis arm. Fully stretched (and singular) at zero.
pub fn motoman_sia10() -> Chain {
    use std::f64::consts::FRAC_PI_2;

    let mut chain = Chain::new();
    chain.add_segment(Segment::fixed("base", dh_craig1989(0.0, 0.0, 0.36, 0.0)));
    let alphas = [FRAC_PI_2, -FRAC_PI_2, FRAC_PI_2, -FRAC_PI_2, FRAC_PI_2, -FRAC_PI_2];
    let offsets = [0.0, 0.36, 0.0, 0.36, 0.0, 0.0];
    for (i, (alpha, d)) in alphas.iter().zip(offsets.iter()).enumerate() {
        chain.add_segment(Segment::new(
            format!("link_{}", i + 1),
            Joint::new(format!("joint_{}", i + 1), JointType::RotateZ),
            dh_craig1989(0.0, *alpha, *d, 0.0),
        ));
    }
    chain.add_segment(Segment::new(
        "flange",
        Joint::new("joint_7", JointType::RotateZ),
        Isometry3::translation(0.0, 0.0, 0.155),
    ));
    chain
}
