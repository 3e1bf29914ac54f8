use std::f64::consts::PI;
use nalgebra::{Isometry3, Translation3, UnitQuaternion};
use rs_chain_kinematics::chain_robots::motoman_sia10;
use rs_chain_kinematics::forward::ChainForwardKinematics;
use rs_chain_kinematics::inverse_velocity::InverseVelocitySolver;
use rs_chain_kinematics::jacobian::{numeric_jacobian, JacobianReference, JacobianSolver};
use rs_chain_kinematics::joint::{Joint, JointType};
use rs_chain_kinematics::kinematic_traits::Joints;
use rs_chain_kinematics::segment::Segment;
use rs_chain_kinematics::velocity::ChainVelocityKinematics;
use rs_chain_kinematics::utils::dump_jacobian;

/// Calculating Jacobian matrices for kinematic analysis.
fn main() {
    let mut chain = motoman_sia10();

    // Tool extends 20 cm in the Z direction, tilted by 30 degrees
    chain.add_segment(Segment::new(
        "tool",
        Joint::new("tool_mount", JointType::Fixed),
        Isometry3::from_parts(Translation3::new(0.0, 0.0, 0.2),
                              UnitQuaternion::from_euler_angles(PI / 6.0, 0.0, 0.0)),
    ));

    let joints: Joints = vec![0.1, 0.6, 0.2, -0.9, 0.3, 0.7, 0.0];
    let solver = JacobianSolver::new(&chain);

    let jacobian = solver.jacobian(&joints).expect("seven joints");
    println!("Jacobian in base orientation:");
    dump_jacobian(&jacobian);

    let in_tip = solver.jacobian_in(&joints, JacobianReference::Tip).expect("seven joints");
    println!("\nJacobian in tip orientation:");
    dump_jacobian(&in_tip);

    let numeric = numeric_jacobian(&ChainForwardKinematics::new(&chain), &joints, 1e-6)
        .expect("seven joints");
    println!("\nLargest difference to finite differences: {:e}",
             (jacobian.matrix() - numeric.matrix()).amax());

    let qdots = vec![0.1; 7];
    let velocity = ChainVelocityKinematics::new(&chain).forward(&joints, &qdots).expect("seven joints");
    println!("\nTip twist with all joints at 0.1 rad/s: {:?}", velocity.twist);
    println!("Same from the Jacobian: {:?}", jacobian.multiply(&qdots).expect("seven joints"));

    let inverse = InverseVelocitySolver::new(&chain);
    println!("\nSingular values: {:?}", inverse.singular_values(&joints).expect("seven joints"));
    println!("Stretched out: {:?}", inverse.singular_values(&[0.0; 7]).expect("seven joints"));
    if let Err(e) = inverse.cartesian_to_joints(&joints, &velocity.twist) {
        println!("Inverse velocity: {}", e);
    }
}
