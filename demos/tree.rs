use nalgebra::Isometry3;
use rs_chain_kinematics::chain::Chain;
use rs_chain_kinematics::forward::{ChainForwardKinematics, TreeForwardKinematics};
use rs_chain_kinematics::joint::{Joint, JointType};
use rs_chain_kinematics::kinematic_traits::ForwardKinematics;
use rs_chain_kinematics::kinematics_error::KinematicsError;
use rs_chain_kinematics::segment::Segment;
use rs_chain_kinematics::tree::Tree;
use rs_chain_kinematics::utils::dump_pose;

/// Two fingers on a palm, and the chain from one fingertip to the other.
fn main() -> Result<(), KinematicsError> {
    let mut hand = Tree::new();
    hand.add_segment(Segment::new("palm", Joint::new("wrist", JointType::RotateY),
                                  Isometry3::translation(0.0, 0.0, 0.1)), "root")?;

    for (side, y) in [("left", 0.03), ("right", -0.03)] {
        let finger: Chain = [
            Segment::new(format!("{}_proximal", side), Joint::new(format!("{}_knuckle", side), JointType::RotateX),
                         Isometry3::translation(0.0, y, 0.05)),
            Segment::new(format!("{}_distal", side), Joint::new(format!("{}_tip", side), JointType::RotateX),
                         Isometry3::translation(0.0, 0.0, 0.03)),
        ].into_iter().collect();
        hand.add_chain(&finger, "palm")?;
    }
    println!("{} segments, {} joints", hand.segment_count(), hand.joint_count());

    // wrist, left knuckle, left tip, right knuckle, right tip
    let qs = [0.2, 0.4, 0.3, -0.4, -0.3];
    let tree_fk = TreeForwardKinematics::new(&hand);
    println!("\nLeft fingertip:");
    dump_pose(&tree_fk.forward(&qs, "left_distal")?);
    println!("Right fingertip:");
    dump_pose(&tree_fk.forward(&qs, "right_distal")?);

    let pinch = hand.get_chain("left_distal", "right_distal")?;
    let pinch_qs = [0.3, 0.4, -0.4, -0.3]; // left tip, left knuckle (inverted), right knuckle, right tip
    println!("\nRight fingertip seen from the left one ({} joints):", pinch.joint_count());
    dump_pose(&ChainForwardKinematics::new(&pinch).forward(&pinch_qs)?);

    let finger = hand.get_sub_tree("palm")?;
    println!("\nSub tree below the palm: {} segments, {} joints", finger.segment_count(), finger.joint_count());

    match hand.add_segment(Segment::fixed("palm", Isometry3::identity()), "root") {
        Err(e) => println!("Expected failure: {}", e),
        Ok(()) => println!("Unexpectedly accepted a duplicate"),
    }
    Ok(())
}
