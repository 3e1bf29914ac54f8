//! Forward position kinematics for chains and trees.
//!
//! Segment poses are composed from the base outwards, each pose right multiplied into the
//! running total. Only movable joints consume a value from the joint vector.

use nalgebra::Isometry3;
use crate::chain::Chain;
use crate::kinematic_traits::{ForwardKinematics, Pose};
use crate::kinematics_error::KinematicsError;
use crate::tree::Tree;

/// Forward kinematics of a chain. Borrows the chain, holds no other state than the
/// optional base frame, so it can be shared between threads.
///
/// ```
/// use nalgebra::Isometry3;
/// use rs_chain_kinematics::chain::Chain;
/// use rs_chain_kinematics::forward::ChainForwardKinematics;
/// use rs_chain_kinematics::joint::{Joint, JointType};
/// use rs_chain_kinematics::kinematic_traits::ForwardKinematics;
/// use rs_chain_kinematics::segment::Segment;
///
/// let mut chain = Chain::new();
/// chain.add_segment(Segment::new("upper", Joint::new("shoulder", JointType::RotateZ),
///     Isometry3::translation(1.0, 0.0, 0.0)));
/// chain.add_segment(Segment::new("lower", Joint::new("elbow", JointType::RotateZ),
///     Isometry3::translation(1.0, 0.0, 0.0)));
///
/// let fk = ChainForwardKinematics::new(&chain);
/// let pose = fk.forward(&[std::f64::consts::FRAC_PI_2, 0.0]).unwrap();
/// assert!((pose.translation.y - 2.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct ChainForwardKinematics<'a> {
    chain: &'a Chain,

    /// Pose of the chain base in the world frame.
    base: Pose,
}

impl<'a> ChainForwardKinematics<'a> {
    pub fn new(chain: &'a Chain) -> Self {
        ChainForwardKinematics { chain, base: Isometry3::identity() }
    }

    /// Places the chain base at the given pose, all results are then world poses.
    pub fn with_base(chain: &'a Chain, base: Pose) -> Self {
        ChainForwardKinematics { chain, base }
    }

    pub fn chain(&self) -> &'a Chain {
        self.chain
    }

    pub fn base(&self) -> &Pose {
        &self.base
    }

    /// Pose at the end of the first `segment_nr` segments. `segment_nr` equal to the
    /// segment count gives the chain tip, zero gives the base.
    pub fn forward_to_segment(&self, qs: &[f64], segment_nr: usize) -> Result<Pose, KinematicsError> {
        self.check(qs, segment_nr)?;
        let mut total = self.base;
        let mut j = 0;
        for link in self.chain.links().take(segment_nr) {
            if link.joint().is_movable() {
                total *= link.pose(qs[j]);
                j += 1;
            } else {
                total *= link.pose(0.0);
            }
        }
        Ok(total)
    }

    /// Poses at the end of every segment, in chain order. The last one is the chain tip.
    pub fn forward_with_segment_poses(&self, qs: &[f64]) -> Result<Vec<Pose>, KinematicsError> {
        self.check(qs, self.chain.segment_count())?;
        let mut poses = Vec::with_capacity(self.chain.segment_count());
        let mut total = self.base;
        let mut j = 0;
        for link in self.chain.links() {
            let q = if link.joint().is_movable() {
                j += 1;
                qs[j - 1]
            } else {
                0.0
            };
            total *= link.pose(q);
            poses.push(total);
        }
        Ok(poses)
    }

    fn check(&self, qs: &[f64], segment_nr: usize) -> Result<(), KinematicsError> {
        if segment_nr > self.chain.segment_count() {
            return Err(KinematicsError::SegmentOutOfRange {
                requested: segment_nr,
                available: self.chain.segment_count(),
            });
        }
        KinematicsError::check_joints(self.chain.joint_count(), qs.len())
    }
}

impl ForwardKinematics for ChainForwardKinematics<'_> {
    fn joint_count(&self) -> usize {
        self.chain.joint_count()
    }

    fn forward(&self, qs: &[f64]) -> Result<Pose, KinematicsError> {
        self.forward_to_segment(qs, self.chain.segment_count())
    }
}

/// Forward kinematics of a tree. The joint vector covers the whole tree and is indexed by
/// each element's joint number, so any segment pose is found by walking up to the root.
#[derive(Debug, Clone)]
pub struct TreeForwardKinematics<'a> {
    tree: &'a Tree,
}

impl<'a> TreeForwardKinematics<'a> {
    pub fn new(tree: &'a Tree) -> Self {
        TreeForwardKinematics { tree }
    }

    /// Pose of the tip frame of the named segment relative to the tree root.
    pub fn forward(&self, qs: &[f64], segment_name: &str) -> Result<Pose, KinematicsError> {
        KinematicsError::check_joints(self.tree.joint_count(), qs.len())?;
        let mut total = Isometry3::identity();
        let mut current = Some(segment_name);
        while let Some(name) = current {
            let element = self.tree.segment(name)
                .ok_or_else(|| KinematicsError::UnknownSegment(name.to_string()))?;
            if element.parent().is_none() {
                // Root frame is the reference.
                break;
            }
            let q = element.q_nr().map_or(0.0, |i| qs[i]);
            total = element.segment().pose(q) * total;
            current = element.parent();
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Translation3, UnitQuaternion, Vector3};
    use crate::joint::{Joint, JointType};
    use crate::segment::Segment;

    const EPSILON: f64 = 1e-9;

    fn planar() -> Chain {
        let mut chain = Chain::new();
        chain.add_segment(Segment::new("a", Joint::new("ja", JointType::RotateZ),
                                       Isometry3::translation(1.0, 0.0, 0.0)));
        chain.add_segment(Segment::fixed("bracket", Isometry3::translation(0.0, 0.0, 0.5)));
        chain.add_segment(Segment::new("b", Joint::new("jb", JointType::RotateZ),
                                       Isometry3::translation(1.0, 0.0, 0.0)));
        chain
    }

    #[test]
    fn test_planar_arm() {
        let chain = planar();
        let fk = ChainForwardKinematics::new(&chain);
        let pose = fk.forward(&[std::f64::consts::FRAC_PI_2, -std::f64::consts::FRAC_PI_2]).unwrap();
        assert!((pose.translation.vector - Vector3::new(1.0, 1.0, 0.5)).norm() < EPSILON);
        assert!(pose.rotation.angle() < EPSILON);
    }

    #[test]
    fn test_base_frame() {
        let chain = planar();
        let base = Isometry3::from_parts(Translation3::new(0.0, 0.0, 2.0),
                                         UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 0.3));
        let plain = ChainForwardKinematics::new(&chain).forward(&[0.2, 0.4]).unwrap();
        let placed = ChainForwardKinematics::with_base(&chain, base).forward(&[0.2, 0.4]).unwrap();
        let expected = base * plain;
        assert!((placed.translation.vector - expected.translation.vector).norm() < EPSILON);
        assert!(placed.rotation.angle_to(&expected.rotation) < EPSILON);
    }

    #[test]
    fn test_dimension_errors() {
        let chain = planar();
        let fk = ChainForwardKinematics::new(&chain);
        assert!(matches!(fk.forward(&[0.0]),
                         Err(KinematicsError::JointCountMismatch { expected: 2, found: 1 })));
        assert!(matches!(fk.forward_to_segment(&[0.0, 0.0], 4),
                         Err(KinematicsError::SegmentOutOfRange { requested: 4, available: 3 })));
    }

    #[test]
    fn test_partial_and_per_segment_poses() {
        let chain = planar();
        let fk = ChainForwardKinematics::new(&chain);
        let qs = [0.3, -0.7];
        let poses = fk.forward_with_segment_poses(&qs).unwrap();
        assert_eq!(poses.len(), 3);
        for (i, pose) in poses.iter().enumerate() {
            let partial = fk.forward_to_segment(&qs, i + 1).unwrap();
            assert!((pose.translation.vector - partial.translation.vector).norm() < EPSILON);
        }
        let tip = fk.forward(&qs).unwrap();
        assert!((poses[2].translation.vector - tip.translation.vector).norm() < EPSILON);
        let base = fk.forward_to_segment(&qs, 0).unwrap();
        assert!(base.translation.vector.norm() < EPSILON);
    }

    #[test]
    fn test_tree_forward_matches_chain() {
        let chain = planar();
        let mut tree = Tree::new();
        tree.add_chain(&chain, "root").unwrap();
        tree.add_segment(Segment::new("side", Joint::new("js", JointType::TranslateY),
                                      Isometry3::identity()), "a").unwrap();

        let tree_fk = TreeForwardKinematics::new(&tree);
        // Tree joints: a = 0, b = 1, side = 2
        let qs = [0.4, 0.9, 0.25];
        let from_tree = tree_fk.forward(&qs, "b").unwrap();
        let from_chain = ChainForwardKinematics::new(&chain).forward(&qs[..2]).unwrap();
        assert!((from_tree.translation.vector - from_chain.translation.vector).norm() < EPSILON);

        let side = tree_fk.forward(&qs, "side").unwrap();
        let a = tree_fk.forward(&qs, "a").unwrap();
        let expected = a * Isometry3::translation(0.0, 0.25, 0.0);
        assert!((side.translation.vector - expected.translation.vector).norm() < EPSILON);

        assert!(tree_fk.forward(&qs, "root").unwrap().translation.vector.norm() < EPSILON);
        assert!(matches!(tree_fk.forward(&qs, "nope"), Err(KinematicsError::UnknownSegment(_))));
        assert!(matches!(tree_fk.forward(&qs[..1], "b"), Err(KinematicsError::JointCountMismatch { .. })));
    }
}
