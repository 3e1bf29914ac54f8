//! Forward velocity kinematics: pose and twist of the chain tip for given joint
//! positions and rates.

use std::ops::Mul;
use nalgebra::Isometry3;
use crate::chain::Chain;
use crate::kinematic_traits::Pose;
use crate::kinematics_error::KinematicsError;
use crate::twist::Twist;

/// Pose paired with the twist of that frame. The twist is expressed in the orientation
/// of the frame the pose is relative to, with the frame origin as reference point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseVelocity {
    pub pose: Pose,
    pub twist: Twist,
}

impl PoseVelocity {
    pub fn new(pose: Pose, twist: Twist) -> Self {
        PoseVelocity { pose, twist }
    }

    /// Stationary frame
    pub fn at_rest(pose: Pose) -> Self {
        PoseVelocity { pose, twist: Twist::zero() }
    }
}

impl Default for PoseVelocity {
    fn default() -> Self {
        PoseVelocity::at_rest(Isometry3::identity())
    }
}

/// Composition `a * b`, with `b` given relative to the frame of `a`.
impl Mul for PoseVelocity {
    type Output = PoseVelocity;

    fn mul(self, rhs: PoseVelocity) -> PoseVelocity {
        let offset = self.pose.rotation * rhs.pose.translation.vector;
        PoseVelocity {
            pose: self.pose * rhs.pose,
            twist: self.twist.ref_point(&offset) + rhs.twist.rotated(&self.pose.rotation),
        }
    }
}

/// Velocity kinematics of a chain, mirroring [`crate::forward::ChainForwardKinematics`]
/// with joint rates added.
#[derive(Debug, Clone)]
pub struct ChainVelocityKinematics<'a> {
    chain: &'a Chain,
    base: Pose,
}

impl<'a> ChainVelocityKinematics<'a> {
    pub fn new(chain: &'a Chain) -> Self {
        ChainVelocityKinematics { chain, base: Isometry3::identity() }
    }

    /// The base is placed at `base` and does not move.
    pub fn with_base(chain: &'a Chain, base: Pose) -> Self {
        ChainVelocityKinematics { chain, base }
    }

    /// Pose and twist of the chain tip. The twist is in the base orientation with the
    /// tip as reference point, so it equals the Jacobian times `qdots`.
    pub fn forward(&self, qs: &[f64], qdots: &[f64]) -> Result<PoseVelocity, KinematicsError> {
        self.forward_to_segment(qs, qdots, self.chain.segment_count())
    }

    /// Same as [`Self::forward`] for the end of the first `segment_nr` segments.
    pub fn forward_to_segment(&self, qs: &[f64], qdots: &[f64], segment_nr: usize)
                              -> Result<PoseVelocity, KinematicsError> {
        if segment_nr > self.chain.segment_count() {
            return Err(KinematicsError::SegmentOutOfRange {
                requested: segment_nr,
                available: self.chain.segment_count(),
            });
        }
        Ok(self.compose(qs, qdots, segment_nr)?.pop().unwrap_or(PoseVelocity::at_rest(self.base)))
    }

    /// Pose and twist at the end of every segment, in chain order.
    pub fn forward_with_segment_velocities(&self, qs: &[f64], qdots: &[f64])
                                           -> Result<Vec<PoseVelocity>, KinematicsError> {
        self.compose(qs, qdots, self.chain.segment_count())
    }

    fn compose(&self, qs: &[f64], qdots: &[f64], segment_nr: usize)
               -> Result<Vec<PoseVelocity>, KinematicsError> {
        KinematicsError::check_joints(self.chain.joint_count(), qs.len())?;
        KinematicsError::check_joints(self.chain.joint_count(), qdots.len())?;

        let mut frames = Vec::with_capacity(segment_nr);
        let mut total = PoseVelocity::at_rest(self.base);
        let mut j = 0;
        for link in self.chain.links().take(segment_nr) {
            let (q, qdot) = if link.joint().is_movable() {
                j += 1;
                (qs[j - 1], qdots[j - 1])
            } else {
                (0.0, 0.0)
            };
            total = total * PoseVelocity::new(link.pose(q), link.twist(q, qdot));
            frames.push(total);
        }
        Ok(frames)
    }
}
