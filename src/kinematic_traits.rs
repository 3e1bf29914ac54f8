//! Common type aliases and the trait shared by the forward position solvers

extern crate nalgebra as na;

use na::Isometry3;
use crate::kinematics_error::KinematicsError;

/// Pose of a frame relative to another frame. It contains both Cartesian position and
/// rotation quaternion.
/// ```
/// extern crate nalgebra as na;
/// use na::{Isometry3, Translation3, UnitQuaternion};
/// use rs_chain_kinematics::kinematic_traits::Pose;
///
/// let translation = Translation3::new(1.0, 0.0, 0.0);
/// // The quaternion should be normalized to represent a valid rotation.
/// let rotation = UnitQuaternion::from_quaternion(na::Quaternion::new(1.0, 0.0, 0.0, 1.0).normalize());
/// let transform: Pose = Isometry3::from_parts(translation, rotation);
/// ```
pub type Pose = Isometry3<f64>;

/// Joint values (or joint rates) of a chain, one entry per movable joint.
/// Solvers accept any `&[f64]` and return this type.
pub type Joints = Vec<f64>;

/// Anything that maps joint values into the pose of the tip frame.
pub trait ForwardKinematics {
    /// Number of joint values `forward` expects.
    fn joint_count(&self) -> usize;

    /// Pose of the tip frame for the given joint values. Fails if `qs` does not have
    /// exactly `joint_count` entries.
    fn forward(&self, qs: &[f64]) -> Result<Pose, KinematicsError>;
}
