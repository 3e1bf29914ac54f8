//! Single degree of freedom joint. Maps a joint value into a pose offset and
//! a joint rate into a twist, both relative to the joint's own origin.

use nalgebra::{Isometry3, Translation3, Unit, UnitQuaternion, Vector3};
use crate::kinematic_traits::Pose;
use crate::kinematics_error::KinematicsError;
use crate::twist::Twist;

/// Shorter axes are rejected by the axis constructors.
const MIN_AXIS_LENGTH: f64 = 1e-12;

/// Motion type of the joint. Axis carrying variants always hold a unit vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JointType {
    /// Rigid connection, contributes geometry but no coordinate.
    Fixed,
    RotateX,
    RotateY,
    RotateZ,
    /// Rotation about an arbitrary axis that passes through `origin`.
    RotateAxis { origin: Vector3<f64>, axis: Unit<Vector3<f64>> },
    TranslateX,
    TranslateY,
    TranslateZ,
    TranslateAxis { axis: Unit<Vector3<f64>> },
}

impl JointType {
    pub fn is_fixed(&self) -> bool {
        matches!(self, JointType::Fixed)
    }

    pub fn is_rotational(&self) -> bool {
        matches!(self, JointType::RotateX | JointType::RotateY | JointType::RotateZ
            | JointType::RotateAxis { .. })
    }
}

/// Named joint. Immutable once constructed, only the value passed to
/// [`Joint::pose`] and [`Joint::twist`] varies at runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct Joint {
    name: String,
    joint_type: JointType,
}

impl Joint {
    pub fn new(name: impl Into<String>, joint_type: JointType) -> Self {
        Joint { name: name.into(), joint_type }
    }

    pub fn fixed(name: impl Into<String>) -> Self {
        Joint::new(name, JointType::Fixed)
    }

    /// Rotational joint about `axis` passing through `origin`. The axis is normalized,
    /// zero length axis is an error.
    pub fn rotate_axis(name: impl Into<String>, origin: Vector3<f64>, axis: Vector3<f64>)
                       -> Result<Self, KinematicsError> {
        let name = name.into();
        let axis = Unit::try_new(axis, MIN_AXIS_LENGTH)
            .ok_or_else(|| KinematicsError::ZeroAxis(name.clone()))?;
        Ok(Joint::new(name, JointType::RotateAxis { origin, axis }))
    }

    /// Prismatic joint along `axis`. The axis is normalized, zero length axis is an error.
    pub fn translate_axis(name: impl Into<String>, axis: Vector3<f64>) -> Result<Self, KinematicsError> {
        let name = name.into();
        let axis = Unit::try_new(axis, MIN_AXIS_LENGTH)
            .ok_or_else(|| KinematicsError::ZeroAxis(name.clone()))?;
        Ok(Joint::new(name, JointType::TranslateAxis { axis }))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn joint_type(&self) -> JointType {
        self.joint_type
    }

    /// True for every type except `Fixed`.
    pub fn is_movable(&self) -> bool {
        !self.joint_type.is_fixed()
    }

    /// Unit motion axis in the joint frame, `None` for fixed joints.
    pub fn axis(&self) -> Option<Unit<Vector3<f64>>> {
        match self.joint_type {
            JointType::Fixed => None,
            JointType::RotateX | JointType::TranslateX => Some(Vector3::x_axis()),
            JointType::RotateY | JointType::TranslateY => Some(Vector3::y_axis()),
            JointType::RotateZ | JointType::TranslateZ => Some(Vector3::z_axis()),
            JointType::RotateAxis { axis, .. } | JointType::TranslateAxis { axis } => Some(axis),
        }
    }

    /// Pose produced by moving the joint to `q`. Identity for fixed joints and for `q == 0`.
    pub fn pose(&self, q: f64) -> Pose {
        match self.joint_type {
            JointType::Fixed => Isometry3::identity(),
            JointType::RotateX | JointType::RotateY | JointType::RotateZ => {
                let axis = self.unit_axis();
                Isometry3::from_parts(Translation3::identity(), UnitQuaternion::from_axis_angle(&axis, q))
            }
            JointType::RotateAxis { origin, axis } => {
                // Rotation about a line through origin: the origin itself must stay in place.
                let rotation = UnitQuaternion::from_axis_angle(&axis, q);
                let translation = origin - rotation * origin;
                Isometry3::from_parts(Translation3::from(translation), rotation)
            }
            JointType::TranslateX | JointType::TranslateY | JointType::TranslateZ
            | JointType::TranslateAxis { .. } => {
                let axis = self.unit_axis();
                Isometry3::from_parts(Translation3::from(axis.into_inner() * q), UnitQuaternion::identity())
            }
        }
    }

    /// Twist produced by moving the joint at rate `qdot`, reference point at the joint
    /// frame origin. Zero for fixed joints.
    pub fn twist(&self, qdot: f64) -> Twist {
        match self.joint_type {
            JointType::Fixed => Twist::zero(),
            JointType::RotateAxis { origin, axis } => {
                let angular = axis.into_inner() * qdot;
                Twist::new(origin.cross(&angular), angular)
            }
            t if t.is_rotational() => Twist::new(Vector3::zeros(), self.unit_axis().into_inner() * qdot),
            _ => Twist::new(self.unit_axis().into_inner() * qdot, Vector3::zeros()),
        }
    }

    // Only called for movable joints.
    fn unit_axis(&self) -> Unit<Vector3<f64>> {
        self.axis().unwrap_or_else(Vector3::z_axis)
    }
}
