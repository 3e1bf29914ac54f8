//! Spatial velocity (twist) of a frame: linear velocity of a reference point plus angular
//! velocity, both expressed in some coordinate frame.
//!
//! The two operations that matter for chain kinematics are the reference point shift
//! ([`Twist::ref_point`]) and the change of orientation ([`Twist::rotated`]). Composing
//! segment velocities and assembling Jacobian columns both reduce to these two.

use std::ops::{Add, AddAssign, Mul, Neg, Sub};
use nalgebra::{UnitQuaternion, Vector3, Vector6};
use crate::kinematic_traits::Pose;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Twist {
    /// Linear velocity of the reference point.
    pub linear: Vector3<f64>,

    /// Angular velocity. Does not depend on the reference point.
    pub angular: Vector3<f64>,
}

impl Twist {
    pub fn new(linear: Vector3<f64>, angular: Vector3<f64>) -> Self {
        Twist { linear, angular }
    }

    pub fn zero() -> Self {
        Twist { linear: Vector3::zeros(), angular: Vector3::zeros() }
    }

    /// Builds the twist from a 6D vector, linear part first.
    pub fn from_vector6(v: &Vector6<f64>) -> Self {
        Twist {
            linear: Vector3::new(v[0], v[1], v[2]),
            angular: Vector3::new(v[3], v[4], v[5]),
        }
    }

    /// 6D vector with the linear part first, the layout used by the Jacobian rows.
    pub fn to_vector6(&self) -> Vector6<f64> {
        Vector6::new(
            self.linear.x, self.linear.y, self.linear.z,
            self.angular.x, self.angular.y, self.angular.z,
        )
    }

    /// Moves the reference point by `v` (expressed in the same frame as the twist).
    /// The new linear part is the velocity of the point at `v`: `linear + angular × v`.
    pub fn ref_point(&self, v: &Vector3<f64>) -> Self {
        Twist {
            linear: self.linear + self.angular.cross(v),
            angular: self.angular,
        }
    }

    /// Expresses the twist in another orientation, reference point unchanged.
    pub fn rotated(&self, rotation: &UnitQuaternion<f64>) -> Self {
        Twist {
            linear: rotation * self.linear,
            angular: rotation * self.angular,
        }
    }

    /// Finite difference twist that moves `from` into `to` over `dt`. Both parts are
    /// expressed in the common base frame; the reference point is the origin of `from`.
    pub fn between(from: &Pose, to: &Pose, dt: f64) -> Self {
        let linear = (to.translation.vector - from.translation.vector) / dt;
        let angular = (to.rotation * from.rotation.inverse()).scaled_axis() / dt;
        Twist { linear, angular }
    }

    /// Euclidean norm of the 6D vector.
    pub fn norm(&self) -> f64 {
        (self.linear.norm_squared() + self.angular.norm_squared()).sqrt()
    }

    /// Componentwise comparison with the given tolerance.
    pub fn approx_eq(&self, other: &Twist, epsilon: f64) -> bool {
        (self.to_vector6() - other.to_vector6()).amax() <= epsilon
    }
}

impl Default for Twist {
    fn default() -> Self {
        Twist::zero()
    }
}

impl Add for Twist {
    type Output = Twist;

    fn add(self, rhs: Twist) -> Twist {
        Twist::new(self.linear + rhs.linear, self.angular + rhs.angular)
    }
}

impl AddAssign for Twist {
    fn add_assign(&mut self, rhs: Twist) {
        self.linear += rhs.linear;
        self.angular += rhs.angular;
    }
}

impl Sub for Twist {
    type Output = Twist;

    fn sub(self, rhs: Twist) -> Twist {
        Twist::new(self.linear - rhs.linear, self.angular - rhs.angular)
    }
}

impl Neg for Twist {
    type Output = Twist;

    fn neg(self) -> Twist {
        Twist::new(-self.linear, -self.angular)
    }
}

impl Mul<f64> for Twist {
    type Output = Twist;

    fn mul(self, rhs: f64) -> Twist {
        Twist::new(self.linear * rhs, self.angular * rhs)
    }
}
