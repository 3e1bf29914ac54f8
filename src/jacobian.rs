extern crate nalgebra as na;

use na::{DVector, Isometry3, Matrix6xX, UnitQuaternion, Vector3};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use crate::chain::Chain;
use crate::kinematic_traits::{ForwardKinematics, Pose};
use crate::kinematics_error::KinematicsError;
use crate::twist::Twist;

/// Orientation the Jacobian columns are expressed in. The reference point is the chain
/// tip in both cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JacobianReference {
    /// Columns expressed in the chain base frame.
    Base,
    /// Columns expressed in the tip frame.
    Tip,
}

/// Geometric Jacobian of a chain
#[derive(Debug, Clone, PartialEq)]
pub struct Jacobian {
    /// A 6 x N matrix, one column per movable joint.
    ///
    /// The Jacobian matrix maps the joint velocities to the end-effector velocities.
    /// Rows 0..3 are the linear velocity of the reference point, rows 3..6 the angular
    /// velocity.
    matrix: Matrix6xX<f64>,
}

impl Jacobian {
    /// Jacobian with all columns zero
    pub fn zeros(columns: usize) -> Self {
        Jacobian { matrix: Matrix6xX::zeros(columns) }
    }

    pub fn matrix(&self) -> &Matrix6xX<f64> {
        &self.matrix
    }

    pub fn columns(&self) -> usize {
        self.matrix.ncols()
    }

    /// Column `i` as a twist: the end effector velocity for unit rate of joint `i`.
    pub fn column(&self, i: usize) -> Twist {
        Twist::from_vector6(&self.matrix.column(i).into_owned())
    }

    pub fn set_column(&mut self, i: usize, twist: &Twist) {
        self.matrix.set_column(i, &twist.to_vector6());
    }

    /// End effector twist for the given joint rates
    pub fn multiply(&self, qdot: &[f64]) -> Result<Twist, KinematicsError> {
        KinematicsError::check_joints(self.columns(), qdot.len())?;
        let twist = &self.matrix * DVector::from_column_slice(qdot);
        Ok(Twist::new(
            Vector3::new(twist[0], twist[1], twist[2]),
            Vector3::new(twist[3], twist[4], twist[5]),
        ))
    }

    /// Moves the reference point of every column by `v`
    pub fn change_reference_point(&mut self, v: &Vector3<f64>) {
        for i in 0..self.columns() {
            let column = self.column(i).ref_point(v);
            self.set_column(i, &column);
        }
    }

    /// Rotates every column into another orientation
    pub fn change_base(&mut self, rotation: &UnitQuaternion<f64>) {
        for i in 0..self.columns() {
            let column = self.column(i).rotated(rotation);
            self.set_column(i, &column);
        }
    }
}

/// Computes the analytic Jacobian of a chain by walking its segments once.
///
/// For a movable joint, its column starts as the segment twist for a unit joint rate,
/// rotated into the base orientation. The reference point of the columns then follows
/// the chain outwards: after each segment, all columns written so far are shifted by
/// the displacement of that segment, so they end up referenced at the chain tip.
#[derive(Debug, Clone)]
pub struct JacobianSolver<'a> {
    chain: &'a Chain,
}

impl<'a> JacobianSolver<'a> {
    pub fn new(chain: &'a Chain) -> Self {
        JacobianSolver { chain }
    }

    /// Jacobian in the base orientation, reference point at the chain tip.
    pub fn jacobian(&self, qs: &[f64]) -> Result<Jacobian, KinematicsError> {
        self.jacobian_to_segment(qs, self.chain.segment_count())
    }

    /// Jacobian expressed in the requested orientation, reference point at the chain tip.
    pub fn jacobian_in(&self, qs: &[f64], reference: JacobianReference) -> Result<Jacobian, KinematicsError> {
        let (mut jacobian, tip) = self.walk(qs, self.chain.segment_count())?;
        if reference == JacobianReference::Tip {
            jacobian.change_base(&tip.rotation.inverse());
        }
        Ok(jacobian)
    }

    /// Jacobian of the tip of the first `segment_nr` segments. Columns of joints beyond
    /// that segment stay zero.
    pub fn jacobian_to_segment(&self, qs: &[f64], segment_nr: usize) -> Result<Jacobian, KinematicsError> {
        self.walk(qs, segment_nr).map(|(jacobian, _)| jacobian)
    }

    fn walk(&self, qs: &[f64], segment_nr: usize) -> Result<(Jacobian, Pose), KinematicsError> {
        if segment_nr > self.chain.segment_count() {
            return Err(KinematicsError::SegmentOutOfRange {
                requested: segment_nr,
                available: self.chain.segment_count(),
            });
        }
        KinematicsError::check_joints(self.chain.joint_count(), qs.len())?;

        let mut jacobian = Jacobian::zeros(self.chain.joint_count());
        let mut previous: Pose = Isometry3::identity();
        let mut k = 0;
        for link in self.chain.links().take(segment_nr) {
            let movable = link.joint().is_movable();
            let q = if movable { qs[k] } else { 0.0 };
            let total = previous * link.pose(q);

            // Columns not yet written are zero and stay unaffected by the shift.
            jacobian.change_reference_point(&(total.translation.vector - previous.translation.vector));
            if movable {
                jacobian.set_column(k, &link.twist(q, 1.0).rotated(&previous.rotation));
                k += 1;
            }
            previous = total;
        }
        Ok((jacobian, previous))
    }
}

/// Function to compute the Jacobian matrix numerically, by central differences of the
/// forward kinematics. Much slower than [`JacobianSolver`]; used to verify it.
///
/// # Arguments
///
/// * `robot` - Forward kinematics of the chain
/// * `qs` - Joint configuration
/// * `delta` - Joint displacement used for numerical differentiation
///
/// # Returns
///
/// Jacobian in the base orientation with the tip as reference point, the same
/// layout [`JacobianSolver::jacobian`] returns.
pub fn numeric_jacobian(robot: &(impl ForwardKinematics + Sync), qs: &[f64], delta: f64)
                        -> Result<Jacobian, KinematicsError> {
    KinematicsError::check_joints(robot.joint_count(), qs.len())?;

    let column = |i: usize| -> Result<Twist, KinematicsError> {
        let mut perturbed = qs.to_vec();
        perturbed[i] = qs[i] - delta;
        let before = robot.forward(&perturbed)?;
        perturbed[i] = qs[i] + delta;
        let after = robot.forward(&perturbed)?;
        Ok(Twist::between(&before, &after, 2.0 * delta))
    };

    #[cfg(feature = "parallel")]
    let columns: Vec<Twist> = (0..qs.len()).into_par_iter().map(column).collect::<Result<_, _>>()?;
    #[cfg(not(feature = "parallel"))]
    let columns: Vec<Twist> = (0..qs.len()).map(column).collect::<Result<_, _>>()?;

    let mut jacobian = Jacobian::zeros(qs.len());
    for (i, twist) in columns.iter().enumerate() {
        jacobian.set_column(i, twist);
    }
    Ok(jacobian)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forward::ChainForwardKinematics;
    use crate::joint::{Joint, JointType};
    use crate::segment::Segment;

    const EPSILON: f64 = 1e-9;

    /// Single rotary joint with the end effector one meter away along x.
    /// When the joint rotates, it affects the Y-position and the Z-orientation of the end-effector.
    fn single_rotary_joint() -> Chain {
        let mut chain = Chain::new();
        chain.add_segment(Segment::new("arm", Joint::new("j1", JointType::RotateZ),
                                       Isometry3::translation(1.0, 0.0, 0.0)));
        chain
    }

    fn assert_jacobian_approx_eq(left: &Jacobian, right: &Jacobian, epsilon: f64) {
        assert_eq!(left.columns(), right.columns());
        for i in 0..6 {
            for j in 0..left.columns() {
                let (l, r) = (left.matrix()[(i, j)], right.matrix()[(i, j)]);
                assert!((l - r).abs() < epsilon,
                        "left[{0},{1}] = {2} is not approximately equal to right[{0},{1}] = {3}", i, j, l, r);
            }
        }
    }

    #[test]
    fn test_single_rotary_joint() {
        let chain = single_rotary_joint();
        let jacobian = JacobianSolver::new(&chain).jacobian(&[0.0]).unwrap();
        let column = jacobian.column(0);

        assert!((column.linear - Vector3::new(0.0, 1.0, 0.0)).norm() < EPSILON); // Y position
        assert!((column.angular - Vector3::new(0.0, 0.0, 1.0)).norm() < EPSILON); // Z orientation
    }

    #[test]
    fn test_prismatic_column_is_axis() {
        let mut chain = single_rotary_joint();
        chain.add_segment(Segment::new("slide", Joint::new("j2", JointType::TranslateY),
                                       Isometry3::translation(0.0, 0.0, 0.3)));
        let jacobian = JacobianSolver::new(&chain).jacobian(&[std::f64::consts::FRAC_PI_2, 0.2]).unwrap();
        // After the quarter turn the local y axis points along -x.
        let column = jacobian.column(1);
        assert!((column.linear - Vector3::new(-1.0, 0.0, 0.0)).norm() < EPSILON);
        assert!(column.angular.norm() < EPSILON);
    }

    #[test]
    fn test_matches_numeric() {
        let mut chain = single_rotary_joint();
        chain.add_segment(Segment::new("fore", Joint::new("j2", JointType::RotateX),
                                       Isometry3::translation(0.0, 0.5, 0.2)));
        chain.add_segment(Segment::fixed("flange", Isometry3::translation(0.0, 0.0, 0.1)));
        let qs = [0.3, -0.8];
        let fk = ChainForwardKinematics::new(&chain);
        let numeric = numeric_jacobian(&fk, &qs, 1e-5).unwrap();
        let analytic = JacobianSolver::new(&chain).jacobian(&qs).unwrap();
        assert_jacobian_approx_eq(&analytic, &numeric, 1e-6);
    }

    #[test]
    fn test_tip_reference() {
        let chain = single_rotary_joint();
        let qs = [std::f64::consts::FRAC_PI_2];
        let solver = JacobianSolver::new(&chain);
        let base = solver.jacobian_in(&qs, JacobianReference::Base).unwrap();
        let tip = solver.jacobian_in(&qs, JacobianReference::Tip).unwrap();
        // Tip moves along -x in the base frame, which is the local y axis of the tip.
        assert!((base.column(0).linear - Vector3::new(-1.0, 0.0, 0.0)).norm() < EPSILON);
        assert!((tip.column(0).linear - Vector3::new(0.0, 1.0, 0.0)).norm() < EPSILON);
        assert!((tip.column(0).angular - Vector3::new(0.0, 0.0, 1.0)).norm() < EPSILON);
    }

    #[test]
    fn test_multiply() {
        let chain = single_rotary_joint();
        let jacobian = JacobianSolver::new(&chain).jacobian(&[0.0]).unwrap();
        let twist = jacobian.multiply(&[2.0]).unwrap();
        assert!((twist.linear - Vector3::new(0.0, 2.0, 0.0)).norm() < EPSILON);
        assert!(matches!(jacobian.multiply(&[1.0, 2.0]),
                         Err(KinematicsError::JointCountMismatch { expected: 1, found: 2 })));
    }

    #[test]
    fn test_partial_jacobian() {
        let mut chain = single_rotary_joint();
        chain.add_segment(Segment::new("fore", Joint::new("j2", JointType::RotateZ),
                                       Isometry3::translation(1.0, 0.0, 0.0)));
        let solver = JacobianSolver::new(&chain);
        let partial = solver.jacobian_to_segment(&[0.0, 0.0], 1).unwrap();
        assert!((partial.column(0).linear - Vector3::new(0.0, 1.0, 0.0)).norm() < EPSILON);
        assert_eq!(partial.column(1), Twist::zero());
        let full = solver.jacobian(&[0.0, 0.0]).unwrap();
        assert!((full.column(0).linear - Vector3::new(0.0, 2.0, 0.0)).norm() < EPSILON);
        assert!(matches!(solver.jacobian_to_segment(&[0.0, 0.0], 3),
                         Err(KinematicsError::SegmentOutOfRange { .. })));
    }
}
