//! Inverse velocity kinematics: joint rates that produce a requested tip twist.

use nalgebra::Matrix6;
use tracing::warn;
use crate::chain::Chain;
use crate::jacobian::JacobianSolver;
use crate::kinematic_traits::Joints;
use crate::kinematics_error::KinematicsError;
use crate::solver_config::SolverConfig;
use crate::twist::Twist;

/// Solves `J(q) * qdot = twist` for chains with exactly six joints.
///
/// Near a singularity the joint rates grow without bound, so instead of a damped or
/// pseudo-inverse answer the solver reports [`KinematicsError::Singular`] once the
/// smallest singular value of the Jacobian drops below the tolerance. Redundant and
/// under-actuated chains are rejected with [`KinematicsError::NotSquare`].
#[derive(Debug, Clone)]
pub struct InverseVelocitySolver<'a> {
    chain: &'a Chain,
    tolerance: f64,
}

impl<'a> InverseVelocitySolver<'a> {
    pub fn new(chain: &'a Chain) -> Self {
        Self::with_tolerance(chain, SolverConfig::default().singular_tolerance)
    }

    pub fn with_tolerance(chain: &'a Chain, tolerance: f64) -> Self {
        InverseVelocitySolver { chain, tolerance }
    }

    pub fn from_config(chain: &'a Chain, config: &SolverConfig) -> Self {
        Self::with_tolerance(chain, config.singular_tolerance)
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Joint rates for the given tip twist (base orientation, tip as reference point).
    pub fn cartesian_to_joints(&self, qs: &[f64], twist: &Twist) -> Result<Joints, KinematicsError> {
        let joints = self.chain.joint_count();
        KinematicsError::check_joints(joints, qs.len())?;
        if joints != 6 {
            return Err(KinematicsError::NotSquare { joints });
        }

        let jacobian = JacobianSolver::new(self.chain).jacobian(qs)?;
        let square: Matrix6<f64> = jacobian.matrix().fixed_columns::<6>(0).into_owned();
        let sigma_min = square.singular_values().min();
        if sigma_min < self.tolerance {
            warn!("Singular configuration {:?}: sigma_min = {:e}", qs, sigma_min);
            return Err(KinematicsError::Singular { sigma_min, tolerance: self.tolerance });
        }

        let qdot = square.lu().solve(&twist.to_vector6())
            .ok_or(KinematicsError::Singular { sigma_min, tolerance: self.tolerance })?;
        Ok(qdot.iter().copied().collect())
    }

    /// Singular values of the Jacobian in decreasing order. Works for any joint count,
    /// a chain without movable joints has none.
    pub fn singular_values(&self, qs: &[f64]) -> Result<Vec<f64>, KinematicsError> {
        KinematicsError::check_joints(self.chain.joint_count(), qs.len())?;
        if self.chain.joint_count() == 0 {
            return Ok(Vec::new());
        }
        let jacobian = JacobianSolver::new(self.chain).jacobian(qs)?;
        let mut values: Vec<f64> = jacobian.matrix().clone().singular_values().iter().copied().collect();
        values.sort_by(|a, b| b.total_cmp(a));
        Ok(values)
    }
}
