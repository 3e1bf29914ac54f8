//! Iterative inverse position kinematics for six joint chains.

use tracing::{debug, trace};
use crate::chain::Chain;
use crate::forward::ChainForwardKinematics;
use crate::inverse_velocity::InverseVelocitySolver;
use crate::kinematic_traits::{ForwardKinematics, Joints, Pose};
use crate::kinematics_error::KinematicsError;
use crate::solver_config::SolverConfig;
use crate::twist::Twist;

/// Newton-Raphson solver: each iteration takes the twist that would move the current tip
/// onto the target in unit time and converts it to a joint step with the inverse
/// velocity solver. Converges to the solution nearest the seed, if the seed is close
/// enough; singular configurations on the way abort the search.
#[derive(Debug, Clone)]
pub struct InversePositionSolver<'a> {
    forward: ChainForwardKinematics<'a>,
    velocity: InverseVelocitySolver<'a>,
    max_iterations: usize,
    epsilon: f64,
}

impl<'a> InversePositionSolver<'a> {
    pub fn new(chain: &'a Chain) -> Self {
        Self::from_config(chain, &SolverConfig::default())
    }

    pub fn from_config(chain: &'a Chain, config: &SolverConfig) -> Self {
        InversePositionSolver {
            forward: ChainForwardKinematics::new(chain),
            velocity: InverseVelocitySolver::from_config(chain, config),
            max_iterations: config.max_iterations,
            epsilon: config.position_epsilon,
        }
    }

    /// Joint values that place the chain tip at `target`, starting the search from `seed`.
    pub fn cartesian_to_joints(&self, seed: &[f64], target: &Pose) -> Result<Joints, KinematicsError> {
        KinematicsError::check_joints(self.forward.joint_count(), seed.len())?;

        let mut qs = seed.to_vec();
        for iteration in 0..self.max_iterations {
            let pose = self.forward.forward(&qs)?;
            let delta = Twist::between(&pose, target, 1.0);
            let residual = delta.norm();
            trace!("Iteration {}: residual {:e}", iteration, residual);
            if residual < self.epsilon {
                debug!("Converged in {} iterations", iteration);
                return Ok(qs);
            }
            let step = self.velocity.cartesian_to_joints(&qs, &delta)?;
            for (q, dq) in qs.iter_mut().zip(step) {
                *q += dq;
            }
        }

        // The last step may have landed on the target.
        let pose = self.forward.forward(&qs)?;
        let last = Twist::between(&pose, target, 1.0).norm();
        if last < self.epsilon {
            return Ok(qs);
        }
        debug!("No convergence after {} iterations, residual {:e}", self.max_iterations, last);
        Err(KinematicsError::MaxIterationsExceeded { iterations: self.max_iterations, residual: last })
    }
}
