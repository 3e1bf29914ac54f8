//! Numeric settings of the solvers, optionally read from YAML.

#[cfg(feature = "allow_filesystem")]
use std::path::Path;
#[cfg(feature = "allow_filesystem")]
use serde::Deserialize;
use crate::kinematics_error::KinematicsError;

/// Tolerances and limits shared by the solvers.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "allow_filesystem", derive(Deserialize), serde(default))]
pub struct SolverConfig {
    /// Smallest singular value of the Jacobian below which the inverse velocity solver
    /// reports the configuration as singular.
    pub singular_tolerance: f64,

    /// Norm of the remaining pose error at which the position solver stops.
    pub position_epsilon: f64,

    /// Iteration limit of the position solver.
    pub max_iterations: usize,

    /// Joint displacement for the finite difference Jacobian.
    pub finite_difference_step: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            singular_tolerance: 1e-6,
            position_epsilon: 1e-5,
            max_iterations: 100,
            finite_difference_step: 1e-4,
        }
    }
}

impl SolverConfig {
    /// Rejects non-positive tolerances and a zero iteration limit.
    pub fn validate(&self) -> Result<(), KinematicsError> {
        let positive = [
            ("singular_tolerance", self.singular_tolerance),
            ("position_epsilon", self.position_epsilon),
            ("finite_difference_step", self.finite_difference_step),
        ];
        for (key, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(KinematicsError::Config(format!("{} must be positive, got {}", key, value)));
            }
        }
        if self.max_iterations == 0 {
            return Err(KinematicsError::Config("max_iterations must be positive".to_string()));
        }
        Ok(())
    }
}

/// Layout of the settings file, everything outside `solver` is ignored.
#[cfg(feature = "allow_filesystem")]
#[derive(Deserialize)]
struct Root {
    #[serde(default)]
    solver: Option<SolverConfig>,
}

#[cfg(feature = "allow_filesystem")]
impl SolverConfig {
    /// Read the solver settings from YAML file. YAML file like this is supported:
    /// ```yaml
    /// solver:
    ///   singular_tolerance: 1.0e-6
    ///   position_epsilon: 1.0e-5
    ///   max_iterations: 100
    ///   finite_difference_step: 1.0e-4
    /// ```
    /// Every key is optional, missing ones keep the default value.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, KinematicsError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Same as [`Self::from_yaml_file`] for YAML already in memory.
    pub fn from_yaml(contents: &str) -> Result<Self, KinematicsError> {
        if contents.trim().is_empty() {
            return Ok(SolverConfig::default());
        }
        let root: Root = serde_saphyr::from_str(contents)
            .map_err(|e| KinematicsError::Config(format!("{}", e)))?;
        let config = root.solver.unwrap_or_default();
        config.validate()?;
        Ok(config)
    }
}
