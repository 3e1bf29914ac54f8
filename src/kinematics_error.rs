//! Error handling for chain and tree construction and for the solvers

use std::fmt;
use std::io;

/// Broad category of a [`KinematicsError`]. Control loops usually only need this to
/// decide on a fallback (a singular configuration is recoverable, a structural error is not).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Names in a tree are duplicated, missing or cannot be spliced.
    Structural,
    /// Joint vectors or segment indices do not match the chain or tree.
    Dimension,
    /// The Jacobian is numerically rank deficient.
    Singular,
    /// Iterative solver did not reach the target.
    Convergence,
    /// Joint construction or solver configuration is invalid.
    Configuration,
}

/// Unified error reported by chain and tree mutations and by all solvers.
/// Every error is detected before any state is changed.
#[derive(Debug)]
pub enum KinematicsError {
    DuplicateSegment(String),
    UnknownSegment(String),
    InvertedLink(String),
    JointCountMismatch { expected: usize, found: usize },
    SegmentOutOfRange { requested: usize, available: usize },
    NotSquare { joints: usize },
    Singular { sigma_min: f64, tolerance: f64 },
    MaxIterationsExceeded { iterations: usize, residual: f64 },
    ZeroAxis(String),
    Config(String),
    Io(io::Error),
}

impl KinematicsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            KinematicsError::DuplicateSegment(_)
            | KinematicsError::UnknownSegment(_)
            | KinematicsError::InvertedLink(_) => ErrorKind::Structural,
            KinematicsError::JointCountMismatch { .. }
            | KinematicsError::SegmentOutOfRange { .. }
            | KinematicsError::NotSquare { .. } => ErrorKind::Dimension,
            KinematicsError::Singular { .. } => ErrorKind::Singular,
            KinematicsError::MaxIterationsExceeded { .. } => ErrorKind::Convergence,
            KinematicsError::ZeroAxis(_)
            | KinematicsError::Config(_)
            | KinematicsError::Io(_) => ErrorKind::Configuration,
        }
    }

    /// Checks the length of the joint value (or joint rate) vector.
    pub(crate) fn check_joints(expected: usize, found: usize) -> Result<(), KinematicsError> {
        if expected != found {
            return Err(KinematicsError::JointCountMismatch { expected, found });
        }
        Ok(())
    }
}

impl fmt::Display for KinematicsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            KinematicsError::DuplicateSegment(ref name) =>
                write!(f, "Segment '{}' already exists", name),
            KinematicsError::UnknownSegment(ref name) =>
                write!(f, "Segment '{}' not found", name),
            KinematicsError::InvertedLink(ref name) =>
                write!(f, "Inverted segment '{}' cannot be added to a tree", name),
            KinematicsError::JointCountMismatch { expected, found } =>
                write!(f, "Joint count mismatch: expected {}, found {}", expected, found),
            KinematicsError::SegmentOutOfRange { requested, available } =>
                write!(f, "Segment number {} out of range, chain has {} segments", requested, available),
            KinematicsError::NotSquare { joints } =>
                write!(f, "Direct velocity solve needs 6 joints, chain has {}", joints),
            KinematicsError::Singular { sigma_min, tolerance } =>
                write!(f, "Singular configuration: smallest singular value {:e} below {:e}", sigma_min, tolerance),
            KinematicsError::MaxIterationsExceeded { iterations, residual } =>
                write!(f, "No convergence after {} iterations, residual {:e}", iterations, residual),
            KinematicsError::ZeroAxis(ref name) =>
                write!(f, "Joint '{}' has zero length axis", name),
            KinematicsError::Config(ref msg) =>
                write!(f, "Configuration Error: {}", msg),
            KinematicsError::Io(ref err) =>
                write!(f, "IO Error: {}", err),
        }
    }
}

impl std::error::Error for KinematicsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            KinematicsError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for KinematicsError {
    fn from(err: io::Error) -> Self {
        KinematicsError::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(KinematicsError::DuplicateSegment("a".into()).kind(), ErrorKind::Structural);
        assert_eq!(KinematicsError::UnknownSegment("a".into()).kind(), ErrorKind::Structural);
        assert_eq!(KinematicsError::JointCountMismatch { expected: 6, found: 5 }.kind(),
                   ErrorKind::Dimension);
        assert_eq!(KinematicsError::Singular { sigma_min: 0.0, tolerance: 1e-6 }.kind(),
                   ErrorKind::Singular);
        assert_eq!(KinematicsError::MaxIterationsExceeded { iterations: 3, residual: 1.0 }.kind(),
                   ErrorKind::Convergence);
    }

    #[test]
    fn test_check_joints() {
        assert!(KinematicsError::check_joints(3, 3).is_ok());
        match KinematicsError::check_joints(3, 2) {
            Err(KinematicsError::JointCountMismatch { expected: 3, found: 2 }) => {}
            other => panic!("Unexpected {:?}", other),
        }
    }

    #[test]
    fn test_display() {
        let err = KinematicsError::JointCountMismatch { expected: 6, found: 4 };
        assert_eq!(format!("{}", err), "Joint count mismatch: expected 6, found 4");
    }
}
