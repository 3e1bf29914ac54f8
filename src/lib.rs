//! Rust implementation of forward, Jacobian, velocity and inverse velocity kinematics for
//! serial chains and trees of rigid segments connected by one degree of freedom joints.
//!
//! The model follows the classic segment based description: every [`segment::Segment`] is a
//! [`joint::Joint`] followed by a constant tip frame. Segments are assembled into a
//! [`chain::Chain`] (one open branch from base to tip) or into a [`tree::Tree`] (a branching
//! hierarchy with a named root). Any path between two segments of a tree can be extracted as
//! a chain, the part of the path that is walked towards the root is then traversed in
//! inverted direction.
//!
//! # Features
//!
//! - Joints rotating or translating along a principal axis or an arbitrary axis (rotation axes
//!   may pass through an offset point).
//! - Forward position kinematics for chains (including intermediate segment poses) and trees.
//! - Geometric Jacobian in base or tip orientation, with a finite difference Jacobian to
//!   cross-check it (parallelized with `rayon` if the `parallel` feature is on).
//! - Forward velocity kinematics, consistent with the Jacobian.
//! - Inverse velocity kinematics for six joint chains, reporting singular configurations
//!   instead of producing unbounded joint rates.
//! - Newton-Raphson inverse position kinematics on top of the inverse velocity solver.
//! - Solver tolerances from YAML (`allow_filesystem` feature).
//!
//! All solvers borrow the chain immutably and hold no mutable state, so chains can be shared
//! between threads while solving.
//!
//! ## Examples
//!
//! The following examples demonstrate various functionalities provided by this crate:
//!
//! - **basic.rs**: Forward kinematics, joint rates for a twist and handling of singularities.
//! - **jacobian.rs**: Calculating Jacobian matrices and comparing with the numeric one.
//! - **tree.rs**: Building a branching tree and extracting chains between its segments.

pub mod kinematic_traits;
pub mod kinematics_error;

pub mod twist;
pub mod joint;
pub mod segment;
pub mod chain;
pub mod tree;

pub mod forward;
pub mod jacobian;
pub mod velocity;
pub mod inverse_velocity;
pub mod inverse_position;

pub mod solver_config;
pub mod chain_robots;

pub mod utils;

#[cfg(test)]
mod tests;
