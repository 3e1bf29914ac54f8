//! Chain: ordered sequence of segments forming one open kinematic branch from the base
//! frame to the tip frame. Chain is a pure topology container, solvers live elsewhere.

use crate::joint::Joint;
use crate::kinematic_traits::Pose;
use crate::segment::Segment;
use crate::twist::Twist;

/// One element of the chain. Chains extracted from a tree walk part of the path
/// backwards; such segments are wrapped as `Inverted` and contribute the algebraic
/// inverse of their motion. The wrapped segment itself is never modified.
#[derive(Debug, Clone, PartialEq)]
pub enum ChainLink {
    Forward(Segment),
    Inverted(Segment),
}

impl ChainLink {
    pub fn segment(&self) -> &Segment {
        match self {
            ChainLink::Forward(segment) | ChainLink::Inverted(segment) => segment,
        }
    }

    pub fn joint(&self) -> &Joint {
        self.segment().joint()
    }

    pub fn name(&self) -> &str {
        self.segment().name()
    }

    pub fn is_inverted(&self) -> bool {
        matches!(self, ChainLink::Inverted(_))
    }

    /// Pose of the link end relative to the link start.
    pub fn pose(&self, q: f64) -> Pose {
        match self {
            ChainLink::Forward(segment) => segment.pose(q),
            ChainLink::Inverted(segment) => segment.pose(q).inverse(),
        }
    }

    /// Twist of the link end, expressed in the link start frame with the link end
    /// as reference point.
    pub fn twist(&self, q: f64, qdot: f64) -> Twist {
        match self {
            ChainLink::Forward(segment) => segment.twist(q, qdot),
            ChainLink::Inverted(segment) => {
                // Time derivative of (R, p)^-1 = (R^T, -R^T p), with (v, w) the forward twist
                // referenced at p.
                let pose = segment.pose(q);
                let twist = segment.twist(q, qdot);
                let back = pose.rotation.inverse();
                Twist::new(
                    back * (twist.angular.cross(&pose.translation.vector) - twist.linear),
                    -(back * twist.angular),
                )
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Chain {
    links: Vec<ChainLink>,

    /// Number of movable (non fixed) joints, maintained as links are added.
    joint_count: usize,
}

impl Chain {
    pub fn new() -> Self {
        Chain::default()
    }

    /// Appends the segment in forward orientation.
    pub fn add_segment(&mut self, segment: Segment) {
        self.add_link(ChainLink::Forward(segment));
    }

    pub fn add_link(&mut self, link: ChainLink) {
        if link.joint().is_movable() {
            self.joint_count += 1;
        }
        self.links.push(link);
    }

    /// Appends all links of `other`, joint counts add up.
    pub fn add_chain(&mut self, other: &Chain) {
        self.links.extend(other.links.iter().cloned());
        self.joint_count += other.joint_count;
    }

    /// Degrees of freedom of the chain.
    pub fn joint_count(&self) -> usize {
        self.joint_count
    }

    pub fn segment_count(&self) -> usize {
        self.links.len()
    }

    pub fn segment(&self, index: usize) -> Option<&ChainLink> {
        self.links.get(index)
    }

    pub fn links(&self) -> impl Iterator<Item = &ChainLink> {
        self.links.iter()
    }
}

impl FromIterator<Segment> for Chain {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        let mut chain = Chain::new();
        for segment in iter {
            chain.add_segment(segment);
        }
        chain
    }
}
