//! Segment: a joint followed by a constant tip frame.

use crate::joint::Joint;
use crate::kinematic_traits::Pose;
use crate::twist::Twist;

/// A joint plus the fixed offset from the joint output frame to the end of the segment.
/// The tip frame never changes after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    name: String,
    joint: Joint,
    tip: Pose,
}

impl Segment {
    pub fn new(name: impl Into<String>, joint: Joint, tip: Pose) -> Self {
        Segment { name: name.into(), joint, tip }
    }

    /// Segment with a fixed joint, named after the segment.
    pub fn fixed(name: impl Into<String>, tip: Pose) -> Self {
        let name = name.into();
        let joint = Joint::fixed(name.clone());
        Segment { name, joint, tip }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn joint(&self) -> &Joint {
        &self.joint
    }

    pub fn tip(&self) -> &Pose {
        &self.tip
    }

    /// Pose of the segment end for joint value `q`: joint motion first, then the tip offset.
    pub fn pose(&self, q: f64) -> Pose {
        self.joint.pose(q) * self.tip
    }

    /// Twist of the segment end for joint value `q` and rate `qdot`, expressed in the
    /// segment base frame with the segment end as reference point.
    pub fn twist(&self, q: f64, qdot: f64) -> Twist {
        self.joint.twist(qdot).ref_point(&self.pose(q).translation.vector)
    }
}
