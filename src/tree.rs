//! Tree of named segments rooted at a synthetic root frame.
//!
//! All elements are owned by a single name keyed map. Parent and child links are stored
//! as names, so walking up to a common ancestor is a sequence of map lookups and there
//! is no shared ownership between elements. Chains and sub trees extracted from a tree
//! are deep copies.
//!
//! ```
//! use nalgebra::Isometry3;
//! use rs_chain_kinematics::joint::{Joint, JointType};
//! use rs_chain_kinematics::segment::Segment;
//! use rs_chain_kinematics::tree::Tree;
//!
//! let mut tree = Tree::new();
//! tree.add_segment(Segment::new("torso", Joint::new("waist", JointType::RotateZ),
//!     Isometry3::translation(0.0, 0.0, 0.5)), "root").unwrap();
//! tree.add_segment(Segment::new("left_arm", Joint::new("left_shoulder", JointType::RotateY),
//!     Isometry3::translation(0.0, 0.3, 0.0)), "torso").unwrap();
//! tree.add_segment(Segment::new("right_arm", Joint::new("right_shoulder", JointType::RotateY),
//!     Isometry3::translation(0.0, -0.3, 0.0)), "torso").unwrap();
//!
//! // From one hand to the other: up through the torso, then down again.
//! let chain = tree.get_chain("left_arm", "right_arm").unwrap();
//! assert_eq!(chain.joint_count(), 2);
//! ```

use std::collections::{HashMap, HashSet};
use nalgebra::Isometry3;
use tracing::debug;
use crate::chain::{Chain, ChainLink};
use crate::kinematics_error::KinematicsError;
use crate::segment::Segment;

/// Name of the synthetic root created by [`Tree::new`].
pub const ROOT_NAME: &str = "root";

/// Node of the tree. Parent and children are referred to by name.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeElement {
    segment: Segment,
    parent: Option<String>,
    children: Vec<String>,

    /// Index of this joint in the tree wide joint vector, `None` for fixed joints.
    q_nr: Option<usize>,
}

impl TreeElement {
    pub fn segment(&self) -> &Segment {
        &self.segment
    }

    /// Name of the parent element, `None` only for the root.
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Child names in insertion order.
    pub fn children(&self) -> &[String] {
        &self.children
    }

    pub fn q_nr(&self) -> Option<usize> {
        self.q_nr
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    root_name: String,
    elements: HashMap<String, TreeElement>,
    joint_count: usize,
}

impl Default for Tree {
    fn default() -> Self {
        Tree::new()
    }
}

impl Tree {
    /// Empty tree with the root named "root".
    pub fn new() -> Self {
        Tree::with_root(ROOT_NAME)
    }

    /// Empty tree with the given root name. The root has a fixed joint and identity tip.
    pub fn with_root(root_name: impl Into<String>) -> Self {
        let root_name = root_name.into();
        let root = TreeElement {
            segment: Segment::fixed(root_name.clone(), Isometry3::identity()),
            parent: None,
            children: Vec::new(),
            q_nr: None,
        };
        let mut elements = HashMap::new();
        elements.insert(root_name.clone(), root);
        Tree { root_name, elements, joint_count: 0 }
    }

    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    /// Number of movable joints in the tree.
    pub fn joint_count(&self) -> usize {
        self.joint_count
    }

    /// Number of segments, the synthetic root not included.
    pub fn segment_count(&self) -> usize {
        self.elements.len() - 1
    }

    pub fn contains(&self, name: &str) -> bool {
        self.elements.contains_key(name)
    }

    pub fn segment(&self, name: &str) -> Option<&TreeElement> {
        self.elements.get(name)
    }

    pub fn parent(&self, name: &str) -> Option<&str> {
        self.elements.get(name).and_then(|e| e.parent())
    }

    pub fn children(&self, name: &str) -> Option<&[String]> {
        self.elements.get(name).map(|e| e.children())
    }

    /// All elements in unspecified order, root included.
    pub fn elements(&self) -> impl Iterator<Item = (&str, &TreeElement)> {
        self.elements.iter().map(|(name, element)| (name.as_str(), element))
    }

    /// Adds the segment as a child of `parent`. Fails without changing the tree if the
    /// segment name is already taken or the parent does not exist.
    pub fn add_segment(&mut self, segment: Segment, parent: &str) -> Result<(), KinematicsError> {
        if self.contains(segment.name()) {
            return Err(KinematicsError::DuplicateSegment(segment.name().to_string()));
        }
        self.require(parent)?;
        self.insert(segment, parent);
        Ok(())
    }

    /// Hooks the whole chain below `parent`, first chain segment becoming the child of
    /// `parent`. Either all segments are added or none.
    pub fn add_chain(&mut self, chain: &Chain, parent: &str) -> Result<(), KinematicsError> {
        self.require(parent)?;
        let mut incoming = HashSet::new();
        for link in chain.links() {
            if link.is_inverted() {
                return Err(KinematicsError::InvertedLink(link.name().to_string()));
            }
            if self.contains(link.name()) || !incoming.insert(link.name()) {
                return Err(KinematicsError::DuplicateSegment(link.name().to_string()));
            }
        }

        let mut hook = parent.to_string();
        for link in chain.links() {
            self.insert(link.segment().clone(), &hook);
            hook = link.name().to_string();
        }
        debug!("Added chain of {} segments below '{}'", chain.segment_count(), parent);
        Ok(())
    }

    /// Hooks all children of the other tree's root below `parent`. The other root itself
    /// is not copied. Either all segments are added or none.
    pub fn add_tree(&mut self, other: &Tree, parent: &str) -> Result<(), KinematicsError> {
        self.require(parent)?;
        if let Some(name) = other.elements.keys()
            .filter(|name| *name != &other.root_name)
            .find(|name| self.contains(name)) {
            return Err(KinematicsError::DuplicateSegment(name.clone()));
        }

        // Depth first, children in insertion order, so joint numbering follows the other tree.
        let mut pending: Vec<(&str, String)> = other.children_of(&other.root_name).iter().rev()
            .map(|child| (child.as_str(), parent.to_string()))
            .collect();
        while let Some((name, hook)) = pending.pop() {
            let element = &other.elements[name];
            self.insert(element.segment.clone(), &hook);
            pending.extend(element.children.iter().rev().map(|child| (child.as_str(), name.to_string())));
        }
        debug!("Added tree of {} segments below '{}'", other.segment_count(), parent);
        Ok(())
    }

    /// Extracts the chain leading from the tip frame of `from` to the tip frame of `to`.
    /// The path goes up from `from` to the lowest common ancestor (these segments are
    /// inverted) and then down to `to`. Composing the chain yields `T(from)^-1 * T(to)`.
    pub fn get_chain(&self, from: &str, to: &str) -> Result<Chain, KinematicsError> {
        let mut up = self.path_to_root(from)?;
        let mut down = self.path_to_root(to)?;

        while let (Some(a), Some(b)) = (up.last(), down.last()) {
            if a != b {
                break;
            }
            up.pop();
            down.pop();
        }

        let mut chain = Chain::new();
        for name in up {
            chain.add_link(ChainLink::Inverted(self.elements[name].segment.clone()));
        }
        for name in down.into_iter().rev() {
            chain.add_link(ChainLink::Forward(self.elements[name].segment.clone()));
        }
        Ok(chain)
    }

    /// Independent copy of everything below `name`. The copy is rooted at a synthetic root
    /// named `name` whose frame is the tip frame of `name` in this tree.
    ///
    /// Descendants keep their joints, tip frames, names and child order. The segment `name`
    /// itself does not: like any root it gets a fixed joint and an identity tip, so its own
    /// joint is not part of the copy and joint numbers start from its first movable child.
    pub fn get_sub_tree(&self, name: &str) -> Result<Tree, KinematicsError> {
        self.require(name)?;
        let mut sub_tree = Tree::with_root(name);
        let mut pending: Vec<&str> = self.children_of(name).iter().rev().map(|c| c.as_str()).collect();
        while let Some(child) = pending.pop() {
            let element = &self.elements[child];
            let parent = element.parent.as_deref().unwrap_or(name);
            sub_tree.insert(element.segment.clone(), parent);
            pending.extend(element.children.iter().rev().map(|c| c.as_str()));
        }
        Ok(sub_tree)
    }

    /// Names from `name` up to the root, both included.
    fn path_to_root<'a>(&'a self, name: &'a str) -> Result<Vec<&'a str>, KinematicsError> {
        let mut path = Vec::new();
        let mut current = Some(name);
        while let Some(n) = current {
            let element = self.elements.get(n)
                .ok_or_else(|| KinematicsError::UnknownSegment(n.to_string()))?;
            path.push(n);
            current = element.parent.as_deref();
        }
        Ok(path)
    }

    fn require(&self, name: &str) -> Result<(), KinematicsError> {
        if !self.contains(name) {
            return Err(KinematicsError::UnknownSegment(name.to_string()));
        }
        Ok(())
    }

    fn children_of(&self, name: &str) -> &[String] {
        self.elements.get(name).map(|e| e.children.as_slice()).unwrap_or(&[])
    }

    // Caller has checked that the name is free and the parent exists.
    fn insert(&mut self, segment: Segment, parent: &str) {
        let q_nr = if segment.joint().is_movable() {
            self.joint_count += 1;
            Some(self.joint_count - 1)
        } else {
            None
        };
        let name = segment.name().to_string();
        debug!("Segment '{}' added below '{}', joint index {:?}", name, parent, q_nr);
        if let Some(parent_element) = self.elements.get_mut(parent) {
            parent_element.children.push(name.clone());
        }
        self.elements.insert(name, TreeElement {
            segment,
            parent: Some(parent.to_string()),
            children: Vec::new(),
            q_nr,
        });
    }
}
