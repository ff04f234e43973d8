//! Kinematic structure checks.
//!
//! Normalization accepts any joint that names two links. [`validate`] is the
//! opt-in step for consumers that need a proper tree: it runs on a parsed
//! [`Robot`] and never changes it.

use std::collections::{HashMap, HashSet};

use crate::error::{Result, UrdfError};
use crate::types::Robot;

/// The kinematic tree of a validated robot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KinematicTree {
    /// The root link name (link with no parent joint).
    pub root_link: String,
    /// Map from link name to its parent joint name.
    pub parent_joint: HashMap<String, String>,
    /// Map from link name to its child joint names, in document order.
    pub child_joints: HashMap<String, Vec<String>>,
    /// Link names in breadth-first order from the root.
    pub sorted_links: Vec<String>,
}

impl KinematicTree {
    /// Whether `link` is the root of the tree.
    #[must_use]
    pub fn is_root(&self, link: &str) -> bool {
        self.root_link == link
    }
}

/// Validate the kinematic structure of a robot.
///
/// This checks:
/// - No duplicate link or joint names
/// - All joints reference defined links
/// - No link has more than one parent joint
/// - Exactly one root link
/// - Every link is reachable from the root (no loops)
///
/// # Errors
///
/// Returns the first violation found.
pub fn validate(robot: &Robot) -> Result<KinematicTree> {
    check_duplicates(robot)?;

    let link_names: HashSet<&str> = robot.link_names().collect();
    let mut parent_joint: HashMap<String, String> = HashMap::new();
    let mut child_joints: HashMap<String, Vec<String>> = robot
        .links
        .iter()
        .map(|l| (l.name.clone(), Vec::new()))
        .collect();

    for joint in &robot.joints {
        for link in [&joint.parent.link, &joint.child.link] {
            if !link_names.contains(link.as_str()) {
                return Err(UrdfError::undefined_link(link, &joint.name));
            }
        }

        if parent_joint
            .insert(joint.child.link.clone(), joint.name.clone())
            .is_some()
        {
            return Err(UrdfError::KinematicLoop(format!(
                "link '{}' has multiple parent joints",
                joint.child.link
            )));
        }

        child_joints
            .entry(joint.parent.link.clone())
            .or_default()
            .push(joint.name.clone());
    }

    let roots: Vec<&str> = robot
        .link_names()
        .filter(|name| !parent_joint.contains_key(*name))
        .collect();
    let root_link = match roots.as_slice() {
        [] => return Err(UrdfError::NoRootLink),
        [root] => (*root).to_string(),
        _ => {
            return Err(UrdfError::MultipleRootLinks(
                roots.iter().map(|s| (*s).to_string()).collect(),
            ));
        }
    };

    let sorted_links = breadth_first(robot, &root_link, &child_joints);
    if sorted_links.len() != robot.links.len() {
        let reached: HashSet<&str> = sorted_links.iter().map(String::as_str).collect();
        let stranded = robot
            .link_names()
            .find(|name| !reached.contains(name))
            .unwrap_or_default();
        return Err(UrdfError::KinematicLoop(format!(
            "cycle detected involving link '{stranded}'"
        )));
    }

    Ok(KinematicTree {
        root_link,
        parent_joint,
        child_joints,
        sorted_links,
    })
}

fn check_duplicates(robot: &Robot) -> Result<()> {
    let mut links = HashSet::new();
    if let Some(dup) = robot.link_names().find(|name| !links.insert(*name)) {
        return Err(UrdfError::DuplicateLink(dup.to_string()));
    }

    let mut joints = HashSet::new();
    if let Some(dup) = robot.joint_names().find(|name| !joints.insert(*name)) {
        return Err(UrdfError::DuplicateJoint(dup.to_string()));
    }

    Ok(())
}

fn breadth_first(
    robot: &Robot,
    root: &str,
    child_joints: &HashMap<String, Vec<String>>,
) -> Vec<String> {
    let joint_child: HashMap<&str, &str> = robot
        .joints
        .iter()
        .map(|j| (j.name.as_str(), j.child.link.as_str()))
        .collect();

    let mut sorted = vec![root.to_string()];
    let mut next = 0;
    while let Some(link) = sorted.get(next).cloned() {
        next += 1;
        for joint in child_joints.get(&link).into_iter().flatten() {
            if let Some(child) = joint_child.get(joint.as_str()) {
                sorted.push((*child).to_string());
            }
        }
    }
    sorted
}
