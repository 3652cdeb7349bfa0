//! Query methods for KinematicTree

use glam::DMat4;
use uuid::Uuid;

use super::KinematicTree;
use super::joint::Joint;
use crate::constants::DUMP_INDENT;
use crate::error::ModelError;

impl KinematicTree {
    // ============== Query Helpers ==============

    /// Count total number of joints
    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    /// Count total number of bodies
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Check if the tree has no joint
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// Find a joint by name (O(1) lookup)
    pub fn find_joint_by_name(&self, name: &str) -> Option<&Joint> {
        self.joint_name_index
            .get(name)
            .and_then(|id| self.joints.get(id))
    }

    /// Find a joint ID by name (O(1) lookup)
    pub fn find_joint_id_by_name(&self, name: &str) -> Option<Uuid> {
        self.joint_name_index.get(name).copied()
    }

    /// Joints without a parent, sorted by name
    ///
    /// A finished tree has exactly one; joints still under construction
    /// show up here too.
    pub fn roots(&self) -> Vec<Uuid> {
        let mut roots: Vec<&Joint> = self.joints.values().filter(|j| j.parent.is_none()).collect();
        roots.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        roots.into_iter().map(|j| j.id).collect()
    }

    /// Get the chain of joint IDs from a joint up to its root (joint first)
    pub fn chain_to_root(&self, id: Uuid) -> Result<Vec<Uuid>, ModelError> {
        let mut chain = vec![id];
        let mut current = self.joint(id)?;
        while let Some(parent_id) = current.parent {
            chain.push(parent_id);
            current = self.joint(parent_id)?;
        }
        Ok(chain)
    }

    /// Root of the tree containing a joint
    pub fn root_of(&self, id: Uuid) -> Result<Uuid, ModelError> {
        let chain = self.chain_to_root(id)?;
        Ok(chain.last().copied().unwrap_or(id))
    }

    /// Get joint depth from root (root = 0)
    pub fn depth(&self, id: Uuid) -> Result<usize, ModelError> {
        Ok(self.chain_to_root(id)?.len() - 1)
    }

    /// Check if `ancestor` is a strict ancestor of `descendant`
    pub fn is_ancestor(&self, ancestor: Uuid, descendant: Uuid) -> bool {
        ancestor != descendant
            && self
                .chain_to_root(descendant)
                .is_ok_and(|chain| chain.contains(&ancestor))
    }

    /// All descendants of a joint, depth-first in child rank order
    pub fn descendants(&self, id: Uuid) -> Result<Vec<Uuid>, ModelError> {
        let mut result = Vec::new();
        for child_id in self.joint(id)?.children() {
            self.collect_depth_first(*child_id, &mut result);
        }
        Ok(result)
    }

    /// Get all joints in depth-first order from all roots
    pub fn joints_depth_first(&self) -> Vec<Uuid> {
        let mut result = Vec::new();
        for root_id in self.roots() {
            self.collect_depth_first(root_id, &mut result);
        }
        result
    }

    /// Pre-order walk with an explicit stack, children in rank order
    fn collect_depth_first(&self, start: Uuid, result: &mut Vec<Uuid>) {
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            result.push(id);
            if let Some(joint) = self.joints.get(&id) {
                stack.extend(joint.children.iter().rev());
            }
        }
    }

    /// World transform of a joint: placements composed from the root down
    pub fn world_transform(&self, id: Uuid) -> Result<DMat4, ModelError> {
        let mut transform = DMat4::IDENTITY;
        for joint_id in self.chain_to_root(id)?.into_iter().rev() {
            transform *= self.joint(joint_id)?.placement();
        }
        Ok(transform)
    }

    /// Human-readable dump of every tree, one joint per line
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let mut stack: Vec<(Uuid, usize)> = Vec::new();
        for root_id in self.roots() {
            stack.push((root_id, 0));
            while let Some((id, depth)) = stack.pop() {
                let Some(joint) = self.joints.get(&id) else {
                    continue;
                };
                out.push_str(&DUMP_INDENT.repeat(depth));
                out.push_str(&joint.to_string());
                out.push('\n');
                stack.extend(joint.children.iter().rev().map(|c| (*c, depth + 1)));
            }
        }
        out
    }
}
