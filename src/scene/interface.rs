// filepath: src/scene/interface.rs
//! Scene mutator interface
//!
//! This file defines the operations the safe-area core needs from the host
//! scene graph.

use crate::geometry::{Anchors, Rect, Vec2};
use slotmap::new_key_type;
use thiserror::Error;

new_key_type! {
    /// Handle to a node in a scene
    pub struct NodeId;
}

/// RGBA, 8 bits per channel
pub type Color = [u8; 4];

/// Opaque black
pub const DEFAULT_COVER_COLOR: Color = [0, 0, 0, 255];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("node {0:?} does not exist")]
    UnknownNode(NodeId),

    #[error("cannot parent {node:?} under {parent:?}: it would become its own ancestor")]
    WouldCycle { node: NodeId, parent: NodeId },
}

/// Capability the core uses to restructure the host scene
///
/// Removal is synchronous: once `destroy_node` returns, neither the node
/// nor any of its descendants can be observed.
pub trait SceneMutator {
    /// Create a detached node carrying a rect transform.
    fn create_node(&mut self, name: &str) -> NodeId;

    /// Move `node` under `parent`, appending it after existing children.
    fn set_parent(&mut self, node: NodeId, parent: NodeId) -> Result<(), SceneError>;

    /// Remove `node` and its whole subtree.
    fn destroy_node(&mut self, node: NodeId) -> Result<(), SceneError>;

    fn name(&self, node: NodeId) -> Option<&str>;

    /// Direct children in sibling order. Empty for unknown nodes.
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    fn set_anchors(&mut self, node: NodeId, anchors: Anchors) -> Result<(), SceneError>;

    fn anchors(&self, node: NodeId) -> Option<Anchors>;

    /// Size added on top of the anchored area (zero for stretched nodes).
    fn set_size(&mut self, node: NodeId, size: Vec2) -> Result<(), SceneError>;

    /// Resolved rectangle of `node` in its parent's space.
    fn rect(&self, node: NodeId) -> Option<Rect>;

    fn set_color(&mut self, node: NodeId, color: Color) -> Result<(), SceneError>;

    /// First direct child of `parent` called `name`.
    fn find_child_by_name(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.children(parent)
            .into_iter()
            .find(|&child| self.name(child) == Some(name))
    }

    /// Every direct child of `parent` called `name`.
    fn children_named(&self, parent: NodeId, name: &str) -> Vec<NodeId> {
        self.children(parent)
            .into_iter()
            .filter(|&child| self.name(child) == Some(name))
            .collect()
    }
}
