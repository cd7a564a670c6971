// filepath: src/scene/memory.rs
//! In-memory scene graph
//!
//! A small rect-transform tree used by the preview binary and by tests in
//! place of a real host scene.

use std::fmt::Write;

use slotmap::SlotMap;

use crate::geometry::{Anchors, Rect, Vec2};
use crate::scene::interface::{Color, NodeId, SceneError, SceneMutator};

#[derive(Debug, Clone)]
struct Node {
    name: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    anchors: Anchors,
    size_delta: Vec2,
    color: Option<Color>,
    /// Fixed size for top-level nodes (canvases).
    root_size: Option<Vec2>,
}

impl Node {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parent: None,
            children: Vec::new(),
            anchors: Anchors::STRETCH,
            size_delta: Vec2::ZERO,
            color: None,
            root_size: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryScene {
    nodes: SlotMap<NodeId, Node>,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a top-level node with a fixed size, e.g. a canvas covering the screen.
    pub fn create_root(&mut self, name: &str, width: f32, height: f32) -> NodeId {
        let mut node = Node::new(name);
        node.root_size = Some(Vec2::new(width, height));
        self.nodes.insert(node)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|n| n.parent)
    }

    pub fn color(&self, node: NodeId) -> Option<Color> {
        self.nodes.get(node).and_then(|n| n.color)
    }

    pub fn size(&self, node: NodeId) -> Option<Vec2> {
        self.nodes.get(node).map(|n| n.size_delta)
    }

    /// Number of nodes anywhere below `node` called `name`.
    pub fn count_named(&self, node: NodeId, name: &str) -> usize {
        self.children(node)
            .into_iter()
            .map(|child| {
                let own = usize::from(self.name(child) == Some(name));
                own + self.count_named(child, name)
            })
            .sum()
    }

    /// Indented rendering of the subtree below `node`.
    pub fn dump(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.dump_into(node, 0, &mut out);
        out
    }

    fn dump_into(&self, node: NodeId, depth: usize, out: &mut String) {
        let Some(n) = self.nodes.get(node) else {
            return;
        };
        let a = n.anchors;
        let _ = write!(
            out,
            "{:indent$}{} [({:.4}, {:.4})-({:.4}, {:.4})]",
            "",
            n.name,
            a.min.x,
            a.min.y,
            a.max.x,
            a.max.y,
            indent = depth * 2
        );
        if n.size_delta != Vec2::ZERO {
            let _ = write!(out, " size=({:.2}, {:.2})", n.size_delta.x, n.size_delta.y);
        }
        if let Some(c) = n.color {
            let _ = write!(out, " color={:?}", c);
        }
        out.push('\n');
        for &child in &n.children {
            self.dump_into(child, depth + 1, out);
        }
    }

    fn node_mut(&mut self, node: NodeId) -> Result<&mut Node, SceneError> {
        self.nodes.get_mut(node).ok_or(SceneError::UnknownNode(node))
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, mut node: NodeId) -> bool {
        loop {
            if node == ancestor {
                return true;
            }
            match self.parent(node) {
                Some(parent) => node = parent,
                None => return false,
            }
        }
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes.get(node).and_then(|n| n.parent) {
            if let Some(p) = self.nodes.get_mut(parent) {
                p.children.retain(|&c| c != node);
            }
        }
        if let Some(n) = self.nodes.get_mut(node) {
            n.parent = None;
        }
    }
}

impl SceneMutator for MemoryScene {
    fn create_node(&mut self, name: &str) -> NodeId {
        self.nodes.insert(Node::new(name))
    }

    fn set_parent(&mut self, node: NodeId, parent: NodeId) -> Result<(), SceneError> {
        if !self.contains(node) {
            return Err(SceneError::UnknownNode(node));
        }
        if !self.contains(parent) {
            return Err(SceneError::UnknownNode(parent));
        }
        if self.is_ancestor_or_self(node, parent) {
            return Err(SceneError::WouldCycle { node, parent });
        }

        self.detach(node);
        self.node_mut(node)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(node);
        Ok(())
    }

    fn destroy_node(&mut self, node: NodeId) -> Result<(), SceneError> {
        if !self.contains(node) {
            return Err(SceneError::UnknownNode(node));
        }
        self.detach(node);

        let mut pending = vec![node];
        while let Some(next) = pending.pop() {
            if let Some(removed) = self.nodes.remove(next) {
                pending.extend(removed.children);
            }
        }
        Ok(())
    }

    fn name(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node).map(|n| n.name.as_str())
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn set_anchors(&mut self, node: NodeId, anchors: Anchors) -> Result<(), SceneError> {
        self.node_mut(node)?.anchors = anchors;
        Ok(())
    }

    fn anchors(&self, node: NodeId) -> Option<Anchors> {
        self.nodes.get(node).map(|n| n.anchors)
    }

    fn set_size(&mut self, node: NodeId, size: Vec2) -> Result<(), SceneError> {
        self.node_mut(node)?.size_delta = size;
        Ok(())
    }

    fn rect(&self, node: NodeId) -> Option<Rect> {
        let n = self.nodes.get(node)?;
        if let Some(size) = n.root_size {
            return Some(Rect::from_size(size.x, size.y));
        }
        let Some(parent) = n.parent else {
            return Some(Rect::from_size(n.size_delta.x, n.size_delta.y));
        };

        // Anchored area plus size delta, centred on the anchored area.
        let p = self.rect(parent)?;
        let a = n.anchors;
        let width = p.width * (a.max.x - a.min.x) + n.size_delta.x;
        let height = p.height * (a.max.y - a.min.y) + n.size_delta.y;
        let x = p.width * a.min.x - n.size_delta.x * 0.5;
        let y = p.height * a.min.y - n.size_delta.y * 0.5;
        Some(Rect::new(x, y, width, height))
    }

    fn set_color(&mut self, node: NodeId, color: Color) -> Result<(), SceneError> {
        self.node_mut(node)?.color = Some(color);
        Ok(())
    }
}
