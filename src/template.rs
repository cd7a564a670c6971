// filepath: src/template.rs
//! Visual templates for the cover and the simulated notch
//!
//! Templates are looked up by name, the same names the asset bundles use,
//! and stamped into the scene under the controller's node.

use log::{info, warn};
use std::collections::HashMap;

use crate::geometry::{Anchors, Vec2};
use crate::scene::{NodeId, SceneError, SceneMutator};

/// Names the controller reserves for the nodes it manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservedRole {
    SafeRoot,
    NotchCover,
    Notch,
}

impl ReservedRole {
    pub const ALL: [ReservedRole; 3] = [
        ReservedRole::SafeRoot,
        ReservedRole::NotchCover,
        ReservedRole::Notch,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ReservedRole::SafeRoot => "Safe Root",
            ReservedRole::NotchCover => "Notch Cover",
            ReservedRole::Notch => "Notch",
        }
    }

    pub fn of(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.name() == name)
    }
}

/// Node tree description that can be instantiated into a scene
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub name: String,
    pub anchors: Anchors,
    pub children: Vec<Template>,
}

impl Template {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            anchors: Anchors::STRETCH,
            children: Vec::new(),
        }
    }

    pub fn anchored(mut self, anchors: Anchors) -> Self {
        self.anchors = anchors;
        self
    }

    pub fn child(mut self, child: Template) -> Self {
        self.children.push(child);
        self
    }

    /// Create this tree under `parent`, renaming the top node to
    /// `instance_name` and stretching it over the parent.
    pub fn instantiate(
        &self,
        scene: &mut dyn SceneMutator,
        parent: NodeId,
        instance_name: &str,
    ) -> Result<NodeId, SceneError> {
        let node = scene.create_node(instance_name);
        let built = scene
            .set_parent(node, parent)
            .and_then(|()| scene.set_anchors(node, Anchors::STRETCH))
            .and_then(|()| scene.set_size(node, Vec2::ZERO))
            .and_then(|()| self.build_children(scene, node));
        if let Err(e) = built {
            discard(scene, node, instance_name);
            return Err(e);
        }
        Ok(node)
    }

    fn build_children(&self, scene: &mut dyn SceneMutator, node: NodeId) -> Result<(), SceneError> {
        for child in &self.children {
            child.build(scene, node)?;
        }
        Ok(())
    }

    fn build(&self, scene: &mut dyn SceneMutator, parent: NodeId) -> Result<(), SceneError> {
        let node = scene.create_node(&self.name);
        if let Err(e) = scene.set_parent(node, parent) {
            // Not attached yet, so the caller's cleanup would miss it.
            discard(scene, node, &self.name);
            return Err(e);
        }
        scene.set_anchors(node, self.anchors)?;
        self.build_children(scene, node)
    }
}

/// Remove a partially built node, logging if even that fails.
fn discard(scene: &mut dyn SceneMutator, node: NodeId, name: &str) {
    if let Err(e) = scene.destroy_node(node) {
        warn!("Failed to remove partially built {:?}: {}", name, e);
    }
}

/// Looks up templates by name
pub trait TemplateProvider {
    /// `None` when nothing is registered under `name`.
    fn template(&self, name: &str) -> Option<&Template>;
}

/// Name-keyed collection of templates
#[derive(Debug, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, Template>,
}

impl TemplateRegistry {
    /// Create a new empty template registry
    pub fn new() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    /// Registry holding the cover and both notch shapes.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(builtin::notch_cover());
        registry.register(builtin::portrait_notch());
        registry.register(builtin::landscape_notch());
        registry
    }

    /// Add a template, replacing any previous one with the same name
    pub fn register(&mut self, template: Template) {
        info!("Registering template: {}", template.name);
        self.templates.insert(template.name.clone(), template);
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.templates.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl TemplateProvider for TemplateRegistry {
    fn template(&self, name: &str) -> Option<&Template> {
        let found = self.templates.get(name);
        if found.is_none() {
            warn!("Unknown template: {}", name);
        }
        found
    }
}

pub mod builtin {
    //! Default shapes matching the stock asset bundle layout.

    use super::Template;
    use crate::geometry::{Anchors, CoverPanel, Vec2};

    pub const NOTCH_BAR: &str = "Notch";
    pub const LEFT_CORNER: &str = "Left Corner";
    pub const RIGHT_CORNER: &str = "Right Corner";

    fn point(x: f32, y: f32) -> Anchors {
        Anchors::new(Vec2::new(x, y), Vec2::new(x, y))
    }

    pub fn notch_cover() -> Template {
        CoverPanel::ALL
            .into_iter()
            .fold(Template::new("Notch Cover"), |cover, panel| {
                cover.child(Template::new(panel.name()))
            })
    }

    /// Bar centred on the top edge, corner pieces in the top corners.
    pub fn portrait_notch() -> Template {
        Template::new("Portrait Notch")
            .child(Template::new(NOTCH_BAR).anchored(point(0.5, 1.0)))
            .child(Template::new(LEFT_CORNER).anchored(point(0.0, 1.0)))
            .child(Template::new(RIGHT_CORNER).anchored(point(1.0, 1.0)))
    }

    /// Bar centred on the left edge, corner pieces along that edge.
    pub fn landscape_notch() -> Template {
        Template::new("Landscape Notch")
            .child(Template::new(NOTCH_BAR).anchored(point(0.0, 0.5)))
            .child(Template::new(LEFT_CORNER).anchored(point(0.0, 0.0)))
            .child(Template::new(RIGHT_CORNER).anchored(point(0.0, 1.0)))
    }
}
