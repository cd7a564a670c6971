// filepath: src/controller.rs
//! Safe-area controller
//!
//! Owns a node in the host scene, keeps a "Safe Root" container under it
//! that holds the original content, and anchors that container to the
//! platform safe area. Optionally paints the unsafe margins.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::geometry::{
    cover_anchors, safe_anchors, Anchors, AxisMask, CoverAnchors, CoverPanel, ScreenMetrics, Vec2,
};
use crate::scene::{Color, NodeId, SceneError, SceneMutator, DEFAULT_COVER_COLOR};
use crate::template::{ReservedRole, TemplateProvider};

/// When the controller recomputes the safe area on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateTiming {
    #[default]
    OnInit,
    OnFirstActive,
    OnEveryTick,
    OnEveryFixedTick,
    /// Only through `update_safe_area`.
    Manual,
}

impl UpdateTiming {
    pub fn triggered_by(self, event: LifecycleEvent) -> bool {
        matches!(
            (self, event),
            (UpdateTiming::OnInit, LifecycleEvent::Init)
                | (UpdateTiming::OnFirstActive, LifecycleEvent::FirstActive)
                | (UpdateTiming::OnEveryTick, LifecycleEvent::Tick)
                | (UpdateTiming::OnEveryFixedTick, LifecycleEvent::FixedTick)
        )
    }
}

/// Callbacks delivered by the host, serially, on its presentation thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    Init,
    FirstActive,
    Tick,
    FixedTick,
}

/// Current screen size and safe area as reported by the host platform
pub trait ScreenSource {
    fn metrics(&self) -> ScreenMetrics;
}

/// Screen that always reports the same metrics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticScreen(pub ScreenMetrics);

impl ScreenSource for StaticScreen {
    fn metrics(&self) -> ScreenMetrics {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SafeAreaSettings {
    pub update_timing: UpdateTiming,
    pub axes: AxisMask,
    pub cover_unsafe_area: bool,
    pub cover_color: Color,
}

impl Default for SafeAreaSettings {
    fn default() -> Self {
        Self {
            update_timing: UpdateTiming::default(),
            axes: AxisMask::default(),
            cover_unsafe_area: false,
            cover_color: DEFAULT_COVER_COLOR,
        }
    }
}

pub struct SafeAreaController {
    pub(crate) node: NodeId,
    settings: SafeAreaSettings,
    pub(crate) templates: Box<dyn TemplateProvider>,
    #[cfg(feature = "notch-simulator")]
    pub(crate) notch: crate::notch::NotchState,
}

impl SafeAreaController {
    /// Attach a controller to `node`, an existing node in the host scene.
    pub fn new(
        node: NodeId,
        settings: SafeAreaSettings,
        templates: impl TemplateProvider + 'static,
    ) -> Self {
        Self {
            node,
            settings,
            templates: Box::new(templates),
            #[cfg(feature = "notch-simulator")]
            notch: crate::notch::NotchState::default(),
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn settings(&self) -> &SafeAreaSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut SafeAreaSettings {
        &mut self.settings
    }

    /// Run the update if `event` matches the configured timing.
    /// Returns whether an update happened.
    pub fn on_lifecycle(
        &mut self,
        event: LifecycleEvent,
        scene: &mut dyn SceneMutator,
        screen: &dyn ScreenSource,
    ) -> bool {
        if !self.settings.update_timing.triggered_by(event) {
            return false;
        }
        self.update_safe_area(scene, screen);
        true
    }

    /// Re-read the screen and apply its safe area.
    pub fn update_safe_area(&mut self, scene: &mut dyn SceneMutator, screen: &dyn ScreenSource) {
        let metrics = screen.metrics();
        self.compute_and_apply(scene, &metrics);
    }

    /// Resolve the safe root, rebuild the cover, then anchor the safe root.
    pub fn compute_and_apply(&mut self, scene: &mut dyn SceneMutator, metrics: &ScreenMetrics) {
        let root = match self.resolve_safe_root(scene) {
            Ok(root) => root,
            Err(e) => {
                warn!("Cannot resolve safe root: {}", e);
                return;
            }
        };

        // An unusable screen leaves both anchors and cover as they were.
        let (Some(cover), Some(anchors)) = (
            cover_anchors(metrics, self.settings.axes),
            safe_anchors(metrics, self.settings.axes),
        ) else {
            warn!(
                "Screen {}x{} has no usable size, keeping previous layout",
                metrics.width, metrics.height
            );
            return;
        };

        self.sweep(scene, ReservedRole::NotchCover);
        if self.settings.cover_unsafe_area {
            self.build_cover(scene, &cover);
        }

        debug!(
            "Safe area {:?} on {}x{} -> anchors ({}, {})-({}, {})",
            metrics.safe_area,
            metrics.width,
            metrics.height,
            anchors.min.x,
            anchors.min.y,
            anchors.max.x,
            anchors.max.y
        );
        if let Err(e) = scene.set_anchors(root, anchors) {
            warn!("Failed to anchor safe root: {}", e);
        }
    }

    /// Safe root if it already exists, without creating it.
    pub fn safe_root(&self, scene: &dyn SceneMutator) -> Option<NodeId> {
        scene.find_child_by_name(self.node, ReservedRole::SafeRoot.name())
    }

    /// Find the safe root, or create it and move the current children under it.
    pub fn resolve_safe_root(&mut self, scene: &mut dyn SceneMutator) -> Result<NodeId, SceneError> {
        if scene.name(self.node).is_none() {
            return Err(SceneError::UnknownNode(self.node));
        }

        let roots = scene.children_named(self.node, ReservedRole::SafeRoot.name());
        if let Some(&root) = roots.first() {
            if roots.len() > 1 {
                warn!(
                    "{} nodes named {:?} under the controller, using the first",
                    roots.len(),
                    ReservedRole::SafeRoot.name()
                );
            }
            return Ok(root);
        }

        let content: Vec<NodeId> = scene
            .children(self.node)
            .into_iter()
            .filter(|&child| scene.name(child).and_then(ReservedRole::of).is_none())
            .collect();

        let root = scene.create_node(ReservedRole::SafeRoot.name());
        scene.set_parent(root, self.node)?;
        stretch(scene, root)?;

        for child in &content {
            scene.set_parent(*child, root)?;
        }
        info!("Created safe root, moved {} children under it", content.len());
        Ok(root)
    }

    fn build_cover(&self, scene: &mut dyn SceneMutator, cover: &CoverAnchors) {
        let name = ReservedRole::NotchCover.name();
        let Some(template) = self.templates.template(name) else {
            warn!("No {:?} template registered, unsafe area left uncovered", name);
            return;
        };

        let node = match template.instantiate(scene, self.node, name) {
            Ok(node) => node,
            Err(e) => {
                warn!("Failed to instantiate cover: {}", e);
                return;
            }
        };

        let color = self.settings.cover_color;
        let mut placed = 0;
        for child in scene.children(node) {
            let panel = scene.name(child).and_then(CoverPanel::from_name);
            let result = panel
                .map(|panel| scene.set_anchors(child, cover.get(panel)))
                .unwrap_or(Ok(()))
                .and_then(|()| scene.set_color(child, color));
            match result {
                Ok(()) => placed += usize::from(panel.is_some()),
                Err(e) => warn!("Failed to place cover panel: {}", e),
            }
        }
        if placed != CoverPanel::ALL.len() {
            warn!(
                "Cover template provided {} of {} margin panels",
                placed,
                CoverPanel::ALL.len()
            );
        }
    }

    /// Destroy every direct child carrying the role's name. Returns how many went.
    pub(crate) fn sweep(&self, scene: &mut dyn SceneMutator, role: ReservedRole) -> usize {
        let mut removed = 0;
        for node in scene.children_named(self.node, role.name()) {
            match scene.destroy_node(node) {
                Ok(()) => removed += 1,
                Err(e) => warn!("Failed to remove {:?}: {}", role.name(), e),
            }
        }
        removed
    }
}

/// Fill the parent: full anchors, no size delta.
pub(crate) fn stretch(scene: &mut dyn SceneMutator, node: NodeId) -> Result<(), SceneError> {
    scene.set_anchors(node, Anchors::STRETCH)?;
    scene.set_size(node, Vec2::ZERO)
}
