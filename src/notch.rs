// filepath: src/notch.rs
//! Design-time notch simulation
//!
//! Lets a layout author preview a notched device: a proportioned cutout is
//! stamped over the canvas and the safe root is anchored as if the notch
//! were real. Hiding the notch restores a full-stretch safe root.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::controller::{stretch, SafeAreaController};
use crate::geometry::{Rect, ScreenMetrics, Vec2};
use crate::scene::SceneMutator;
use crate::template::{builtin, ReservedRole};

/// Notch depth as a fraction of the safe root's long edge.
pub const NOTCH_RATIO: f32 = 0.037;
/// Width of the notch bar relative to its depth.
pub const NOTCH_BAR_ASPECT: f32 = 7.166;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    /// Template the cutout visual is built from.
    pub fn template_name(self) -> &'static str {
        match self {
            Orientation::Portrait => "Portrait Notch",
            Orientation::Landscape => "Landscape Notch",
        }
    }
}

/// Hidden (`None`) or shown with the orientation it was shown for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NotchState {
    showing: Option<Orientation>,
}

impl NotchState {
    pub fn is_showing(&self) -> bool {
        self.showing.is_some()
    }

    pub fn orientation(&self) -> Option<Orientation> {
        self.showing
    }
}

/// Notch depth and the safe rectangle it leaves inside `root`.
///
/// Portrait insets the top and bottom edges, landscape the left and right.
pub fn notch_safe_area(root: Rect, orientation: Orientation) -> (f32, Rect) {
    match orientation {
        Orientation::Portrait => {
            let size = root.height * NOTCH_RATIO;
            (size, Rect::new(0.0, size, root.width, root.height - 2.0 * size))
        }
        Orientation::Landscape => {
            let size = root.width * NOTCH_RATIO;
            (size, Rect::new(size, 0.0, root.width - 2.0 * size, root.height))
        }
    }
}

impl SafeAreaController {
    pub fn is_notch_showing(&self) -> bool {
        self.notch.is_showing()
    }

    pub fn notch_state(&self) -> NotchState {
        self.notch
    }

    /// Stamp a cutout for `orientation` and anchor the safe root around it.
    ///
    /// A notch that is already showing is hidden first.
    pub fn show_notch(&mut self, scene: &mut dyn SceneMutator, orientation: Orientation) {
        if self.notch.is_showing() {
            self.hide_notch(scene);
        }

        let root = match self.resolve_safe_root(scene) {
            Ok(root) => root,
            Err(e) => {
                warn!("Cannot show notch, safe root unavailable: {}", e);
                return;
            }
        };
        let Some(bounds) = scene.rect(root) else {
            warn!("Safe root has no rect, notch not shown");
            return;
        };
        self.notch.showing = Some(orientation);
        let (notch_size, safe_area) = notch_safe_area(bounds, orientation);
        info!("Showing {:?} notch, size {:.2}", orientation, notch_size);

        self.instantiate_notch(scene, orientation, notch_size);
        let metrics = ScreenMetrics::new(bounds.width, bounds.height, safe_area);
        self.compute_and_apply(scene, &metrics);
    }

    /// Remove the cutout and the cover, and stretch the safe root again.
    pub fn hide_notch(&mut self, scene: &mut dyn SceneMutator) {
        self.notch.showing = None;

        let removed =
            self.sweep(scene, ReservedRole::Notch) + self.sweep(scene, ReservedRole::NotchCover);
        info!("Hiding notch, removed {} nodes", removed);

        if let Some(root) = self.safe_root(scene) {
            if let Err(e) = stretch(scene, root) {
                warn!("Failed to stretch safe root: {}", e);
            }
        }
    }

    fn instantiate_notch(&self, scene: &mut dyn SceneMutator, orientation: Orientation, notch_size: f32) {
        let Some(template) = self.templates.template(orientation.template_name()) else {
            warn!("No {:?} template registered, notch not drawn", orientation.template_name());
            return;
        };

        let node = match template.instantiate(scene, self.node, ReservedRole::Notch.name()) {
            Ok(node) => node,
            Err(e) => {
                warn!("Failed to instantiate notch: {}", e);
                return;
            }
        };

        for child in scene.children(node) {
            let size = if scene.name(child) == Some(builtin::NOTCH_BAR) {
                Vec2::new(notch_size * NOTCH_BAR_ASPECT, notch_size)
            } else {
                Vec2::new(notch_size, notch_size)
            };
            if let Err(e) = scene.set_size(child, size) {
                warn!("Failed to size notch piece: {}", e);
            }
        }
    }
}
