pub mod config;
pub mod controller;
pub mod geometry;
#[cfg(feature = "notch-simulator")]
pub mod notch;
pub mod scene;
pub mod template;

// Re-export for hosts embedding the controller
pub use crate::controller::{
    LifecycleEvent, SafeAreaController, SafeAreaSettings, ScreenSource, StaticScreen, UpdateTiming,
};
pub use crate::geometry::{Anchors, AxisMask, CoverPanel, Rect, ScreenMetrics, Vec2};
#[cfg(feature = "notch-simulator")]
pub use crate::notch::{NotchState, Orientation};
pub use crate::scene::{Color, MemoryScene, NodeId, SceneError, SceneMutator};
pub use crate::template::{ReservedRole, Template, TemplateProvider, TemplateRegistry};
