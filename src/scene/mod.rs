// filepath: src/scene/mod.rs
//! Scene graph access for safe-area-canvas
//!
//! The controller never touches the host's node types directly. It goes
//! through the `SceneMutator` capability, which the host implements and
//! which `MemoryScene` implements for tooling and tests.

pub mod interface;
mod memory;

pub use interface::{Color, NodeId, SceneError, SceneMutator, DEFAULT_COVER_COLOR};
pub use memory::MemoryScene;
