//! Rendering Adapter: the per-frame transform sync contract.
//!
//! # Invariants
//! - Renderers read snapshots; they never hold or mutate the world.
//! - Mesh slot *i* always shows body *i* of the scenario.
//!
//! The real scene graph is owned by the host. This crate provides the
//! pairing logic and a debug text renderer for headless hosts and tests.

mod renderer;
mod sync;

pub use renderer::{DebugTextRenderer, RenderView, Renderer};
pub use sync::{MeshSlot, SceneSync, SyncError};

pub fn crate_info() -> &'static str {
    "physworld-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
