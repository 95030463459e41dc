//! Developer Tooling: world inspector and step timing.
//!
//! # Invariants
//! - Tools only read the world.

mod inspector;
mod timing;

pub use inspector::{BodyInfo, WorldInspector, WorldSummary};
pub use timing::FrameTimer;

pub fn crate_info() -> &'static str {
    "physworld-tools v0.1.0"
}
