//! Scenario Interpreter: turns a prompt or preset into a
//! [`ScenarioDescriptor`](physworld_kernel::ScenarioDescriptor).
//!
//! # Invariants
//! - Every descriptor produced here passes `ScenarioDescriptor::validate`.
//! - Interpretation is a pure keyword lookup; it never blocks.

mod interpret;
mod presets;

pub use interpret::{interpret, Interpretation};
pub use presets::{offline_examples, preset, presets, OfflineExample, PhysicsPreset};

pub fn crate_info() -> &'static str {
    "physworld-scenario v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("scenario"));
    }
}
