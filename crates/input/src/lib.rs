//! Input: UI controls mapped to live world parameter updates.
//!
//! # Invariants
//! - Controls never touch the world directly; every change goes through the
//!   world's control queue and lands between sub-steps.

mod action;

pub use action::{Action, ControlPanel, InputError};

pub fn crate_info() -> &'static str {
    "physworld-input v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("input"));
    }
}
