//! Shared types for the physworld crates.

mod types;

pub use types::{BodyId, Transform};
