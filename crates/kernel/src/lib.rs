//! World Kernel: rigid bodies, force fields, fixed-step integration and
//! ground contact.
//!
//! # Invariants
//! - Physics advances only in whole fixed sub-steps; a frame delta is
//!   clamped before it is spent.
//! - Gravity and wind are read once per sub-step and applied to every
//!   dynamic body alike.
//! - Bodies with zero inverse mass never move.
//! - Non-finite state never reaches a snapshot.

pub mod body;
pub mod config;
pub mod contact;
pub mod control;
pub mod descriptor;
pub mod error;
pub mod forces;
pub mod integrator;
pub mod shape;
pub mod stepper;
pub mod world;

pub use body::Body;
pub use config::WorldConfig;
pub use contact::{BroadPhase, Contact, GroundOnly};
pub use control::{ControlHandle, ParamUpdate};
pub use descriptor::{DescriptorError, ObjectDescriptor, ObjectKind, ScenarioDescriptor};
pub use error::WorldError;
pub use shape::{Material, Shape};
pub use stepper::{StepPlan, Stepper};
pub use world::{BodySnapshot, GROUND_ID, StepReport, World, WorldEvent};
