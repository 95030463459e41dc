//! Cross-thread parameter updates.
//!
//! A UI thread never touches the world directly. It sends [`ParamUpdate`]s
//! through a [`ControlHandle`]; the owning thread drains them at the start of
//! each sub-step, so an update is never observed half-applied.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use crate::error::WorldError;

/// A live change to the world's global fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamUpdate {
    Gravity(f32),
    Wind(f32),
}

impl ParamUpdate {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Gravity(_) => "gravity",
            Self::Wind(_) => "wind",
        }
    }

    pub fn value(&self) -> f32 {
        match *self {
            Self::Gravity(v) | Self::Wind(v) => v,
        }
    }
}

/// Sending half, cheap to clone and `Send`.
#[derive(Debug, Clone)]
pub struct ControlHandle {
    tx: Sender<ParamUpdate>,
}

impl ControlHandle {
    /// Queue an update. Non-finite values are rejected here so the sender
    /// learns about them; the world checks again on receipt.
    pub fn send(&self, update: ParamUpdate) -> Result<(), WorldError> {
        let value = update.value();
        if !value.is_finite() {
            tracing::warn!(parameter = update.name(), value, "refused to queue non-finite parameter");
            return Err(WorldError::InvalidParameter {
                name: update.name(),
                value,
            });
        }
        self.tx
            .send(update)
            .map_err(|_| WorldError::WorldDisposed)
    }

    pub fn set_gravity(&self, magnitude: f32) -> Result<(), WorldError> {
        self.send(ParamUpdate::Gravity(magnitude))
    }

    pub fn set_wind(&self, speed: f32) -> Result<(), WorldError> {
        self.send(ParamUpdate::Wind(speed))
    }
}

/// Receiving half, owned by the world.
#[derive(Debug)]
pub(crate) struct ControlQueue {
    tx: Sender<ParamUpdate>,
    rx: Receiver<ParamUpdate>,
}

impl ControlQueue {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    pub fn handle(&self) -> ControlHandle {
        ControlHandle {
            tx: self.tx.clone(),
        }
    }

    /// Take every update queued so far, oldest first.
    pub fn drain(&self) -> Vec<ParamUpdate> {
        let mut updates = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(update) => updates.push(update),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        updates
    }
}
