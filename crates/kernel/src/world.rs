use glam::{Quat, Vec3};
use physworld_common::{BodyId, Transform};
use serde::{Deserialize, Serialize};

use crate::body::{Body, Kinematics};
use crate::config::WorldConfig;
use crate::contact::{resolve_ground, BroadPhase, Contact, GroundOnly};
use crate::control::{ControlHandle, ControlQueue, ParamUpdate};
use crate::descriptor::ScenarioDescriptor;
use crate::error::WorldError;
use crate::forces::{apply_global_forces, gravity_vector, wind_force};
use crate::integrator::integrate;
use crate::stepper::Stepper;

/// Id of the ground body. Never appears in snapshots.
pub const GROUND_ID: BodyId = BodyId(u32::MAX);

/// Something observable happened in the world.
///
/// Consumers such as audio cues or a HUD drain these after each frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorldEvent {
    /// World was built with this many descriptor bodies.
    Built { bodies: usize },
    GravityChanged { old: f32, new: f32 },
    WindChanged { old: f32, new: f32 },
    /// A body hit the ground faster than the resting threshold.
    Impact { id: BodyId, speed: f32 },
    /// A body diverged numerically and was rolled back and stopped.
    Frozen { id: BodyId, tick: u64 },
}

/// Render-facing state of one body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodySnapshot {
    pub id: BodyId,
    pub position: Vec3,
    pub orientation: Quat,
}

impl BodySnapshot {
    pub fn transform(&self) -> Transform {
        Transform {
            position: self.position,
            rotation: self.orientation,
        }
    }
}

/// Outcome of one `step` call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    pub substeps: u32,
    /// Wall-clock seconds dropped by the pause clamp.
    pub discarded: f32,
    /// Bodies rolled back by the numerical guard, once per offending sub-step.
    pub frozen: Vec<BodyId>,
    pub updates_applied: usize,
    pub updates_rejected: usize,
}

/// The physics world: dynamic bodies, a static ground plane and the global
/// gravity and wind fields.
///
/// A world is owned by one frame-driving loop. Other threads reach it only
/// through a [`ControlHandle`]. After [`teardown`](World::teardown) every
/// operation fails with [`WorldError::WorldDisposed`].
#[derive(Debug)]
pub struct World {
    config: WorldConfig,
    live: Option<LiveWorld>,
}

#[derive(Debug)]
struct LiveWorld {
    /// Descriptor bodies in creation order.
    bodies: Vec<Body>,
    ground: Body,
    gravity: f32,
    wind: f32,
    stepper: Stepper,
    broad_phase: Box<dyn BroadPhase>,
    controls: ControlQueue,
    contacts: Vec<Contact>,
    saved: Vec<Kinematics>,
    tick: u64,
    sim_time: f64,
    frozen_total: u64,
    events: Vec<WorldEvent>,
}

impl World {
    /// Build a world with the default configuration.
    pub fn build(descriptor: &ScenarioDescriptor) -> Result<Self, WorldError> {
        Self::build_with_config(descriptor, WorldConfig::default())
    }

    /// Build one body per descriptor object plus the ground.
    pub fn build_with_config(
        descriptor: &ScenarioDescriptor,
        config: WorldConfig,
    ) -> Result<Self, WorldError> {
        config.validate()?;
        descriptor.validate()?;

        let material = config.default_material;
        let bodies: Vec<Body> = descriptor
            .objects
            .iter()
            .enumerate()
            .map(|(i, object)| Body::from_descriptor(BodyId(i as u32), object, material))
            .collect();
        let ground = Body::ground(GROUND_ID, config.ground_height, material);

        tracing::info!(
            bodies = bodies.len(),
            gravity = descriptor.gravity,
            wind = descriptor.wind,
            scenario = %descriptor.scenario,
            "world built"
        );

        Ok(Self {
            config,
            live: Some(LiveWorld {
                events: vec![WorldEvent::Built {
                    bodies: bodies.len(),
                }],
                bodies,
                ground,
                gravity: descriptor.gravity,
                wind: descriptor.wind,
                stepper: Stepper::new(&config),
                broad_phase: Box::new(GroundOnly),
                controls: ControlQueue::new(),
                contacts: Vec::new(),
                saved: Vec::new(),
                tick: 0,
                sim_time: 0.0,
                frozen_total: 0,
            }),
        })
    }

    /// Replace the contact generation strategy.
    pub fn with_broad_phase(mut self, broad_phase: impl BroadPhase + 'static) -> Self {
        if let Some(live) = self.live.as_mut() {
            live.broad_phase = Box::new(broad_phase);
        }
        self
    }

    /// Tear down and build again from `descriptor`, keeping the config.
    /// Clock, tick and events start over; existing control handles go dead.
    pub fn rebuild(&mut self, descriptor: &ScenarioDescriptor) -> Result<(), WorldError> {
        let fresh = Self::build_with_config(descriptor, self.config)?;
        self.teardown();
        *self = fresh;
        Ok(())
    }

    /// Release every body. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        if let Some(live) = self.live.take() {
            tracing::info!(
                bodies = live.bodies.len(),
                tick = live.tick,
                "world torn down"
            );
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.live.is_none()
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    fn live(&self) -> Result<&LiveWorld, WorldError> {
        self.live.as_ref().ok_or(WorldError::WorldDisposed)
    }

    fn live_mut(&mut self) -> Result<&mut LiveWorld, WorldError> {
        self.live.as_mut().ok_or(WorldError::WorldDisposed)
    }

    /// Gravity magnitude; the field is `(0, -g, 0)`.
    pub fn gravity(&self) -> Result<f32, WorldError> {
        Ok(self.live()?.gravity)
    }

    pub fn wind(&self) -> Result<f32, WorldError> {
        Ok(self.live()?.wind)
    }

    /// Sub-steps executed since the build.
    pub fn tick(&self) -> Result<u64, WorldError> {
        Ok(self.live()?.tick)
    }

    /// Simulated seconds since the build.
    pub fn sim_time(&self) -> Result<f64, WorldError> {
        Ok(self.live()?.sim_time)
    }

    /// Bodies frozen by the numerical guard since the build, counted once
    /// per body per sub-step.
    pub fn frozen_count(&self) -> Result<u64, WorldError> {
        Ok(self.live()?.frozen_total)
    }

    /// Fraction of a sub-step carried to the next frame.
    pub fn interpolation_alpha(&self) -> Result<f32, WorldError> {
        Ok(self.live()?.stepper.alpha())
    }

    pub fn bodies(&self) -> Result<&[Body], WorldError> {
        Ok(&self.live()?.bodies)
    }

    pub fn body(&self, id: BodyId) -> Result<&Body, WorldError> {
        self.live()?
            .bodies
            .get(id.index())
            .ok_or(WorldError::UnknownBody(id))
    }

    pub fn ground(&self) -> Result<&Body, WorldError> {
        Ok(&self.live()?.ground)
    }

    /// Total kinetic energy of the descriptor bodies.
    pub fn kinetic_energy(&self) -> Result<f32, WorldError> {
        Ok(self.live()?.bodies.iter().map(Body::kinetic_energy).sum())
    }

    /// Set the gravity magnitude. Takes effect on the next sub-step.
    pub fn set_gravity(&mut self, magnitude: f32) -> Result<(), WorldError> {
        self.live_mut()?.apply_update(ParamUpdate::Gravity(magnitude))
    }

    /// Set the wind speed. Takes effect on the next sub-step.
    pub fn set_wind(&mut self, speed: f32) -> Result<(), WorldError> {
        self.live_mut()?.apply_update(ParamUpdate::Wind(speed))
    }

    /// Handle for queuing updates from other threads.
    pub fn control_handle(&self) -> Result<ControlHandle, WorldError> {
        Ok(self.live()?.controls.handle())
    }

    /// Kick a body with an instantaneous impulse through its centre of mass.
    pub fn apply_impulse(&mut self, id: BodyId, impulse: Vec3) -> Result<(), WorldError> {
        let live = self.live_mut()?;
        if !impulse.is_finite() {
            return Err(non_finite("impulse", impulse));
        }
        live.body_mut(id)?.apply_impulse(impulse);
        Ok(())
    }

    /// Teleport a body and give it a new velocity; rotation is cleared.
    pub fn reset_body(&mut self, id: BodyId, position: Vec3, velocity: Vec3) -> Result<(), WorldError> {
        let live = self.live_mut()?;
        if !position.is_finite() {
            return Err(non_finite("position", position));
        }
        if !velocity.is_finite() {
            return Err(non_finite("velocity", velocity));
        }
        let body = live.body_mut(id)?;
        body.position = position;
        body.linear_velocity = velocity;
        body.orientation = Quat::IDENTITY;
        body.angular_velocity = Vec3::ZERO;
        Ok(())
    }

    /// Advance by `elapsed` wall-clock seconds in whole fixed sub-steps.
    pub fn step(&mut self, elapsed: f32) -> Result<StepReport, WorldError> {
        let config = self.config;
        let live = self.live_mut()?;
        let _span = tracing::info_span!("world_step", tick = live.tick).entered();

        let plan = live.stepper.advance(elapsed);
        if plan.discarded > 0.0 {
            tracing::debug!(discarded = plan.discarded, "frame delta clamped");
        }

        let mut report = StepReport {
            substeps: plan.substeps,
            discarded: plan.discarded,
            ..StepReport::default()
        };
        for _ in 0..plan.substeps {
            live.substep(&config, &mut report);
        }

        tracing::debug!(
            substeps = report.substeps,
            tick = live.tick,
            frozen = report.frozen.len(),
            "frame stepped"
        );
        Ok(report)
    }

    /// Position and orientation of every descriptor body, in descriptor
    /// order. Does not mutate anything.
    pub fn snapshot(&self) -> Result<Vec<BodySnapshot>, WorldError> {
        Ok(self
            .live()?
            .bodies
            .iter()
            .map(|b| BodySnapshot {
                id: b.id,
                position: b.position,
                orientation: b.orientation,
            })
            .collect())
    }

    /// Read-only access to pending events.
    pub fn events(&self) -> Result<&[WorldEvent], WorldError> {
        Ok(&self.live()?.events)
    }

    /// Drain and return pending events.
    pub fn drain_events(&mut self) -> Result<Vec<WorldEvent>, WorldError> {
        Ok(std::mem::take(&mut self.live_mut()?.events))
    }
}

impl LiveWorld {
    fn body_mut(&mut self, id: BodyId) -> Result<&mut Body, WorldError> {
        self.bodies
            .get_mut(id.index())
            .ok_or(WorldError::UnknownBody(id))
    }

    fn apply_update(&mut self, update: ParamUpdate) -> Result<(), WorldError> {
        let value = update.value();
        if !value.is_finite() {
            tracing::warn!(parameter = update.name(), value, "rejected non-finite parameter");
            return Err(WorldError::InvalidParameter {
                name: update.name(),
                value,
            });
        }
        match update {
            ParamUpdate::Gravity(new) => {
                let old = std::mem::replace(&mut self.gravity, new);
                self.events.push(WorldEvent::GravityChanged { old, new });
            }
            ParamUpdate::Wind(new) => {
                let old = std::mem::replace(&mut self.wind, new);
                self.events.push(WorldEvent::WindChanged { old, new });
            }
        }
        tracing::debug!(parameter = update.name(), value, "parameter updated");
        Ok(())
    }

    /// One fixed sub-step: queued updates, forces, integration, ground
    /// contact, numerical guard.
    fn substep(&mut self, config: &WorldConfig, report: &mut StepReport) {
        for update in self.controls.drain() {
            match self.apply_update(update) {
                Ok(()) => report.updates_applied += 1,
                Err(_) => report.updates_rejected += 1,
            }
        }

        self.saved.clear();
        self.saved.extend(self.bodies.iter().map(Body::kinematics));

        let dt = config.fixed_dt;
        apply_global_forces(
            &mut self.bodies,
            gravity_vector(self.gravity),
            wind_force(self.wind, config.wind_scale),
        );
        for body in &mut self.bodies {
            integrate(body, dt);
            body.clear_accumulators();
        }

        self.contacts.clear();
        self.broad_phase
            .collect(&self.bodies, &self.ground, &mut self.contacts);
        for contact in &self.contacts {
            let body = &mut self.bodies[contact.body];
            let approach = -body.point_velocity(contact.point - body.position).dot(contact.normal);
            resolve_ground(body, &self.ground, contact, config.resting_speed);
            if approach > config.resting_speed {
                tracing::trace!(id = %contact.id, speed = approach, "ground impact");
                self.events.push(WorldEvent::Impact {
                    id: contact.id,
                    speed: approach,
                });
            }
        }

        self.tick += 1;
        self.sim_time += f64::from(dt);

        for (body, saved) in self.bodies.iter_mut().zip(&self.saved) {
            if !body.is_finite() {
                tracing::warn!(id = %body.id, tick = self.tick, "body diverged, freezing for this sub-step");
                body.freeze_at(*saved);
                self.frozen_total += 1;
                report.frozen.push(body.id);
                self.events.push(WorldEvent::Frozen {
                    id: body.id,
                    tick: self.tick,
                });
            }
        }
        tracing::trace!(tick = self.tick, contacts = self.contacts.len(), "sub-step");
    }
}

fn non_finite(name: &'static str, v: Vec3) -> WorldError {
    let value = [v.x, v.y, v.z]
        .into_iter()
        .find(|c| !c.is_finite())
        .unwrap_or(f32::NAN);
    WorldError::InvalidParameter { name, value }
}
