use physworld_common::BodyId;
use physworld_kernel::{World, WorldError};

/// World inspector for developer tooling.
///
/// Read-only queries for debugging, HUD readouts and the CLI.
pub struct WorldInspector;

impl WorldInspector {
    /// Produce a summary of the world state.
    pub fn summary(world: &World) -> Result<WorldSummary, WorldError> {
        let bodies = world.bodies()?;
        Ok(WorldSummary {
            tick: world.tick()?,
            sim_time: world.sim_time()?,
            body_count: bodies.len(),
            resting: bodies
                .iter()
                .filter(|b| !b.is_static() && b.linear_velocity.length() < 1e-3)
                .count(),
            frozen: world.frozen_count()?,
            gravity: world.gravity()?,
            wind: world.wind()?,
            kinetic_energy: world.kinetic_energy()?,
            pending_events: world.events()?.len(),
        })
    }

    /// Detailed state of one body.
    pub fn inspect_body(world: &World, id: BodyId) -> Result<BodyInfo, WorldError> {
        let body = world.body(id)?;
        let p = body.position;
        let r = body.orientation;
        let v = body.linear_velocity;
        let w = body.angular_velocity;
        Ok(BodyInfo {
            id,
            shape: body.shape.name(),
            mass: body.mass(),
            position: [p.x, p.y, p.z],
            rotation: [r.x, r.y, r.z, r.w],
            velocity: [v.x, v.y, v.z],
            angular_velocity: [w.x, w.y, w.z],
            kinetic_energy: body.kinetic_energy(),
        })
    }

    /// All body ids in creation order.
    pub fn list_bodies(world: &World) -> Result<Vec<BodyId>, WorldError> {
        Ok(world.bodies()?.iter().map(|b| b.id).collect())
    }
}

/// Summary of world state for the inspector.
#[derive(Debug, Clone)]
pub struct WorldSummary {
    pub tick: u64,
    pub sim_time: f64,
    pub body_count: usize,
    /// Dynamic bodies currently at rest.
    pub resting: usize,
    /// Guard freezes since the build.
    pub frozen: u64,
    pub gravity: f32,
    pub wind: f32,
    pub kinetic_energy: f32,
    pub pending_events: usize,
}

impl std::fmt::Display for WorldSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "World: tick={} t={:.2}s bodies={} resting={} frozen={} gravity={:.2} wind={:.1} ke={:.1}J pending_events={}",
            self.tick,
            self.sim_time,
            self.body_count,
            self.resting,
            self.frozen,
            self.gravity,
            self.wind,
            self.kinetic_energy,
            self.pending_events
        )
    }
}

/// Detailed info about a single body.
#[derive(Debug, Clone)]
pub struct BodyInfo {
    pub id: BodyId,
    pub shape: &'static str,
    pub mass: f32,
    pub position: [f32; 3],
    pub rotation: [f32; 4],
    pub velocity: [f32; 3],
    pub angular_velocity: [f32; 3],
    pub kinetic_energy: f32,
}

impl std::fmt::Display for BodyInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Body [{}] {} m={} pos=({:.2}, {:.2}, {:.2}) vel=({:.2}, {:.2}, {:.2})",
            self.id,
            self.shape,
            self.mass,
            self.position[0],
            self.position[1],
            self.position[2],
            self.velocity[0],
            self.velocity[1],
            self.velocity[2],
        )
    }
}
