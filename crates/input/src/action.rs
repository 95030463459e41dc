use physworld_kernel::{ControlHandle, WorldError};
use physworld_scenario::preset;

/// A high-level control action from the sliders or preset buttons.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Gravity slider moved (m/s²).
    SetGravity(f32),
    /// Wind slider moved (m/s).
    SetWind(f32),
    /// Preset button pressed: sets gravity and wind together.
    ApplyPreset(String),
}

/// Errors from dispatching an action.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("unknown preset {0:?}")]
    UnknownPreset(String),
    #[error(transparent)]
    World(#[from] WorldError),
}

/// Routes actions from a UI thread to the world that owns the simulation.
///
/// Also remembers the last values sent so sliders can be redrawn without
/// reading the world.
#[derive(Debug, Clone)]
pub struct ControlPanel {
    handle: ControlHandle,
    gravity: f32,
    wind: f32,
}

impl ControlPanel {
    /// `gravity` and `wind` are the values the world was built with.
    pub fn new(handle: ControlHandle, gravity: f32, wind: f32) -> Self {
        Self {
            handle,
            gravity,
            wind,
        }
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    pub fn wind(&self) -> f32 {
        self.wind
    }

    pub fn dispatch(&mut self, action: Action) -> Result<(), InputError> {
        tracing::debug!(?action, "control action");
        match action {
            Action::SetGravity(g) => {
                self.handle.set_gravity(g)?;
                self.gravity = g;
            }
            Action::SetWind(w) => {
                self.handle.set_wind(w)?;
                self.wind = w;
            }
            Action::ApplyPreset(name) => {
                let p = preset(&name).ok_or(InputError::UnknownPreset(name))?;
                self.handle.set_gravity(p.gravity)?;
                self.handle.set_wind(p.wind)?;
                self.gravity = p.gravity;
                self.wind = p.wind;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use physworld_kernel::{ObjectDescriptor, ObjectKind, ScenarioDescriptor, World};

    fn world() -> World {
        World::build(&ScenarioDescriptor {
            gravity: 9.81,
            wind: 0.0,
            objects: vec![ObjectDescriptor {
                kind: ObjectKind::Sphere,
                mass: 1.0,
                position: [0.0, 10.0, 0.0],
                velocity: [0.0; 3],
                size: [1.0; 3],
            }],
            scenario: String::new(),
        })
        .unwrap()
    }

    #[test]
    fn slider_changes_reach_world_after_substep() {
        let mut w = world();
        let mut panel = ControlPanel::new(w.control_handle().unwrap(), 9.81, 0.0);
        panel.dispatch(Action::SetWind(40.0)).unwrap();
        assert_eq!(panel.wind(), 40.0);
        assert_eq!(w.wind().unwrap(), 0.0);
        w.step(1.0 / 60.0).unwrap();
        assert_eq!(w.wind().unwrap(), 40.0);
    }

    #[test]
    fn preset_sets_gravity_and_wind() {
        let mut w = world();
        let mut panel = ControlPanel::new(w.control_handle().unwrap(), 9.81, 0.0);
        panel.dispatch(Action::ApplyPreset("jupiter".into())).unwrap();
        w.step(1.0 / 60.0).unwrap();
        assert_eq!(w.gravity().unwrap(), 24.79);
        assert_eq!(w.wind().unwrap(), 100.0);
    }

    #[test]
    fn unknown_preset_is_rejected() {
        let w = world();
        let mut panel = ControlPanel::new(w.control_handle().unwrap(), 9.81, 0.0);
        let err = panel.dispatch(Action::ApplyPreset("pluto".into())).unwrap_err();
        assert!(matches!(err, InputError::UnknownPreset(_)));
    }

    #[test]
    fn non_finite_slider_value_keeps_last_value() {
        let w = world();
        let mut panel = ControlPanel::new(w.control_handle().unwrap(), 9.81, 0.0);
        panel.dispatch(Action::SetWind(40.0)).unwrap();
        let err = panel.dispatch(Action::SetWind(f32::NAN)).unwrap_err();
        assert!(matches!(
            err,
            InputError::World(WorldError::InvalidParameter { .. })
        ));
        assert_eq!(panel.wind(), 40.0);
    }

    #[test]
    fn torn_down_world_reports_disposed() {
        let mut w = world();
        let mut panel = ControlPanel::new(w.control_handle().unwrap(), 9.81, 0.0);
        w.teardown();
        let err = panel.dispatch(Action::SetGravity(1.0)).unwrap_err();
        assert!(matches!(err, InputError::World(WorldError::WorldDisposed)));
    }
}
