use physworld_kernel::{ObjectDescriptor, ObjectKind, ScenarioDescriptor};
use serde::Serialize;

/// Named environment: global fields plus display-only values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhysicsPreset {
    pub name: &'static str,
    /// m/s²
    pub gravity: f32,
    /// m/s
    pub wind: f32,
    /// Reference payload mass in kg, shown by the HUD.
    pub mass: f32,
    /// °C, shown by the HUD.
    pub temperature: f32,
}

const PRESETS: [PhysicsPreset; 6] = [
    PhysicsPreset {
        name: "earth",
        gravity: 9.81,
        wind: 0.0,
        mass: 10.0,
        temperature: 20.0,
    },
    PhysicsPreset {
        name: "mars",
        gravity: 3.71,
        wind: 25.0,
        mass: 10.0,
        temperature: -65.0,
    },
    PhysicsPreset {
        name: "moon",
        gravity: 1.62,
        wind: 0.0,
        mass: 10.0,
        temperature: -20.0,
    },
    PhysicsPreset {
        name: "jupiter",
        gravity: 24.79,
        wind: 100.0,
        mass: 10.0,
        temperature: -145.0,
    },
    PhysicsPreset {
        name: "space",
        gravity: 0.0,
        wind: 0.0,
        mass: 10.0,
        temperature: -270.0,
    },
    PhysicsPreset {
        name: "storm",
        gravity: 9.81,
        wind: 45.0,
        mass: 10.0,
        temperature: 25.0,
    },
];

/// All presets, Earth first.
pub fn presets() -> &'static [PhysicsPreset] {
    &PRESETS
}

/// Look a preset up by case-insensitive name.
pub fn preset(name: &str) -> Option<PhysicsPreset> {
    PRESETS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
        .copied()
}

/// A canned scenario that works without the remote interpreter.
#[derive(Debug, Clone, PartialEq)]
pub struct OfflineExample {
    pub name: &'static str,
    pub prompt: &'static str,
    pub temperature: f32,
    pub descriptor: ScenarioDescriptor,
}

pub(crate) fn environment(name: &str) -> PhysicsPreset {
    // Only called with names from PRESETS.
    preset(name).unwrap_or(PRESETS[0])
}

pub(crate) fn rocket() -> ObjectDescriptor {
    ObjectDescriptor {
        kind: ObjectKind::Rocket,
        mass: 500_000.0,
        position: [0.0, 0.0, 0.0],
        velocity: [0.0, 50.0, 0.0],
        size: [2.0, 10.0, 2.0],
    }
}

pub(crate) fn skyscraper() -> ObjectDescriptor {
    ObjectDescriptor {
        kind: ObjectKind::Building,
        mass: 10_000_000.0,
        position: [0.0, 50.0, 0.0],
        velocity: [0.0; 3],
        size: [20.0, 100.0, 20.0],
    }
}

pub(crate) fn drone() -> ObjectDescriptor {
    ObjectDescriptor {
        kind: ObjectKind::Box,
        mass: 5.0,
        position: [0.0, 10.0, 0.0],
        velocity: [5.0, 0.0, 5.0],
        size: [1.0, 0.3, 1.0],
    }
}

/// The three scenarios shipped for offline use.
pub fn offline_examples() -> Vec<OfflineExample> {
    let mars = environment("mars");
    let storm = environment("storm");
    let earth = environment("earth");
    vec![
        OfflineExample {
            name: "Mars Rocket Launch",
            prompt: "Simulate a rocket launch on Mars with low gravity",
            temperature: mars.temperature,
            descriptor: ScenarioDescriptor {
                gravity: mars.gravity,
                wind: mars.wind,
                objects: vec![rocket()],
                scenario: "Mars Rocket Launch".into(),
            },
        },
        OfflineExample {
            name: "Hurricane Skyscraper",
            prompt: "Model a skyscraper in a hurricane with 200 km/h winds",
            temperature: storm.temperature,
            descriptor: ScenarioDescriptor {
                gravity: storm.gravity,
                // 200 km/h
                wind: 55.0,
                objects: vec![skyscraper()],
                scenario: "Hurricane Skyscraper".into(),
            },
        },
        OfflineExample {
            name: "Drone Payload Drop",
            prompt: "Simulate a drone carrying 200 kg in 40°C heat with strong wind",
            temperature: 40.0,
            descriptor: ScenarioDescriptor {
                gravity: earth.gravity,
                wind: 30.0,
                objects: vec![drone()],
                scenario: "Drone Payload Drop".into(),
            },
        },
    ]
}
