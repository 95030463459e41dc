use physworld_kernel::{ObjectDescriptor, ObjectKind, ScenarioDescriptor};

use crate::presets::{drone, environment, rocket, skyscraper};

/// Result of interpreting a prompt: the world descriptor plus the
/// display-only fields the HUD shows next to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Interpretation {
    pub descriptor: ScenarioDescriptor,
    pub temperature: f32,
    /// Reference payload mass in kg.
    pub mass: f32,
}

/// Keyword interpretation of a natural-language scenario.
///
/// One environment rule fires (mars, moon, storm/wind, heat), then one
/// object rule. Prompts matching no object get a 10 kg sphere.
pub fn interpret(prompt: &str) -> Interpretation {
    let text = prompt.to_lowercase();
    let has = |needle: &str| text.contains(needle);

    let earth = environment("earth");
    let mut gravity = earth.gravity;
    let mut wind = 0.0;
    let mut mass = earth.mass;
    let mut temperature = earth.temperature;

    if has("mars") {
        let p = environment("mars");
        (gravity, wind, mass, temperature) = (p.gravity, p.wind, p.mass, p.temperature);
    } else if has("moon") {
        let p = environment("moon");
        (gravity, wind, mass, temperature) = (p.gravity, p.wind, p.mass, p.temperature);
    } else if has("hurricane") || has("storm") || has("wind") {
        // "200" means 200 km/h.
        wind = if has("200") { 55.0 } else { 40.0 };
    } else if has("40°c") || has("hot") {
        temperature = 40.0;
    }

    let objects = if has("rocket") {
        vec![rocket()]
    } else if has("skyscraper") || has("building") {
        vec![skyscraper()]
    } else if has("drone") {
        mass = 200.0;
        vec![drone()]
    } else if has("basketball") && has("feather") {
        vec![
            ObjectDescriptor {
                kind: ObjectKind::Sphere,
                mass: 0.6,
                position: [-2.0, 10.0, 0.0],
                velocity: [0.0; 3],
                size: [0.24; 3],
            },
            ObjectDescriptor {
                kind: ObjectKind::Box,
                mass: 0.001,
                position: [2.0, 10.0, 0.0],
                velocity: [0.0; 3],
                size: [0.1, 0.02, 0.05],
            },
        ]
    } else if has("paper airplane") {
        vec![ObjectDescriptor {
            kind: ObjectKind::Box,
            mass: 0.005,
            position: [0.0, 5.0, 0.0],
            velocity: [10.0, 0.0, 0.0],
            size: [0.2, 0.01, 0.15],
        }]
    } else {
        vec![ObjectDescriptor {
            kind: ObjectKind::Sphere,
            mass,
            position: [0.0, 10.0, 0.0],
            velocity: [0.0; 3],
            size: [1.0; 3],
        }]
    };

    tracing::debug!(prompt, gravity, wind, objects = objects.len(), "scenario interpreted");

    Interpretation {
        descriptor: ScenarioDescriptor {
            gravity,
            wind,
            objects,
            scenario: prompt.to_string(),
        },
        temperature,
        mass,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mars_rocket() {
        let i = interpret("Simulate a rocket launch on Mars with low gravity");
        assert_eq!(i.descriptor.gravity, 3.71);
        assert_eq!(i.descriptor.wind, 25.0);
        assert_eq!(i.temperature, -65.0);
        assert_eq!(i.descriptor.objects.len(), 1);
        assert_eq!(i.descriptor.objects[0].kind, ObjectKind::Rocket);
    }

    #[test]
    fn hurricane_200_kmh() {
        let i = interpret("Model a skyscraper in a hurricane with 200 km/h winds");
        assert_eq!(i.descriptor.wind, 55.0);
        assert_eq!(i.descriptor.gravity, 9.81);
        assert_eq!(i.descriptor.objects[0].kind, ObjectKind::Building);
    }

    #[test]
    fn plain_storm_wind() {
        let i = interpret("a storm at sea");
        assert_eq!(i.descriptor.wind, 40.0);
    }

    #[test]
    fn hot_drone_sets_payload_mass() {
        let i = interpret("Drone flying when it's hot");
        assert_eq!(i.temperature, 40.0);
        assert_eq!(i.mass, 200.0);
        assert_eq!(i.descriptor.objects[0].mass, 5.0);
    }

    #[test]
    fn basketball_and_feather_on_moon() {
        let i = interpret("Drop a basketball and a feather on the Moon");
        assert_eq!(i.descriptor.gravity, 1.62);
        let kinds: Vec<ObjectKind> = i.descriptor.objects.iter().map(|o| o.kind).collect();
        assert_eq!(kinds, vec![ObjectKind::Sphere, ObjectKind::Box]);
        assert_eq!(i.descriptor.objects[0].position, [-2.0, 10.0, 0.0]);
    }

    #[test]
    fn paper_airplane() {
        let i = interpret("throw a paper airplane");
        assert_eq!(i.descriptor.objects[0].velocity, [10.0, 0.0, 0.0]);
    }

    #[test]
    fn fallback_sphere_uses_reference_mass() {
        let i = interpret("something unrecognised");
        let o = &i.descriptor.objects[0];
        assert_eq!(o.kind, ObjectKind::Sphere);
        assert_eq!(o.mass, 10.0);
        assert_eq!(i.descriptor.scenario, "something unrecognised");
    }

    #[test]
    fn every_interpretation_validates() {
        for prompt in [
            "rocket",
            "building on the moon",
            "drone in wind",
            "basketball feather",
            "paper airplane on mars",
            "",
        ] {
            assert!(interpret(prompt).descriptor.validate().is_ok(), "{prompt}");
        }
    }
}
