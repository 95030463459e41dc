use physworld_common::{BodyId, Transform};
use physworld_kernel::{BodySnapshot, ObjectKind};

/// Errors from pairing a snapshot with the scene's meshes.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SyncError {
    #[error("snapshot has {bodies} bodies but the scene has {meshes} meshes")]
    CountMismatch { meshes: usize, bodies: usize },
    #[error("mesh {index} expects body {expected} but snapshot has {found}")]
    OrderMismatch {
        index: usize,
        expected: BodyId,
        found: BodyId,
    },
}

/// One visual mesh bound to the body at the same index.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshSlot {
    pub body: BodyId,
    pub kind: ObjectKind,
    pub transform: Transform,
}

/// Host-side copy of the scene's mesh transforms, refreshed once per frame.
#[derive(Debug, Clone, Default)]
pub struct SceneSync {
    slots: Vec<MeshSlot>,
    frames: u64,
}

impl SceneSync {
    /// One slot per scenario object, in object order.
    pub fn new(kinds: impl IntoIterator<Item = ObjectKind>) -> Self {
        let slots = kinds
            .into_iter()
            .enumerate()
            .map(|(i, kind)| MeshSlot {
                body: BodyId(i as u32),
                kind,
                transform: Transform::default(),
            })
            .collect();
        Self { slots, frames: 0 }
    }

    pub fn slots(&self) -> &[MeshSlot] {
        &self.slots
    }

    /// Frames applied so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Copy every transform of `frame` into the slot with the same index.
    /// Nothing is written unless the whole frame lines up.
    pub fn apply(&mut self, frame: &[BodySnapshot]) -> Result<(), SyncError> {
        if frame.len() != self.slots.len() {
            return Err(SyncError::CountMismatch {
                meshes: self.slots.len(),
                bodies: frame.len(),
            });
        }
        if let Some((index, (slot, body))) = self
            .slots
            .iter()
            .zip(frame)
            .enumerate()
            .find(|(_, (slot, body))| slot.body != body.id)
        {
            return Err(SyncError::OrderMismatch {
                index,
                expected: slot.body,
                found: body.id,
            });
        }
        for (slot, body) in self.slots.iter_mut().zip(frame) {
            slot.transform = body.transform();
        }
        self.frames += 1;
        tracing::trace!(frame = self.frames, meshes = self.slots.len(), "scene synced");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use physworld_kernel::{ObjectDescriptor, ScenarioDescriptor, World};

    fn descriptor() -> ScenarioDescriptor {
        let object = |kind, x: f32| ObjectDescriptor {
            kind,
            mass: 1.0,
            position: [x, 10.0, 0.0],
            velocity: [0.0; 3],
            size: [1.0; 3],
        };
        ScenarioDescriptor {
            gravity: 9.81,
            wind: 0.0,
            objects: vec![object(ObjectKind::Sphere, -2.0), object(ObjectKind::Box, 2.0)],
            scenario: String::new(),
        }
    }

    #[test]
    fn mesh_i_tracks_body_i() {
        let d = descriptor();
        let mut world = World::build(&d).unwrap();
        let mut scene = SceneSync::new(d.objects.iter().map(|o| o.kind));

        for _ in 0..10 {
            world.step(1.0 / 60.0).unwrap();
            scene.apply(&world.snapshot().unwrap()).unwrap();
        }

        assert_eq!(scene.frames(), 10);
        let slots = scene.slots();
        assert_eq!(slots[0].kind, ObjectKind::Sphere);
        assert_eq!(slots[0].transform.position.x, -2.0);
        assert_eq!(slots[1].transform.position.x, 2.0);
        assert!(slots[1].transform.position.y < 10.0);
    }

    #[test]
    fn count_mismatch_leaves_scene_untouched() {
        let mut scene = SceneSync::new([ObjectKind::Sphere]);
        let frame = vec![
            BodySnapshot {
                id: BodyId(0),
                position: Vec3::ONE,
                orientation: glam::Quat::IDENTITY,
            };
            2
        ];
        assert_eq!(
            scene.apply(&frame),
            Err(SyncError::CountMismatch {
                meshes: 1,
                bodies: 2
            })
        );
        assert_eq!(scene.slots()[0].transform, Transform::default());
        assert_eq!(scene.frames(), 0);
    }

    #[test]
    fn order_mismatch_detected() {
        let mut scene = SceneSync::new([ObjectKind::Sphere, ObjectKind::Box]);
        let snap = |id| BodySnapshot {
            id: BodyId(id),
            position: Vec3::ZERO,
            orientation: glam::Quat::IDENTITY,
        };
        let err = scene.apply(&[snap(1), snap(0)]).unwrap_err();
        assert!(matches!(err, SyncError::OrderMismatch { index: 0, .. }));
    }
}
