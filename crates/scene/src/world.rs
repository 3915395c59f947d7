use crate::components::{ComponentProperties, Transform};
use crate::entity::EntityId;
use foundation::handles::Handle;
use foundation::math::Vec3;

/// Column store of entity components, indexed by `EntityId::index()`.
#[derive(Debug, Default)]
pub struct World {
    next_index: u32,
    transforms: Vec<Option<Transform>>,
    properties: Vec<Option<ComponentProperties>>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self) -> EntityId {
        let id = EntityId(Handle::new(self.next_index, 0));
        self.next_index += 1;
        let idx = id.index() as usize;
        self.ensure_capacity(idx);
        id
    }

    /// Spawn an entity with a pose in one step.
    pub fn spawn_with(&mut self, transform: Transform) -> EntityId {
        let entity = self.spawn();
        self.set_transform(entity, transform);
        entity
    }

    pub fn contains(&self, entity: EntityId) -> bool {
        entity.index() < self.next_index
    }

    pub fn set_transform(&mut self, entity: EntityId, transform: Transform) {
        self.ensure_capacity(entity.index() as usize);
        self.transforms[entity.index() as usize] = Some(transform);
    }

    pub fn transform(&self, entity: EntityId) -> Option<Transform> {
        self.transforms
            .get(entity.index() as usize)
            .and_then(|t| *t)
    }

    pub fn transform_mut(&mut self, entity: EntityId) -> Option<&mut Transform> {
        self.transforms
            .get_mut(entity.index() as usize)
            .and_then(|t| t.as_mut())
    }

    pub fn position(&self, entity: EntityId) -> Option<Vec3> {
        self.transform(entity).map(|t| t.position)
    }

    /// Returns `false` if the entity has no pose.
    pub fn set_position(&mut self, entity: EntityId, position: Vec3) -> bool {
        self.update_transform(entity, |t| t.position = position)
    }

    pub fn set_pitch(&mut self, entity: EntityId, pitch_deg: f64) -> bool {
        self.update_transform(entity, |t| t.orientation.pitch_deg = pitch_deg)
    }

    pub fn set_yaw(&mut self, entity: EntityId, yaw_deg: f64) -> bool {
        self.update_transform(entity, |t| t.orientation.yaw_deg = yaw_deg)
    }

    pub fn set_roll(&mut self, entity: EntityId, roll_deg: f64) -> bool {
        self.update_transform(entity, |t| t.orientation.roll_deg = roll_deg)
    }

    pub fn set_properties(&mut self, entity: EntityId, properties: ComponentProperties) {
        self.ensure_capacity(entity.index() as usize);
        self.properties[entity.index() as usize] = Some(properties);
    }

    pub fn properties(&self, entity: EntityId) -> Option<&ComponentProperties> {
        self.properties
            .get(entity.index() as usize)
            .and_then(|p| p.as_ref())
    }

    /// An entity can be edited when it has a pose and is not flagged `no_edit`.
    pub fn is_editable(&self, entity: EntityId) -> bool {
        self.transform(entity).is_some() && !self.properties(entity).is_some_and(|p| p.no_edit)
    }

    fn update_transform(&mut self, entity: EntityId, f: impl FnOnce(&mut Transform)) -> bool {
        match self.transform_mut(entity) {
            Some(t) => {
                f(t);
                true
            }
            None => false,
        }
    }

    fn ensure_capacity(&mut self, idx: usize) {
        if self.transforms.len() <= idx {
            let new_len = idx + 1;
            self.transforms.resize(new_len, None);
            self.properties.resize(new_len, None);
        }
    }
}
