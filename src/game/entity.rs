//! Generational entity identifiers
//!
//! Platforms are addressed by `Entity` rather than by their position in the
//! active platform list. The list is pruned and broken platforms are removed
//! mid-run, so list indices shift; a generational id stays valid exactly as
//! long as the platform it names, and a coin holding its parent's id can
//! never resolve to a platform that later reused the slot.

/// Identifier of a live game object.
///
/// `index` picks the slot, `generation` picks which occupant of that slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entity {
    index: u32,
    generation: u32,
}

impl Entity {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Placeholder id that is never alive.
    pub const NULL: Entity = Entity { index: u32::MAX, generation: 0 };

    pub fn is_null(&self) -> bool {
        self.index == u32::MAX
    }
}

impl Default for Entity {
    fn default() -> Self {
        Entity::NULL
    }
}

/// Hands out entity ids and tracks which ones are still alive.
///
/// Freed slots are reused LIFO with a bumped generation.
#[derive(Debug, Default)]
pub struct EntityAllocator {
    generations: Vec<u32>,
    free_indices: Vec<u32>,
    alive_count: u32,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> Entity {
        self.alive_count += 1;

        if let Some(index) = self.free_indices.pop() {
            // Generation was already bumped when the slot was freed
            Entity::new(index, self.generations[index as usize])
        } else {
            let index = self.generations.len() as u32;
            self.generations.push(0);
            Entity::new(index, 0)
        }
    }

    /// Release an entity. Returns false if it was already dead.
    pub fn free(&mut self, entity: Entity) -> bool {
        if !self.is_alive(entity) {
            return false;
        }

        self.generations[entity.index as usize] += 1;
        self.free_indices.push(entity.index);
        self.alive_count -= 1;
        true
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        if entity.is_null() {
            return false;
        }
        let idx = entity.index as usize;
        idx < self.generations.len() && self.generations[idx] == entity.generation
    }

    pub fn alive_count(&self) -> u32 {
        self.alive_count
    }

    /// Kill every entity at once (session teardown).
    pub fn clear(&mut self) {
        for gen in &mut self.generations {
            *gen += 1;
        }
        self.free_indices.clear();
        self.free_indices.extend((0..self.generations.len() as u32).rev());
        self.alive_count = 0;
    }
}
