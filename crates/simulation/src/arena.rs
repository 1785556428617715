//! Slot arena owning pending work items.
//!
//! A work item is referenced by two queued events. Instead of sharing
//! ownership, the arena owns the item and both events carry a [`WorkId`].
//! The completion event removes it, after which the id no longer resolves.

/// Opaque handle to a work item held by a [`WorkArena`].
///
/// The generation distinguishes a live item from an earlier occupant of the
/// same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkId {
    index: u32,
    generation: u32,
}

impl WorkId {
    /// Slot index inside the arena.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Generation of the slot at insertion time.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl std::fmt::Display for WorkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "W#{}.{}", self.index, self.generation)
    }
}

#[derive(Debug)]
struct Slot<W> {
    generation: u32,
    work: Option<W>,
}

/// Generational slot arena.
///
/// Freed slots are reused in LIFO order; their generation is bumped on
/// removal so stale ids resolve to `None`.
#[derive(Debug)]
pub struct WorkArena<W> {
    slots: Vec<Slot<W>>,
    free: Vec<u32>,
    live: usize,
}

impl<W> WorkArena<W> {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
        }
    }

    /// Take ownership of `work` and return its handle.
    pub fn insert(&mut self, work: W) -> WorkId {
        self.live += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.work = Some(work);
            return WorkId {
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            work: Some(work),
        });
        WorkId {
            index,
            generation: 0,
        }
    }

    /// Borrow a live item.
    pub fn get(&self, id: WorkId) -> Option<&W> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.work.as_ref())
    }

    /// Remove a live item, releasing its slot.
    ///
    /// Returns `None` if the id is stale or was already removed.
    pub fn remove(&mut self, id: WorkId) -> Option<W> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }

        let work = slot.work.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.live -= 1;
        Some(work)
    }

    /// Number of live items.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Whether the arena holds no live items.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }
}

impl<W> Default for WorkArena<W> {
    fn default() -> Self {
        Self::new()
    }
}
