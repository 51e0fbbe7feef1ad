//! Per-chunk block entity cache, and merging of observed container inventories
//! into it.

use crate::block_entity::{normalize_block_entity, synthesize_block_entity};
use crate::chunk::{ChunkContext, ChunkServices};
use crate::coordinates::{Coordinate2D, Coordinate3D};
use crate::error::TagError;
use crate::inventory::InventoryWindow;
use crate::nbt::{position_of, tag_kind};
use quartz_nbt::{NbtCompound, NbtTag};
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;

/// Block entities of one chunk, keyed by chunk-local position.
///
/// Every stored compound carries `x`, `y`, `z` equal to the world-absolute
/// offset of its key. The store does no locking of its own; the owning chunk
/// serializes all calls.
#[derive(Debug)]
pub struct ChunkEntities {
    block_entities: FxHashMap<Coordinate3D, NbtCompound>,
    services: ChunkServices,
}

impl ChunkEntities {
    pub fn new(services: ChunkServices) -> Self {
        ChunkEntities {
            block_entities: FxHashMap::default(),
            services,
        }
    }

    pub fn services(&self) -> &ChunkServices {
        &self.services
    }

    // ─── Store ──────────────────────────────────────────────────────────────

    /// Repairs `tag` and stores it at `local`, replacing what was there.
    /// Inventories seen before this block entity existed are replayed onto it.
    /// A `local` outside `0..16` on x or z is logged and ignored.
    pub fn insert<C: ChunkContext + ?Sized>(
        &mut self,
        chunk: &mut C,
        local: Coordinate3D,
        mut tag: NbtCompound,
    ) {
        if !local.is_local() {
            log::warn!("Dropping block entity: {}", TagError::NotLocal(local));
            return;
        }
        let world = local.offset_global(chunk.location());

        normalize_block_entity(&mut tag, world, chunk.block_state_at(local));
        self.block_entities.insert(local, tag);
        chunk.touch();

        let position = world.add_dimension(chunk.dimension());
        let previous = self
            .services
            .container_manager
            .load_previous_inventories_at(chunk.location(), &position);
        for window in &previous {
            self.add_inventory(chunk, window);
        }
    }

    /// Stores a block entity sent by the server, which names its own
    /// world-absolute position. Malformed tags, and tags positioned in another
    /// chunk, are logged and dropped.
    pub fn insert_from_tag<C: ChunkContext + ?Sized>(&mut self, chunk: &mut C, tag: NbtTag) {
        match locate_block_entity(tag, chunk.location()) {
            Ok((local, compound)) => self.insert(chunk, local, compound),
            Err(e) => log::warn!("Dropping block entity: {}", e),
        }
    }

    pub fn get(&self, local: Coordinate3D) -> Option<&NbtCompound> {
        self.block_entities.get(&local)
    }

    pub fn contains(&self, local: Coordinate3D) -> bool {
        self.block_entities.contains_key(&local)
    }

    /// Borrowed view of every block entity, in no particular order.
    pub fn snapshot_values(&self) -> impl Iterator<Item = &NbtCompound> + '_ {
        self.block_entities.values()
    }

    pub fn positions(&self) -> impl Iterator<Item = Coordinate3D> + '_ {
        self.block_entities.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.block_entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.block_entities.is_empty()
    }

    // ─── Inventories ────────────────────────────────────────────────────────

    /// Writes the window's items (and custom name, if any) onto the block
    /// entity of the container. A minimal block entity is created when the
    /// server never sent one; if there is no block there, nothing is stored
    /// and the player is told.
    pub fn add_inventory<C: ChunkContext + ?Sized>(&mut self, chunk: &mut C, window: &InventoryWindow) {
        match self.merge_inventory(chunk, window) {
            Ok(()) => {
                chunk.touch();
                self.services
                    .notifier
                    .inventory_recorded(window.container_location);
            }
            Err(e) => {
                log::info!("{}", e);
                self.services
                    .notifier
                    .inventory_failed(window.container_location);
            }
        }
    }

    fn merge_inventory<C: ChunkContext + ?Sized>(
        &mut self,
        chunk: &C,
        window: &InventoryWindow,
    ) -> Result<(), TagError> {
        let location = chunk.location();
        let local = window
            .container_location
            .relative_to(location)
            .ok_or(TagError::OutsideChunk {
                position: window.container_location,
                chunk: location,
            })?;

        let block_entity = match self.block_entities.entry(local) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let block = chunk
                    .block_state_at(local)
                    .ok_or(TagError::MissingBlock(window.container_location))?;
                entry.insert(synthesize_block_entity(block, window.container_location))
            }
        };

        block_entity.insert("Items", NbtTag::List(window.items_nbt()));
        if window.has_custom_name() {
            if let Some(title) = &window.window_title {
                block_entity.insert("CustomName", NbtTag::String(title.clone()));
            }
        }

        Ok(())
    }
}

/// Reads a server block entity and finds its local position in `chunk`.
fn locate_block_entity(
    tag: NbtTag,
    chunk: Coordinate2D,
) -> Result<(Coordinate3D, NbtCompound), TagError> {
    let (position, compound) = read_block_entity(tag)?;
    let local = position
        .relative_to(chunk)
        .ok_or(TagError::OutsideChunk { position, chunk })?;
    Ok((local, compound))
}

fn read_block_entity(tag: NbtTag) -> Result<(Coordinate3D, NbtCompound), TagError> {
    let compound = match tag {
        NbtTag::Compound(compound) => compound,
        other => return Err(TagError::NotCompound(tag_kind(&other))),
    };
    let position = position_of(&compound)?;
    Ok((position, compound))
}
