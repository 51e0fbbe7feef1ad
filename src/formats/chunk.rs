use crate::chunk::ChunkContext;
use crate::chunk_entities::ChunkEntities;
use crate::nbt::NamedTag;
use quartz_nbt::{NbtCompound, NbtList, NbtTag};

/// First data version (1.17) that moves entities into `entities/r.x.z.mca`.
pub const DATA_VERSION_1_17: i32 = 2724;
/// First data version (1.18) that renames `TileEntities` to `block_entities`.
pub const DATA_VERSION_1_18: i32 = 2860;

// ─── Dialects ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkDialect {
    /// Pre-1.17: `TileEntities` and `Entities` both live in the chunk.
    Embedded,
    /// 1.17: `TileEntities` in the chunk, entities in their own file.
    SplitEntities,
    /// 1.18+: `block_entities` in the chunk, entities in their own file.
    Split,
}

impl ChunkDialect {
    pub fn for_data_version(data_version: i32) -> Self {
        if data_version >= DATA_VERSION_1_18 {
            ChunkDialect::Split
        } else if data_version >= DATA_VERSION_1_17 {
            ChunkDialect::SplitEntities
        } else {
            ChunkDialect::Embedded
        }
    }
}

// ─── Emitters ───────────────────────────────────────────────────────────────

impl ChunkEntities {
    /// Before 1.18: `TileEntities`, plus `Entities` unless the chunk keeps
    /// them in a separate file.
    pub fn add_level_nbt_tags<C: ChunkContext + ?Sized>(&self, chunk: &C, map: &mut NbtCompound) {
        map.insert("TileEntities", NbtTag::List(self.block_entity_list()));

        if !chunk.has_separate_entities() {
            map.insert("Entities", NbtTag::List(self.entity_list(chunk)));
        }
    }

    /// 1.18+: `block_entities` only.
    pub fn add_block_entities(&self, map: &mut NbtCompound) {
        map.insert("block_entities", NbtTag::List(self.block_entity_list()));
    }

    /// Picks the emitter matching the chunk's data version.
    pub fn write_chunk_entities<C: ChunkContext + ?Sized>(&self, chunk: &C, map: &mut NbtCompound) {
        match ChunkDialect::for_data_version(chunk.data_version()) {
            ChunkDialect::Split => self.add_block_entities(map),
            ChunkDialect::Embedded | ChunkDialect::SplitEntities => {
                self.add_level_nbt_tags(chunk, map)
            }
        }
    }

    /// Root of the chunk's entry in the separate entity file:
    /// `{ Entities, DataVersion, Position: [x, z] }` under an empty name.
    /// `None` when entities are embedded or the chunk has none, in which case
    /// nothing should be written.
    pub fn to_entity_nbt<C: ChunkContext + ?Sized>(&self, chunk: &C) -> Option<NamedTag> {
        if !chunk.has_separate_entities() {
            return None;
        }

        let entities = self.entity_list(chunk);
        if entities.is_empty() {
            return None;
        }

        let location = chunk.location();
        let mut root = NbtCompound::new();
        root.insert("Entities", NbtTag::List(entities));
        root.insert("DataVersion", NbtTag::Int(chunk.data_version()));
        root.insert("Position", NbtTag::IntArray(vec![location.x, location.z]));

        Some(NamedTag::new("", root))
    }

    fn block_entity_list(&self) -> NbtList {
        NbtList::from(
            self.snapshot_values()
                .cloned()
                .map(NbtTag::Compound)
                .collect::<Vec<_>>(),
        )
    }

    fn entity_list<C: ChunkContext + ?Sized>(&self, chunk: &C) -> NbtList {
        NbtList::from(
            self.services()
                .entity_registry
                .entities_nbt(chunk.location())
                .into_iter()
                .map(NbtTag::Compound)
                .collect::<Vec<_>>(),
        )
    }
}
