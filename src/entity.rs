use crate::block_entity::repair_identifier;
use crate::coordinates::{floor_div, Coordinate2D, CHUNK_SIZE};
use quartz_nbt::{NbtCompound, NbtList, NbtTag};
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use std::sync::RwLock;

/// A free-moving object: mob, dropped item, minecart, ...
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub id: SmolStr,
    pub position: (f64, f64, f64),
    /// Every other field, written at the top level of the entity compound.
    pub nbt: NbtCompound,
}

impl Entity {
    pub fn new(id: impl Into<SmolStr>, position: (f64, f64, f64)) -> Self {
        Entity {
            id: id.into(),
            position,
            nbt: NbtCompound::new(),
        }
    }

    pub fn with_nbt(mut self, key: &str, value: impl Into<NbtTag>) -> Self {
        self.nbt.insert(key, value.into());
        self
    }

    /// The chunk column the entity's feet are in.
    pub fn chunk(&self) -> Coordinate2D {
        let block_x = self.position.0.floor() as i32;
        let block_z = self.position.2.floor() as i32;
        Coordinate2D::new(floor_div(block_x, CHUNK_SIZE), floor_div(block_z, CHUNK_SIZE))
    }

    pub fn to_nbt(&self) -> NbtCompound {
        let mut compound = self.nbt.clone();

        compound.insert("id", NbtTag::String(repair_identifier(&self.id)));
        compound.insert(
            "Pos",
            NbtTag::List(NbtList::from(vec![
                NbtTag::Double(self.position.0),
                NbtTag::Double(self.position.1),
                NbtTag::Double(self.position.2),
            ])),
        );

        compound
    }

    pub fn from_nbt(nbt: &NbtCompound) -> Result<Self, String> {
        let id = match nbt.get::<_, &str>("id") {
            Ok(id) => id,
            Err(_) => nbt
                .get::<_, &str>("Id")
                .map_err(|e| format!("Failed to get Entity id: {}", e))?,
        };

        let pos = nbt
            .get::<_, &NbtList>("Pos")
            .map_err(|e| format!("Failed to get Entity position: {}", e))?;
        if pos.len() != 3 {
            return Err("Invalid position data".to_string());
        }
        let coord = |i: usize| {
            pos.get::<f64>(i)
                .map_err(|e| format!("Failed to read position component {}: {}", i, e))
        };
        let position = (coord(0)?, coord(1)?, coord(2)?);

        let mut rest = NbtCompound::new();
        for (key, value) in nbt.inner() {
            match key.as_str() {
                "id" | "Id" | "Pos" => continue,
                _ => rest.insert(key.clone(), value.clone()),
            }
        }

        Ok(Entity {
            id: repair_identifier(id).into(),
            position,
            nbt: rest,
        })
    }
}

// ─── Registry ───────────────────────────────────────────────────────────────

/// Source of the entities that belong to a chunk.
pub trait EntityRegistry: Send + Sync {
    /// Entity compounds for `chunk`, possibly none.
    fn entities_nbt(&self, chunk: Coordinate2D) -> Vec<NbtCompound>;
}

/// In-memory registry bucketing entities by the chunk they stand in.
#[derive(Default)]
pub struct ChunkEntityRegistry {
    chunks: RwLock<FxHashMap<Coordinate2D, Vec<Entity>>>,
}

impl ChunkEntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entity(&self, entity: Entity) {
        let mut chunks = self.chunks.write().unwrap_or_else(|e| e.into_inner());
        chunks.entry(entity.chunk()).or_default().push(entity);
    }

    /// Forgets every entity in `chunk`, e.g. when it unloads.
    pub fn clear_chunk(&self, chunk: Coordinate2D) -> usize {
        let mut chunks = self.chunks.write().unwrap_or_else(|e| e.into_inner());
        chunks.remove(&chunk).map_or(0, |entities| entities.len())
    }
}

impl EntityRegistry for ChunkEntityRegistry {
    fn entities_nbt(&self, chunk: Coordinate2D) -> Vec<NbtCompound> {
        let chunks = self.chunks.read().unwrap_or_else(|e| e.into_inner());
        chunks
            .get(&chunk)
            .map(|entities| entities.iter().map(Entity::to_nbt).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_serialization() {
        let entity = Entity::new("creeper", (1.0, 2.0, 3.0))
            .with_nbt("Health", 20.0f32)
            .with_nbt("CustomName", "Bob".to_string());

        let compound = entity.to_nbt();

        assert_eq!(compound.get::<_, &str>("id").unwrap(), "minecraft:creeper");
        let pos = compound.get::<_, &NbtList>("Pos").unwrap();
        assert_eq!(pos.get::<f64>(0).unwrap(), 1.0);
        assert_eq!(pos.get::<f64>(2).unwrap(), 3.0);
        assert_eq!(compound.get::<_, f32>("Health").unwrap(), 20.0);
        assert_eq!(compound.get::<_, &str>("CustomName").unwrap(), "Bob");
    }

    #[test]
    fn test_entity_deserialization_keeps_top_level_fields() {
        let mut compound = NbtCompound::new();
        compound.insert("Id", NbtTag::String("minecraft:pig".to_string()));
        compound.insert(
            "Pos",
            NbtTag::List(NbtList::from(vec![
                NbtTag::Double(10.0),
                NbtTag::Double(64.0),
                NbtTag::Double(-20.0),
            ])),
        );
        compound.insert("OnGround", NbtTag::Byte(1));

        let entity = Entity::from_nbt(&compound).unwrap();

        assert_eq!(entity.id, "minecraft:pig");
        assert_eq!(entity.position, (10.0, 64.0, -20.0));
        assert_eq!(entity.nbt.get::<_, i8>("OnGround").unwrap(), 1);
        assert!(!entity.nbt.contains_key("Pos"));
    }

    #[test]
    fn test_invalid_nbt() {
        let mut compound = NbtCompound::new();
        compound.insert("id", NbtTag::String("minecraft:creeper".to_string()));
        compound.insert(
            "Pos",
            NbtTag::List(NbtList::from(vec![NbtTag::Double(0.0), NbtTag::Double(0.0)])),
        );
        assert!(Entity::from_nbt(&compound).is_err());

        let compound = NbtCompound::new();
        assert!(Entity::from_nbt(&compound).is_err());
    }

    #[test]
    fn test_entity_chunk_floors_negative_positions() {
        assert_eq!(
            Entity::new("minecraft:cow", (-0.5, 70.0, 15.9)).chunk(),
            Coordinate2D::new(-1, 0)
        );
        assert_eq!(
            Entity::new("minecraft:cow", (32.0, 70.0, -16.0)).chunk(),
            Coordinate2D::new(2, -1)
        );
    }

    #[test]
    fn test_registry_buckets_by_chunk() {
        let registry = ChunkEntityRegistry::new();
        registry.add_entity(Entity::new("minecraft:cow", (33.0, 64.0, 81.0)));
        registry.add_entity(Entity::new("minecraft:pig", (40.5, 64.0, 90.0)));
        registry.add_entity(Entity::new("minecraft:sheep", (0.0, 64.0, 0.0)));

        assert_eq!(registry.entities_nbt(Coordinate2D::new(2, 5)).len(), 2);
        assert_eq!(registry.entities_nbt(Coordinate2D::new(0, 0)).len(), 1);
        assert!(registry.entities_nbt(Coordinate2D::new(9, 9)).is_empty());

        assert_eq!(registry.clear_chunk(Coordinate2D::new(2, 5)), 2);
        assert!(registry.entities_nbt(Coordinate2D::new(2, 5)).is_empty());
        assert_eq!(registry.entities_nbt(Coordinate2D::new(0, 0)).len(), 1);
    }
}
