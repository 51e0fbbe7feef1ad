//! Block entity and entity aggregation for captured chunks.
//!
//! A [`ChunkEntities`] store lives next to each loaded chunk. Server block
//! entities and observed container inventories are merged into it, and it
//! emits the `TileEntities` / `block_entities` lists and the separate entity
//! file root when the chunk is saved.

pub mod block_entity;
pub mod block_state;
pub mod chunk;
pub mod chunk_entities;
pub mod config;
pub mod coordinates;
pub mod entity;
pub mod error;
pub mod formats;
pub mod inventory;
pub mod nbt;
pub mod notification;

pub use block_state::BlockState;
pub use chunk::{ChunkContext, ChunkServices};
pub use chunk_entities::ChunkEntities;
pub use config::CaptureConfig;
pub use coordinates::{Coordinate2D, Coordinate3D, CoordinateDim3D, Dimension};
pub use entity::{ChunkEntityRegistry, Entity, EntityRegistry};
pub use error::{ConfigError, TagError};
pub use formats::chunk::ChunkDialect;
pub use inventory::{ContainerManager, InventoryBuffer, InventoryWindow};
pub use nbt::NamedTag;
pub use notification::{ClientMessage, InventoryNotifier, NotificationSink};
