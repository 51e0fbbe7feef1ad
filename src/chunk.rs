use crate::block_state::BlockState;
use crate::config::CaptureConfig;
use crate::coordinates::{Coordinate2D, Coordinate3D, Dimension};
use crate::entity::EntityRegistry;
use crate::inventory::ContainerManager;
use crate::notification::{InventoryNotifier, NotificationSink};
use std::sync::Arc;

/// What the block entity store needs from the chunk that owns it.
pub trait ChunkContext {
    fn dimension(&self) -> &Dimension;

    fn location(&self) -> Coordinate2D;

    /// Palette entry at a chunk-local position, `None` for unknown or air.
    fn block_state_at(&self, local: Coordinate3D) -> Option<&BlockState>;

    /// 1.17+ chunks keep entities in a sibling file.
    fn has_separate_entities(&self) -> bool;

    fn data_version(&self) -> i32;

    /// Marks the chunk as having unsaved changes.
    fn touch(&mut self);
}

/// World-wide collaborators shared by every chunk's store.
#[derive(Clone)]
pub struct ChunkServices {
    pub entity_registry: Arc<dyn EntityRegistry>,
    pub container_manager: Arc<dyn ContainerManager>,
    pub notifier: InventoryNotifier,
}

impl ChunkServices {
    pub fn new(
        entity_registry: Arc<dyn EntityRegistry>,
        container_manager: Arc<dyn ContainerManager>,
        notifier: InventoryNotifier,
    ) -> Self {
        ChunkServices {
            entity_registry,
            container_manager,
            notifier,
        }
    }

    /// Production wiring: the notifier is resolved from the settings once.
    pub fn from_config(
        config: &CaptureConfig,
        entity_registry: Arc<dyn EntityRegistry>,
        container_manager: Arc<dyn ContainerManager>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        ChunkServices::new(
            entity_registry,
            container_manager,
            InventoryNotifier::from_config(config, sink),
        )
    }
}

impl std::fmt::Debug for ChunkServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkServices")
            .field("notifier", &self.notifier)
            .finish_non_exhaustive()
    }
}
