use crate::coordinates::{Coordinate2D, Coordinate3D, CoordinateDim3D};
use quartz_nbt::{NbtCompound, NbtList, NbtTag};
use rustc_hash::FxHashMap;
use std::sync::Mutex;

/// Contents of a container window the player opened.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryWindow {
    /// World-absolute position of the container block.
    pub container_location: Coordinate3D,
    pub slots_nbt: Vec<NbtCompound>,
    pub window_title: Option<String>,
    custom_name: bool,
}

impl InventoryWindow {
    pub fn new(container_location: Coordinate3D, slots_nbt: Vec<NbtCompound>) -> Self {
        InventoryWindow {
            container_location,
            slots_nbt,
            window_title: None,
            custom_name: false,
        }
    }

    /// Sets the title the window was opened with. `custom` marks titles the
    /// player gave the container, as opposed to the default "Chest" etc.
    pub fn with_title(mut self, title: impl Into<String>, custom: bool) -> Self {
        self.window_title = Some(title.into());
        self.custom_name = custom;
        self
    }

    pub fn has_custom_name(&self) -> bool {
        self.custom_name && self.window_title.is_some()
    }

    pub fn items_nbt(&self) -> NbtList {
        NbtList::from(
            self.slots_nbt
                .iter()
                .cloned()
                .map(NbtTag::Compound)
                .collect::<Vec<_>>(),
        )
    }
}

/// Looks up inventories that were seen before the block entity they belong to.
pub trait ContainerManager: Send + Sync {
    /// Hands back, and forgets, every window buffered at `position`. The store
    /// replays them once the block entity at that position exists.
    fn load_previous_inventories_at(
        &self,
        chunk: Coordinate2D,
        position: &CoordinateDim3D,
    ) -> Vec<InventoryWindow>;
}

/// In-memory [`ContainerManager`] keyed by dimension-tagged position.
#[derive(Default)]
pub struct InventoryBuffer {
    pending: Mutex<FxHashMap<CoordinateDim3D, Vec<InventoryWindow>>>,
}

impl InventoryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, position: CoordinateDim3D, window: InventoryWindow) {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        pending.entry(position).or_default().push(window);
    }

    pub fn pending_count(&self) -> usize {
        let pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        pending.values().map(Vec::len).sum()
    }
}

impl ContainerManager for InventoryBuffer {
    fn load_previous_inventories_at(
        &self,
        chunk: Coordinate2D,
        position: &CoordinateDim3D,
    ) -> Vec<InventoryWindow> {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        let windows = pending.remove(position).unwrap_or_default();
        if !windows.is_empty() {
            log::debug!(
                "Replaying {} buffered inventories at {} for chunk {}",
                windows.len(),
                position,
                chunk
            );
        }
        windows
    }
}
