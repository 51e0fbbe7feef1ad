use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt;

/// Palette entry at a block position, as reported by the chunk's block store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockState {
    pub name: SmolStr,
    pub properties: Vec<(SmolStr, SmolStr)>,
}

impl fmt::Display for BlockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.properties.is_empty() {
            write!(f, "[")?;
            for (i, (key, value)) in self.properties.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{}={}", key, value)?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

impl BlockState {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        BlockState {
            name: name.into(),
            properties: Vec::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<SmolStr>, value: impl Into<SmolStr>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.properties.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.properties.push((key, value)),
        }
        self
    }

    pub fn get_name(&self) -> &str {
        self.name.as_str()
    }

    /// Any chest flavour: chest, trapped_chest, ender_chest.
    pub fn is_chest_like(&self) -> bool {
        self.name.contains("chest")
    }

    /// Every dye colour plus the undyed box.
    pub fn is_shulker_box(&self) -> bool {
        self.name.ends_with("shulker_box")
    }
}

#[cfg(test)]
mod tests {
    use super::BlockState;

    #[test]
    fn test_block_state_display() {
        let chest = BlockState::new("minecraft:chest")
            .with_property("facing", "north")
            .with_property("type", "single");
        assert_eq!(chest.to_string(), "minecraft:chest[facing=north,type=single]");
    }

    #[test]
    fn test_with_property_overwrites() {
        let chest = BlockState::new("minecraft:chest")
            .with_property("facing", "north")
            .with_property("facing", "east");
        assert_eq!(chest.properties.len(), 1);
        assert_eq!(chest.properties[0].1.as_str(), "east");
    }

    #[test]
    fn test_container_families() {
        assert!(BlockState::new("minecraft:trapped_chest").is_chest_like());
        assert!(BlockState::new("minecraft:ender_chest").is_chest_like());
        assert!(!BlockState::new("minecraft:barrel").is_chest_like());

        assert!(BlockState::new("minecraft:shulker_box").is_shulker_box());
        assert!(BlockState::new("minecraft:red_shulker_box").is_shulker_box());
        assert!(!BlockState::new("minecraft:chest").is_shulker_box());
    }
}
