//! Repair of block entity tags sent by servers, and synthesis of minimal tags
//! for containers the server never described.

use crate::block_state::BlockState;
use crate::coordinates::Coordinate3D;
use crate::error::TagError;
use crate::nbt::{set_position, string_field};
use quartz_nbt::{NbtCompound, NbtTag};

pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// All shulker box colours share one block entity type.
pub const SHULKER_BOX_ID: &str = "minecraft:shulker_box";

/// True when every byte is one of `[a-z0-9/._-]` and the string is non-empty.
pub fn is_resource_path(s: &str) -> bool {
    !s.is_empty()
        && s
            .bytes()
            .all(|b| matches!(b, b'a'..=b'z' | b'0'..=b'9' | b'/' | b'.' | b'_' | b'-'))
}

/// Lenient identifier repair: default the namespace, then lowercase anything
/// that is not already a plain resource path. Characters that stay invalid
/// after lowercasing are left for the game to reject.
pub fn repair_identifier(id: &str) -> String {
    let id = if id.contains(':') {
        id.to_string()
    } else {
        format!("{}:{}", DEFAULT_NAMESPACE, id.to_lowercase())
    };

    if is_resource_path(&id) {
        return id;
    }

    let lowered = id.to_lowercase();
    if !lowered.split(':').all(is_resource_path) {
        log::debug!("Block entity id {:?} is still invalid after repair", lowered);
    }
    lowered
}

/// Block entity id for a container block that has no block entity yet.
pub fn block_entity_id_for(block: &BlockState) -> &str {
    if block.is_shulker_box() {
        SHULKER_BOX_ID
    } else {
        block.get_name()
    }
}

/// Repairs a server-supplied block entity in place.
///
/// `position` is the world-absolute position the tag is being stored at, and
/// `block` is the palette entry there. The `x`, `y`, `z` fields are always
/// overwritten with `position`, whatever the server sent.
pub fn normalize_block_entity(
    tag: &mut NbtCompound,
    position: Coordinate3D,
    block: Option<&BlockState>,
) {
    match read_identifier(tag) {
        Ok(raw) => {
            let mut id = repair_identifier(raw);

            // Some servers report chest for trapped chests; the palette wins.
            if let Some(block) = block {
                if block.get_name() != id && block.is_chest_like() {
                    id = block.get_name().to_string();
                }
            }

            tag.insert("id", NbtTag::String(id));
        }
        Err(e) => log::debug!("{} at {}, keeping it as is", e, position),
    }

    set_position(tag, position);
}

fn read_identifier(tag: &NbtCompound) -> Result<&str, TagError> {
    string_field(tag, "id").ok_or(TagError::UnknownIdentifier)
}

/// Builds the smallest block entity the game accepts for `block` at the
/// world-absolute `position`.
pub fn synthesize_block_entity(block: &BlockState, position: Coordinate3D) -> NbtCompound {
    let mut tag = NbtCompound::new();
    tag.insert("id", NbtTag::String(block_entity_id_for(block).to_string()));
    set_position(&mut tag, position);
    tag
}
