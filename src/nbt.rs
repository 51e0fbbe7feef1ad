//! Checked access to fields of untrusted compound tags.

use crate::coordinates::Coordinate3D;
use crate::error::TagError;
use quartz_nbt::{NbtCompound, NbtTag};

/// A compound together with the name it is written under.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedTag {
    pub name: String,
    pub root: NbtCompound,
}

impl NamedTag {
    pub fn new(name: impl Into<String>, root: NbtCompound) -> Self {
        NamedTag {
            name: name.into(),
            root,
        }
    }
}

pub fn tag_kind(tag: &NbtTag) -> &'static str {
    match tag {
        NbtTag::Byte(_) => "byte",
        NbtTag::Short(_) => "short",
        NbtTag::Int(_) => "int",
        NbtTag::Long(_) => "long",
        NbtTag::Float(_) => "float",
        NbtTag::Double(_) => "double",
        NbtTag::ByteArray(_) => "byte array",
        NbtTag::String(_) => "string",
        NbtTag::List(_) => "list",
        NbtTag::Compound(_) => "compound",
        NbtTag::IntArray(_) => "int array",
        NbtTag::LongArray(_) => "long array",
    }
}

/// Reads an integer-valued field. Narrower integer kinds are widened and longs
/// are accepted when they fit; floating point values are rejected.
pub fn int_field(compound: &NbtCompound, field: &'static str) -> Result<i32, TagError> {
    match compound.inner().get(field) {
        None => Err(TagError::MissingField(field)),
        Some(NbtTag::Int(v)) => Ok(*v),
        Some(NbtTag::Short(v)) => Ok(i32::from(*v)),
        Some(NbtTag::Byte(v)) => Ok(i32::from(*v)),
        Some(NbtTag::Long(v)) => i32::try_from(*v).map_err(|_| TagError::NotAnInteger {
            field,
            found: "long out of range",
        }),
        Some(other) => Err(TagError::NotAnInteger {
            field,
            found: tag_kind(other),
        }),
    }
}

pub fn string_field<'a>(compound: &'a NbtCompound, field: &str) -> Option<&'a str> {
    match compound.inner().get(field) {
        Some(NbtTag::String(s)) => Some(s.as_str()),
        _ => None,
    }
}

/// Reads the `x`, `y`, `z` fields of a block entity.
pub fn position_of(compound: &NbtCompound) -> Result<Coordinate3D, TagError> {
    Ok(Coordinate3D::new(
        int_field(compound, "x")?,
        int_field(compound, "y")?,
        int_field(compound, "z")?,
    ))
}

pub fn set_position(compound: &mut NbtCompound, position: Coordinate3D) {
    compound.insert("x", NbtTag::Int(position.x));
    compound.insert("y", NbtTag::Int(position.y));
    compound.insert("z", NbtTag::Int(position.z));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_field_widening() {
        let mut compound = NbtCompound::new();
        compound.insert("x", NbtTag::Byte(-3));
        compound.insert("y", NbtTag::Short(300));
        compound.insert("z", NbtTag::Long(-70_000));
        assert_eq!(
            position_of(&compound).unwrap(),
            Coordinate3D::new(-3, 300, -70_000)
        );
    }

    #[test]
    fn test_int_field_rejects_non_integers() {
        let mut compound = NbtCompound::new();
        compound.insert("x", NbtTag::Double(1.5));
        compound.insert("y", NbtTag::Long(i64::MAX));

        assert_eq!(
            int_field(&compound, "x"),
            Err(TagError::NotAnInteger {
                field: "x",
                found: "double"
            })
        );
        assert!(matches!(
            int_field(&compound, "y"),
            Err(TagError::NotAnInteger { field: "y", .. })
        ));
        assert_eq!(int_field(&compound, "z"), Err(TagError::MissingField("z")));
    }

    #[test]
    fn test_string_field_requires_string_variant() {
        let mut compound = NbtCompound::new();
        compound.insert("id", NbtTag::Int(54));
        assert_eq!(string_field(&compound, "id"), None);

        compound.insert("id", NbtTag::String("minecraft:chest".to_string()));
        assert_eq!(string_field(&compound, "id"), Some("minecraft:chest"));
    }
}
