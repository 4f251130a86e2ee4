//! Table-driven extraction and patching.
//!
//! Both passes walk the descriptor table with a cursor: a field with an
//! explicit offset seeks there, a field without one continues from the end
//! of the previous field.  Extract and patch share the walk so seek
//! positions are identical on both passes.

pub mod derived;

use std::collections::HashSet;

use crate::attr::{AttrDesc, Attribute, AttributeMap, Value};
use crate::error::{Error, Result};

pub use derived::DigitGroup;

/// Reject tables containing two descriptors with the same id.  Runs before
/// any decode on both the extract and patch paths.
pub fn validate_table(descs: &[AttrDesc]) -> Result<()> {
    let mut seen = HashSet::new();
    for d in descs {
        if !seen.insert(d.id) {
            return Err(Error::DuplicateAttribute(d.id.to_string()));
        }
    }
    Ok(())
}

/// Decode every field in the table into an attribute map.
pub fn extract(descs: &[AttrDesc], content: &[u8]) -> Result<AttributeMap> {
    validate_table(descs)?;

    let mut attributes = AttributeMap::new();
    let mut cursor = 0usize;
    for d in descs {
        if let Some(offset) = d.offset {
            cursor = offset;
        }
        let mut value = d.attr_type.decode(content, cursor).map_err(|source| {
            Error::Decode {
                id: d.id.to_string(),
                source,
            }
        })?;
        cursor += d.attr_type.width();

        if let (Some(delta), Value::Int(raw)) = (d.value_offset, &value) {
            value = Value::Int(raw + delta);
        }

        attributes.insert(
            d.id.to_string(),
            Attribute {
                id: d.id.to_string(),
                value,
                value_type: d.value_type.map(str::to_string),
                desc: d.desc.map(str::to_string),
                min: d.min,
                max: d.max,
            },
        );
    }
    Ok(attributes)
}

/// Re-encode attribute values over a copy of `content`.
///
/// Fields absent from `attributes` are not written, but the cursor still
/// advances by their encoded width; otherwise every later offset-free field
/// would land at the wrong position.  Bytes not covered by any descriptor
/// are returned unchanged.
pub fn patch(descs: &[AttrDesc], content: &[u8], attributes: &AttributeMap) -> Result<Vec<u8>> {
    validate_table(descs)?;

    let mut out = content.to_vec();
    let mut cursor = 0usize;
    for d in descs {
        if let Some(offset) = d.offset {
            cursor = offset;
        }
        if let Some(attr) = attributes.get(d.id) {
            let mut value = attr.value.clone();
            if let (Some(delta), Value::Int(logical)) = (d.value_offset, &value) {
                value = Value::Int(logical - delta);
            }
            d.attr_type
                .encode(&value, &mut out, cursor)
                .map_err(|source| Error::Encode {
                    id: d.id.to_string(),
                    source,
                })?;
        }
        cursor += d.attr_type.width();
    }
    Ok(out)
}

/// Resolve the absolute byte position of one field by walking the table.
/// Returns the field's offset and width.
pub fn locate(descs: &[AttrDesc], id: &str) -> Option<(usize, usize)> {
    let mut cursor = 0usize;
    for d in descs {
        if let Some(offset) = d.offset {
            cursor = offset;
        }
        if d.id == id {
            return Some((cursor, d.attr_type.width()));
        }
        cursor += d.attr_type.width();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::AttrType;

    fn sample_table() -> Vec<AttrDesc> {
        vec![
            AttrDesc::new("a", AttrType::U16le).at(0x10),
            AttrDesc::new("b", AttrType::U8),
            AttrDesc::new("c", AttrType::U16le),
        ]
    }

    fn sample_content() -> Vec<u8> {
        let mut content = vec![0u8; 0x20];
        content[0x10] = 0x34; // a = 0x1234
        content[0x11] = 0x12;
        content[0x12] = 0x07; // b = 7
        content[0x13] = 0xE8; // c = 1000
        content[0x14] = 0x03;
        content
    }

    #[test]
    fn test_sequential_continuation() {
        let attrs = extract(&sample_table(), &sample_content()).unwrap();
        assert_eq!(attrs["a"].value, Value::Int(0x1234));
        assert_eq!(attrs["b"].value, Value::Int(7));
        assert_eq!(attrs["c"].value, Value::Int(1000));
    }

    #[test]
    fn test_round_trip_is_byte_identical() {
        let content = sample_content();
        let attrs = extract(&sample_table(), &content).unwrap();
        let patched = patch(&sample_table(), &content, &attrs).unwrap();
        assert_eq!(patched, content);
    }

    #[test]
    fn test_omitted_field_still_advances_cursor() {
        let content = sample_content();
        let mut attrs = extract(&sample_table(), &content).unwrap();
        // Drop "b"; "c" must still land at 0x13, not 0x12.
        attrs.remove("b");
        attrs.get_mut("c").unwrap().value = Value::Int(2000);
        let patched = patch(&sample_table(), &content, &attrs).unwrap();
        assert_eq!(patched[0x12], 0x07);
        assert_eq!(&patched[0x13..0x15], &[0xD0, 0x07]);
    }

    #[test]
    fn test_single_field_mutation_is_isolated() {
        let content = sample_content();
        let mut attrs = extract(&sample_table(), &content).unwrap();
        attrs.get_mut("b").unwrap().value = Value::Int(9);
        let patched = patch(&sample_table(), &content, &attrs).unwrap();
        assert_eq!(patched[0x12], 9);
        for (i, byte) in patched.iter().enumerate() {
            if i != 0x12 {
                assert_eq!(*byte, content[i], "byte {:#x} changed", i);
            }
        }
    }

    #[test]
    fn test_uncovered_bytes_untouched() {
        let mut content = sample_content();
        content[0x00] = 0xAA;
        content[0x1F] = 0xBB;
        let attrs = extract(&sample_table(), &content).unwrap();
        let patched = patch(&sample_table(), &content, &attrs).unwrap();
        assert_eq!(patched[0x00], 0xAA);
        assert_eq!(patched[0x1F], 0xBB);
    }

    #[test]
    fn test_duplicate_id_rejected_before_decode() {
        let table = vec![
            AttrDesc::new("a", AttrType::U8).at(0),
            AttrDesc::new("a", AttrType::U8),
        ];
        // Empty content: a decode attempt would fail OutOfBounds, so the
        // duplicate must be caught first.
        match extract(&table, &[]) {
            Err(Error::DuplicateAttribute(id)) => assert_eq!(id, "a"),
            other => panic!("expected duplicate id error, got {:?}", other),
        }
        assert!(matches!(
            patch(&table, &[], &AttributeMap::new()),
            Err(Error::DuplicateAttribute(_))
        ));
    }

    #[test]
    fn test_decode_error_names_field() {
        let table = vec![AttrDesc::new("deep.field", AttrType::U16le).at(0x100)];
        match extract(&table, &[0u8; 0x10]) {
            Err(Error::Decode { id, .. }) => assert_eq!(id, "deep.field"),
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[test]
    fn test_value_offset_applied_and_inverted() {
        let table = vec![
            AttrDesc::new("game.initial.level", AttrType::U16le)
                .at(0)
                .value_offset(1),
        ];
        let content = vec![0x00, 0x00];
        let attrs = extract(&table, &content).unwrap();
        // Stored 0 presents as logical 1.
        assert_eq!(attrs["game.initial.level"].value, Value::Int(1));

        let mut attrs = attrs;
        attrs.get_mut("game.initial.level").unwrap().value = Value::Int(10);
        let patched = patch(&table, &content, &attrs).unwrap();
        assert_eq!(&patched, &[0x09, 0x00]);
    }

    #[test]
    fn test_locate_follows_cursor() {
        let table = sample_table();
        assert_eq!(locate(&table, "a"), Some((0x10, 2)));
        assert_eq!(locate(&table, "b"), Some((0x12, 1)));
        assert_eq!(locate(&table, "c"), Some((0x13, 2)));
        assert_eq!(locate(&table, "missing"), None);
    }

    #[test]
    fn test_extra_map_entries_ignored_by_patch() {
        let content = sample_content();
        let mut attrs = extract(&sample_table(), &content).unwrap();
        attrs.insert(
            "synthetic".into(),
            Attribute {
                id: "synthetic".into(),
                value: Value::Int(1),
                value_type: None,
                desc: None,
                min: None,
                max: None,
            },
        );
        let patched = patch(&sample_table(), &content, &attrs).unwrap();
        assert_eq!(patched, content);
    }
}
