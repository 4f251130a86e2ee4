//! Field encodings: how a typed attribute maps onto a byte region.
//!
//! Every tag knows its exact byte width.  The width is load-bearing: when a
//! descriptor omits its offset, the next field starts where this one ended,
//! so decode and encode must consume identical spans.

use encoding_rs::WINDOWS_1252;
use thiserror::Error;

use crate::attr::Value;

/// Errors raised while turning a byte region into a value or back.
///
/// These carry no attribute id; the engine attaches the offending field when
/// it wraps them.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Region {offset:#x}..{end:#x} is outside the {size} byte content", end = .offset + .len)]
    OutOfBounds { offset: usize, len: usize, size: usize },

    #[error("Required string terminator not found within {len} bytes at {offset:#x}")]
    MissingTerminator { offset: usize, len: usize },

    #[error("Value {value} does not fit in {encoding}")]
    IntOutOfRange { value: i64, encoding: AttrType },

    #[error("String of {len} bytes does not fit in {max} byte field")]
    StringTooLong { len: usize, max: usize },

    #[error("String contains characters not representable in the file encoding")]
    Unrepresentable,

    #[error("Expected a {expected} value, got {actual}")]
    WrongKind {
        expected: &'static str,
        actual: &'static str,
    },
}

/// Encoding tag for one attribute.
///
/// Integers are little-endian, matching the 16-bit DOS executables these
/// tables describe.  `StrZ` requires a NUL terminator somewhere within the
/// field; `StrFixed` treats the terminator as optional and reads to the end
/// of the field when none is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, serde::Serialize)]
pub enum AttrType {
    #[strum(serialize = "u8")]
    U8,
    #[strum(serialize = "u16le")]
    U16le,
    #[strum(serialize = "u32le")]
    U32le,
    #[strum(serialize = "s8")]
    I8,
    #[strum(serialize = "s16le")]
    I16le,
    #[strum(serialize = "s32le")]
    I32le,
    #[strum(serialize = "stringz")]
    StrZ(usize),
    #[strum(serialize = "string")]
    StrFixed(usize),
}

impl AttrType {
    /// Exact number of bytes this encoding occupies in the file.
    pub fn width(&self) -> usize {
        match self {
            AttrType::U8 | AttrType::I8 => 1,
            AttrType::U16le | AttrType::I16le => 2,
            AttrType::U32le | AttrType::I32le => 4,
            AttrType::StrZ(len) | AttrType::StrFixed(len) => *len,
        }
    }

    fn region<'a>(&self, content: &'a [u8], offset: usize) -> Result<&'a [u8], CodecError> {
        let len = self.width();
        if offset + len > content.len() {
            return Err(CodecError::OutOfBounds {
                offset,
                len,
                size: content.len(),
            });
        }
        Ok(&content[offset..offset + len])
    }

    /// Decode the value stored at `offset`.
    pub fn decode(&self, content: &[u8], offset: usize) -> Result<Value, CodecError> {
        let region = self.region(content, offset)?;
        let value = match self {
            AttrType::U8 => Value::Int(region[0] as i64),
            AttrType::U16le => Value::Int(u16::from_le_bytes([region[0], region[1]]) as i64),
            AttrType::U32le => Value::Int(u32::from_le_bytes(region.try_into().unwrap()) as i64),
            AttrType::I8 => Value::Int(region[0] as i8 as i64),
            AttrType::I16le => Value::Int(i16::from_le_bytes([region[0], region[1]]) as i64),
            AttrType::I32le => Value::Int(i32::from_le_bytes(region.try_into().unwrap()) as i64),
            AttrType::StrZ(len) => {
                let end = memchr::memchr(0, region).ok_or(CodecError::MissingTerminator {
                    offset,
                    len: *len,
                })?;
                Value::Str(decode_fixed_str(&region[..end]))
            }
            AttrType::StrFixed(_) => {
                let end = memchr::memchr(0, region).unwrap_or(region.len());
                Value::Str(decode_fixed_str(&region[..end]))
            }
        };
        Ok(value)
    }

    /// Encode `value` over the region at `offset`, leaving all other bytes
    /// alone.  String fields are NUL-padded to their full width.
    pub fn encode(
        &self,
        value: &Value,
        content: &mut [u8],
        offset: usize,
    ) -> Result<(), CodecError> {
        let len = self.width();
        if offset + len > content.len() {
            return Err(CodecError::OutOfBounds {
                offset,
                len,
                size: content.len(),
            });
        }
        match self {
            AttrType::U8 | AttrType::U16le | AttrType::U32le
            | AttrType::I8 | AttrType::I16le | AttrType::I32le => {
                let v = value.as_int().ok_or(CodecError::WrongKind {
                    expected: "integer",
                    actual: value.kind(),
                })?;
                let (lo, hi) = self.int_range();
                if v < lo || v > hi {
                    return Err(CodecError::IntOutOfRange {
                        value: v,
                        encoding: *self,
                    });
                }
                let bytes = (v as u32).to_le_bytes();
                content[offset..offset + len].copy_from_slice(&bytes[..len]);
            }
            AttrType::StrZ(max) | AttrType::StrFixed(max) => {
                let s = value.as_str().ok_or(CodecError::WrongKind {
                    expected: "string",
                    actual: value.kind(),
                })?;
                let encoded = encode_fixed_str(s)?;
                // StrZ reserves one byte for the terminator.
                let capacity = match self {
                    AttrType::StrZ(_) => max - 1,
                    _ => *max,
                };
                if encoded.len() > capacity {
                    return Err(CodecError::StringTooLong {
                        len: encoded.len(),
                        max: capacity,
                    });
                }
                let region = &mut content[offset..offset + len];
                region.fill(0);
                region[..encoded.len()].copy_from_slice(&encoded);
            }
        }
        Ok(())
    }

    fn int_range(&self) -> (i64, i64) {
        match self {
            AttrType::U8 => (u8::MIN as i64, u8::MAX as i64),
            AttrType::U16le => (u16::MIN as i64, u16::MAX as i64),
            AttrType::U32le => (u32::MIN as i64, u32::MAX as i64),
            AttrType::I8 => (i8::MIN as i64, i8::MAX as i64),
            AttrType::I16le => (i16::MIN as i64, i16::MAX as i64),
            AttrType::I32le => (i32::MIN as i64, i32::MAX as i64),
            _ => unreachable!("int_range called on a string encoding"),
        }
    }
}

/// Windows-1252 maps every byte to a character and back, so a decode/encode
/// pass over unmodified data is byte-lossless.
fn decode_fixed_str(bytes: &[u8]) -> String {
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
    text.into_owned()
}

fn encode_fixed_str(text: &str) -> Result<Vec<u8>, CodecError> {
    let (bytes, _, had_errors) = WINDOWS_1252.encode(text);
    if had_errors {
        return Err(CodecError::Unrepresentable);
    }
    Ok(bytes.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths() {
        assert_eq!(AttrType::U8.width(), 1);
        assert_eq!(AttrType::U16le.width(), 2);
        assert_eq!(AttrType::I32le.width(), 4);
        assert_eq!(AttrType::StrZ(12).width(), 12);
        assert_eq!(AttrType::StrFixed(3).width(), 3);
    }

    #[test]
    fn test_decode_integers() {
        let data = [0x34, 0x12, 0xFF, 0xFF];
        assert_eq!(AttrType::U16le.decode(&data, 0).unwrap(), Value::Int(0x1234));
        assert_eq!(AttrType::I16le.decode(&data, 2).unwrap(), Value::Int(-1));
        assert_eq!(AttrType::U8.decode(&data, 2).unwrap(), Value::Int(0xFF));
        assert_eq!(AttrType::I8.decode(&data, 2).unwrap(), Value::Int(-1));
    }

    #[test]
    fn test_decode_out_of_bounds() {
        let data = [0x00];
        assert!(matches!(
            AttrType::U16le.decode(&data, 0),
            Err(CodecError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_stringz_requires_terminator() {
        let data = *b"HELLO\0WORLD!";
        let v = AttrType::StrZ(12).decode(&data, 0).unwrap();
        assert_eq!(v, Value::Str("HELLO".into()));

        let unterminated = *b"HELLOWORLD!!";
        assert!(matches!(
            AttrType::StrZ(12).decode(&unterminated, 0),
            Err(CodecError::MissingTerminator { .. })
        ));
    }

    #[test]
    fn test_fixed_string_terminator_optional() {
        let data = *b"ABC";
        let v = AttrType::StrFixed(3).decode(&data, 0).unwrap();
        assert_eq!(v, Value::Str("ABC".into()));

        let padded = *b"AB\0";
        let v = AttrType::StrFixed(3).decode(&padded, 0).unwrap();
        assert_eq!(v, Value::Str("AB".into()));
    }

    #[test]
    fn test_encode_integer_bounds() {
        let mut buf = [0u8; 2];
        assert!(matches!(
            AttrType::U8.encode(&Value::Int(256), &mut buf, 0),
            Err(CodecError::IntOutOfRange { .. })
        ));
        AttrType::I16le.encode(&Value::Int(-2), &mut buf, 0).unwrap();
        assert_eq!(buf, [0xFE, 0xFF]);
    }

    #[test]
    fn test_encode_string_pads_with_nul() {
        let mut buf = *b"XXXXXXXX";
        AttrType::StrZ(8).encode(&Value::Str("AB".into()), &mut buf, 0).unwrap();
        assert_eq!(&buf, b"AB\0\0\0\0\0\0");
    }

    #[test]
    fn test_encode_stringz_reserves_terminator() {
        let mut buf = [0u8; 4];
        assert!(matches!(
            AttrType::StrZ(4).encode(&Value::Str("ABCD".into()), &mut buf, 0),
            Err(CodecError::StringTooLong { .. })
        ));
        AttrType::StrFixed(4)
            .encode(&Value::Str("ABCD".into()), &mut buf, 0)
            .unwrap();
        assert_eq!(&buf, b"ABCD");
    }

    #[test]
    fn test_high_bytes_round_trip() {
        // 0x81 has no printable Windows-1252 glyph but must still survive a
        // decode/encode cycle unchanged.
        let data = [0xC9, 0x81, 0xFF, 0x00];
        let v = AttrType::StrZ(4).decode(&data, 0).unwrap();
        let mut out = [0u8; 4];
        AttrType::StrZ(4).encode(&v, &mut out, 0).unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn test_wrong_kind() {
        let mut buf = [0u8; 2];
        assert!(matches!(
            AttrType::U16le.encode(&Value::Str("no".into()), &mut buf, 0),
            Err(CodecError::WrongKind { .. })
        ));
    }
}
