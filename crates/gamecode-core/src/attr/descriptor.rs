use serde::Serialize;

use crate::attr::AttrType;

/// Immutable schema entry for one field in an executable.
///
/// When `offset` is `None` the field starts wherever the previous field in
/// the table ended, so declaration order is meaningful.  `value_offset` is
/// added to the raw value on extract and subtracted again on patch, for
/// fields whose stored and logical representations differ by a constant.
/// `desc`, `value_type`, `min` and `max` are advisory metadata; the engine
/// never enforces them.
#[derive(Debug, Clone, Serialize)]
pub struct AttrDesc {
    pub id: &'static str,
    pub attr_type: AttrType,
    pub offset: Option<usize>,
    pub value_offset: Option<i64>,
    pub value_type: Option<&'static str>,
    pub desc: Option<&'static str>,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl AttrDesc {
    pub const fn new(id: &'static str, attr_type: AttrType) -> Self {
        Self {
            id,
            attr_type,
            offset: None,
            value_offset: None,
            value_type: None,
            desc: None,
            min: None,
            max: None,
        }
    }

    /// Absolute byte position of this field.
    pub const fn at(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Constant added to the stored value to produce the logical value.
    pub const fn value_offset(mut self, delta: i64) -> Self {
        self.value_offset = Some(delta);
        self
    }

    pub const fn value_type(mut self, value_type: &'static str) -> Self {
        self.value_type = Some(value_type);
        self
    }

    pub const fn desc(mut self, desc: &'static str) -> Self {
        self.desc = Some(desc);
        self
    }

    pub const fn range(mut self, min: i64, max: i64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }
}
