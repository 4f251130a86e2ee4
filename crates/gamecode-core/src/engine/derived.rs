//! Derived fields synthesized from groups of raw fields.
//!
//! Some titles store a human-meaningful number as separate decimal digit
//! bytes.  A `DigitGroup` names the constituent digit attributes (most
//! significant first) and the composite attribute they merge into, and
//! provides the two passes that wrap the generic engine: `compose` after
//! extract, `decompose` before patch.

use crate::attr::{Attribute, AttributeMap, Value};
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct DigitGroup {
    pub id: String,
    pub desc: String,
    /// Raw digit attribute ids, most significant digit first.
    pub digit_ids: Vec<String>,
}

impl DigitGroup {
    pub fn new(
        id: impl Into<String>,
        desc: impl Into<String>,
        digit_ids: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            id: id.into(),
            desc: desc.into(),
            digit_ids: digit_ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Merge the digit attributes into one composite attribute, removing the
    /// digits from the map.
    pub fn compose(&self, attributes: &mut AttributeMap) -> Result<()> {
        let mut value: i64 = 0;
        for digit_id in &self.digit_ids {
            let attr = attributes
                .remove(digit_id)
                .ok_or_else(|| Error::Derived {
                    id: self.id.clone(),
                    reason: format!("constituent attribute \"{}\" missing", digit_id),
                })?;
            let digit = attr.value.as_int().ok_or_else(|| Error::Derived {
                id: self.id.clone(),
                reason: format!("constituent attribute \"{}\" is not an integer", digit_id),
            })?;
            value = value * 10 + digit;
        }
        attributes.insert(
            self.id.clone(),
            Attribute {
                id: self.id.clone(),
                value: Value::Int(value),
                value_type: None,
                desc: Some(self.desc.clone()),
                min: None,
                max: None,
            },
        );
        Ok(())
    }

    /// Materialise the digit attributes from the composite value so the
    /// generic patch pass can write them back at their original positions.
    /// A map without the composite is left alone.
    pub fn decompose(&self, attributes: &mut AttributeMap) -> Result<()> {
        let Some(attr) = attributes.remove(&self.id) else {
            return Ok(());
        };
        let total = attr.value.as_int().ok_or_else(|| Error::Derived {
            id: self.id.clone(),
            reason: "composite value is not an integer".to_string(),
        })?;
        let mut remaining = total;
        for digit_id in self.digit_ids.iter().rev() {
            attributes.insert(
                digit_id.clone(),
                Attribute {
                    id: digit_id.clone(),
                    value: Value::Int(remaining % 10),
                    value_type: None,
                    desc: None,
                    min: None,
                    max: None,
                },
            );
            remaining /= 10;
        }
        Ok(())
    }
}
