//! Table-backed handlers.
//!
//! A title whose fields are representable purely as a list of typed byte
//! regions implements `TableSpec` and gets the whole `FormatHandler`
//! capability set from the blanket impl below: identification from one
//! signature, extract/patch from the generic engine, and derived fields
//! through the digit-group passes.

use crate::attr::{AttrDesc, AttributeMap};
use crate::engine::{self, DigitGroup};
use crate::error::Result;
use crate::handler::{
    identify_by_signature, Confidence, ContentBundle, FormatHandler, Metadata, SuppMap,
};

pub trait TableSpec: Send + Sync {
    fn metadata(&self) -> Metadata;

    /// Offset and expected bytes used for autodetection.
    fn signature(&self) -> (usize, &'static [u8]);

    /// Ordered field table.  Declaration order is meaningful wherever a
    /// descriptor omits its offset.
    fn attributes(&self) -> Vec<AttrDesc>;

    /// Raw digit fields merged into composite attributes after extraction
    /// and split back out before patching.
    fn digit_groups(&self) -> Vec<DigitGroup> {
        Vec::new()
    }

    fn supps(&self, _name: &str, _content: &[u8]) -> Result<Option<SuppMap>> {
        Ok(None)
    }
}

impl<T: TableSpec> FormatHandler for T {
    fn metadata(&self) -> Metadata {
        TableSpec::metadata(self)
    }

    fn identify(&self, content: &[u8]) -> Confidence {
        let (offset, expected) = self.signature();
        identify_by_signature(content, offset, expected)
    }

    fn supps(&self, name: &str, content: &[u8]) -> Result<Option<SuppMap>> {
        TableSpec::supps(self, name, content)
    }

    fn extract(&self, bundle: &ContentBundle) -> Result<AttributeMap> {
        let mut attributes = engine::extract(&self.attributes(), &bundle.main)?;
        for group in self.digit_groups() {
            group.compose(&mut attributes)?;
        }
        Ok(attributes)
    }

    fn patch(&self, bundle: &ContentBundle, attributes: &AttributeMap) -> Result<ContentBundle> {
        let mut attributes = attributes.clone();
        for group in self.digit_groups() {
            group.decompose(&mut attributes)?;
        }
        let main = engine::patch(&self.attributes(), &bundle.main, &attributes)?;
        Ok(ContentBundle {
            main,
            supps: bundle.supps.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::{AttrType, Value};

    struct DigitTitle;

    impl TableSpec for DigitTitle {
        fn metadata(&self) -> Metadata {
            Metadata {
                id: "exe-digits",
                title: "Digit table fixture",
            }
        }

        fn signature(&self) -> (usize, &'static [u8]) {
            (0, b"DT")
        }

        fn attributes(&self) -> Vec<AttrDesc> {
            vec![
                AttrDesc::new("hsc.digit.1", AttrType::U8).at(0x08),
                AttrDesc::new("hsc.digit.2", AttrType::U8),
                AttrDesc::new("hsc.digit.3", AttrType::U8),
                AttrDesc::new("hsc.digit.4", AttrType::U8),
                AttrDesc::new("hsc.digit.5", AttrType::U8),
            ]
        }

        fn digit_groups(&self) -> Vec<DigitGroup> {
            vec![DigitGroup::new(
                "hsc.score",
                "Actual score for the high score entry.",
                ["hsc.digit.1", "hsc.digit.2", "hsc.digit.3", "hsc.digit.4", "hsc.digit.5"],
            )]
        }
    }

    fn fixture() -> ContentBundle {
        let mut main = vec![0u8; 0x10];
        main[0] = b'D';
        main[1] = b'T';
        main[0x08..0x0D].copy_from_slice(&[1, 0, 0, 0, 0]);
        ContentBundle::new(main)
    }

    #[test]
    fn test_extract_synthesizes_composite() {
        let attrs = FormatHandler::extract(&DigitTitle, &fixture()).unwrap();
        assert_eq!(attrs["hsc.score"].value, Value::Int(10000));
        assert!(!attrs.contains_key("hsc.digit.1"));
        assert!(!attrs.contains_key("hsc.digit.5"));
    }

    #[test]
    fn test_patch_decomposes_composite() {
        let bundle = fixture();
        let mut attrs = FormatHandler::extract(&DigitTitle, &bundle).unwrap();
        attrs.get_mut("hsc.score").unwrap().value = Value::Int(12345);
        let patched = FormatHandler::patch(&DigitTitle, &bundle, &attrs).unwrap();
        assert_eq!(&patched.main[0x08..0x0D], &[1, 2, 3, 4, 5]);
        // Everything outside the digit region is untouched.
        assert_eq!(&patched.main[..0x08], &bundle.main[..0x08]);
    }

    #[test]
    fn test_identify_uses_signature() {
        assert!(FormatHandler::identify(&DigitTitle, &fixture().main).is_match());
        assert!(!FormatHandler::identify(&DigitTitle, b"XX").is_match());
    }
}
