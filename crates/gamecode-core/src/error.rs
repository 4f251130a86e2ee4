use thiserror::Error;

use crate::attr::CodecError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unknown format id: {0}")]
    UnknownFormat(String),

    #[error("Unable to identify the executable format")]
    UnidentifiedFormat,

    #[error("Format could not be unambiguously identified ({0} candidates)")]
    AmbiguousFormat(usize),

    #[error("Unknown attribute id: {0}")]
    UnknownAttribute(String),

    /// Two descriptors in one table share an id.  This is a defect in the
    /// format handler's table, never a property of the input file.
    #[error("Duplicate attribute id in table: {0}")]
    DuplicateAttribute(String),

    #[error("Failed to decode attribute \"{id}\": {source}")]
    Decode {
        id: String,
        #[source]
        source: CodecError,
    },

    #[error("Failed to encode attribute \"{id}\": {source}")]
    Encode {
        id: String,
        #[source]
        source: CodecError,
    },

    #[error("Derived field \"{id}\": {reason}")]
    Derived { id: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether this error is a routine user-facing condition (bad format id,
    /// failed autodetection, unknown attribute) as opposed to a defect in a
    /// handler table that should surface with full detail.
    pub fn is_operational(&self) -> bool {
        matches!(
            self,
            Error::UnknownFormat(_)
                | Error::UnidentifiedFormat
                | Error::AmbiguousFormat(_)
                | Error::UnknownAttribute(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operational_classification() {
        assert!(Error::UnknownFormat("exe-foo".into()).is_operational());
        assert!(Error::AmbiguousFormat(2).is_operational());
        assert!(!Error::DuplicateAttribute("game.lives".into()).is_operational());
    }
}
