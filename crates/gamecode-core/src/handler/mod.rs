//! The capability contract every format handler satisfies.

mod table;

use std::collections::BTreeMap;

use crate::attr::AttributeMap;
use crate::error::Result;

pub use table::TableSpec;

/// Identification of one supported format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metadata {
    /// Unique identifier across the registry, e.g. `exe-ddave`.
    pub id: &'static str,
    /// User-facing title of the game.
    pub title: &'static str,
}

/// Tri-state verdict from format identification.
///
/// A mismatch is an expected outcome, never an error: `NoMatch` excludes the
/// handler, `Ambiguous` keeps it as a candidate without claiming the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confidence {
    Match,
    NoMatch(String),
    Ambiguous(String),
}

impl Confidence {
    pub fn is_match(&self) -> bool {
        matches!(self, Confidence::Match)
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Confidence::Match => None,
            Confidence::NoMatch(r) | Confidence::Ambiguous(r) => Some(r),
        }
    }
}

/// Supplementary identifier to expected filename.
pub type SuppMap = BTreeMap<String, String>;

/// The main file plus any supplementary files, as raw bytes.  Always holds
/// decompressed content; any executable unpacking happens before a bundle is
/// built.
#[derive(Debug, Clone)]
pub struct ContentBundle {
    pub main: Vec<u8>,
    pub supps: BTreeMap<String, Vec<u8>>,
}

impl ContentBundle {
    pub fn new(main: Vec<u8>) -> Self {
        Self {
            main,
            supps: BTreeMap::new(),
        }
    }
}

/// Capability set implemented once per supported title.
pub trait FormatHandler: Send + Sync {
    fn metadata(&self) -> Metadata;

    /// Content-based format check.  Implementations typically compare fixed
    /// bytes against a known signature and report the first mismatching byte.
    fn identify(&self, content: &[u8]) -> Confidence;

    /// Auxiliary files this format needs, keyed by a handler-chosen id, with
    /// the expected (case-insensitive) filename as the value.  Names the
    /// handler constructs are normalized to lowercase; path components echoed
    /// from `name` keep their case.
    fn supps(&self, _name: &str, _content: &[u8]) -> Result<Option<SuppMap>> {
        Ok(None)
    }

    /// Decode all known fields from the bundle.
    fn extract(&self, bundle: &ContentBundle) -> Result<AttributeMap>;

    /// Re-encode the provided values into the original bytes.  Byte regions
    /// not covered by any descriptor pass through untouched.
    fn patch(&self, bundle: &ContentBundle, attributes: &AttributeMap) -> Result<ContentBundle>;
}

/// Place a handler-constructed filename next to the main file.  The
/// directory part is echoed from the caller and keeps its spelling; only the
/// filename itself is handler-constructed (and so already normalized).
pub fn supp_sibling(name: &str, filename: &str) -> String {
    match std::path::Path::new(name).parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            dir.join(filename).to_string_lossy().into_owned()
        }
        _ => filename.to_string(),
    }
}

/// Compare `expected` bytes at `offset` against `content`.
///
/// Any mismatch yields `NoMatch` citing the offset, index and both byte
/// values; content too short to hold the signature is also a `NoMatch`.
pub fn identify_by_signature(content: &[u8], offset: usize, expected: &[u8]) -> Confidence {
    if offset + expected.len() > content.len() {
        return Confidence::NoMatch(format!(
            "Content too short ({} bytes) to hold signature at offset {:#x}.",
            content.len(),
            offset,
        ));
    }
    let actual = &content[offset..offset + expected.len()];
    for (i, (want, got)) in expected.iter().zip(actual).enumerate() {
        if want != got {
            return Confidence::NoMatch(format!(
                "Signature mismatch at offset {:#x}, index {} (expected {:#04x}, got {:#04x}).",
                offset, i, want, got,
            ));
        }
    }
    Confidence::Match
}
