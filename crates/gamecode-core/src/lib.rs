//! # gamecode-core
//!
//! Schema-driven editing of values embedded at fixed byte offsets inside
//! game executables.
//!
//! This crate provides:
//! - Attribute descriptors: declarative per-title field tables
//! - A table-driven engine turning those tables into extract/patch passes
//! - The format handler contract and built-in per-title handlers
//! - A registry with content-based format autodetection
//!
//! The engine always operates on already-decompressed bytes; unpacking a
//! compressed executable happens before content reaches this crate.

pub mod attr;
pub mod engine;
pub mod error;
pub mod formats;
pub mod handler;
pub mod registry;

pub use attr::{AttrDesc, AttrType, Attribute, AttributeMap, CodecError, Value};
pub use engine::DigitGroup;
pub use error::{Error, Result};
pub use handler::{
    identify_by_signature, Confidence, ContentBundle, FormatHandler, Metadata, SuppMap, TableSpec,
};
pub use registry::FormatRegistry;
