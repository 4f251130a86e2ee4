//! Attribute schema: encodings, descriptors and extracted values.

mod descriptor;
mod encoding;
mod value;

pub use descriptor::AttrDesc;
pub use encoding::{AttrType, CodecError};
pub use value::{Attribute, AttributeMap, Value};
