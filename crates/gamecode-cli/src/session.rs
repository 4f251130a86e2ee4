use gamecode_core::{AttributeMap, ContentBundle};

/// State carried between chained commands: one open/edit/save cycle.
pub struct Session {
    /// Format id the file was opened as; `save` reuses it.
    pub format_id: String,
    pub bundle: ContentBundle,
    pub attributes: AttributeMap,
}
