//! Registry of known format handlers and content-based dispatch.

use tracing::debug;

use crate::formats;
use crate::handler::{Confidence, FormatHandler};

pub struct FormatRegistry {
    handlers: Vec<Box<dyn FormatHandler>>,
}

impl FormatRegistry {
    /// Registry holding every built-in title handler, in detection order.
    pub fn new() -> Self {
        Self {
            handlers: formats::all(),
        }
    }

    /// Registry over an explicit handler list, used by tests and embedders.
    pub fn with_handlers(handlers: Vec<Box<dyn FormatHandler>>) -> Self {
        Self { handlers }
    }

    /// Look up a handler by its format id.
    pub fn get_handler(&self, id: &str) -> Option<&dyn FormatHandler> {
        self.handlers
            .iter()
            .map(Box::as_ref)
            .find(|h| h.metadata().id == id)
    }

    /// Autodetect by content.  A definite match short-circuits to exactly
    /// that handler; handlers reporting an ambiguous verdict accumulate as
    /// candidates.  The result may hold zero, one or several handlers, and
    /// the caller decides what those outcomes mean.
    pub fn find_handler(&self, content: &[u8]) -> Vec<&dyn FormatHandler> {
        let mut candidates = Vec::new();
        for handler in &self.handlers {
            let md = handler.metadata();
            debug!("Trying format handler {} ({})", md.id, md.title);
            match handler.identify(content) {
                Confidence::Match => return vec![handler.as_ref()],
                Confidence::NoMatch(reason) => {
                    debug!("{}: {}", md.id, reason);
                }
                Confidence::Ambiguous(reason) => {
                    debug!("{}: possible match: {}", md.id, reason);
                    candidates.push(handler.as_ref());
                }
            }
        }
        candidates
    }

    /// All registered handlers, for enumeration and help display.
    pub fn list_handlers(&self) -> impl Iterator<Item = &dyn FormatHandler> {
        self.handlers.iter().map(Box::as_ref)
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::AttributeMap;
    use crate::error::Result;
    use crate::handler::{ContentBundle, Metadata};

    struct Fixed {
        id: &'static str,
        verdict: fn() -> Confidence,
    }

    impl FormatHandler for Fixed {
        fn metadata(&self) -> Metadata {
            Metadata {
                id: self.id,
                title: "Fixture",
            }
        }

        fn identify(&self, _content: &[u8]) -> Confidence {
            (self.verdict)()
        }

        fn extract(&self, _bundle: &ContentBundle) -> Result<AttributeMap> {
            Ok(AttributeMap::new())
        }

        fn patch(&self, bundle: &ContentBundle, _attrs: &AttributeMap) -> Result<ContentBundle> {
            Ok(bundle.clone())
        }
    }

    fn no() -> Confidence {
        Confidence::NoMatch("wrong signature".into())
    }
    fn yes() -> Confidence {
        Confidence::Match
    }
    fn maybe() -> Confidence {
        Confidence::Ambiguous("plausible but unconfirmed".into())
    }

    fn registry(order: &[(&'static str, fn() -> Confidence)]) -> FormatRegistry {
        FormatRegistry::with_handlers(
            order
                .iter()
                .map(|&(id, verdict)| Box::new(Fixed { id, verdict }) as Box<dyn FormatHandler>)
                .collect(),
        )
    }

    #[test]
    fn test_definite_match_wins_regardless_of_order() {
        for order in [
            [("h1", no as fn() -> Confidence), ("h2", yes), ("h3", maybe)],
            [("h3", maybe as fn() -> Confidence), ("h1", no), ("h2", yes)],
        ] {
            let reg = registry(&order);
            let found = reg.find_handler(&[]);
            assert_eq!(found.len(), 1);
            assert_eq!(found[0].metadata().id, "h2");
        }
    }

    #[test]
    fn test_ambiguous_candidates_accumulate() {
        let reg = registry(&[("h1", no), ("h3", maybe), ("h4", maybe)]);
        let found = reg.find_handler(&[]);
        let ids: Vec<_> = found.iter().map(|h| h.metadata().id).collect();
        assert_eq!(ids, ["h3", "h4"]);
    }

    #[test]
    fn test_no_match_yields_empty() {
        let reg = registry(&[("h1", no), ("h2", no)]);
        assert!(reg.find_handler(&[]).is_empty());
    }

    #[test]
    fn test_get_handler_by_id() {
        let reg = registry(&[("h1", no), ("h2", yes)]);
        assert_eq!(reg.get_handler("h2").unwrap().metadata().id, "h2");
        assert!(reg.get_handler("missing").is_none());
    }

    #[test]
    fn test_builtin_ids_unique() {
        let reg = FormatRegistry::new();
        let mut ids: Vec<_> = reg.list_handlers().map(|h| h.metadata().id).collect();
        let total = ids.len();
        assert!(total >= 2);
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }
}
