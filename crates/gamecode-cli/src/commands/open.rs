//! Open command implementation.

use anyhow::Result;
use gamecode_core::FormatRegistry;

use crate::error::CliError;
use crate::session::Session;
use crate::storage;

pub fn run(registry: &FormatRegistry, format: Option<&str>, target: &str) -> Result<Session> {
    let mut bundle = storage::read_main(target)?;

    let handler = match format {
        Some(id) => registry
            .get_handler(id)
            .ok_or_else(|| CliError::Operations(format!("Invalid format code: {}", id)))?,
        None => {
            let handlers = registry.find_handler(&bundle.main);
            if handlers.is_empty() {
                return Err(
                    CliError::Operations("Unable to identify this executable format.".into())
                        .into(),
                );
            }
            if handlers.len() > 1 {
                eprintln!("This file format could not be unambiguously identified.  It could be:");
                for h in &handlers {
                    let md = h.metadata();
                    eprintln!(" * {} ({})", md.id, md.title);
                }
                return Err(CliError::Operations(
                    "open: please use the -f option to specify the format.".into(),
                )
                .into());
            }
            handlers[0]
        }
    };

    storage::load_supps(handler, target, &mut bundle)?;
    let attributes = handler.extract(&bundle)?;

    Ok(Session {
        format_id: handler.metadata().id.to_string(),
        bundle,
        attributes,
    })
}
