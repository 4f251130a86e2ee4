//! Save command implementation.

use anyhow::Result;
use gamecode_core::FormatRegistry;
use tracing::info;

use crate::error::CliError;
use crate::session::Session;
use crate::storage;

/// Patch the edited attributes back into the content and persist it.
pub fn run(registry: &FormatRegistry, session: &Session, target: &str) -> Result<()> {
    let handler = registry.get_handler(&session.format_id).ok_or_else(|| {
        CliError::Operations(format!("save: invalid format code: {}", session.format_id))
    })?;

    info!("Saving to {} as {}", target, session.format_id);
    let patched = handler.patch(&session.bundle, &session.attributes)?;
    storage::write_bundle(handler, target, &patched)?;
    Ok(())
}
