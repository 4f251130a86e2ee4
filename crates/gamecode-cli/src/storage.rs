//! On-disk loading and persistence of content bundles.
//!
//! The handler decides which supplementary files a format needs and what
//! they are called; this module just moves bytes between those names and a
//! `ContentBundle`.  Any executable decompression would happen before the
//! main content enters the bundle; the engine only ever sees decompressed
//! bytes.

use std::fs;

use anyhow::Result;
use gamecode_core::{ContentBundle, FormatHandler};
use tracing::debug;

use crate::error::CliError;

/// Read the main file into a fresh bundle.
pub fn read_main(target: &str) -> Result<ContentBundle> {
    let main = fs::read(target)
        .map_err(|e| CliError::Operations(format!("Unable to read \"{}\": {}", target, e)))?;
    Ok(ContentBundle::new(main))
}

/// Resolve and read every supplementary file the handler expects.
pub fn load_supps(
    handler: &dyn FormatHandler,
    target: &str,
    bundle: &mut ContentBundle,
) -> Result<()> {
    let Some(supps) = handler.supps(target, &bundle.main)? else {
        return Ok(());
    };
    for (id, filename) in supps {
        debug!("Loading supplementary file {} ({})", filename, id);
        let content = fs::read(&filename).map_err(|e| {
            CliError::Operations(format!(
                "Unable to open supplementary file \"{}\": {}",
                filename, e
            ))
        })?;
        bundle.supps.insert(id, content);
    }
    Ok(())
}

/// Persist the main file and every supplementary buffer.  The files carry no
/// references to each other's final bytes, so write order does not matter;
/// any failure surfaces before the save is reported successful.
pub fn write_bundle(
    handler: &dyn FormatHandler,
    target: &str,
    bundle: &ContentBundle,
) -> Result<()> {
    if !bundle.supps.is_empty() {
        let supps = handler.supps(target, &bundle.main)?.unwrap_or_default();
        for (id, content) in &bundle.supps {
            let filename = supps.get(id).ok_or_else(|| {
                CliError::Operations(format!(
                    "Handler reports no filename for supplementary data \"{}\"",
                    id
                ))
            })?;
            debug!("Saving supplementary file {}", filename);
            fs::write(filename, content).map_err(|e| {
                CliError::Operations(format!("Unable to write \"{}\": {}", filename, e))
            })?;
        }
    }
    fs::write(target, &bundle.main)
        .map_err(|e| CliError::Operations(format!("Unable to write \"{}\": {}", target, e)))?;
    Ok(())
}
