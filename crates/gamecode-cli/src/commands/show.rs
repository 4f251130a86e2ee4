//! Show command implementation.

use anyhow::Result;

use crate::error::CliError;
use crate::session::Session;

/// Print one attribute's raw value.
pub fn run(session: &Session, id: &str) -> Result<()> {
    let attr = session
        .attributes
        .get(id)
        .ok_or_else(|| CliError::Operations(format!("show: unknown attribute id \"{}\"", id)))?;
    println!("{}", attr.value);
    Ok(())
}
