//! Set command implementation.

use anyhow::Result;
use gamecode_core::Value;

use crate::error::CliError;
use crate::session::Session;

/// Change one attribute's value in the in-memory map.  The new value is
/// parsed to match the kind of the existing one, so integer fields reject
/// non-numeric input here rather than at patch time.
pub fn run(session: &mut Session, id: &str, value: &str) -> Result<()> {
    let attr = session
        .attributes
        .get_mut(id)
        .ok_or_else(|| CliError::Operations(format!("set: unknown attribute id \"{}\"", id)))?;

    attr.value = match attr.value {
        Value::Int(_) => {
            let parsed = value.parse::<i64>().map_err(|_| {
                CliError::Operations(format!("set: \"{}\" is not a valid integer", value))
            })?;
            Value::Int(parsed)
        }
        Value::Str(_) => Value::Str(value.to_string()),
    };
    Ok(())
}
