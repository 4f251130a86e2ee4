//! List command implementation.
//!
//! Attribute ids come out of a `BTreeMap`, so the listing order is
//! deterministic.

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::session::Session;

pub fn run(session: &Session, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&session.attributes)?);
        return Ok(());
    }

    for attr in session.attributes.values() {
        let desc = attr
            .desc
            .as_deref()
            .map(|d| format!("  // {}", d))
            .unwrap_or_default();
        println!("{}: \"{}\"{}", attr.id.bold(), attr.value, desc.dimmed());
    }
    Ok(())
}
