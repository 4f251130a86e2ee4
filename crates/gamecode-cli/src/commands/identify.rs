//! Identify command implementation.
//!
//! Autodetects the format of a local file and, for each matching handler,
//! attempts a full extraction so the user can see which candidates actually
//! hold together.

use anyhow::Result;
use gamecode_core::FormatRegistry;
use owo_colors::OwoColorize;

use crate::storage;

pub fn run(registry: &FormatRegistry, target: &str) -> Result<()> {
    println!("Autodetecting file format...");
    let bundle = storage::read_main(target)?;
    let handlers = registry.find_handler(&bundle.main);

    println!("{} format handler(s) matched", handlers.len());
    if handlers.is_empty() {
        println!("No file format handlers were able to identify this file format, sorry.");
        return Ok(());
    }

    for handler in handlers {
        let md = handler.metadata();
        println!("\n>> Trying handler for {} ({})", md.id.bold(), md.title);

        let mut bundle = bundle.clone();
        if let Err(e) = storage::load_supps(handler, target, &mut bundle) {
            println!(" - Skipping format due to error loading additional files required:\n   {e}");
            continue;
        }

        match handler.extract(&bundle) {
            Ok(attributes) => {
                println!(
                    " - Handler reports executable contains {} attributes.",
                    attributes.len()
                );
            }
            Err(e) => println!(" - Handler failed to open file: {e}"),
        }
    }
    Ok(())
}
