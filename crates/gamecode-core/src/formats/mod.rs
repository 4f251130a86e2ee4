//! Per-title format handlers.
//!
//! Each handler is a static field table (plus the occasional derived-field
//! hook) layered over the generic engine.  The tables transcribe offsets
//! from reverse-engineering sessions and carry no logic of their own.

mod exe_ddave;
mod exe_nomad;

pub use exe_ddave::ExeDdave;
pub use exe_nomad::ExeNomad;

use crate::handler::FormatHandler;

/// All built-in handlers, in autodetection order.
pub fn all() -> Vec<Box<dyn FormatHandler>> {
    vec![Box::new(ExeDdave), Box::new(ExeNomad)]
}
