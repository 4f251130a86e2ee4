//! CLI command implementations.
//!
//! Each command is one `run` function; the shell sequences them over a
//! shared session.

pub mod identify;
pub mod list;
pub mod open;
pub mod save;
pub mod set;
pub mod show;
