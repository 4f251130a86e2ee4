use thiserror::Error;

/// Errors owned by the command shell itself.
///
/// `Operations` covers routine user-facing failures (bad arguments, files
/// that cannot be read) and maps to exit code 2; `UnknownCommand` maps to
/// exit code 1.  Defects in handler tables are neither: they propagate with
/// full detail.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Operations(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),
}
