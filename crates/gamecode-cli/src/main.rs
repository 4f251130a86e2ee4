mod commands;
mod error;
mod session;
mod shell;
mod storage;

use std::process::ExitCode;

use clap::Parser;
use gamecode_core::FormatRegistry;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

use crate::error::CliError;
use crate::shell::Shell;

/// Edit attributes embedded in game executables.
#[derive(Parser)]
#[command(name = "gamecode")]
#[command(about = "Edit attributes embedded in game executables")]
#[command(after_help = COMMAND_HELP)]
struct Args {
    /// List all available file formats
    #[arg(long)]
    formats: bool,

    /// Commands to run in sequence, e.g. `open dave.exe list`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    commands: Vec<String>,
}

const COMMAND_HELP: &str = "\
Commands:

  identify <file>
    Read local <file> and try to work out what executable format it is in.

  open [-f format] <file>
    Open the local <file> as an executable, autodetecting the format unless
    -f is given.  Use --formats for a list of possible values.

  list | ls | dir [--json]
    Show all attributes in the current executable.

  set -a <id> <value>
    Change one attribute's value.

  show <id>
    Print one attribute's raw value.

  save <file>
    Save any changed attributes back to <file>.

Examples:

  gamecode open dave.exe list
  gamecode open dave.exe set -a game.initial.lives 9 save dave-9.exe
";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.formats {
        list_formats();
        return ExitCode::SUCCESS;
    }

    if args.commands.is_empty() {
        println!("Use: gamecode --formats | [command1 [command2...]]");
        println!();
        println!("{}", COMMAND_HELP);
        return ExitCode::SUCCESS;
    }

    let mut shell = Shell::new(FormatRegistry::new());
    match shell.run(&args.commands) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => exit_code_for(e),
    }
}

/// Operational problems are reported plainly and exit 2; an unrecognized
/// command exits 1; anything else is a defect and surfaces with its full
/// error chain.
fn exit_code_for(e: anyhow::Error) -> ExitCode {
    match e.downcast_ref::<CliError>() {
        Some(CliError::Operations(msg)) => {
            eprintln!("{}", msg);
            ExitCode::from(2)
        }
        Some(CliError::UnknownCommand(_)) => {
            eprintln!("{}", e);
            ExitCode::from(1)
        }
        None => match e.downcast_ref::<gamecode_core::Error>() {
            Some(core) if core.is_operational() => {
                eprintln!("{}", core);
                ExitCode::from(2)
            }
            _ => {
                eprintln!("Error: {:?}", e);
                ExitCode::FAILURE
            }
        },
    }
}

fn list_formats() {
    let registry = FormatRegistry::new();
    for handler in registry.list_handlers() {
        let md = handler.metadata();
        println!("{}: {}", md.id.bold(), md.title);
    }
}
