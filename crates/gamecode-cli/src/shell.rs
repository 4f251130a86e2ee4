//! Chained-command sequencer.
//!
//! One invocation runs several commands in order against a shared session,
//! e.g. `gamecode open dave.exe set -a game.initial.lives 9 save dave.exe`.
//! Each command pulls its own arguments from the word stream.

use std::iter::Peekable;
use std::slice::Iter;

use anyhow::Result;

use crate::commands;
use crate::error::CliError;
use crate::session::Session;
use gamecode_core::FormatRegistry;

pub struct Shell {
    registry: FormatRegistry,
    session: Option<Session>,
}

impl Shell {
    pub fn new(registry: FormatRegistry) -> Self {
        Self {
            registry,
            session: None,
        }
    }

    pub fn run(&mut self, words: &[String]) -> Result<()> {
        let mut words = words.iter().peekable();
        while let Some(command) = words.next() {
            match command.as_str() {
                "identify" => {
                    let target = require(&mut words, "identify", "filename")?;
                    commands::identify::run(&self.registry, &target)?;
                }
                "open" => {
                    let format = take_flag_value(&mut words, "-f", "open")?;
                    let target = require(&mut words, "open", "filename")?;
                    self.session = Some(commands::open::run(
                        &self.registry,
                        format.as_deref(),
                        &target,
                    )?);
                }
                "list" | "ls" | "dir" => {
                    let json = take_flag(&mut words, "--json");
                    commands::list::run(self.session()?, json)?;
                }
                "set" => {
                    if !take_flag(&mut words, "-a") {
                        return Err(CliError::Operations(
                            "set: missing -a <id> <value> arguments".into(),
                        )
                        .into());
                    }
                    let id = require(&mut words, "set", "attribute id")?;
                    let value = require(&mut words, "set", "value")?;
                    commands::set::run(self.session()?, &id, &value)?;
                }
                "show" => {
                    let id = require(&mut words, "show", "attribute id")?;
                    commands::show::run(self.session()?, &id)?;
                }
                "save" => {
                    let target = require(&mut words, "save", "filename")?;
                    let session = self.session.as_ref().ok_or_else(|| {
                        CliError::Operations("No file open (use the open command first)".into())
                    })?;
                    commands::save::run(&self.registry, session, &target)?;
                }
                other => return Err(CliError::UnknownCommand(other.to_string()).into()),
            }
        }
        Ok(())
    }

    fn session(&mut self) -> Result<&mut Session> {
        self.session.as_mut().ok_or_else(|| {
            CliError::Operations("No file open (use the open command first)".into()).into()
        })
    }
}

fn require(words: &mut Peekable<Iter<'_, String>>, command: &str, what: &str) -> Result<String> {
    words
        .next()
        .cloned()
        .ok_or_else(|| CliError::Operations(format!("{}: missing {}", command, what)).into())
}

fn take_flag(words: &mut Peekable<Iter<'_, String>>, flag: &str) -> bool {
    if words.peek().is_some_and(|w| w.as_str() == flag) {
        words.next();
        return true;
    }
    false
}

fn take_flag_value(
    words: &mut Peekable<Iter<'_, String>>,
    flag: &str,
    command: &str,
) -> Result<Option<String>> {
    if !take_flag(words, flag) {
        return Ok(None);
    }
    Ok(Some(require(words, command, &format!("{} value", flag))?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    // Minimal Nomad-shaped content: version signature plus the config and
    // gametext filename fields.
    fn nomad_fixture() -> Vec<u8> {
        let mut main = vec![0u8; 0x33000];
        // The "1.01" version signature sits inside the startup banner string.
        let banner = b"Nomad v1.01 Mar 14 1994 17:55:12\0";
        main[0x3023A..0x3023A + banner.len()].copy_from_slice(banner);
        main[0x31B34..0x31B3E].copy_from_slice(b"nomad.cfg\0");
        main[0x31BD8..0x31BE5].copy_from_slice(b"GAMETEXT.TXT\0");
        main
    }

    fn shell() -> Shell {
        Shell::new(FormatRegistry::new())
    }

    fn words(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_open_set_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let exe = dir.path().join("nomad.exe");
        fs::write(&exe, nomad_fixture()).unwrap();
        // The handler expects the gametext file next to the executable.
        fs::write(dir.path().join("gametext.txt"), b"text").unwrap();

        let out = dir.path().join("patched.exe");
        let exe = exe.to_string_lossy().into_owned();
        let out_str = out.to_string_lossy().into_owned();
        shell()
            .run(&words(&[
                "open",
                &exe,
                "set",
                "-a",
                "planet.orbit-distance.multiplier.common",
                "5",
                "save",
                &out_str,
            ]))
            .unwrap();

        let patched = fs::read(&out).unwrap();
        assert_eq!(patched[0x19DF5], 5);
        // Only the edited field differs from the original.
        let mut expected = nomad_fixture();
        expected[0x19DF5] = 5;
        assert_eq!(patched, expected);
    }

    #[test]
    fn test_open_with_explicit_format() {
        let dir = tempfile::tempdir().unwrap();
        let exe = dir.path().join("nomad.exe");
        fs::write(&exe, nomad_fixture()).unwrap();
        fs::write(dir.path().join("gametext.txt"), b"").unwrap();

        let exe = exe.to_string_lossy().into_owned();
        shell()
            .run(&words(&["open", "-f", "exe-nomad", &exe, "ls"]))
            .unwrap();
    }

    #[test]
    fn test_unknown_command() {
        let err = shell().run(&words(&["frobnicate"])).unwrap_err();
        match err.downcast_ref::<CliError>() {
            Some(CliError::UnknownCommand(cmd)) => assert_eq!(cmd, "frobnicate"),
            other => panic!("expected unknown command error, got {:?}", other),
        }
    }

    #[test]
    fn test_list_without_open_is_operational() {
        let err = shell().run(&words(&["list"])).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::Operations(_))
        ));
    }

    #[test]
    fn test_open_missing_supp_file() {
        let dir = tempfile::tempdir().unwrap();
        let exe = dir.path().join("nomad.exe");
        fs::write(&exe, nomad_fixture()).unwrap();
        // No gametext.txt on disk.

        let exe = exe.to_string_lossy().into_owned();
        let err = shell().run(&words(&["open", &exe])).unwrap_err();
        match err.downcast_ref::<CliError>() {
            Some(CliError::Operations(msg)) => assert!(msg.contains("gametext.txt")),
            other => panic!("expected operational error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_format_code() {
        let dir = tempfile::tempdir().unwrap();
        let exe = dir.path().join("x.exe");
        fs::write(&exe, [0u8; 16]).unwrap();
        let exe = exe.to_string_lossy().into_owned();
        let err = shell()
            .run(&words(&["open", "-f", "exe-bogus", &exe]))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::Operations(_))
        ));
    }
}
