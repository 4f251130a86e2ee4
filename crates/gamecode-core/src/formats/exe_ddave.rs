//! Handler for the Dangerous Dave executable.
//!
//! The default high score entries store their scores as five separate
//! decimal digit bytes; those are exposed as one composite score attribute
//! per entry.

use crate::attr::{AttrDesc, AttrType};
use crate::engine::{self, DigitGroup};
use crate::error::{Error, Result};
use crate::handler::{supp_sibling, Metadata, SuppMap, TableSpec};

const FORMAT_ID: &str = "exe-ddave";

const SIGNATURE_OFFSET: usize = 0x1600;
const SIGNATURE: &[u8] = &[0x4F, 0x01, 0x75, 0x1F];

fn u8a(id: &'static str) -> AttrDesc {
    AttrDesc::new(id, AttrType::U8)
}

fn u16(id: &'static str) -> AttrDesc {
    AttrDesc::new(id, AttrType::U16le)
}

fn strz(id: &'static str, len: usize) -> AttrDesc {
    AttrDesc::new(id, AttrType::StrZ(len))
}

fn strf(id: &'static str, len: usize) -> AttrDesc {
    AttrDesc::new(id, AttrType::StrFixed(len))
}

pub struct ExeDdave;

impl TableSpec for ExeDdave {
    fn metadata(&self) -> Metadata {
        Metadata {
            id: FORMAT_ID,
            title: "Dangerous Dave",
        }
    }

    fn signature(&self) -> (usize, &'static [u8]) {
        (SIGNATURE_OFFSET, SIGNATURE)
    }

    fn attributes(&self) -> Vec<AttrDesc> {
        attributes()
    }

    fn digit_groups(&self) -> Vec<DigitGroup> {
        (1..=5)
            .map(|i| {
                DigitGroup::new(
                    format!("default.hsc.{i}.score"),
                    format!("Actual score for default high score entry {i}."),
                    (1..=5).map(|d| format!("default.hsc.{i}.digit.{d}")),
                )
            })
            .collect()
    }

    /// The EGA tileset filename is stored inside the executable; report it
    /// as a supplementary file expected next to the main file.
    fn supps(&self, name: &str, content: &[u8]) -> Result<Option<SuppMap>> {
        let table = attributes();
        let (offset, _) =
            engine::locate(&table, "filename.gfx.ega").expect("gfx filename missing from table");
        let value = AttrType::StrZ(12)
            .decode(content, offset)
            .map_err(|source| Error::Decode {
                id: "filename.gfx.ega".to_string(),
                source,
            })?;
        let filename = value.as_str().unwrap_or_default().to_lowercase();
        let mut supps = SuppMap::new();
        supps.insert("gfx".to_string(), supp_sibling(name, &filename));
        Ok(Some(supps))
    }
}

#[rustfmt::skip]
fn attributes() -> Vec<AttrDesc> {
    vec![
        u16("sfx.highscores.show").at(0x8A9).value_type("sfx")
            .desc("Sound effect when high scores window appears."),
        u16("sfx.highscores.entry").at(0x904).value_type("sfx")
            .desc("Sound effect played five times, once for each high score entry."),
        u16("sfx.collect.gun").at(0x41A3).value_type("sfx")
            .desc("Sound effect for collecting the gun."),
        u16("sfx.extralife").at(0xCE0).value_type("sfx")
            .desc("Sound effect for getting an extra life."),
        u16("ui.label.jetpack").at(0x41C4).value_type("pixels")
            .desc("Vertical coordinate of \"Jetpack\" (clipped to status area)."),
        u8a("game.endlevel.walkspeed").at(0x3D82).value_type("pixels")
            .desc("How quickly the player walks across the screen in the end level cutscene."),
        u16("game.endlevel.walkend").at(0x3D87).value_type("pixels")
            .desc("How far the player must walk across the screen in the end level cutscene."),
        u16("game.endlevel.walk.sndtimer1").at(0x3D6B)
            .desc("Divisor for the timer controlling how fast the walk sound plays in the end level cutscene."),
        u8a("game.endlevel.walk.sndtimer2").at(0x3D72)
            .desc("Comparison for the timer controlling how fast the walk sound plays in the end level cutscene."),
        u16("game.initial.lives").at(0x537F).value_type("lives")
            .desc("Number of lives the player starts the game with."),
        u16("game.initial.scoreL").at(0x5385)
            .desc("Initial score when starting a new game (low 16 bits)."),
        u16("game.initial.scoreH").at(0x538B)
            .desc("Initial score when starting a new game (high 16 bits)."),
        // Stored as 0..9, presented as 1..10.
        u16("game.initial.level").at(0x53A3).value_type("level").range(1, 10).value_offset(1)
            .desc("Starting level number for a new game."),
        u8a("scancode.f12").at(0x5724).value_type("scancode")
            .desc("Should be 0x58 to work properly but the game ships with 0x59, making it impossible to assign F12 to an action."),
        strz("filename.scores", 12).at(0x2577E).value_type("filename")
            .desc("Filename to save high scores to."),

        u8a("map.state.1").at(0x257E8).desc("Initial player state bitflags for level 1."),
        u8a("map.state.2").desc("Initial player state bitflags for level 2."),
        u8a("map.state.3").desc("Initial player state bitflags for level 3."),
        u8a("map.state.4").desc("Initial player state bitflags for level 4."),
        u8a("map.state.5").desc("Initial player state bitflags for level 5."),
        u8a("map.state.6").desc("Initial player state bitflags for level 6."),
        u8a("map.state.7").desc("Initial player state bitflags for level 7."),
        u8a("map.state.8").desc("Initial player state bitflags for level 8."),
        u8a("map.state.9").desc("Initial player state bitflags for level 9."),
        u8a("map.state.10").desc("Initial player state bitflags for level 10."),
        u16("map.startX.1").value_type("pixels").desc("Initial player X-coordinate for level 1."),
        u16("map.startX.2").value_type("pixels").desc("Initial player X-coordinate for level 2."),
        u16("map.startX.3").value_type("pixels").desc("Initial player X-coordinate for level 3."),
        u16("map.startX.4").value_type("pixels").desc("Initial player X-coordinate for level 4."),
        u16("map.startX.5").value_type("pixels").desc("Initial player X-coordinate for level 5."),
        u16("map.startX.6").value_type("pixels").desc("Initial player X-coordinate for level 6."),
        u16("map.startX.7").value_type("pixels").desc("Initial player X-coordinate for level 7."),
        u16("map.startX.8").value_type("pixels").desc("Initial player X-coordinate for level 8."),
        u16("map.startX.9").value_type("pixels").desc("Initial player X-coordinate for level 9."),
        u16("map.startX.10").value_type("pixels").desc("Initial player X-coordinate for level 10."),
        u16("map.startY.1").value_type("pixels").desc("Initial player Y-coordinate for level 1."),
        u16("map.startY.2").value_type("pixels").desc("Initial player Y-coordinate for level 2."),
        u16("map.startY.3").value_type("pixels").desc("Initial player Y-coordinate for level 3."),
        u16("map.startY.4").value_type("pixels").desc("Initial player Y-coordinate for level 4."),
        u16("map.startY.5").value_type("pixels").desc("Initial player Y-coordinate for level 5."),
        u16("map.startY.6").value_type("pixels").desc("Initial player Y-coordinate for level 6."),
        u16("map.startY.7").value_type("pixels").desc("Initial player Y-coordinate for level 7."),
        u16("map.startY.8").value_type("pixels").desc("Initial player Y-coordinate for level 8."),
        u16("map.startY.9").value_type("pixels").desc("Initial player Y-coordinate for level 9."),
        u16("map.startY.10").value_type("pixels").desc("Initial player Y-coordinate for level 10."),

        u16("map.startY.warp").at(0x1710).value_type("pixels")
            .desc("Initial player Y-coordinate for ALL warp zones."),
        u16("map.state.warp").at(0x1716)
            .desc("Initial player state bitflags for ALL warp zones."),

        u16("map.scrollX.1.warp").at(0x25862).value_type("tiles").desc("Initial horizontal scroll point for warp zone 1."),
        u16("map.scrollX.2.warp").value_type("tiles").desc("Initial horizontal scroll point for warp zone 2."),
        u16("map.scrollX.3.warp").value_type("tiles").desc("Initial horizontal scroll point for warp zone 3."),
        u16("map.scrollX.4.warp").value_type("tiles").desc("Initial horizontal scroll point for warp zone 4."),
        u16("map.scrollX.5.warp").value_type("tiles").desc("Initial horizontal scroll point for warp zone 5."),
        u16("map.scrollX.6.warp").value_type("tiles").desc("Initial horizontal scroll point for warp zone 6."),
        u16("map.scrollX.7.warp").value_type("tiles").desc("Initial horizontal scroll point for warp zone 7."),
        u16("map.scrollX.8.warp").value_type("tiles").desc("Initial horizontal scroll point for warp zone 8."),
        u16("map.scrollX.9.warp").value_type("tiles").desc("Initial horizontal scroll point for warp zone 9."),
        u16("map.scrollX.10.warp").value_type("tiles").desc("Initial horizontal scroll point for warp zone 10."),
        u16("map.startX.1.warp").value_type("pixels").desc("Initial player X-coordinate for warp zone 1."),
        u16("map.startX.2.warp").value_type("pixels").desc("Initial player X-coordinate for warp zone 2."),
        u16("map.startX.3.warp").value_type("pixels").desc("Initial player X-coordinate for warp zone 3."),
        u16("map.startX.4.warp").value_type("pixels").desc("Initial player X-coordinate for warp zone 4."),
        u16("map.startX.5.warp").value_type("pixels").desc("Initial player X-coordinate for warp zone 5."),
        u16("map.startX.6.warp").value_type("pixels").desc("Initial player X-coordinate for warp zone 6."),
        u16("map.startX.7.warp").value_type("pixels").desc("Initial player X-coordinate for warp zone 7."),
        u16("map.startX.8.warp").value_type("pixels").desc("Initial player X-coordinate for warp zone 8."),
        u16("map.startX.9.warp").value_type("pixels").desc("Initial player X-coordinate for warp zone 9."),
        u16("map.startX.10.warp").value_type("pixels").desc("Initial player X-coordinate for warp zone 10."),

        u16("item.1.tile").at(0x2590A).value_type("tileIndex").desc("Tile number of item 1 in map tileset."),
        u16("item.2.tile").value_type("tileIndex").desc("Tile number of item 2 in map tileset."),
        u16("item.3.tile").value_type("tileIndex").desc("Tile number of item 3 in map tileset."),
        u16("item.4.tile").value_type("tileIndex").desc("Tile number of item 4 in map tileset."),
        u16("item.5.tile").value_type("tileIndex").desc("Tile number of item 5 in map tileset."),
        u16("item.6.tile").value_type("tileIndex").desc("Tile number of item 6 in map tileset."),
        u16("item.7.tile").value_type("tileIndex").desc("Tile number of item 7 in map tileset."),
        u16("item.8.tile").value_type("tileIndex").desc("Tile number of item 8 in map tileset."),
        u16("item.9.tile").value_type("tileIndex").desc("Tile number of item 9 in map tileset."),
        u16("item.10.tile").value_type("tileIndex").desc("Tile number of item 10 in map tileset."),
        u16("item.1.points").desc("Points awarded by item 1."),
        u16("item.2.points").desc("Points awarded by item 2."),
        u16("item.3.points").desc("Points awarded by item 3."),
        u16("item.4.points").desc("Points awarded by item 4."),
        u16("item.5.points").desc("Points awarded by item 5."),
        u16("item.6.points").desc("Points awarded by item 6."),
        u16("item.7.points").desc("Points awarded by item 7."),
        u16("item.8.points").desc("Points awarded by item 8."),
        u16("item.9.points").desc("Points awarded by item 9."),
        u16("item.10.points").desc("Points awarded by item 10."),

        strz("ui.header.score", 6).at(0x25E9E),
        // The level shown on the title screen lives in the game's archive
        // files, not here.
        strz("msg.level.end.1", 35).at(0x25EEA),
        strz("msg.level.end.9", 35),
        strz("msg.level.end.10", 35),

        u8a("default.hsc.1.level").desc("Level number for default high score entry 1."),
        u8a("default.hsc.1.digit.1").desc("First digit in default high score entry 1."),
        u8a("default.hsc.1.digit.2").desc("Second digit in default high score entry 1."),
        u8a("default.hsc.1.digit.3").desc("Third digit in default high score entry 1."),
        u8a("default.hsc.1.digit.4").desc("Fourth digit in default high score entry 1."),
        u8a("default.hsc.1.digit.5").desc("Fifth digit in default high score entry 1."),
        strf("default.hsc.1.name", 3).desc("Player name in default high score entry 1."),
        u8a("default.hsc.2.level").desc("Level number for default high score entry 2."),
        u8a("default.hsc.2.digit.1").desc("First digit in default high score entry 2."),
        u8a("default.hsc.2.digit.2").desc("Second digit in default high score entry 2."),
        u8a("default.hsc.2.digit.3").desc("Third digit in default high score entry 2."),
        u8a("default.hsc.2.digit.4").desc("Fourth digit in default high score entry 2."),
        u8a("default.hsc.2.digit.5").desc("Fifth digit in default high score entry 2."),
        strf("default.hsc.2.name", 3).desc("Player name in default high score entry 2."),
        u8a("default.hsc.3.level").desc("Level number for default high score entry 3."),
        u8a("default.hsc.3.digit.1").desc("First digit in default high score entry 3."),
        u8a("default.hsc.3.digit.2").desc("Second digit in default high score entry 3."),
        u8a("default.hsc.3.digit.3").desc("Third digit in default high score entry 3."),
        u8a("default.hsc.3.digit.4").desc("Fourth digit in default high score entry 3."),
        u8a("default.hsc.3.digit.5").desc("Fifth digit in default high score entry 3."),
        strf("default.hsc.3.name", 3).desc("Player name in default high score entry 3."),
        u8a("default.hsc.4.level").desc("Level number for default high score entry 4."),
        u8a("default.hsc.4.digit.1").desc("First digit in default high score entry 4."),
        u8a("default.hsc.4.digit.2").desc("Second digit in default high score entry 4."),
        u8a("default.hsc.4.digit.3").desc("Third digit in default high score entry 4."),
        u8a("default.hsc.4.digit.4").desc("Fourth digit in default high score entry 4."),
        u8a("default.hsc.4.digit.5").desc("Fifth digit in default high score entry 4."),
        strf("default.hsc.4.name", 3).desc("Player name in default high score entry 4."),
        u8a("default.hsc.5.level").desc("Level number for default high score entry 5."),
        u8a("default.hsc.5.digit.1").desc("First digit in default high score entry 5."),
        u8a("default.hsc.5.digit.2").desc("Second digit in default high score entry 5."),
        u8a("default.hsc.5.digit.3").desc("Third digit in default high score entry 5."),
        u8a("default.hsc.5.digit.4").desc("Fourth digit in default high score entry 5."),
        u8a("default.hsc.5.digit.5").desc("Fifth digit in default high score entry 5."),
        strf("default.hsc.5.name", 3).desc("Player name in default high score entry 5."),

        strz("msg.hsc", 22),
        strz("msg.gameover", 10),
        strz("msg.hsc.header", 55),
        strz("msg.hsc.entry.eol", 4)
            .desc("Printed after each high score entry to go to the next line ready for the next entry."),
        strz("msg.restart", 24),

        strz("msg.help.1.1", 26),
        strz("msg.help.1.2", 24),
        strz("msg.help.1.3", 25),
        strz("msg.help.1.4", 20),
        strz("msg.help.1.5", 25),
        strz("msg.help.1.6", 26),
        strz("msg.help.1.7", 16),
        strz("msg.help.1.8", 12),
        strz("msg.help.1.9", 21),
        strz("msg.help.1.10", 20),
        strz("msg.help.1.11", 18),
        strz("msg.help.1.12", 26),
        strz("msg.help.1.13", 22),
        strz("msg.help.2.1", 25),
        strz("msg.help.2.2", 28),
        strz("msg.help.2.3", 27),
        strz("msg.help.2.4", 28),
        strz("msg.help.2.5", 28),
        strz("msg.help.2.6", 24),
        strz("msg.help.2.7", 29),
        strz("msg.help.2.8", 29),
        strz("msg.help.2.9", 29),
        strz("msg.help.2.10", 27),
        strz("msg.help.2.11", 29),
        strz("msg.help.2.12", 29),
        strz("msg.help.2.13", 29),
        strz("msg.help.2.14", 18),
        strz("msg.help.2.15", 22),
        strz("msg.help.3.1", 25),
        strz("msg.help.3.2", 28),
        strz("msg.help.3.3", 29),
        strz("msg.help.3.4", 28),
        strz("msg.help.3.5", 29),
        strz("msg.help.3.6", 30),
        strz("msg.help.3.7", 30),
        strz("msg.help.3.8", 27),
        strz("msg.help.3.9", 15),
        strz("msg.help.3.10", 27),
        strz("msg.help.3.11", 29),
        strz("msg.help.3.12", 28),
        strz("msg.help.3.13", 17),
        strz("msg.help.3.14", 20),
        strz("msg.quit", 16),
        strz("msg.pause", 23),
        strz("filename.gfx.ega", 12).value_type("filename"),
        strz("msg.title.1", 22),
        strz("msg.title.2", 27),
        strz("msg.title.3", 26),
    ]
}
