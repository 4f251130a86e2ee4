//! Handler for the Nomad executable.
//!
//! Only v1.01 is supported; the earlier v1.00 lays its data out differently.

use crate::attr::{AttrDesc, AttrType};
use crate::error::{Error, Result};
use crate::handler::{supp_sibling, Metadata, SuppMap, TableSpec};

const FORMAT_ID: &str = "exe-nomad";

// The "1.01" version string inside the startup banner.
const SIGNATURE_OFFSET: usize = 0x30241;
const SIGNATURE: &[u8] = &[0x31, 0x2E, 0x30, 0x31];

const GAMETEXT_OFFSET: usize = 0x31BD8;
const GAMETEXT_LEN: usize = 13;

fn u16(id: &'static str) -> AttrDesc {
    AttrDesc::new(id, AttrType::U16le)
}

fn s16(id: &'static str) -> AttrDesc {
    AttrDesc::new(id, AttrType::I16le)
}

fn strz(id: &'static str, len: usize) -> AttrDesc {
    AttrDesc::new(id, AttrType::StrZ(len))
}

pub struct ExeNomad;

impl TableSpec for ExeNomad {
    fn metadata(&self) -> Metadata {
        Metadata {
            id: FORMAT_ID,
            title: "Nomad",
        }
    }

    fn signature(&self) -> (usize, &'static [u8]) {
        (SIGNATURE_OFFSET, SIGNATURE)
    }

    fn attributes(&self) -> Vec<AttrDesc> {
        attributes()
    }

    /// The game-text filename is stored in the executable; expect that file
    /// alongside the main one.
    fn supps(&self, name: &str, content: &[u8]) -> Result<Option<SuppMap>> {
        let value = AttrType::StrZ(GAMETEXT_LEN)
            .decode(content, GAMETEXT_OFFSET)
            .map_err(|source| Error::Decode {
                id: "filename.gametext".to_string(),
                source,
            })?;
        let filename = value.as_str().unwrap_or_default().to_lowercase();
        let mut supps = SuppMap::new();
        supps.insert("gametext".to_string(), supp_sibling(name, &filename));
        Ok(Some(supps))
    }
}

#[rustfmt::skip]
fn attributes() -> Vec<AttrDesc> {
    vec![
        u16("planet.orbit-distance.multiplier.common").at(0x19DF5)
            .desc("Multiplier for the player's apparent orbital distance above most planets."),
        u16("planet.orbit-distance.multiplier.losten").at(0x19DFD)
            .desc("Multiplier for the player's apparent orbital distance above the planet Losten."),
        s16("planet.rotation-per-frame.second-harmony").at(0x19F7D)
            .desc("Number of angular steps through which the starbase Second Harmony rotates per frame. Negative numbers reverse the direction."),

        strz("text.intro.subtitles.0", 80).at(0x23DD0).desc("Introductory briefing, first subtitle"),
        strz("text.intro.subtitles.1", 64).at(0x23E20).desc("Introductory briefing, second subtitle"),
        strz("text.intro.subtitles.2", 80).at(0x23E60).desc("Introductory briefing, third subtitle"),
        strz("text.intro.subtitles.3", 128).at(0x23EB0).desc("Introductory briefing, fourth subtitle"),
        strz("text.intro.subtitles.4", 48).at(0x23F30).desc("Introductory briefing, fifth subtitle"),
        strz("text.intro.subtitles.5", 128).at(0x23F60).desc("Introductory briefing, sixth subtitle"),
        strz("text.intro.subtitles.6", 64).at(0x23FE0).desc("Introductory briefing, seventh subtitle"),
        strz("text.intro.subtitles.7", 48).at(0x24020).desc("Introductory briefing, eighth subtitle"),
        strz("text.intro.oesi-msg", 53).at(0x317EE).desc("Introductory briefing, attention banner for OESI message"),
        strz("text.banner", 49).at(0x3023A).desc("Version and timestamp startup banner"),
        AttrDesc::new("text.log.header", AttrType::StrFixed(18)).at(0x32CD1)
            .desc("Header line for in-game log; CRLF will be automatically appended"),

        strz("filename.cfg", 10).at(0x31B34).value_type("filename").desc("Config filename"),
        strz("filename.save.pattern", 6).at(0x30ADE).value_type("filename").desc("Filename pattern for saved games"),
        strz("filename.font.large", 11).at(0x31BC2).value_type("filename").desc("Large font filename"),
        strz("filename.font.small", 11).at(0x31BCD).value_type("filename").desc("Small font filename"),
        strz("filename.gametext", 13).at(0x31BD8).value_type("filename").desc("Gametext filename"),

        strz("filename.3dmodel.intro-snowfield", 11).at(0x3195A)
            .desc("Filename of 3D ship model shown crashing into snow during intro sequence"),
        strz("filename.3dmodel.intro-earthscape", 11).at(0x3135B)
            .desc("Filename of 3D ship model shown departing Earth during intro sequence"),
        strz("filename.3dmodel.player-travel", 11).at(0x32A11)
            .desc("Filename of 3D ship model shown during player travel sequence"),

        strz("filename.dat.converse", 13).at(0x31AFE).desc("CONVERSE.DAT filename"),
        strz("filename.dat.test", 9).at(0x31B0B).desc("TEST.DAT filename"),
        strz("filename.dat.anim", 9).at(0x31B14).desc("ANIM.DAT filename"),
        strz("filename.dat.samples", 12).at(0x31B1D).desc("SAMPLES.DAT filename"),
        strz("filename.dat.invent", 11).at(0x31B29).desc("INVENT.DAT filename"),
    ]
}
