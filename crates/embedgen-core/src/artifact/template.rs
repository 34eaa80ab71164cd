//! Artifact templates.
//!
//! A [`Template`] knows the fixed text of one target language. The
//! renderer drives it in a fixed order: header, registry open, one record
//! per asset, registry close, helper.

use crate::encoding::EncodedAsset;
use std::fmt::{Result, Write};

/// Fixed text for one artifact target.
///
/// Implementations must be stateless: rendering the same assets twice has
/// to produce identical text.
pub trait Template {
    /// Default artifact file name for this target
    fn file_name(&self) -> &'static str;

    /// Package/module declaration, imports and the record type
    fn write_header(&self, w: &mut dyn Write) -> Result;

    /// Opening of the registry literal
    fn write_registry_open(&self, w: &mut dyn Write) -> Result;

    /// One `{name, literal}` record block
    fn write_record(&self, w: &mut dyn Write, asset: &EncodedAsset) -> Result;

    /// Closing of the registry literal
    fn write_registry_close(&self, w: &mut dyn Write) -> Result;

    /// The summary helper over the registry
    fn write_helper(&self, w: &mut dyn Write) -> Result;
}

/// Go source, `package games`
#[derive(Debug, Clone, Copy, Default)]
pub struct GoTemplate;

impl Template for GoTemplate {
    fn file_name(&self) -> &'static str {
        "games.go"
    }

    fn write_header(&self, w: &mut dyn Write) -> Result {
        w.write_str(
            "// Code generated by embedgen. DO NOT EDIT.

package games

import (
\t\"fmt\"
\t\"strings\"
)

// Game is one embedded payload.
type Game struct {
\tName   string
\tBinary []byte
}

",
        )
    }

    fn write_registry_open(&self, w: &mut dyn Write) -> Result {
        w.write_str("// Games lists the embedded payloads in file name order.\nvar Games = []Game{\n")
    }

    fn write_record(&self, w: &mut dyn Write, asset: &EncodedAsset) -> Result {
        w.write_str("\t{\n")?;
        writeln!(w, "\t\tName:   \"{}\",", escape_go(&asset.name))?;
        writeln!(w, "\t\tBinary: []byte{{{}}},", asset.literal)?;
        w.write_str("\t},\n")
    }

    fn write_registry_close(&self, w: &mut dyn Write) -> Result {
        w.write_str("}\n\n")
    }

    fn write_helper(&self, w: &mut dyn Write) -> Result {
        w.write_str(
            "// AvailableGames returns \"0. NAME, 1. NAME, ...\" over Games.
func AvailableGames() string {
\tvar desc []string
\tfor i, g := range Games {
\t\tdesc = append(desc, fmt.Sprintf(\"%d. %s\", i, g.Name))
\t}
\treturn strings.Join(desc, \", \")
}
",
        )
    }
}

/// Rust source, meant to be pulled in with `include!` or as a module
#[derive(Debug, Clone, Copy, Default)]
pub struct RustTemplate;

impl Template for RustTemplate {
    fn file_name(&self) -> &'static str {
        "games.rs"
    }

    fn write_header(&self, w: &mut dyn Write) -> Result {
        w.write_str(
            "// @generated by embedgen. Do not edit.

/// One embedded payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Game {
    pub name: &'static str,
    pub binary: &'static [u8],
}

",
        )
    }

    fn write_registry_open(&self, w: &mut dyn Write) -> Result {
        w.write_str("/// Embedded payloads in file name order.\npub static GAMES: &[Game] = &[\n")
    }

    fn write_record(&self, w: &mut dyn Write, asset: &EncodedAsset) -> Result {
        w.write_str("    Game {\n")?;
        writeln!(w, "        name: \"{}\",", asset.name.escape_debug())?;
        writeln!(w, "        binary: &[{}],", asset.literal)?;
        w.write_str("    },\n")
    }

    fn write_registry_close(&self, w: &mut dyn Write) -> Result {
        w.write_str("];\n\n")
    }

    fn write_helper(&self, w: &mut dyn Write) -> Result {
        w.write_str(
            "/// Returns `\"0. NAME, 1. NAME, ...\"` over [`GAMES`].
pub fn available_games() -> String {
    GAMES
        .iter()
        .enumerate()
        .map(|(i, g)| format!(\"{}. {}\", i, g.name))
        .collect::<Vec<_>>()
        .join(\", \")
}
",
        )
    }
}

/// Escapes `s` for a Go interpreted string literal
pub fn escape_go(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            _ if c.is_ascii_control() => {
                result.push_str(&format!("\\x{:02x}", c as u8));
            }
            _ => result.push(c),
        }
    }
    result
}
