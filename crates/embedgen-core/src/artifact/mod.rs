//! Artifact assembly.
//!
//! Turns an ordered list of [`EncodedAsset`]s into the text of the generated
//! source file. Assembly is a pure function of the assets and the
//! [`Template`]; the registry keeps the order it is given.
//!
//! ## Generated surface
//!
//! Every target emits the same three pieces:
//!
//! 1. a header with the package/module identity and the record type
//!    (a display name and a byte payload)
//! 2. the registry, one record per asset
//! 3. a zero-argument helper returning the registry summary, computed from
//!    the registry each time it is called
//!
//! The helper's algorithm is mirrored by [`summary`] so the generator can
//! report what the artifact will return.

mod template;

use crate::encoding::EncodedAsset;
use crate::error::{Error, Result};
use std::fmt::Write as FmtWrite;
use std::fs;
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub use template::{escape_go, GoTemplate, RustTemplate, Template};

/// Separator between summary entries
pub const SUMMARY_SEPARATOR: &str = ", ";

/// Language of the generated artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Target {
    /// `package games` for the Go emulator
    #[default]
    Go,
    /// A Rust module with a `static` registry
    Rust,
}

impl Target {
    /// Returns the template for this target
    pub fn template(self) -> &'static dyn Template {
        match self {
            Target::Go => &GoTemplate,
            Target::Rust => &RustTemplate,
        }
    }

    /// Default artifact file name for this target
    pub fn file_name(self) -> &'static str {
        self.template().file_name()
    }

    /// Extension of the artifact, excluded from discovery for this target
    pub fn suffix(self) -> &'static str {
        match self {
            Target::Go => ".go",
            Target::Rust => ".rs",
        }
    }

    /// Short lowercase name
    pub fn as_str(self) -> &'static str {
        match self {
            Target::Go => "go",
            Target::Rust => "rust",
        }
    }
}

/// Renders the full artifact text for `assets`, in the order given
pub fn render(template: &dyn Template, assets: &[EncodedAsset]) -> Result<String> {
    let capacity = assets
        .iter()
        .map(|a| a.literal.len() + a.name.len() + 64)
        .sum::<usize>()
        + 1024;
    let mut output = String::with_capacity(capacity);
    render_to(&mut output, template, assets)?;
    Ok(output)
}

/// Renders the full artifact text into `w`
pub fn render_to(
    w: &mut dyn FmtWrite,
    template: &dyn Template,
    assets: &[EncodedAsset],
) -> std::fmt::Result {
    template.write_header(w)?;
    template.write_registry_open(w)?;
    for asset in assets {
        template.write_record(w, asset)?;
    }
    template.write_registry_close(w)?;
    template.write_helper(w)
}

/// `"0. a, 1. b, ..."` over `names`, in iteration order
///
/// This is the computation the generated helper performs at run time.
pub fn summary<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    names
        .into_iter()
        .enumerate()
        .map(|(i, name)| format!("{}. {}", i, name))
        .collect::<Vec<_>>()
        .join(SUMMARY_SEPARATOR)
}

/// A rendered artifact that has not been written yet
#[derive(Debug, Clone)]
pub struct Artifact {
    path: PathBuf,
    text: String,
    names: Vec<String>,
    payload_bytes: usize,
}

impl Artifact {
    /// Renders `assets` with `target` into an artifact destined for `path`
    pub fn assemble(
        path: impl Into<PathBuf>,
        target: Target,
        assets: &[EncodedAsset],
    ) -> Result<Self> {
        let path = path.into();
        let text = render(target.template(), assets)?;

        debug!(
            "Assembled {} record(s) for {} ({} bytes of text)",
            assets.len(),
            path.display(),
            text.len()
        );

        Ok(Self {
            path,
            text,
            names: assets.iter().map(|a| a.name.clone()).collect(),
            payload_bytes: assets.iter().map(|a| a.len).sum(),
        })
    }

    /// Destination path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Full artifact text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Registry names, in registry order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Total payload size across all records
    pub fn payload_bytes(&self) -> usize {
        self.payload_bytes
    }

    /// What the generated helper returns
    pub fn summary(&self) -> String {
        summary(self.names.iter().map(String::as_str))
    }

    /// Truncates the destination and writes the full text
    pub fn write(&self) -> Result<()> {
        let mut file = fs::File::create(&self.path)
            .map_err(|e| Error::destination_unwritable(&self.path, e))?;

        file.write_all(self.text.as_bytes())
            .map_err(|e| Error::destination_unwritable(&self.path, e))?;

        info!(
            "Wrote {} ({} record(s), {} payload bytes)",
            self.path.display(),
            self.names.len(),
            self.payload_bytes
        );
        Ok(())
    }
}
