//! Payload discovery.
//!
//! Lists the entries of a single directory, orders them by raw file name
//! and drops every entry the [`SuffixFilter`] or an exact-name exclusion
//! rejects. The result is the
//! ordered candidate list every later stage works from.
//!
//! Only the top level is listed. Subdirectories are not descended into; by
//! default they are still reported as candidates and fail when read, unless
//! [`DiscoveryConfig::skip_non_regular`] is set.

mod filter;

use crate::error::{Error, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

pub use filter::{SuffixFilter, GENERATOR_SOURCE_SUFFIX};

/// A directory entry that survived the exclusion filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// File name, used verbatim as the asset's display name
    pub name: String,
    /// Full path to the entry
    pub path: PathBuf,
}

impl Candidate {
    /// Creates a new candidate
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Reads the candidate's full content
    pub fn read(&self) -> Result<Vec<u8>> {
        fs::read(&self.path).map_err(|e| Error::payload_unreadable(&self.path, e))
    }
}

/// Configuration for discovery
#[derive(Debug, Clone, Default)]
pub struct DiscoveryConfig {
    /// Names ending with any of these suffixes are skipped
    pub filter: SuffixFilter,
    /// Names skipped only on an exact match
    pub excluded_names: Vec<String>,
    /// Skip entries that are not regular files instead of failing on read
    pub skip_non_regular: bool,
}

impl DiscoveryConfig {
    /// Creates a new config with the generator source suffix and no other exclusions
    pub fn new() -> Self {
        Self::default()
    }

    /// Excludes names ending with `suffix` in addition to the reserved ones
    pub fn exclude_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.filter.push(suffix);
        self
    }

    /// Excludes the entry named exactly `name`
    pub fn exclude_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.excluded_names.contains(&name) {
            self.excluded_names.push(name);
        }
        self
    }

    /// Returns true if `name` is dropped by a suffix or an exact-name exclusion
    pub fn excludes(&self, name: &str) -> bool {
        self.filter.excludes(name) || self.excluded_names.iter().any(|n| n == name)
    }

    /// Sets whether non-regular entries are skipped
    pub fn skip_non_regular(mut self, skip: bool) -> Self {
        self.skip_non_regular = skip;
        self
    }
}

/// Lists payload candidates in a directory
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    config: DiscoveryConfig,
}

impl Discovery {
    /// Creates a new discovery with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new discovery with custom configuration
    pub fn with_config(config: DiscoveryConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration
    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// Lists the candidates in `dir`, sorted by raw file name
    pub fn discover(&self, dir: impl AsRef<Path>) -> Result<Vec<Candidate>> {
        let dir = dir.as_ref();

        let metadata = fs::metadata(dir).map_err(|e| Error::directory_unavailable(dir, e))?;
        if !metadata.is_dir() {
            return Err(Error::directory_unavailable(
                dir,
                io::Error::new(io::ErrorKind::Other, "not a directory"),
            ));
        }

        debug!("Listing {}", dir.display());

        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name();

        let mut candidates = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf());
                if e.depth() == 0 {
                    Error::directory_unavailable(path, io::Error::from(e))
                } else {
                    Error::payload_unreadable(path, io::Error::from(e))
                }
            })?;

            let Some(name) = entry.file_name().to_str() else {
                return Err(Error::invalid_file_name(entry.path()));
            };

            if self.config.excludes(name) {
                trace!("Excluded: {}", name);
                continue;
            }

            if self.config.skip_non_regular && !entry.file_type().is_file() {
                trace!("Skipping non-regular entry: {}", name);
                continue;
            }

            trace!("Candidate: {}", name);
            candidates.push(Candidate::new(name, entry.path()));
        }

        debug!("Discovered {} candidate(s) in {}", candidates.len(), dir.display());
        Ok(candidates)
    }
}

/// Lists the candidates in `dir` with the default configuration
pub fn discover(dir: impl AsRef<Path>) -> Result<Vec<Candidate>> {
    Discovery::new().discover(dir)
}
