//! The generation pipeline: discovery, encoding, assembly, write.
//!
//! Every payload is read before anything is written. A failure anywhere
//! before [`Artifact::write`] leaves the previous artifact untouched.

use crate::artifact::{Artifact, Target};
use crate::discovery::{Discovery, DiscoveryConfig};
use crate::encoding::EncodedAsset;
use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration for a generation run
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Directory holding the payloads; the artifact is written here too
    pub source_dir: PathBuf,
    /// Artifact language
    pub target: Target,
    /// Artifact file name; defaults to the target's file name
    pub output_name: Option<String>,
    /// Discovery settings
    pub discovery: DiscoveryConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("."),
            target: Target::default(),
            output_name: None,
            discovery: DiscoveryConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Creates a config for `source_dir` with default values
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            ..Self::default()
        }
    }

    /// Sets the artifact target
    pub fn target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    /// Overrides the artifact file name
    pub fn output_name(mut self, name: impl Into<String>) -> Self {
        self.output_name = Some(name.into());
        self
    }

    /// Sets the discovery settings
    pub fn discovery(mut self, discovery: DiscoveryConfig) -> Self {
        self.discovery = discovery;
        self
    }

    /// Artifact file name in effect
    pub fn artifact_name(&self) -> &str {
        self.output_name
            .as_deref()
            .unwrap_or_else(|| self.target.file_name())
    }
}

/// Runs the pipeline for one source directory
#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig,
    discovery: Discovery,
}

impl Generator {
    /// Creates a generator
    ///
    /// Discovery additionally skips the target's artifact suffix and the
    /// artifact's exact file name, so a previous run is never embedded.
    pub fn new(config: GeneratorConfig) -> Self {
        let discovery_config = config
            .discovery
            .clone()
            .exclude_suffix(config.target.suffix())
            .exclude_name(config.artifact_name());

        Self {
            discovery: Discovery::with_config(discovery_config),
            config,
        }
    }

    /// Returns the configuration
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Where the artifact is written
    pub fn output_path(&self) -> PathBuf {
        self.config.source_dir.join(self.config.artifact_name())
    }

    /// Source directory
    pub fn source_dir(&self) -> &Path {
        &self.config.source_dir
    }

    /// Discovers and encodes every candidate, in discovery order
    pub fn collect(&self) -> Result<Vec<EncodedAsset>> {
        let candidates = self.discovery.discover(&self.config.source_dir)?;

        let mut assets = Vec::with_capacity(candidates.len());
        for candidate in &candidates {
            let asset = EncodedAsset::read(candidate)?;
            debug!("Encoded {} ({} bytes)", asset.name, asset.len);
            assets.push(asset);
        }

        Ok(assets)
    }

    /// Builds the artifact in memory without writing it
    pub fn generate(&self) -> Result<Artifact> {
        let assets = self.collect()?;
        Artifact::assemble(self.output_path(), self.config.target, &assets)
    }

    /// Builds the artifact and overwrites the destination with it
    pub fn run(&self) -> Result<Artifact> {
        let artifact = self.generate()?;
        artifact.write()?;
        Ok(artifact)
    }
}

/// Generates `games.go` in `dir` with the default configuration
pub fn generate_dir(dir: impl Into<PathBuf>) -> Result<Artifact> {
    Generator::new(GeneratorConfig::new(dir)).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::decode_literal;
    use crate::error::Error;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn scenario_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("alpha"), [0x01, 0x02]).unwrap();
        fs::write(dir.path().join("beta.py"), b"import os").unwrap();
        fs::write(dir.path().join("beta"), b"").unwrap();
        dir
    }

    #[test]
    fn test_scenario() {
        let dir = scenario_dir();
        let generator = Generator::new(GeneratorConfig::new(dir.path()));

        let assets = generator.collect().unwrap();
        assert_eq!(
            assets,
            vec![
                EncodedAsset::new("alpha", &[0x01, 0x02]),
                EncodedAsset::new("beta", &[]),
            ]
        );
        assert_eq!(assets[0].literal, "0x01, 0x02");
        assert_eq!(assets[1].literal, "");

        let artifact = generator.run().unwrap();
        assert_eq!(artifact.path(), dir.path().join("games.go"));
        assert_eq!(artifact.summary(), "0. alpha, 1. beta");
        assert_eq!(fs::read_to_string(artifact.path()).unwrap(), artifact.text());
    }

    #[test]
    fn test_deterministic_output() {
        let dir = scenario_dir();
        let generator = Generator::new(GeneratorConfig::new(dir.path()));

        let first = generator.run().unwrap();
        // The previous artifact now sits in the directory and must be ignored.
        let second = generator.run().unwrap();
        assert_eq!(first.text(), second.text());
        assert_eq!(first.names(), second.names());
    }

    #[test]
    fn test_round_trip_fidelity() {
        let dir = TempDir::new().unwrap();
        let payloads: [(&str, Vec<u8>); 3] = [
            ("EMPTY", vec![]),
            ("EDGES", vec![0x00, 0xFF, 0x00, 0xFF]),
            ("ALL", (0..=255).collect()),
        ];
        for (name, bytes) in &payloads {
            fs::write(dir.path().join(name), bytes).unwrap();
        }

        let assets = Generator::new(GeneratorConfig::new(dir.path()))
            .collect()
            .unwrap();
        assert_eq!(assets.len(), 3);
        for asset in &assets {
            let (_, original) = payloads.iter().find(|(n, _)| *n == asset.name).unwrap();
            assert_eq!(&decode_literal(&asset.literal).unwrap(), original);
        }
    }

    #[test]
    fn test_only_excluded_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("gen.py"), b"").unwrap();

        let artifact = generate_dir(dir.path()).unwrap();
        assert!(artifact.names().is_empty());
        assert_eq!(artifact.summary(), "");
        assert!(artifact.text().contains("var Games = []Game{\n}\n"));
    }

    #[test]
    fn test_rust_target() {
        let dir = scenario_dir();
        let config = GeneratorConfig::new(dir.path()).target(Target::Rust);
        let artifact = Generator::new(config).run().unwrap();

        assert_eq!(artifact.path(), dir.path().join("games.rs"));
        assert!(artifact.text().contains("pub static GAMES: &[Game] = &["));
        assert!(artifact.text().contains("binary: &[0x01, 0x02],"));
    }

    #[test]
    fn test_custom_output_name_is_excluded() {
        let dir = scenario_dir();
        let config = GeneratorConfig::new(dir.path()).output_name("roms.txt");
        let generator = Generator::new(config);

        generator.run().unwrap();
        let again = generator.run().unwrap();
        assert_eq!(again.names(), ["alpha", "beta"]);
        assert!(dir.path().join("roms.txt").exists());
    }

    #[test]
    fn test_output_name_excluded_exactly() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("myroms.txt"), [0x12, 0x00]).unwrap();
        fs::write(dir.path().join("PONG"), [0x6A, 0x02]).unwrap();

        let config = GeneratorConfig::new(dir.path()).output_name("roms.txt");
        let generator = Generator::new(config);

        let first = generator.run().unwrap();
        assert_eq!(first.names(), ["PONG", "myroms.txt"]);

        let second = generator.run().unwrap();
        assert_eq!(second.names(), ["PONG", "myroms.txt"]);
    }

    #[test]
    fn test_exclusions_follow_target() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("gen.py"), b"").unwrap();
        fs::write(dir.path().join("notes.rs"), b"fn main() {}").unwrap();
        fs::write(dir.path().join("main.go"), b"package main").unwrap();
        fs::write(dir.path().join("PONG"), [0x6A, 0x02]).unwrap();

        let go = Generator::new(GeneratorConfig::new(dir.path()))
            .generate()
            .unwrap();
        assert_eq!(go.names(), ["PONG", "notes.rs"]);

        let rust = Generator::new(GeneratorConfig::new(dir.path()).target(Target::Rust))
            .generate()
            .unwrap();
        assert_eq!(rust.names(), ["PONG", "main.go"]);
    }

    #[test]
    fn test_unreadable_candidate_leaves_prior_artifact() {
        let dir = scenario_dir();
        let output = dir.path().join("games.go");
        fs::write(&output, "previous").unwrap();

        // A directory entry is listed as a candidate but cannot be read.
        fs::create_dir(dir.path().join("gamma")).unwrap();

        let err = generate_dir(dir.path()).unwrap_err();
        assert!(matches!(err, Error::PayloadUnreadable { .. }));
        assert_eq!(err.path(), Some(dir.path().join("gamma").as_path()));
        assert_eq!(fs::read_to_string(&output).unwrap(), "previous");
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_payload_leaves_prior_artifact() {
        use std::os::unix::fs::PermissionsExt;

        let dir = scenario_dir();
        let output = dir.path().join("games.go");
        fs::write(&output, "previous").unwrap();

        let locked = dir.path().join("beta");
        fs::write(&locked, [0x00, 0xE0]).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        // Permission bits do not stop a privileged user.
        if fs::read(&locked).is_ok() {
            return;
        }

        let err = generate_dir(dir.path()).unwrap_err();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();

        assert!(matches!(err, Error::PayloadUnreadable { .. }));
        assert_eq!(err.path(), Some(locked.as_path()));
        assert_eq!(fs::read_to_string(&output).unwrap(), "previous");
    }

    #[test]
    fn test_missing_source_directory() {
        let dir = TempDir::new().unwrap();
        let err = generate_dir(dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, Error::DirectoryUnavailable { .. }));
    }

    #[test]
    fn test_skip_non_regular_policy() {
        let dir = scenario_dir();
        fs::create_dir(dir.path().join("gamma")).unwrap();

        let config = GeneratorConfig::new(dir.path())
            .discovery(DiscoveryConfig::new().skip_non_regular(true));
        let artifact = Generator::new(config).run().unwrap();
        assert_eq!(artifact.names(), ["alpha", "beta"]);
    }
}
