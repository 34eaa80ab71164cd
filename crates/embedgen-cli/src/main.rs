//! embedgen - Embed a directory of binary payloads into generated source
//!
//! This tool reads every payload file in a directory and writes one source
//! file holding their names and bytes, plus a helper listing them.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use embedgen_core::{Artifact, DiscoveryConfig, Generator, GeneratorConfig, Target};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, Level};
use tracing_subscriber::EnvFilter;

/// Embed a directory of binary payloads into a generated source file
#[derive(Parser, Debug)]
#[command(name = "embedgen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Directory holding the payloads; the artifact is written here
    #[arg(default_value = ".")]
    directory: PathBuf,

    /// Language of the generated artifact
    #[arg(short, long, value_enum, default_value = "go")]
    target: OutputTarget,

    /// Artifact file name (default: games.go or games.rs)
    #[arg(short, long)]
    output: Option<String>,

    /// Additional file name suffix to exclude (repeatable)
    #[arg(short = 'x', long = "exclude", value_name = "SUFFIX")]
    exclude: Vec<String>,

    /// Skip directories and other non-regular entries instead of failing
    #[arg(long)]
    skip_non_regular: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Dry run - generate in memory and report, don't write the artifact
    #[arg(long, conflicts_with = "check")]
    dry_run: bool,

    /// Only print the summary line the generated helper would return
    #[arg(long, conflicts_with_all = ["dry_run", "check"])]
    list_only: bool,

    /// Fail if the artifact on disk differs from what would be generated
    #[arg(long)]
    check: bool,
}

/// Output language
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputTarget {
    /// Go source, package games
    Go,
    /// Rust source with a static registry
    Rust,
}

impl From<OutputTarget> for Target {
    fn from(target: OutputTarget) -> Self {
        match target {
            OutputTarget::Go => Target::Go,
            OutputTarget::Rust => Target::Rust,
        }
    }
}

impl Cli {
    fn generator_config(&self) -> GeneratorConfig {
        let discovery = self
            .exclude
            .iter()
            .fold(DiscoveryConfig::new(), |config, suffix| {
                config.exclude_suffix(suffix.as_str())
            })
            .skip_non_regular(self.skip_non_regular);

        let mut config = GeneratorConfig::new(&self.directory)
            .target(self.target.into())
            .discovery(discovery);
        if let Some(ref name) = self.output {
            config = config.output_name(name.as_str());
        }
        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    if let Some(ref name) = cli.output {
        validate_output_name(name)?;
    }

    let generator = Generator::new(cli.generator_config());
    debug!(
        "Generating {} artifact {} from {}",
        generator.config().target.as_str(),
        generator.output_path().display(),
        generator.source_dir().display()
    );

    if cli.list_only {
        let artifact = generate(&generator)?;
        println!("{}", artifact.summary());
        return Ok(());
    }

    if cli.check {
        let artifact = generate(&generator)?;
        return check_artifact(&artifact);
    }

    if cli.dry_run {
        let artifact = generate(&generator)?;
        println!(
            "Would write: {} ({} record(s), {} payload bytes)",
            artifact.path().display(),
            artifact.names().len(),
            artifact.payload_bytes()
        );
        if cli.verbose > 0 {
            println!("{}", artifact.summary());
        }
        return Ok(());
    }

    let artifact = generator
        .run()
        .with_context(|| format!("Failed to generate {}", generator.output_path().display()))?;

    info!("Digest {}", digest(artifact.text()));
    println!("Wrote {}", artifact.path().display());
    Ok(())
}

/// Build the artifact without touching the destination
fn generate(generator: &Generator) -> Result<Artifact> {
    generator.generate().with_context(|| {
        format!(
            "Failed to generate artifact from {}",
            generator.source_dir().display()
        )
    })
}

/// Artifact names are plain file names inside the source directory
fn validate_output_name(name: &str) -> Result<()> {
    let path = Path::new(name);
    if name.is_empty() || path.file_name().map(|n| n != path.as_os_str()).unwrap_or(true) {
        bail!("Output must be a plain file name, got '{}'", name);
    }
    Ok(())
}

/// Compare the artifact on disk with the freshly generated text
fn check_artifact(artifact: &Artifact) -> Result<()> {
    let path = artifact.path();
    let on_disk = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            bail!("{} does not exist; run embedgen to create it", path.display());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", path.display()));
        }
    };

    let expected = digest(artifact.text());
    let actual = blake3::hash(&on_disk).to_hex().to_string();
    if expected != actual {
        bail!(
            "{} is stale (on disk {}, expected {}); rerun embedgen",
            path.display(),
            &actual[..16],
            &expected[..16]
        );
    }

    println!("{} is up to date", path.display());
    Ok(())
}

/// Hex blake3 digest of the artifact text
fn digest(text: &str) -> String {
    blake3::hash(text.as_bytes()).to_hex().to_string()
}
