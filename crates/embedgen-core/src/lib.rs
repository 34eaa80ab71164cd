//! # embedgen-core
//!
//! A library for embedding a directory of binary payloads into one generated
//! source file.
//!
//! This crate provides the core functionality for:
//! - Listing the payloads of a directory in a stable order
//! - Encoding payload bytes as `0xNN` literal lists
//! - Assembling the generated registry and its summary helper
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`discovery`]: Directory listing and exclusion
//! - [`encoding`]: Byte literal encoding and decoding
//! - [`artifact`]: Artifact templates and assembly
//! - [`generator`]: The end-to-end pipeline
//! - [`error`]: Error types and handling
//!
//! ## Example
//!
//! ```no_run
//! use embedgen_core::{Generator, GeneratorConfig, Target};
//!
//! let config = GeneratorConfig::new("./roms").target(Target::Go);
//! let artifact = Generator::new(config).run()?;
//!
//! println!("{}", artifact.summary());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Extensibility
//!
//! [`Template`] is object safe; [`artifact::render`] accepts any
//! implementation, so other output languages can reuse the pipeline.

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod artifact;
pub mod discovery;
pub mod encoding;
pub mod error;
pub mod generator;

// Re-export primary types for convenience
pub use artifact::{summary, Artifact, GoTemplate, RustTemplate, Target, Template};
pub use discovery::{Candidate, Discovery, DiscoveryConfig, SuffixFilter};
pub use encoding::{decode_literal, encode_bytes, EncodedAsset};
pub use error::{Error, Result};
pub use generator::{generate_dir, Generator, GeneratorConfig};

/// Crate version for programmatic access
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
