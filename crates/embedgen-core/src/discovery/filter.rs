//! Name-based exclusion of directory entries.

/// Suffix of the generator script kept next to the payloads.
///
/// Always excluded. The artifact's own suffix depends on the target and is
/// added by the generator.
pub const GENERATOR_SOURCE_SUFFIX: &str = ".py";

/// Suffix-based exclusion predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixFilter {
    suffixes: Vec<String>,
}

impl Default for SuffixFilter {
    fn default() -> Self {
        Self::reserved()
    }
}

impl SuffixFilter {
    /// Creates a filter holding only [`GENERATOR_SOURCE_SUFFIX`]
    pub fn reserved() -> Self {
        Self {
            suffixes: vec![GENERATOR_SOURCE_SUFFIX.to_string()],
        }
    }

    /// Creates a filter that excludes nothing
    pub fn empty() -> Self {
        Self {
            suffixes: Vec::new(),
        }
    }

    /// Adds a suffix; empty and duplicate suffixes are ignored
    pub fn push(&mut self, suffix: impl Into<String>) {
        let suffix = suffix.into();
        // An empty suffix would match every name.
        if suffix.is_empty() || self.suffixes.contains(&suffix) {
            return;
        }
        self.suffixes.push(suffix);
    }

    /// Returns true if `name` ends with any excluded suffix
    pub fn excludes(&self, name: &str) -> bool {
        self.suffixes.iter().any(|s| name.ends_with(s.as_str()))
    }

    /// The configured suffixes, in insertion order
    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }
}
