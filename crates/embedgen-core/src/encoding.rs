//! Binary-to-literal encoding.
//!
//! Each byte becomes a `0xNN` token (uppercase hex, two digits) and tokens
//! are joined with `", "`. The result is valid inside a Go `[]byte{...}`
//! and a Rust `&[...]` literal alike.

use crate::discovery::Candidate;
use crate::error::{Error, Result};

/// Separator between byte tokens
pub const TOKEN_SEPARATOR: &str = ", ";

/// Radix marker in front of each token
pub const TOKEN_PREFIX: &str = "0x";

/// Uppercase hex digits, indexed by nibble
const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Renders `bytes` as a comma-separated list of `0xNN` tokens
///
/// Empty input yields an empty string.
pub fn encode_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 6);
    for (i, &byte) in bytes.iter().enumerate() {
        if i > 0 {
            out.push_str(TOKEN_SEPARATOR);
        }
        out.push_str(TOKEN_PREFIX);
        out.push(char::from(HEX_DIGITS[usize::from(byte >> 4)]));
        out.push(char::from(HEX_DIGITS[usize::from(byte & 0x0F)]));
    }
    out
}

/// Parses a literal produced by [`encode_bytes`] back into bytes
///
/// The token format is checked strictly: prefix `0x`, exactly two uppercase
/// hex digits, `", "` between tokens and nothing else.
pub fn decode_literal(literal: &str) -> Result<Vec<u8>> {
    if literal.is_empty() {
        return Ok(Vec::new());
    }

    let mut bytes = Vec::with_capacity(literal.len() / 6 + 1);
    let mut offset = 0;

    for token in literal.split(TOKEN_SEPARATOR) {
        bytes.push(decode_token(token, offset)?);
        offset += token.len() + TOKEN_SEPARATOR.len();
    }

    Ok(bytes)
}

fn decode_token(token: &str, offset: usize) -> Result<u8> {
    let Some(digits) = token.strip_prefix(TOKEN_PREFIX) else {
        return Err(Error::invalid_literal(
            offset,
            format!("token '{}' lacks the '{}' prefix", token, TOKEN_PREFIX),
        ));
    };

    let well_formed = digits.len() == 2
        && digits
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(&b));
    if !well_formed {
        return Err(Error::invalid_literal(
            offset,
            format!("token '{}' is not two uppercase hex digits", token),
        ));
    }

    u8::from_str_radix(digits, 16)
        .map_err(|e| Error::invalid_literal(offset, format!("token '{}': {}", token, e)))
}

/// A payload ready for assembly: display name plus encoded content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedAsset {
    /// Display name, taken verbatim from the file name
    pub name: String,
    /// Encoded byte literal
    pub literal: String,
    /// Number of bytes the literal represents
    pub len: usize,
}

impl EncodedAsset {
    /// Encodes `bytes` under `name`
    pub fn new(name: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            name: name.into(),
            literal: encode_bytes(bytes),
            len: bytes.len(),
        }
    }

    /// Reads and encodes a discovered candidate
    pub fn read(candidate: &Candidate) -> Result<Self> {
        let bytes = candidate.read()?;
        Ok(Self::new(candidate.name.clone(), &bytes))
    }

    /// Decodes the literal back into the original bytes
    pub fn decode(&self) -> Result<Vec<u8>> {
        decode_literal(&self.literal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_encode_bytes() {
        assert_eq!(encode_bytes(&[0x01, 0x02]), "0x01, 0x02");
        assert_eq!(encode_bytes(&[0x00, 0xFF, 0xab]), "0x00, 0xFF, 0xAB");
        assert_eq!(encode_bytes(&[0x7F]), "0x7F");
    }

    #[test]
    fn test_encode_empty() {
        assert_eq!(encode_bytes(&[]), "");
    }

    #[test]
    fn test_round_trip_every_byte() {
        let all: Vec<u8> = (0..=255).collect();
        let literal = encode_bytes(&all);
        assert!(!literal.ends_with(TOKEN_SEPARATOR));
        assert_eq!(decode_literal(&literal).unwrap(), all);
    }

    #[test]
    fn test_decode_rejects_malformed_tokens() {
        assert!(decode_literal("0x01,0x02").is_err());
        assert!(decode_literal("0xff").is_err());
        assert!(decode_literal("0x1").is_err());
        assert!(decode_literal("01").is_err());
        assert!(decode_literal("0x01, ").is_err());
    }

    #[test]
    fn test_decode_reports_offset() {
        let err = decode_literal("0x01, 0x02, 0xZZ").unwrap_err();
        match err {
            Error::InvalidLiteral { offset, .. } => assert_eq!(offset, 12),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_asset_from_candidate() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("PONG");
        std::fs::write(&path, [0x00, 0xE0, 0xFF]).unwrap();

        let asset = EncodedAsset::read(&Candidate::new("PONG", &path)).unwrap();
        assert_eq!(asset.name, "PONG");
        assert_eq!(asset.literal, "0x00, 0xE0, 0xFF");
        assert_eq!(asset.len, 3);
        assert_eq!(asset.decode().unwrap(), [0x00, 0xE0, 0xFF]);
    }

    #[test]
    fn test_asset_from_vanished_candidate() {
        let dir = TempDir::new().unwrap();
        let candidate = Candidate::new("GONE", dir.path().join("GONE"));

        let err = EncodedAsset::read(&candidate).unwrap_err();
        assert!(matches!(err, Error::PayloadUnreadable { .. }));
        assert_eq!(err.path(), Some(candidate.path.as_path()));
    }
}
