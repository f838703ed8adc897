//! Clip code derivation
//!
//! 短码派生：把任意种子字符串映射为固定长度的字母数字短码。
//!
//! # Design / 设计
//!
//! ```text
//! seed = "{url}-{createdAt}-{owner | "anon"}"
//!
//! code = Base32(SHA-256(seed)[0..5])[0..CODE_LENGTH]
//!                      |
//!                      v
//!                   "MFRGG" (5字符, A-Z 2-7)
//! ```
//!
//! Five bytes give eight Base32 characters (40 bits); the published code keeps
//! the first five (25 bits). Salting the seed with the creation time and the
//! owner keeps two users shortening the same URL from colliding.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::ids::WalletAddress;

/// Published clip code length.
pub const CODE_LENGTH: usize = 5;

/// Longest code the derivation can produce (5 digest bytes -> 8 Base32 chars).
pub const MAX_CODE_LENGTH: usize = 8;

/// Owner placeholder used in the seed when no wallet is connected.
pub const ANONYMOUS_OWNER: &str = "anon";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodeError {
    #[error("invalid clip code length: expected {expected}, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("clip code must be ASCII alphanumeric")]
    NotAlphanumeric,
}

/// A short clip code (case-sensitive, alphanumeric).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClipCode(String);

impl ClipCode {
    /// Parse user input as a code of the published length.
    ///
    /// Case is preserved exactly as typed; the registry is case-sensitive.
    pub fn parse(text: &str) -> Result<Self, CodeError> {
        Self::parse_with_length(text, CODE_LENGTH)
    }

    pub fn parse_with_length(text: &str, length: usize) -> Result<Self, CodeError> {
        let actual = text.chars().count();
        if actual != length {
            return Err(CodeError::WrongLength {
                expected: length,
                actual,
            });
        }
        if !text.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CodeError::NotAlphanumeric);
        }
        Ok(Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for ClipCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ClipCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Derive the published-length code for `seed`.
///
/// Pure and total: every string, including the empty one, yields a code.
pub fn derive_code(seed: &str) -> ClipCode {
    derive_code_with_length(seed, CODE_LENGTH)
}

/// Derive a code of `length` characters, clamped to `1..=MAX_CODE_LENGTH`.
pub fn derive_code_with_length(seed: &str, length: usize) -> ClipCode {
    let length = length.clamp(1, MAX_CODE_LENGTH);

    let hash = Sha256::digest(seed.as_bytes());

    // 取前5字节(40bit) -> Base32 -> 8字符
    let encoded = base32::encode(base32::Alphabet::Rfc4648 { padding: false }, &hash[0..5]);

    ClipCode(encoded.chars().take(length).collect())
}

/// Build the derivation seed for a new clip.
///
/// `created_at` is the ISO-8601 creation timestamp that is also stored in the blob.
pub fn clip_seed(url: &str, created_at: &str, owner: Option<&WalletAddress>) -> String {
    let owner = owner.map(|o| o.as_str()).unwrap_or(ANONYMOUS_OWNER);
    format!("{url}-{created_at}-{owner}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_code_is_deterministic() {
        let seed = "https://lenster.xyz-2022-06-01T12:00:00.000Z-anon";
        assert_eq!(derive_code(seed), derive_code(seed));
    }

    #[test]
    fn test_derive_code_known_vectors() {
        assert_eq!(derive_code("").as_str(), "4OYMI");
        assert_eq!(
            derive_code("https://lenster.xyz-2022-06-01T12:00:00.000Z-anon").as_str(),
            "IABLO"
        );
    }

    #[test]
    fn test_derive_code_has_published_length_and_alphabet() {
        for seed in ["", "a", "https://example.com", "日本語のシード"] {
            let code = derive_code(seed);
            assert_eq!(code.len(), CODE_LENGTH, "seed {seed:?}");
            assert!(code.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_derive_code_distinct_seeds_give_distinct_codes() {
        let seeds: Vec<String> = (0..64)
            .map(|i| format!("https://example.com/{i}-2022-06-01T12:00:00.000Z-anon"))
            .collect();
        let mut codes: Vec<String> = seeds.iter().map(|s| derive_code(s).to_string()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), seeds.len());
    }

    #[test]
    fn test_derive_code_with_length_is_prefix_of_full_code() {
        let full = derive_code_with_length("seed", MAX_CODE_LENGTH);
        let short = derive_code_with_length("seed", 3);
        assert_eq!(full.len(), MAX_CODE_LENGTH);
        assert!(full.as_str().starts_with(short.as_str()));
    }

    #[test]
    fn test_derive_code_with_length_clamps() {
        assert_eq!(derive_code_with_length("seed", 0).len(), 1);
        assert_eq!(derive_code_with_length("seed", 64).len(), MAX_CODE_LENGTH);
    }

    #[test]
    fn test_clip_seed_falls_back_to_anon() {
        let seed = clip_seed("https://lenster.xyz", "2022-06-01T12:00:00.000Z", None);
        assert_eq!(seed, "https://lenster.xyz-2022-06-01T12:00:00.000Z-anon");

        let owner = WalletAddress::from("0xabc");
        let seed = clip_seed("https://lenster.xyz", "2022-06-01T12:00:00.000Z", Some(&owner));
        assert!(seed.ends_with("-0xabc"));
    }

    #[test]
    fn test_parse_accepts_mixed_case_alphanumeric() {
        let code = ClipCode::parse("aBcD1").unwrap();
        assert_eq!(code.as_str(), "aBcD1");
    }

    #[test]
    fn test_parse_rejects_wrong_length_and_symbols() {
        assert_eq!(
            ClipCode::parse("abcd"),
            Err(CodeError::WrongLength {
                expected: 5,
                actual: 4
            })
        );
        assert_eq!(ClipCode::parse("ab-d1"), Err(CodeError::NotAlphanumeric));
        assert_eq!(ClipCode::parse("abçd1"), Err(CodeError::NotAlphanumeric));
    }
}
