//! Minimal Solidity ABI codec for the clip registry.
//!
//! The registry only ever exchanges strings, so this covers exactly that:
//! calls whose arguments are all `string`, a single `string` return value and
//! the standard `Error(string)` revert payload.
//!
//! ```text
//! call = selector(4) || head(32 * n) || tail
//! head[i] = offset of arg i inside (head || tail)
//! tail    = for each arg: len(32) || bytes || zero padding to 32
//! ```

use sha3::{Digest, Keccak256};
use thiserror::Error;

pub const STORE_SIGNATURE: &str = "store(string,string)";
pub const RETRIEVE_SIGNATURE: &str = "retrieve(string)";

/// `keccak256("Error(string)")[0..4]`
const ERROR_SELECTOR: [u8; 4] = [0x08, 0xc3, 0x79, 0xa0];

const WORD: usize = 32;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AbiError {
    #[error("ABI data truncated")]
    Truncated,

    #[error("ABI offset or length out of range")]
    OutOfRange,

    #[error("invalid hex data: {0}")]
    InvalidHex(String),

    #[error("ABI string is not valid UTF-8")]
    InvalidUtf8,
}

/// First four bytes of the Keccak-256 hash of a function signature.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = Keccak256::digest(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Calldata for `signature` called with string arguments.
pub fn encode_call(signature: &str, args: &[&str]) -> Vec<u8> {
    let mut out = selector(signature).to_vec();
    out.extend(encode_strings(args));
    out
}

fn encode_strings(args: &[&str]) -> Vec<u8> {
    let head_len = WORD * args.len();
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for arg in args {
        head.extend_from_slice(&word(head_len + tail.len()));
        tail.extend_from_slice(&word(arg.len()));
        tail.extend_from_slice(arg.as_bytes());
        let padding = (WORD - arg.len() % WORD) % WORD;
        tail.resize(tail.len() + padding, 0);
    }

    head.extend(tail);
    head
}

fn word(value: usize) -> [u8; WORD] {
    let mut out = [0u8; WORD];
    out[WORD - 8..].copy_from_slice(&(value as u64).to_be_bytes());
    out
}

fn read_word(data: &[u8], at: usize) -> Result<usize, AbiError> {
    let end = at.checked_add(WORD).ok_or(AbiError::OutOfRange)?;
    let word = data.get(at..end).ok_or(AbiError::Truncated)?;
    if word[..WORD - 8].iter().any(|b| *b != 0) {
        return Err(AbiError::OutOfRange);
    }
    let mut value = [0u8; 8];
    value.copy_from_slice(&word[WORD - 8..]);
    usize::try_from(u64::from_be_bytes(value)).map_err(|_| AbiError::OutOfRange)
}

/// Decode a single ABI-encoded `string` return value.
///
/// Empty return data (`0x`) decodes to the empty string.
pub fn decode_string(data: &[u8]) -> Result<String, AbiError> {
    if data.is_empty() {
        return Ok(String::new());
    }

    let offset = read_word(data, 0)?;
    let len = read_word(data, offset)?;
    let start = offset.checked_add(WORD).ok_or(AbiError::OutOfRange)?;
    let end = start.checked_add(len).ok_or(AbiError::OutOfRange)?;
    let bytes = data.get(start..end).ok_or(AbiError::Truncated)?;

    String::from_utf8(bytes.to_vec()).map_err(|_| AbiError::InvalidUtf8)
}

/// Reason string of an `Error(string)` revert payload.
pub fn decode_revert_reason(data: &[u8]) -> Option<String> {
    if data.len() < 4 || data[..4] != ERROR_SELECTOR {
        return None;
    }
    decode_string(&data[4..]).ok()
}

pub fn decode_hex(text: &str) -> Result<Vec<u8>, AbiError> {
    let digits = text.strip_prefix("0x").unwrap_or(text);
    hex::decode(digits).map_err(|e| AbiError::InvalidHex(e.to_string()))
}

pub fn encode_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RETRIEVE_ABCDE: &str = "0x64cc7327\
        0000000000000000000000000000000000000000000000000000000000000020\
        0000000000000000000000000000000000000000000000000000000000000005\
        6162636465000000000000000000000000000000000000000000000000000000";

    const STORE_ABCDE_QMTEST: &str = "0xf641090c\
        0000000000000000000000000000000000000000000000000000000000000040\
        0000000000000000000000000000000000000000000000000000000000000080\
        0000000000000000000000000000000000000000000000000000000000000005\
        6162636465000000000000000000000000000000000000000000000000000000\
        0000000000000000000000000000000000000000000000000000000000000006\
        516d546573740000000000000000000000000000000000000000000000000000";

    const REVERT_INVALID_LENGTH: &str = "0x08c379a0\
        0000000000000000000000000000000000000000000000000000000000000020\
        0000000000000000000000000000000000000000000000000000000000000013\
        496e76616c696420636f6465206c656e67746800000000000000000000000000";

    #[test]
    fn selectors_match_registry_abi() {
        assert_eq!(selector(STORE_SIGNATURE), [0xf6, 0x41, 0x09, 0x0c]);
        assert_eq!(selector(RETRIEVE_SIGNATURE), [0x64, 0xcc, 0x73, 0x27]);
        assert_eq!(selector("Error(string)"), ERROR_SELECTOR);
    }

    #[test]
    fn encodes_single_string_call() {
        let data = encode_call(RETRIEVE_SIGNATURE, &["abcde"]);
        assert_eq!(encode_hex(&data), RETRIEVE_ABCDE);
    }

    #[test]
    fn encodes_two_string_call_with_offsets() {
        let data = encode_call(STORE_SIGNATURE, &["abcde", "QmTest"]);
        assert_eq!(encode_hex(&data), STORE_ABCDE_QMTEST);
    }

    #[test]
    fn long_strings_pad_to_word_boundary() {
        let arg = "x".repeat(33);
        let data = encode_call(RETRIEVE_SIGNATURE, &[arg.as_str()]);
        // selector + offset + length + two data words
        assert_eq!(data.len(), 4 + 32 * 4);
    }

    #[test]
    fn decodes_string_return() {
        let data = decode_hex(RETRIEVE_ABCDE).unwrap();
        assert_eq!(decode_string(&data[4..]).unwrap(), "abcde");
    }

    #[test]
    fn empty_return_decodes_to_empty_string() {
        assert_eq!(decode_string(&[]).unwrap(), "");
    }

    #[test]
    fn truncated_return_is_rejected() {
        let data = decode_hex(RETRIEVE_ABCDE).unwrap();
        assert_eq!(decode_string(&data[4..60]), Err(AbiError::Truncated));
    }

    #[test]
    fn huge_offset_is_out_of_range() {
        let mut data = vec![0xffu8; 32];
        data.extend([0u8; 32]);
        assert_eq!(decode_string(&data), Err(AbiError::OutOfRange));
    }

    #[test]
    fn decodes_revert_reason() {
        let data = decode_hex(REVERT_INVALID_LENGTH).unwrap();
        assert_eq!(
            decode_revert_reason(&data).as_deref(),
            Some("Invalid code length")
        );
        assert_eq!(decode_revert_reason(&[0x01, 0x02]), None);
    }

    #[test]
    fn hex_prefix_is_optional() {
        assert_eq!(decode_hex("0x0a0b").unwrap(), vec![0x0a, 0x0b]);
        assert_eq!(decode_hex("0a0b").unwrap(), vec![0x0a, 0x0b]);
        assert!(matches!(decode_hex("0xzz"), Err(AbiError::InvalidHex(_))));
    }
}
