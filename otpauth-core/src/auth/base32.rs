//! Base32 transport encoding for shared secrets
//!
//! Secrets are emitted as uppercase RFC 4648 Base32 without padding. Decoding
//! is lenient about what authenticator apps and users tend to paste:
//! 1. Whitespace is removed
//! 2. Missing padding is restored to the next 8-character boundary
//! 3. Letters are matched case-insensitively

use crate::error::OtpError;
use data_encoding::{BASE32, BASE32_NOPAD};

/// Remove all whitespace from the input
fn clean(input: &str) -> String {
    input.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Pad input to an 8-character boundary
///
/// Formula: padding_length = (8 - (len % 8)) % 8
fn pad(input: &str) -> String {
    let trimmed = input.trim_end_matches('=');
    let padding_len = (8 - (trimmed.len() % 8)) % 8;
    format!("{}{}", trimmed, "=".repeat(padding_len))
}

/// Decode a Base32 secret into raw key bytes
pub fn decode_base32(input: &str) -> Result<Vec<u8>, OtpError> {
    let padded = pad(&clean(input));

    BASE32
        .decode(padded.to_uppercase().as_bytes())
        .map_err(|_| OtpError::InvalidBase32)
}

/// Encode raw key bytes as uppercase Base32 without padding
pub fn encode_base32(bytes: &[u8]) -> String {
    BASE32_NOPAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_removes_whitespace() {
        assert_eq!(clean("JBSW Y3DP EHPK 3PXP"), "JBSWY3DPEHPK3PXP");
        assert_eq!(clean("JBSW\tY3DP\nEHPK3PXP"), "JBSWY3DPEHPK3PXP");
    }

    #[test]
    fn test_pad_no_padding_needed() {
        assert_eq!(pad("JBSWY3DPEHPK3PXP"), "JBSWY3DPEHPK3PXP");
    }

    #[test]
    fn test_pad_needs_padding() {
        assert_eq!(pad("JBSWY3DPEE"), "JBSWY3DPEE======");
    }

    #[test]
    fn test_pad_keeps_existing_padding() {
        assert_eq!(pad("JBSWY3DPEE======"), "JBSWY3DPEE======");
    }

    #[test]
    fn test_decode_rfc_secret() {
        let bytes = decode_base32("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ").unwrap();
        assert_eq!(bytes, b"12345678901234567890");
    }

    #[test]
    fn test_decode_lowercase_and_spaces() {
        let upper = decode_base32("JBSWY3DPEE").unwrap();
        assert_eq!(upper, b"Hello!");
        assert_eq!(decode_base32("jbsw y3dp ee").unwrap(), upper);
        assert_eq!(decode_base32("JbSwY3DpEe").unwrap(), upper);
    }

    #[test]
    fn test_decode_invalid() {
        assert_eq!(decode_base32("INVALID@CHARS!"), Err(OtpError::InvalidBase32));
        assert_eq!(decode_base32("ABC1"), Err(OtpError::InvalidBase32));
    }

    #[test]
    fn test_encode_has_no_padding() {
        let encoded = encode_base32(&[0u8; 20]);
        assert_eq!(encoded.len(), 32);
        assert!(!encoded.contains('='));
        assert_eq!(encode_base32(b"Hello!"), "JBSWY3DPEE");
    }
}
