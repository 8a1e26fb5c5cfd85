// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use hex_simd::AsciiCase;

pub fn bytes_to_hex_string(bytes: &[u8]) -> String {
    hex_simd::encode_to_string(bytes, AsciiCase::Lower)
}

pub fn bytes_from_hex(hex_bytes: &[u8]) -> Result<Vec<u8>, String> {
    hex_simd::decode_to_vec(hex_bytes).map_err(|err| err.to_string())
}

/// base64url without padding, the encoding of JWK members.
pub fn bytes_to_b64_url_safe_string(bytes: &[u8]) -> String {
    base64_simd::URL_SAFE_NO_PAD.encode_to_string(bytes)
}

pub fn bytes_from_b64_url_safe(bytes: &[u8]) -> Result<Vec<u8>, String> {
    base64_simd::URL_SAFE_NO_PAD
        .decode_to_vec(bytes)
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_safe_alphabet_without_padding() {
        assert_eq!(bytes_to_b64_url_safe_string(&[0xfb, 0xff]), "-_8");
        assert_eq!(bytes_to_b64_url_safe_string(&[1, 0, 1]), "AQAB");
        assert_eq!(bytes_from_b64_url_safe(b"-_8").unwrap(), vec![0xfb, 0xff]);
    }

    #[test]
    fn padded_or_standard_input_is_rejected() {
        assert!(bytes_from_b64_url_safe(b"-_8=").is_err());
        assert!(bytes_from_b64_url_safe(b"+/8").is_err());
    }

    #[test]
    fn hex() {
        assert_eq!(bytes_to_hex_string(&[0x2a, 0xae]), "2aae");
        assert_eq!(bytes_from_hex(b"2AAE").unwrap(), vec![0x2a, 0xae]);
        assert!(bytes_from_hex(b"2aa").is_err());
    }
}
