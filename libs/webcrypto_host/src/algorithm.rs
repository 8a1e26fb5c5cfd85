// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use crate::str_enum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmName {
    AesCbc,
    AesGcm,
    RsassaPkcs1v15,
    RsaPss,
    RsaOaep,
    Ecdsa,
}

str_enum!(
    AlgorithmName,
    AesCbc => "AES-CBC",
    AesGcm => "AES-GCM",
    RsassaPkcs1v15 => "RSASSA-PKCS1-v1_5",
    RsaPss => "RSA-PSS",
    RsaOaep => "RSA-OAEP",
    Ecdsa => "ECDSA"
);

impl AlgorithmName {
    /// JWK `alg` tag of an RSA key bound to `hash`, e.g. `RS256`, `PS384` or
    /// `RSA-OAEP-256`. `None` for algorithms without RSA keys.
    pub fn rsa_jwk_alg(&self, hash: HashAlgorithm) -> Option<String> {
        let prefix = match (self, hash) {
            (AlgorithmName::RsaOaep, HashAlgorithm::Sha1) => return Some("RSA-OAEP".to_string()),
            (AlgorithmName::RsassaPkcs1v15, _) => "RS",
            (AlgorithmName::RsaPss, _) => "PS",
            (AlgorithmName::RsaOaep, _) => "RSA-OAEP-",
            _ => return None,
        };
        Some([prefix, hash.jwk_suffix()].concat())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

str_enum!(
    HashAlgorithm,
    Sha1 => "SHA-1",
    Sha256 => "SHA-256",
    Sha384 => "SHA-384",
    Sha512 => "SHA-512"
);

impl HashAlgorithm {
    pub fn output_len(&self) -> usize {
        match self {
            HashAlgorithm::Sha1 => 20,
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha384 => 48,
            HashAlgorithm::Sha512 => 64,
        }
    }

    /// Digits used in JWK `alg` tags, e.g. `256` in `RS256`.
    pub fn jwk_suffix(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha1 => "1",
            HashAlgorithm::Sha256 => "256",
            HashAlgorithm::Sha384 => "384",
            HashAlgorithm::Sha512 => "512",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedCurve {
    P256,
    P384,
    P521,
}

str_enum!(NamedCurve, P256 => "P-256", P384 => "P-384", P521 => "P-521");

impl NamedCurve {
    /// Byte length of the curve's field prime. Every coordinate, private
    /// scalar and fixed-width signature half occupies exactly this many bytes.
    pub fn field_len(&self) -> usize {
        match self {
            NamedCurve::P256 => 32,
            NamedCurve::P384 => 48,
            NamedCurve::P521 => 66,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyUsage {
    Encrypt,
    Decrypt,
    Sign,
    Verify,
}

str_enum!(
    KeyUsage,
    Encrypt => "encrypt",
    Decrypt => "decrypt",
    Sign => "sign",
    Verify => "verify"
);

impl KeyUsage {
    pub fn mask(&self) -> u8 {
        match self {
            KeyUsage::Encrypt => 0b0001,
            KeyUsage::Decrypt => 0b0010,
            KeyUsage::Sign => 0b0100,
            KeyUsage::Verify => 0b1000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyType {
    Secret,
    Public,
    Private,
}

str_enum!(KeyType, Secret => "secret", Public => "public", Private => "private");
