// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use webcrypto_host::algorithm::NamedCurve;

/// RSA public key as unsigned big-endian integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    pub modulus: Vec<u8>,
    pub exponent: Vec<u8>,
}

#[derive(Clone, PartialEq, Eq)]
pub struct RsaPrivateKey {
    pub public: RsaPublicKey,
    pub private_exponent: Vec<u8>,
}

/// EC public point on a named curve. Coordinates are unsigned big-endian and
/// may omit leading zero bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcPublicKey {
    pub curve: NamedCurve,
    pub x: Vec<u8>,
    pub y: Vec<u8>,
}

#[derive(Clone, PartialEq, Eq)]
pub struct EcPrivateKey {
    pub public: EcPublicKey,
    pub d: Vec<u8>,
}

impl RsaPublicKey {
    pub fn new(modulus: impl Into<Vec<u8>>, exponent: impl Into<Vec<u8>>) -> Self {
        Self {
            modulus: modulus.into(),
            exponent: exponent.into(),
        }
    }
}

impl RsaPrivateKey {
    pub fn new(public: RsaPublicKey, private_exponent: impl Into<Vec<u8>>) -> Self {
        Self {
            public,
            private_exponent: private_exponent.into(),
        }
    }
}

impl EcPublicKey {
    pub fn new(curve: NamedCurve, x: impl Into<Vec<u8>>, y: impl Into<Vec<u8>>) -> Self {
        Self {
            curve,
            x: x.into(),
            y: y.into(),
        }
    }
}

impl EcPrivateKey {
    pub fn new(public: EcPublicKey, d: impl Into<Vec<u8>>) -> Self {
        Self {
            public,
            d: d.into(),
        }
    }
}

impl std::fmt::Debug for RsaPrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RsaPrivateKey")
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for EcPrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EcPrivateKey")
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

/// Native key material handed to the provider at import.
#[derive(Debug, Clone, Copy)]
pub enum KeyMaterial<'a> {
    Symmetric(&'a [u8]),
    RsaPublic(&'a RsaPublicKey),
    RsaPrivate(&'a RsaPrivateKey),
    EcPublic(&'a EcPublicKey),
    EcPrivate(&'a EcPrivateKey),
}
