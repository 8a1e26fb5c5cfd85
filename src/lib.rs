// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Blocking cryptographic operations computed by an asynchronous
//! SubtleCrypto-style provider.
//!
//! ```ignore
//! let crypto = WebCrypto::probe(&globals);
//! let digest = crypto.sum256(b"hello world")?;
//! ```

pub mod algorithm;
pub mod bridge;
pub mod environment;
pub mod error;
pub mod key;
pub mod key_codec;
pub mod signature_codec;

mod aes;
mod ecdsa;
mod rsa;
mod sha;

use webcrypto_host::{algorithm::KeyUsage, CryptoKey, Globals, Value};

pub use crate::{
    algorithm::AlgorithmSpec,
    bridge::Bridge,
    error::{Error, Result},
    key::{EcPrivateKey, EcPublicKey, KeyMaterial, RsaPrivateKey, RsaPublicKey},
};
pub use webcrypto_host::algorithm::{HashAlgorithm, NamedCurve};

/// The public operation set.
///
/// Every operation imports its key with the single usage it needs, makes one
/// provider call and blocks until that call settles. Nothing is cached
/// between calls, so a `WebCrypto` can be shared freely across threads.
///
/// Operations may run on a multi-thread tokio runtime's workers, which block
/// in place. On a current-thread runtime they fail with
/// [`Error::BlockingInRuntime`] without reaching the provider; call
/// [`Bridge::invoke_async`] through [`WebCrypto::bridge`] there.
#[derive(Clone)]
pub struct WebCrypto {
    bridge: Bridge,
    pss_salt_length: usize,
}

impl WebCrypto {
    pub fn new(bridge: Bridge) -> Self {
        Self {
            bridge,
            pss_salt_length: environment::get_pss_salt_length(),
        }
    }

    pub fn probe(globals: &Globals) -> Self {
        Self::new(Bridge::probe(globals))
    }

    /// Salt length in bytes used by [`WebCrypto::sign_pss`] and
    /// [`WebCrypto::verify_pss`].
    pub fn with_pss_salt_length(mut self, salt_length: usize) -> Self {
        self.pss_salt_length = salt_length;
        self
    }

    pub fn pss_salt_length(&self) -> usize {
        self.pss_salt_length
    }

    pub fn bridge(&self) -> &Bridge {
        &self.bridge
    }

    fn import(
        &self,
        material: KeyMaterial<'_>,
        algorithm: &AlgorithmSpec,
        usage: KeyUsage,
    ) -> Result<CryptoKey> {
        key_codec::import_key(&self.bridge, material, algorithm, &[usage])
    }

    fn call_bytes(&self, method: &str, args: Vec<Value>) -> Result<Vec<u8>> {
        self.bridge
            .invoke(method, args)?
            .into_bytes()
            .ok_or_else(|| Error::UnexpectedValue {
                method: method.to_string(),
                expected: "bytes",
            })
    }

    fn call_verify(&self, args: Vec<Value>) -> Result<()> {
        match self.bridge.invoke("verify", args)?.as_bool() {
            Some(true) => Ok(()),
            Some(false) => Err(Error::VerificationFailed),
            None => Err(Error::UnexpectedValue {
                method: "verify".to_string(),
                expected: "boolean",
            }),
        }
    }
}
