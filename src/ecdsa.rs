// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use webcrypto_host::{
    algorithm::{HashAlgorithm, KeyUsage},
    Value,
};

use crate::{
    algorithm::AlgorithmSpec,
    error::Result,
    key::{EcPrivateKey, EcPublicKey, KeyMaterial},
    signature_codec, WebCrypto,
};

const ECDSA_HASH: HashAlgorithm = HashAlgorithm::Sha256;

impl WebCrypto {
    /// ECDSA over SHA-256. Returns a DER `SEQUENCE { r, s }` signature.
    pub fn sign_ecdsa(&self, key: &EcPrivateKey, data: &[u8]) -> Result<Vec<u8>> {
        let curve = key.public.curve;
        let key = self.import(
            KeyMaterial::EcPrivate(key),
            &AlgorithmSpec::ecdsa_import(curve),
            KeyUsage::Sign,
        )?;
        let fixed = self.call_bytes(
            "sign",
            vec![
                Value::from(&AlgorithmSpec::ecdsa(ECDSA_HASH)),
                Value::from(key),
                Value::from(data),
            ],
        )?;
        signature_codec::fixed_to_der(&fixed, curve.field_len())
    }

    /// Verifies a DER signature produced by [`WebCrypto::sign_ecdsa`] or any
    /// other ECDSA signer over SHA-256.
    pub fn verify_ecdsa(&self, key: &EcPublicKey, signature: &[u8], data: &[u8]) -> Result<()> {
        let fixed = signature_codec::der_to_fixed(signature, key.curve.field_len())?;
        let key = self.import(
            KeyMaterial::EcPublic(key),
            &AlgorithmSpec::ecdsa_import(key.curve),
            KeyUsage::Verify,
        )?;
        self.call_verify(vec![
            Value::from(&AlgorithmSpec::ecdsa(ECDSA_HASH)),
            Value::from(key),
            Value::Bytes(fixed),
            Value::from(data),
        ])
    }
}
