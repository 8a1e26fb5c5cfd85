// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use webcrypto_host::{
    algorithm::{AlgorithmName, KeyUsage},
    Value,
};

use crate::{algorithm::AlgorithmSpec, error::Result, key::KeyMaterial, WebCrypto};

impl WebCrypto {
    /// AES-CBC with PKCS#7 padding. `iv` is 16 bytes.
    pub fn encrypt_cbc(&self, key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
        self.aes(
            "encrypt",
            key,
            AlgorithmName::AesCbc,
            &AlgorithmSpec::aes_cbc(iv),
            plaintext,
        )
    }

    pub fn decrypt_cbc(&self, key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
        self.aes(
            "decrypt",
            key,
            AlgorithmName::AesCbc,
            &AlgorithmSpec::aes_cbc(iv),
            ciphertext,
        )
    }

    /// AES-GCM with a 128-bit tag appended to the returned ciphertext.
    pub fn encrypt_gcm(
        &self,
        key: &[u8],
        iv: &[u8],
        plaintext: &[u8],
        additional_data: Option<&[u8]>,
    ) -> Result<Vec<u8>> {
        self.aes(
            "encrypt",
            key,
            AlgorithmName::AesGcm,
            &AlgorithmSpec::aes_gcm(iv, additional_data),
            plaintext,
        )
    }

    /// Expects the tag as the trailing 16 bytes of `ciphertext`.
    pub fn decrypt_gcm(
        &self,
        key: &[u8],
        iv: &[u8],
        ciphertext: &[u8],
        additional_data: Option<&[u8]>,
    ) -> Result<Vec<u8>> {
        self.aes(
            "decrypt",
            key,
            AlgorithmName::AesGcm,
            &AlgorithmSpec::aes_gcm(iv, additional_data),
            ciphertext,
        )
    }

    fn aes(
        &self,
        method: &str,
        key: &[u8],
        name: AlgorithmName,
        algorithm: &AlgorithmSpec,
        data: &[u8],
    ) -> Result<Vec<u8>> {
        let usage = if method == "encrypt" {
            KeyUsage::Encrypt
        } else {
            KeyUsage::Decrypt
        };
        let key = self.import(
            KeyMaterial::Symmetric(key),
            &AlgorithmSpec::named(name),
            usage,
        )?;
        self.call_bytes(
            method,
            vec![Value::from(algorithm), Value::from(key), Value::from(data)],
        )
    }
}
