// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use webcrypto_host::{algorithm::HashAlgorithm, Value};

use crate::{algorithm::AlgorithmSpec, error::Result, WebCrypto};

impl WebCrypto {
    pub fn digest(&self, hash: HashAlgorithm, data: &[u8]) -> Result<Vec<u8>> {
        self.call_bytes(
            "digest",
            vec![Value::from(&AlgorithmSpec::digest(hash)), Value::from(data)],
        )
    }

    pub fn sum1(&self, data: &[u8]) -> Result<Vec<u8>> {
        self.digest(HashAlgorithm::Sha1, data)
    }

    pub fn sum256(&self, data: &[u8]) -> Result<Vec<u8>> {
        self.digest(HashAlgorithm::Sha256, data)
    }

    pub fn sum384(&self, data: &[u8]) -> Result<Vec<u8>> {
        self.digest(HashAlgorithm::Sha384, data)
    }

    pub fn sum512(&self, data: &[u8]) -> Result<Vec<u8>> {
        self.digest(HashAlgorithm::Sha512, data)
    }
}
