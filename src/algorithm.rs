// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use webcrypto_host::{
    algorithm::{AlgorithmName, HashAlgorithm, NamedCurve},
    Object, Value,
};

pub const GCM_TAG_LENGTH: u32 = 128;

/// Parameter block passed as the `algorithm` argument of a provider call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AlgorithmSpec {
    pub name: &'static str,
    pub iv: Option<Vec<u8>>,
    /// Authentication tag length in bits.
    pub tag_length: Option<u32>,
    pub additional_data: Option<Vec<u8>>,
    pub hash: Option<HashAlgorithm>,
    /// Salt length in bytes.
    pub salt_length: Option<usize>,
    pub named_curve: Option<NamedCurve>,
    pub label: Option<Vec<u8>>,
}

impl AlgorithmSpec {
    pub fn named(name: AlgorithmName) -> Self {
        Self {
            name: name.as_str(),
            ..Default::default()
        }
    }

    pub fn digest(hash: HashAlgorithm) -> Self {
        Self {
            name: hash.as_str(),
            ..Default::default()
        }
    }

    pub fn aes_cbc(iv: &[u8]) -> Self {
        Self {
            iv: Some(iv.to_vec()),
            ..Self::named(AlgorithmName::AesCbc)
        }
    }

    pub fn aes_gcm(iv: &[u8], additional_data: Option<&[u8]>) -> Self {
        Self {
            iv: Some(iv.to_vec()),
            tag_length: Some(GCM_TAG_LENGTH),
            additional_data: additional_data.map(<[u8]>::to_vec),
            ..Self::named(AlgorithmName::AesGcm)
        }
    }

    /// Import descriptor of an RSA key; the hash is bound to the key.
    pub fn rsa_import(name: AlgorithmName, hash: HashAlgorithm) -> Self {
        Self {
            hash: Some(hash),
            ..Self::named(name)
        }
    }

    pub fn rsa_pss(salt_length: usize) -> Self {
        Self {
            salt_length: Some(salt_length),
            ..Self::named(AlgorithmName::RsaPss)
        }
    }

    pub fn rsa_oaep(label: Option<&[u8]>) -> Self {
        Self {
            label: label.map(<[u8]>::to_vec),
            ..Self::named(AlgorithmName::RsaOaep)
        }
    }

    pub fn ecdsa_import(curve: NamedCurve) -> Self {
        Self {
            named_curve: Some(curve),
            ..Self::named(AlgorithmName::Ecdsa)
        }
    }

    pub fn ecdsa(hash: HashAlgorithm) -> Self {
        Self {
            hash: Some(hash),
            ..Self::named(AlgorithmName::Ecdsa)
        }
    }

    /// Dictionary form with WebCrypto member names. Absent fields are left
    /// out.
    pub fn to_object(&self) -> Object {
        let mut obj = Object::new().with("name", self.name);
        if let Some(iv) = &self.iv {
            obj.set("iv", iv.as_slice());
        }
        if let Some(tag_length) = self.tag_length {
            obj.set("tagLength", tag_length);
        }
        if let Some(additional_data) = &self.additional_data {
            obj.set("additionalData", additional_data.as_slice());
        }
        if let Some(hash) = self.hash {
            obj.set("hash", Object::new().with("name", hash.as_str()));
        }
        if let Some(salt_length) = self.salt_length {
            obj.set("saltLength", salt_length);
        }
        if let Some(curve) = self.named_curve {
            obj.set("namedCurve", curve.as_str());
        }
        if let Some(label) = &self.label {
            obj.set("label", label.as_slice());
        }
        obj
    }
}

impl From<&AlgorithmSpec> for Value {
    fn from(spec: &AlgorithmSpec) -> Self {
        Value::Object(spec.to_object())
    }
}
