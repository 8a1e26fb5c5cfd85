// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use webcrypto_host::{
    algorithm::{AlgorithmName, HashAlgorithm, KeyType, KeyUsage, NamedCurve},
    CryptoKey, Exception, Object, Value,
};

/// Algorithm bound to an imported key, stored on the [`CryptoKey`] as its
/// `algorithm` dictionary.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyAlgorithm {
    Aes {
        name: AlgorithmName,
        length: u16,
    },
    Rsa {
        name: AlgorithmName,
        hash: HashAlgorithm,
        modulus_length: u32,
        public_exponent: Vec<u8>,
    },
    Ec {
        curve: NamedCurve,
    },
}

impl KeyAlgorithm {
    pub fn name(&self) -> AlgorithmName {
        match self {
            KeyAlgorithm::Aes { name, .. } | KeyAlgorithm::Rsa { name, .. } => *name,
            KeyAlgorithm::Ec { .. } => AlgorithmName::Ecdsa,
        }
    }

    pub fn to_object(&self) -> Object {
        let obj = Object::new().with("name", self.name().as_str());
        match self {
            KeyAlgorithm::Aes { length, .. } => obj.with("length", *length as u32),
            KeyAlgorithm::Rsa {
                hash,
                modulus_length,
                public_exponent,
                ..
            } => obj
                .with("hash", Object::new().with("name", hash.as_str()))
                .with("modulusLength", *modulus_length)
                .with("publicExponent", public_exponent.as_slice()),
            KeyAlgorithm::Ec { curve } => obj.with("namedCurve", curve.as_str()),
        }
    }

    pub fn from_key(key: &CryptoKey) -> Result<Self, Exception> {
        let obj = key.algorithm();
        let name: String = obj.get_required("name", "key algorithm")?;
        let name = parse_algorithm_name(&name)?;
        Ok(match name {
            AlgorithmName::AesCbc | AlgorithmName::AesGcm => {
                let length: u32 = obj.get_required("length", "key algorithm")?;
                KeyAlgorithm::Aes {
                    name,
                    length: length as u16,
                }
            },
            AlgorithmName::RsassaPkcs1v15 | AlgorithmName::RsaPss | AlgorithmName::RsaOaep => {
                KeyAlgorithm::Rsa {
                    name,
                    hash: hash_param(obj)?,
                    modulus_length: obj.get_required("modulusLength", "key algorithm")?,
                    public_exponent: obj.get_required("publicExponent", "key algorithm")?,
                }
            },
            AlgorithmName::Ecdsa => KeyAlgorithm::Ec {
                curve: curve_param(obj)?,
            },
        })
    }
}

pub fn parse_algorithm_name(name: &str) -> Result<AlgorithmName, Exception> {
    AlgorithmName::try_from(name)
        .map_err(|_| Exception::not_supported(["Algorithm '", name, "' not supported"].concat()))
}

/// Reads the `hash` member, given either as a name or as `{ name }`.
pub fn hash_param(obj: &Object) -> Result<HashAlgorithm, Exception> {
    let name = match obj.get_required::<Value>("hash", "algorithm")? {
        Value::String(name) => name,
        Value::Object(hash) => hash.get_required("name", "hash")?,
        other => {
            return Err(Exception::type_error(
                ["hash: expected string or object, found ", other.type_name()].concat(),
            ))
        },
    };
    HashAlgorithm::try_from(name.as_str()).map_err(Exception::not_supported)
}

pub fn curve_param(obj: &Object) -> Result<NamedCurve, Exception> {
    let name: String = obj.get_required("namedCurve", "algorithm")?;
    NamedCurve::try_from(name.as_str()).map_err(Exception::not_supported)
}

/// Usage masks an algorithm allows, as `(private, public)`. Secret keys only
/// use the public mask.
fn masks(name: AlgorithmName) -> (u8, u8) {
    match name {
        AlgorithmName::AesCbc | AlgorithmName::AesGcm => {
            (0, KeyUsage::Encrypt.mask() | KeyUsage::Decrypt.mask())
        },
        AlgorithmName::RsaOaep => (KeyUsage::Decrypt.mask(), KeyUsage::Encrypt.mask()),
        AlgorithmName::RsassaPkcs1v15 | AlgorithmName::RsaPss | AlgorithmName::Ecdsa => {
            (KeyUsage::Sign.mask(), KeyUsage::Verify.mask())
        },
    }
}

/// Validates requested usages against what `name` allows for a key of
/// `key_type`.
pub fn check_usages(
    name: AlgorithmName,
    key_type: KeyType,
    usages: &[String],
) -> Result<Vec<KeyUsage>, Exception> {
    if usages.is_empty() {
        return Err(Exception::syntax("Key usages empty"));
    }
    let (private_mask, public_mask) = masks(name);
    let allowed = match key_type {
        KeyType::Private => private_mask,
        KeyType::Public | KeyType::Secret => public_mask,
    };

    let mut checked = Vec::with_capacity(usages.len());
    for usage in usages {
        let parsed = KeyUsage::try_from(usage.as_str())
            .ok()
            .filter(|u| allowed & u.mask() == u.mask())
            .ok_or_else(|| {
                Exception::syntax(
                    [
                        "Invalid key usage '",
                        usage.as_str(),
                        "' for ",
                        key_type.as_str(),
                        " ",
                        name.as_str(),
                        " key",
                    ]
                    .concat(),
                )
            })?;
        if !checked.contains(&parsed) {
            checked.push(parsed);
        }
    }
    Ok(checked)
}

/// Resolves the key's algorithm and checks it may perform `usage` under the
/// requested algorithm.
pub fn check_key(
    key: &CryptoKey,
    requested: AlgorithmName,
    usage: KeyUsage,
) -> Result<KeyAlgorithm, Exception> {
    let algorithm = KeyAlgorithm::from_key(key)?;
    if algorithm.name() != requested {
        return Err(Exception::invalid_access(
            [
                "Key algorithm '",
                algorithm.name().as_str(),
                "' does not match '",
                requested.as_str(),
                "'",
            ]
            .concat(),
        ));
    }
    if !key.allows(usage) {
        return Err(Exception::invalid_access(
            ["CryptoKey doesn't support '", usage.as_str(), "'"].concat(),
        ));
    }
    Ok(algorithm)
}
