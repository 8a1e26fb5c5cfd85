// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use webcrypto_encoding::bytes_to_b64_url_safe_string;
use webcrypto_host::{
    algorithm::{AlgorithmName, HashAlgorithm, KeyUsage, NamedCurve},
    CryptoKey, Object, Value,
};

use crate::{
    algorithm::AlgorithmSpec,
    bridge::Bridge,
    error::{Error, Result},
    key::{EcPublicKey, KeyMaterial, RsaPublicKey},
};

/// `format` and `keyData` arguments of an `importKey` call.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyDescriptor {
    pub format: &'static str,
    pub key_data: Value,
}

/// Imports `material` as a non-extractable key restricted to `usages`.
pub fn import_key(
    bridge: &Bridge,
    material: KeyMaterial<'_>,
    algorithm: &AlgorithmSpec,
    usages: &[KeyUsage],
) -> Result<CryptoKey> {
    let KeyDescriptor { format, key_data } = describe(material, algorithm, usages)?;
    bridge
        .invoke(
            "importKey",
            vec![
                Value::from(format),
                key_data,
                Value::from(algorithm),
                Value::Bool(false),
                usages_value(usages),
            ],
        )?
        .into_key()
        .ok_or_else(|| Error::UnexpectedValue {
            method: "importKey".to_string(),
            expected: "CryptoKey",
        })
}

/// Builds the provider's description of `material`: raw bytes for secret
/// keys, a JWK for RSA and EC keys.
pub fn describe(
    material: KeyMaterial<'_>,
    algorithm: &AlgorithmSpec,
    usages: &[KeyUsage],
) -> Result<KeyDescriptor> {
    let jwk = match material {
        KeyMaterial::Symmetric(bytes) => {
            return Ok(KeyDescriptor {
                format: "raw",
                key_data: Value::from(bytes),
            })
        },
        KeyMaterial::RsaPublic(key) => rsa_jwk(key, algorithm)?,
        KeyMaterial::RsaPrivate(key) => {
            rsa_jwk(&key.public, algorithm)?.with("d", minimal(&key.private_exponent, "d")?)
        },
        KeyMaterial::EcPublic(key) => ec_jwk(key)?,
        KeyMaterial::EcPrivate(key) => {
            let d = fixed_width(&key.d, key.public.curve, "d")?;
            ec_jwk(&key.public)?.with("d", d)
        },
    };
    Ok(KeyDescriptor {
        format: "jwk",
        key_data: Value::from(
            jwk.with("ext", false)
                .with("key_ops", usages_value(usages)),
        ),
    })
}

fn usages_value(usages: &[KeyUsage]) -> Value {
    Value::Array(usages.iter().map(|u| Value::from(u.as_str())).collect())
}

fn rsa_jwk(key: &RsaPublicKey, algorithm: &AlgorithmSpec) -> Result<Object> {
    let name = AlgorithmName::try_from(algorithm.name).map_err(Error::InvalidKeyMaterial)?;
    let hash = algorithm
        .hash
        .ok_or_else(|| Error::InvalidKeyMaterial("RSA key import requires a hash".to_string()))?;
    let alg = name.rsa_jwk_alg(hash).ok_or_else(|| {
        Error::InvalidKeyMaterial(format!("RSA key cannot be used with {}", name))
    })?;
    Ok(Object::new()
        .with("kty", "RSA")
        .with("alg", alg)
        .with("n", minimal(&key.modulus, "n")?)
        .with("e", minimal(&key.exponent, "e")?))
}

fn ec_jwk(key: &EcPublicKey) -> Result<Object> {
    Ok(Object::new()
        .with("kty", "EC")
        .with("crv", key.curve.as_str())
        .with("x", fixed_width(&key.x, key.curve, "x")?)
        .with("y", fixed_width(&key.y, key.curve, "y")?))
}

fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}

/// base64url of an unsigned integer without leading zero bytes.
fn minimal(bytes: &[u8], member: &str) -> Result<String> {
    match strip_leading_zeros(bytes) {
        [] => Err(Error::InvalidKeyMaterial(format!("'{}' is zero", member))),
        stripped => Ok(bytes_to_b64_url_safe_string(stripped)),
    }
}

/// base64url of an unsigned integer left-padded to the curve's field width.
fn fixed_width(bytes: &[u8], curve: NamedCurve, member: &str) -> Result<String> {
    let field_len = curve.field_len();
    let stripped = strip_leading_zeros(bytes);
    if stripped.len() > field_len {
        return Err(Error::InvalidKeyMaterial(format!(
            "'{}' is wider than {} bytes for {}",
            member, field_len, curve
        )));
    }
    let mut padded = vec![0u8; field_len - stripped.len()];
    padded.extend_from_slice(stripped);
    Ok(bytes_to_b64_url_safe_string(&padded))
}

#[cfg(test)]
mod tests {
    use webcrypto_encoding::bytes_from_b64_url_safe;
    use webcrypto_host::{algorithm::KeyType, Promise};

    use super::*;
    use crate::{
        bridge::tests::RecordingSubtle,
        key::{EcPrivateKey, RsaPrivateKey},
    };

    fn jwk_of(descriptor: &KeyDescriptor) -> &Object {
        assert_eq!(descriptor.format, "jwk");
        descriptor.key_data.as_object().unwrap()
    }

    fn member(jwk: &Object, name: &str) -> Vec<u8> {
        let encoded: String = jwk.get_required(name, "jwk").unwrap();
        bytes_from_b64_url_safe(encoded.as_bytes()).unwrap()
    }

    #[test]
    fn symmetric_keys_are_raw() {
        let descriptor = describe(
            KeyMaterial::Symmetric(&[7; 16]),
            &AlgorithmSpec::named(AlgorithmName::AesCbc),
            &[KeyUsage::Encrypt],
        )
        .unwrap();
        assert_eq!(descriptor.format, "raw");
        assert_eq!(descriptor.key_data, Value::Bytes(vec![7; 16]));
    }

    #[test]
    fn rsa_private_jwk() {
        let key = RsaPrivateKey::new(RsaPublicKey::new(vec![0, 0xc5, 0x01], vec![1, 0, 1]), vec![0x42]);
        let descriptor = describe(
            KeyMaterial::RsaPrivate(&key),
            &AlgorithmSpec::rsa_import(AlgorithmName::RsaPss, HashAlgorithm::Sha256),
            &[KeyUsage::Sign],
        )
        .unwrap();
        let jwk = jwk_of(&descriptor);
        assert_eq!(jwk.get("kty"), Some(&Value::from("RSA")));
        assert_eq!(jwk.get("alg"), Some(&Value::from("PS256")));
        assert_eq!(member(jwk, "n"), vec![0xc5, 0x01]);
        assert_eq!(jwk.get("e"), Some(&Value::from("AQAB")));
        assert_eq!(member(jwk, "d"), vec![0x42]);
        assert_eq!(jwk.get("ext"), Some(&Value::Bool(false)));
        assert_eq!(jwk.get("key_ops"), Some(&Value::from(vec!["sign"])));
    }

    #[test]
    fn rsa_public_jwk_has_no_private_members() {
        let key = RsaPublicKey::new(vec![0xc5], vec![3]);
        let descriptor = describe(
            KeyMaterial::RsaPublic(&key),
            &AlgorithmSpec::rsa_import(AlgorithmName::RsassaPkcs1v15, HashAlgorithm::Sha256),
            &[KeyUsage::Verify],
        )
        .unwrap();
        let jwk = jwk_of(&descriptor);
        assert_eq!(jwk.get("alg"), Some(&Value::from("RS256")));
        assert!(!jwk.contains_key("d"));
        assert_eq!(jwk.get("key_ops"), Some(&Value::from(vec!["verify"])));
    }

    #[test]
    fn rsa_key_needs_an_rsa_algorithm() {
        let key = RsaPublicKey::new(vec![0xc5], vec![3]);
        let err = describe(
            KeyMaterial::RsaPublic(&key),
            &AlgorithmSpec {
                hash: Some(HashAlgorithm::Sha256),
                ..AlgorithmSpec::named(AlgorithmName::Ecdsa)
            },
            &[KeyUsage::Verify],
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidKeyMaterial(_)));

        let err = describe(
            KeyMaterial::RsaPublic(&key),
            &AlgorithmSpec::named(AlgorithmName::RsaPss),
            &[KeyUsage::Verify],
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidKeyMaterial(_)));
    }

    #[test]
    fn oaep_sha1_tag_has_no_suffix() {
        let key = RsaPublicKey::new(vec![0xc5], vec![3]);
        let descriptor = describe(
            KeyMaterial::RsaPublic(&key),
            &AlgorithmSpec::rsa_import(AlgorithmName::RsaOaep, HashAlgorithm::Sha1),
            &[KeyUsage::Encrypt],
        )
        .unwrap();
        assert_eq!(jwk_of(&descriptor).get("alg"), Some(&Value::from("RSA-OAEP")));
    }

    #[test]
    fn ec_members_are_padded_to_field_width() {
        let key = EcPrivateKey::new(
            EcPublicKey::new(NamedCurve::P256, vec![1; 31], vec![0, 0, 2]),
            vec![3; 30],
        );
        let descriptor = describe(
            KeyMaterial::EcPrivate(&key),
            &AlgorithmSpec::ecdsa_import(NamedCurve::P256),
            &[KeyUsage::Sign],
        )
        .unwrap();
        let jwk = jwk_of(&descriptor);
        assert_eq!(jwk.get("crv"), Some(&Value::from("P-256")));

        let x = member(jwk, "x");
        assert_eq!(x.len(), 32);
        assert_eq!(x[0], 0);
        assert_eq!(&x[1..], &[1; 31][..]);

        let y = member(jwk, "y");
        assert_eq!(y.len(), 32);
        assert_eq!(y[31], 2);

        assert_eq!(member(jwk, "d").len(), 32);
    }

    #[test]
    fn oversized_ec_members_are_rejected() {
        let key = EcPublicKey::new(NamedCurve::P256, vec![1; 33], vec![1; 32]);
        let err = describe(
            KeyMaterial::EcPublic(&key),
            &AlgorithmSpec::ecdsa_import(NamedCurve::P256),
            &[KeyUsage::Verify],
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidKeyMaterial(_)));

        // a leading zero above the field width is not significant
        let mut x = vec![0u8];
        x.extend_from_slice(&[1; 32]);
        let key = EcPublicKey::new(NamedCurve::P256, x, vec![1; 32]);
        assert!(describe(
            KeyMaterial::EcPublic(&key),
            &AlgorithmSpec::ecdsa_import(NamedCurve::P256),
            &[KeyUsage::Verify],
        )
        .is_ok());
    }

    #[test]
    fn import_sends_non_extractable_minimal_usages() {
        let key = CryptoKey::new(
            KeyType::Secret,
            false,
            Object::new(),
            vec![KeyUsage::Decrypt],
            vec![0u8; 16],
        );
        let imported = key.clone();
        let subtle = RecordingSubtle::new(move |_, _| {
            Some(Promise::resolved(Value::from(imported.clone())))
        });
        let bridge = Bridge::new(subtle.clone());

        let result = import_key(
            &bridge,
            KeyMaterial::Symmetric(&[0; 16]),
            &AlgorithmSpec::named(AlgorithmName::AesCbc),
            &[KeyUsage::Decrypt],
        )
        .unwrap();
        assert_eq!(result, key);

        let calls = subtle.calls();
        let (method, args) = &calls[0];
        assert_eq!(method, "importKey");
        assert_eq!(args[0], Value::from("raw"));
        assert_eq!(args[2], Value::from(Object::new().with("name", "AES-CBC")));
        assert_eq!(args[3], Value::Bool(false));
        assert_eq!(args[4], Value::from(vec!["decrypt"]));
    }

    #[test]
    fn import_requires_a_key_back() {
        let subtle = RecordingSubtle::new(|_, _| Some(Promise::resolved(Value::Null)));
        let err = import_key(
            &Bridge::new(subtle),
            KeyMaterial::Symmetric(&[0; 16]),
            &AlgorithmSpec::named(AlgorithmName::AesGcm),
            &[KeyUsage::Encrypt],
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnexpectedValue { .. }));
    }
}
