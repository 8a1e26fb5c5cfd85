// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use rsa::{
    pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey},
    pss::Pss,
    sha2::{Sha256, Sha384, Sha512},
    Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey,
};
use webcrypto_host::{
    algorithm::{AlgorithmName, HashAlgorithm, KeyUsage, NamedCurve},
    CryptoKey, Exception, Object, Settled, Value,
};

use crate::{
    args::Args,
    digest::hash_bytes,
    key_algorithm::{check_key, hash_param, parse_algorithm_name, KeyAlgorithm},
};

fn pkcs1_scheme(hash: HashAlgorithm) -> Result<Pkcs1v15Sign, Exception> {
    match hash {
        HashAlgorithm::Sha256 => Ok(Pkcs1v15Sign::new::<Sha256>()),
        HashAlgorithm::Sha384 => Ok(Pkcs1v15Sign::new::<Sha384>()),
        HashAlgorithm::Sha512 => Ok(Pkcs1v15Sign::new::<Sha512>()),
        HashAlgorithm::Sha1 => Err(Exception::not_supported(
            "RSASSA-PKCS1-v1_5 with SHA-1 not supported",
        )),
    }
}

fn pss_scheme(hash: HashAlgorithm, salt_length: usize) -> Result<Pss, Exception> {
    match hash {
        HashAlgorithm::Sha256 => Ok(Pss::new_with_salt::<Sha256>(salt_length)),
        HashAlgorithm::Sha384 => Ok(Pss::new_with_salt::<Sha384>(salt_length)),
        HashAlgorithm::Sha512 => Ok(Pss::new_with_salt::<Sha512>(salt_length)),
        HashAlgorithm::Sha1 => Err(Exception::not_supported("RSA-PSS with SHA-1 not supported")),
    }
}

fn salt_length(params: &Object) -> Result<usize, Exception> {
    params.get_required("saltLength", "algorithm")
}

pub fn sign(mut args: Args) -> Settled {
    let (name, params) = args.algorithm(0)?;
    let key = args.key(1)?;
    let data = args.bytes(2, "data")?;
    let algorithm = check_key(&key, parse_algorithm_name(&name)?, KeyUsage::Sign)?;

    let signature = match algorithm {
        KeyAlgorithm::Rsa {
            name: AlgorithmName::RsassaPkcs1v15,
            hash,
            ..
        } => rsa_sign(&key, hash, pkcs1_scheme(hash)?, &data)?,
        KeyAlgorithm::Rsa {
            name: AlgorithmName::RsaPss,
            hash,
            ..
        } => rsa_sign(&key, hash, pss_scheme(hash, salt_length(&params)?)?, &data)?,
        KeyAlgorithm::Ec { curve } => {
            let digest = hash_bytes(hash_param(&params)?, &data);
            ecdsa_sign(curve, key.handle(), &digest)?
        },
        other => {
            return Err(Exception::not_supported(
                ["'", other.name().as_str(), "' cannot sign"].concat(),
            ))
        },
    };
    Ok(Value::Bytes(signature))
}

/// Verifies a signature. Signatures that are malformed or of the wrong
/// length verify as `false`.
pub fn verify(mut args: Args) -> Settled {
    let (name, params) = args.algorithm(0)?;
    let key = args.key(1)?;
    let signature = args.bytes(2, "signature")?;
    let data = args.bytes(3, "data")?;
    let algorithm = check_key(&key, parse_algorithm_name(&name)?, KeyUsage::Verify)?;

    let valid = match algorithm {
        KeyAlgorithm::Rsa {
            name: AlgorithmName::RsassaPkcs1v15,
            hash,
            ..
        } => rsa_verify(&key, hash, pkcs1_scheme(hash)?, &signature, &data)?,
        KeyAlgorithm::Rsa {
            name: AlgorithmName::RsaPss,
            hash,
            ..
        } => rsa_verify(
            &key,
            hash,
            pss_scheme(hash, salt_length(&params)?)?,
            &signature,
            &data,
        )?,
        KeyAlgorithm::Ec { curve } => {
            let digest = hash_bytes(hash_param(&params)?, &data);
            ecdsa_verify(curve, key.handle(), &signature, &digest)?
        },
        other => {
            return Err(Exception::not_supported(
                ["'", other.name().as_str(), "' cannot verify"].concat(),
            ))
        },
    };
    Ok(Value::Bool(valid))
}

fn rsa_sign<S: rsa::traits::SignatureScheme>(
    key: &CryptoKey,
    hash: HashAlgorithm,
    scheme: S,
    data: &[u8],
) -> Result<Vec<u8>, Exception> {
    let private_key = RsaPrivateKey::from_pkcs1_der(key.handle())
        .map_err(|_| Exception::operation("Invalid RSA private key"))?;
    private_key
        .sign_with_rng(&mut rand::thread_rng(), scheme, &hash_bytes(hash, data))
        .map_err(|_| Exception::operation("Signing failed"))
}

fn rsa_verify<S: rsa::traits::SignatureScheme>(
    key: &CryptoKey,
    hash: HashAlgorithm,
    scheme: S,
    signature: &[u8],
    data: &[u8],
) -> Result<bool, Exception> {
    let public_key = RsaPublicKey::from_pkcs1_der(key.handle())
        .map_err(|_| Exception::operation("Invalid RSA public key"))?;
    Ok(public_key
        .verify(scheme, &hash_bytes(hash, data), signature)
        .is_ok())
}

/// Signs a prehashed message, returning the fixed-width `r || s` encoding.
fn ecdsa_sign(curve: NamedCurve, secret: &[u8], digest: &[u8]) -> Result<Vec<u8>, Exception> {
    match curve {
        NamedCurve::P256 => {
            let signing_key = p256::ecdsa::SigningKey::from_slice(secret)
                .map_err(|_| Exception::operation("Invalid EC private key"))?;
            let signature: p256::ecdsa::Signature = signing_key
                .sign_prehash(digest)
                .map_err(|_| Exception::operation("Signing failed"))?;
            Ok(signature.to_bytes().to_vec())
        },
        NamedCurve::P384 => {
            let signing_key = p384::ecdsa::SigningKey::from_slice(secret)
                .map_err(|_| Exception::operation("Invalid EC private key"))?;
            let signature: p384::ecdsa::Signature = signing_key
                .sign_prehash(digest)
                .map_err(|_| Exception::operation("Signing failed"))?;
            Ok(signature.to_bytes().to_vec())
        },
        NamedCurve::P521 => Err(Exception::not_supported("ECDSA on P-521 not supported")),
    }
}

fn ecdsa_verify(
    curve: NamedCurve,
    public_point: &[u8],
    signature: &[u8],
    digest: &[u8],
) -> Result<bool, Exception> {
    match curve {
        NamedCurve::P256 => {
            let verifying_key = p256::ecdsa::VerifyingKey::from_sec1_bytes(public_point)
                .map_err(|_| Exception::operation("Invalid EC public key"))?;
            let Ok(signature) = p256::ecdsa::Signature::from_slice(signature) else {
                return Ok(false);
            };
            Ok(verifying_key.verify_prehash(digest, &signature).is_ok())
        },
        NamedCurve::P384 => {
            let verifying_key = p384::ecdsa::VerifyingKey::from_sec1_bytes(public_point)
                .map_err(|_| Exception::operation("Invalid EC public key"))?;
            let Ok(signature) = p384::ecdsa::Signature::from_slice(signature) else {
                return Ok(false);
            };
            Ok(verifying_key.verify_prehash(digest, &signature).is_ok())
        },
        NamedCurve::P521 => Err(Exception::not_supported("ECDSA on P-521 not supported")),
    }
}

#[cfg(test)]
mod tests {
    use p256::elliptic_curve::sec1::ToEncodedPoint;
    use rsa::pkcs1::{EncodeRsaPrivateKey, EncodeRsaPublicKey};
    use webcrypto_host::algorithm::KeyType;

    use super::*;

    fn ec_keys(secret_key: &p256::SecretKey) -> (CryptoKey, CryptoKey) {
        let algorithm = KeyAlgorithm::Ec {
            curve: NamedCurve::P256,
        }
        .to_object();
        let point = secret_key.public_key().to_encoded_point(false);
        (
            CryptoKey::new(
                KeyType::Private,
                false,
                algorithm.clone(),
                vec![KeyUsage::Sign],
                secret_key.to_bytes().to_vec(),
            ),
            CryptoKey::new(
                KeyType::Public,
                false,
                algorithm,
                vec![KeyUsage::Verify],
                point.as_bytes().to_vec(),
            ),
        )
    }

    fn rsa_keys(name: AlgorithmName) -> (CryptoKey, CryptoKey) {
        let private_key = RsaPrivateKey::new(&mut rand::thread_rng(), 1024).unwrap();
        let algorithm = KeyAlgorithm::Rsa {
            name,
            hash: HashAlgorithm::Sha256,
            modulus_length: 1024,
            public_exponent: vec![1, 0, 1],
        }
        .to_object();
        (
            CryptoKey::new(
                KeyType::Private,
                false,
                algorithm.clone(),
                vec![KeyUsage::Sign],
                private_key.to_pkcs1_der().unwrap().as_bytes().to_vec(),
            ),
            CryptoKey::new(
                KeyType::Public,
                false,
                algorithm,
                vec![KeyUsage::Verify],
                private_key
                    .to_public_key()
                    .to_pkcs1_der()
                    .unwrap()
                    .as_bytes()
                    .to_vec(),
            ),
        )
    }

    fn sign_with(algorithm: &Object, key: &CryptoKey, data: &[u8]) -> Settled {
        sign(Args::new(vec![
            Value::from(algorithm.clone()),
            Value::from(key.clone()),
            Value::from(data),
        ]))
    }

    fn verify_with(algorithm: &Object, key: &CryptoKey, signature: &[u8], data: &[u8]) -> Settled {
        verify(Args::new(vec![
            Value::from(algorithm.clone()),
            Value::from(key.clone()),
            Value::from(signature),
            Value::from(data),
        ]))
    }

    #[test]
    fn ecdsa_signatures_are_fixed_width() {
        let (private, public) = ec_keys(&p256::SecretKey::random(&mut rand::thread_rng()));
        let algorithm = Object::new().with("name", "ECDSA").with("hash", "SHA-256");

        let signature = sign_with(&algorithm, &private, b"message")
            .unwrap()
            .into_bytes()
            .unwrap();
        assert_eq!(signature.len(), 64);

        let valid = verify_with(&algorithm, &public, &signature, b"message").unwrap();
        assert_eq!(valid, Value::Bool(true));
        let valid = verify_with(&algorithm, &public, &signature, b"other").unwrap();
        assert_eq!(valid, Value::Bool(false));
    }

    #[test]
    fn malformed_signatures_verify_as_false() {
        let (_, public) = ec_keys(&p256::SecretKey::random(&mut rand::thread_rng()));
        let algorithm = Object::new().with("name", "ECDSA").with("hash", "SHA-256");
        let valid = verify_with(&algorithm, &public, &[1u8; 63], b"message").unwrap();
        assert_eq!(valid, Value::Bool(false));
        let valid = verify_with(&algorithm, &public, &[0u8; 64], b"message").unwrap();
        assert_eq!(valid, Value::Bool(false));
    }

    #[test]
    fn signing_needs_a_private_key() {
        let (_, public) = ec_keys(&p256::SecretKey::random(&mut rand::thread_rng()));
        let algorithm = Object::new().with("name", "ECDSA").with("hash", "SHA-256");
        let err = sign_with(&algorithm, &public, b"message").unwrap_err();
        assert_eq!(err.name(), "InvalidAccessError");
    }

    #[test]
    fn pss_and_pkcs1_are_not_interchangeable() {
        let (private, public) = rsa_keys(AlgorithmName::RsaPss);
        let pss = Object::new().with("name", "RSA-PSS").with("saltLength", 32u32);
        let signature = sign_with(&pss, &private, b"message")
            .unwrap()
            .into_bytes()
            .unwrap();
        assert_eq!(
            verify_with(&pss, &public, &signature, b"message").unwrap(),
            Value::Bool(true)
        );

        let pkcs1 = Object::new().with("name", "RSASSA-PKCS1-v1_5");
        let err = verify_with(&pkcs1, &public, &signature, b"message").unwrap_err();
        assert_eq!(err.name(), "InvalidAccessError");
    }

    #[test]
    fn pss_requires_salt_length() {
        let (private, _) = rsa_keys(AlgorithmName::RsaPss);
        let err = sign_with(&Object::new().with("name", "RSA-PSS"), &private, b"m").unwrap_err();
        assert_eq!(err.name(), "TypeError");
    }

    #[test]
    fn pkcs1_round_trip() {
        let (private, public) = rsa_keys(AlgorithmName::RsassaPkcs1v15);
        let algorithm = Object::new().with("name", "RSASSA-PKCS1-v1_5");
        let signature = sign_with(&algorithm, &private, b"message")
            .unwrap()
            .into_bytes()
            .unwrap();
        assert_eq!(signature.len(), 128);
        assert_eq!(
            verify_with(&algorithm, &public, &signature, b"message").unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            verify_with(&algorithm, &public, &signature[1..], b"message").unwrap(),
            Value::Bool(false)
        );
    }
}
