// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use rsa::{
    pkcs1::{EncodeRsaPrivateKey, EncodeRsaPublicKey},
    traits::PublicKeyParts,
    BigUint, RsaPrivateKey, RsaPublicKey,
};
use webcrypto_encoding::bytes_from_b64_url_safe;
use webcrypto_host::{
    algorithm::{AlgorithmName, HashAlgorithm, KeyType, NamedCurve},
    CryptoKey, Exception, Object, Settled, Value,
};

use crate::{
    args::Args,
    key_algorithm::{check_usages, curve_param, hash_param, parse_algorithm_name, KeyAlgorithm},
};

struct ImportedKey {
    key_type: KeyType,
    algorithm: KeyAlgorithm,
    handle: Vec<u8>,
}

pub fn import_key(mut args: Args) -> Settled {
    let format: String = args.get(0, "format")?;
    let key_data = args.raw(1);
    let (name, params) = args.algorithm(2)?;
    let extractable: bool = args.get(3, "extractable")?;
    let usages: Vec<String> = args.get(4, "keyUsages")?;

    let name = parse_algorithm_name(&name)?;
    let imported = match (format.as_str(), name) {
        ("raw", AlgorithmName::AesCbc | AlgorithmName::AesGcm) => {
            import_aes_raw(name, key_data)?
        },
        (
            "jwk",
            AlgorithmName::RsassaPkcs1v15 | AlgorithmName::RsaPss | AlgorithmName::RsaOaep,
        ) => {
            let jwk = jwk_object(key_data, extractable, &usages)?;
            import_rsa_jwk(name, &params, &jwk)?
        },
        ("jwk", AlgorithmName::Ecdsa) => {
            let jwk = jwk_object(key_data, extractable, &usages)?;
            import_ec_jwk(&params, &jwk)?
        },
        _ => {
            return Err(Exception::not_supported(
                ["Format '", &format, "' not supported for '", name.as_str(), "'"].concat(),
            ))
        },
    };

    let usages = check_usages(name, imported.key_type, &usages)?;
    Ok(Value::Key(CryptoKey::new(
        imported.key_type,
        extractable,
        imported.algorithm.to_object(),
        usages,
        imported.handle,
    )))
}

fn import_aes_raw(name: AlgorithmName, key_data: Value) -> Result<ImportedKey, Exception> {
    let bytes = key_data
        .into_bytes()
        .ok_or_else(|| Exception::type_error("raw key data must be an ArrayBuffer"))?;
    let length = match bytes.len() {
        16 => 128,
        24 => 192,
        32 => 256,
        _ => return Err(Exception::data("AES key data must be 128, 192 or 256 bits")),
    };
    Ok(ImportedKey {
        key_type: KeyType::Secret,
        algorithm: KeyAlgorithm::Aes { name, length },
        handle: bytes,
    })
}

/// Checks the JWK members shared by every key type against the import
/// request.
fn jwk_object(key_data: Value, extractable: bool, usages: &[String]) -> Result<Object, Exception> {
    let Value::Object(jwk) = key_data else {
        return Err(Exception::type_error("jwk key data must be an object"));
    };
    if jwk.get_optional::<bool>("ext")? == Some(false) && extractable {
        return Err(Exception::data("JWK 'ext' is false but key requested extractable"));
    }
    if let Some(key_ops) = jwk.get_optional::<Vec<String>>("key_ops")? {
        if let Some(usage) = usages.iter().find(|usage| !key_ops.contains(usage)) {
            return Err(Exception::data(
                ["Usage '", usage.as_str(), "' not allowed by JWK 'key_ops'"].concat(),
            ));
        }
    }
    Ok(jwk)
}

fn check_kty(jwk: &Object, expected: &str) -> Result<(), Exception> {
    let kty: String = jwk.get_required("kty", "jwk")?;
    if kty != expected {
        return Err(Exception::data(
            ["JWK 'kty' must be '", expected, "', found '", &kty, "'"].concat(),
        ));
    }
    Ok(())
}

fn b64_member(jwk: &Object, member: &str) -> Result<Option<Vec<u8>>, Exception> {
    match jwk.get_optional::<String>(member)? {
        Some(encoded) => bytes_from_b64_url_safe(encoded.as_bytes())
            .map(Some)
            .map_err(|e| Exception::data(["JWK '", member, "': ", &e].concat())),
        None => Ok(None),
    }
}

fn required_b64_member(jwk: &Object, member: &str) -> Result<Vec<u8>, Exception> {
    b64_member(jwk, member)?
        .ok_or_else(|| Exception::data(["JWK '", member, "' member required"].concat()))
}

fn import_rsa_jwk(
    name: AlgorithmName,
    params: &Object,
    jwk: &Object,
) -> Result<ImportedKey, Exception> {
    check_kty(jwk, "RSA")?;
    let hash = hash_param(params)?;
    if hash == HashAlgorithm::Sha1 {
        return Err(Exception::not_supported(
            [name.as_str(), " with SHA-1 not supported"].concat(),
        ));
    }
    if let Some(alg) = jwk.get_optional::<String>("alg")? {
        let expected = name.rsa_jwk_alg(hash).ok_or_else(|| {
            Exception::not_supported([name.as_str(), " keys are not RSA keys"].concat())
        })?;
        if alg != expected {
            return Err(Exception::data(
                ["JWK 'alg' must be '", &expected, "', found '", &alg, "'"].concat(),
            ));
        }
    }

    let n = BigUint::from_bytes_be(&required_b64_member(jwk, "n")?);
    let e = BigUint::from_bytes_be(&required_b64_member(jwk, "e")?);

    let (key_type, public_key, handle) = match b64_member(jwk, "d")? {
        Some(d) => {
            // Primes are recovered from n, e and d.
            let private_key =
                RsaPrivateKey::from_components(n, e, BigUint::from_bytes_be(&d), Vec::new())
                    .map_err(|_| Exception::data("Invalid RSA private key"))?;
            private_key
                .validate()
                .map_err(|_| Exception::data("Invalid RSA private key"))?;
            let der = private_key
                .to_pkcs1_der()
                .map_err(|_| Exception::data("Invalid RSA private key"))?;
            (
                KeyType::Private,
                private_key.to_public_key(),
                der.as_bytes().to_vec(),
            )
        },
        None => {
            let public_key = RsaPublicKey::new(n, e)
                .map_err(|_| Exception::data("Invalid RSA public key"))?;
            let der = public_key
                .to_pkcs1_der()
                .map_err(|_| Exception::data("Invalid RSA public key"))?;
            (KeyType::Public, public_key, der.as_bytes().to_vec())
        },
    };

    Ok(ImportedKey {
        key_type,
        algorithm: KeyAlgorithm::Rsa {
            name,
            hash,
            modulus_length: (public_key.size() * 8) as u32,
            public_exponent: public_key.e().to_bytes_be(),
        },
        handle,
    })
}

fn fixed_member(jwk: &Object, member: &str, curve: NamedCurve) -> Result<Vec<u8>, Exception> {
    let bytes = required_b64_member(jwk, member)?;
    if bytes.len() != curve.field_len() {
        return Err(Exception::data(
            [
                "JWK '",
                member,
                "' must be ",
                &curve.field_len().to_string(),
                " bytes for ",
                curve.as_str(),
            ]
            .concat(),
        ));
    }
    Ok(bytes)
}

/// Imports an EC JWK. Private key handles hold the raw scalar, public key
/// handles the uncompressed SEC1 point.
fn import_ec_jwk(params: &Object, jwk: &Object) -> Result<ImportedKey, Exception> {
    check_kty(jwk, "EC")?;
    let curve = curve_param(params)?;
    let crv: String = jwk.get_required("crv", "jwk")?;
    if crv != curve.as_str() {
        return Err(Exception::data(
            ["JWK 'crv' '", &crv, "' does not match '", curve.as_str(), "'"].concat(),
        ));
    }
    if curve == NamedCurve::P521 {
        return Err(Exception::not_supported("ECDSA on P-521 not supported"));
    }

    let x = fixed_member(jwk, "x", curve)?;
    let y = fixed_member(jwk, "y", curve)?;
    let mut point = Vec::with_capacity(1 + x.len() + y.len());
    point.push(0x04);
    point.extend_from_slice(&x);
    point.extend_from_slice(&y);

    let d = jwk
        .contains_key("d")
        .then(|| fixed_member(jwk, "d", curve))
        .transpose()?;
    let matches = match curve {
        NamedCurve::P256 => {
            let public_key = p256::PublicKey::from_sec1_bytes(&point)
                .map_err(|_| Exception::data("Invalid EC public key"))?;
            match &d {
                Some(d) => {
                    let secret_key = p256::SecretKey::from_slice(d)
                        .map_err(|_| Exception::data("Invalid EC private key"))?;
                    secret_key.public_key() == public_key
                },
                None => true,
            }
        },
        NamedCurve::P384 => {
            let public_key = p384::PublicKey::from_sec1_bytes(&point)
                .map_err(|_| Exception::data("Invalid EC public key"))?;
            match &d {
                Some(d) => {
                    let secret_key = p384::SecretKey::from_slice(d)
                        .map_err(|_| Exception::data("Invalid EC private key"))?;
                    secret_key.public_key() == public_key
                },
                None => true,
            }
        },
        NamedCurve::P521 => false,
    };
    if !matches {
        return Err(Exception::data("JWK 'd' does not match 'x' and 'y'"));
    }

    let (key_type, handle) = match d {
        Some(d) => (KeyType::Private, d),
        None => (KeyType::Public, point),
    };
    Ok(ImportedKey {
        key_type,
        algorithm: KeyAlgorithm::Ec { curve },
        handle,
    })
}
