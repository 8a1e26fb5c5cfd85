// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use rsa::{
    pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey},
    sha2::{Sha256, Sha384, Sha512},
    Oaep, RsaPrivateKey, RsaPublicKey,
};
use webcrypto_host::{
    algorithm::{AlgorithmName, HashAlgorithm, KeyUsage},
    CryptoKey, Exception, Object, Settled, Value,
};

use crate::{
    aes_variants::{AesCbcDecVariant, AesCbcEncVariant, AesGcmVariant},
    args::Args,
    key_algorithm::{check_key, parse_algorithm_name, KeyAlgorithm},
};

const GCM_TAG_LENGTH: u32 = 128;

#[derive(Clone, Copy, PartialEq)]
enum Direction {
    Encrypt,
    Decrypt,
}

pub fn encrypt(args: Args) -> Settled {
    encrypt_decrypt(args, Direction::Encrypt)
}

pub fn decrypt(args: Args) -> Settled {
    encrypt_decrypt(args, Direction::Decrypt)
}

fn encrypt_decrypt(mut args: Args, direction: Direction) -> Settled {
    let (name, params) = args.algorithm(0)?;
    let key = args.key(1)?;
    let data = args.bytes(2, "data")?;

    let usage = match direction {
        Direction::Encrypt => KeyUsage::Encrypt,
        Direction::Decrypt => KeyUsage::Decrypt,
    };
    let algorithm = check_key(&key, parse_algorithm_name(&name)?, usage)?;

    let bytes = match algorithm {
        KeyAlgorithm::Aes {
            name: AlgorithmName::AesCbc,
            length,
        } => aes_cbc(&key, length, &params, &data, direction)?,
        KeyAlgorithm::Aes {
            name: AlgorithmName::AesGcm,
            length,
        } => aes_gcm(&key, length, &params, &data, direction)?,
        KeyAlgorithm::Rsa {
            name: AlgorithmName::RsaOaep,
            hash,
            ..
        } => rsa_oaep(&key, hash, &params, &data, direction)?,
        other => {
            return Err(Exception::not_supported(
                ["'", other.name().as_str(), "' cannot encrypt or decrypt"].concat(),
            ))
        },
    };
    Ok(Value::Bytes(bytes))
}

fn aes_cbc(
    key: &CryptoKey,
    length: u16,
    params: &Object,
    data: &[u8],
    direction: Direction,
) -> Result<Vec<u8>, Exception> {
    let iv: Vec<u8> = params.get_required("iv", "algorithm")?;
    if iv.len() != 16 {
        return Err(Exception::operation("AES-CBC iv must be 16 bytes"));
    }
    match direction {
        Direction::Encrypt => Ok(AesCbcEncVariant::new(length, key.handle(), &iv)
            .map_err(|_| Exception::operation("Invalid AES key"))?
            .encrypt(data)),
        Direction::Decrypt => AesCbcDecVariant::new(length, key.handle(), &iv)
            .map_err(|_| Exception::operation("Invalid AES key"))?
            .decrypt(data)
            .map_err(|_| Exception::operation("Decryption failed")),
    }
}

fn aes_gcm(
    key: &CryptoKey,
    length: u16,
    params: &Object,
    data: &[u8],
    direction: Direction,
) -> Result<Vec<u8>, Exception> {
    let iv: Vec<u8> = params.get_required("iv", "algorithm")?;
    let tag_length = params
        .get_optional::<u32>("tagLength")?
        .unwrap_or(GCM_TAG_LENGTH);
    if tag_length != GCM_TAG_LENGTH {
        return Err(Exception::not_supported(
            ["AES-GCM tagLength ", &tag_length.to_string(), " not supported"].concat(),
        ));
    }
    let aad = params
        .get_optional::<Vec<u8>>("additionalData")?
        .unwrap_or_default();

    let variant = AesGcmVariant::new(length, iv.len(), key.handle())
        .map_err(|_| Exception::operation("AES-GCM iv must be 12 or 16 bytes"))?;
    match direction {
        Direction::Encrypt => variant
            .encrypt(&iv, data, &aad)
            .map_err(|_| Exception::operation("Encryption failed")),
        Direction::Decrypt => variant
            .decrypt(&iv, data, &aad)
            .map_err(|_| Exception::operation("Decryption failed")),
    }
}

fn oaep_padding(hash: HashAlgorithm, label: Option<String>) -> Result<Oaep, Exception> {
    Ok(match (hash, label) {
        (HashAlgorithm::Sha256, None) => Oaep::new::<Sha256>(),
        (HashAlgorithm::Sha384, None) => Oaep::new::<Sha384>(),
        (HashAlgorithm::Sha512, None) => Oaep::new::<Sha512>(),
        (HashAlgorithm::Sha256, Some(label)) => Oaep::new_with_label::<Sha256, _>(label),
        (HashAlgorithm::Sha384, Some(label)) => Oaep::new_with_label::<Sha384, _>(label),
        (HashAlgorithm::Sha512, Some(label)) => Oaep::new_with_label::<Sha512, _>(label),
        (HashAlgorithm::Sha1, _) => {
            return Err(Exception::not_supported("RSA-OAEP with SHA-1 not supported"))
        },
    })
}

fn rsa_oaep(
    key: &CryptoKey,
    hash: HashAlgorithm,
    params: &Object,
    data: &[u8],
    direction: Direction,
) -> Result<Vec<u8>, Exception> {
    let label = match params.get_optional::<Vec<u8>>("label")? {
        Some(label) if !label.is_empty() => Some(
            String::from_utf8(label)
                .map_err(|_| Exception::not_supported("RSA-OAEP label must be UTF-8"))?,
        ),
        _ => None,
    };
    let padding = oaep_padding(hash, label)?;

    match direction {
        Direction::Encrypt => {
            let public_key = RsaPublicKey::from_pkcs1_der(key.handle())
                .map_err(|_| Exception::operation("Invalid RSA public key"))?;
            public_key
                .encrypt(&mut rand::thread_rng(), padding, data)
                .map_err(|_| Exception::operation("Encryption failed"))
        },
        Direction::Decrypt => {
            let private_key = RsaPrivateKey::from_pkcs1_der(key.handle())
                .map_err(|_| Exception::operation("Invalid RSA private key"))?;
            private_key
                .decrypt(padding, data)
                .map_err(|_| Exception::operation("Decryption failed"))
        },
    }
}
