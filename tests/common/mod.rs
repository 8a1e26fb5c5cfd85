// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
#![allow(dead_code)]

use p256::elliptic_curve::sec1::ToEncodedPoint;
use rsa::traits::{PrivateKeyParts, PublicKeyParts};
use webcrypto::{EcPrivateKey, EcPublicKey, NamedCurve, RsaPrivateKey, RsaPublicKey, WebCrypto};
use webcrypto_native::NativeSubtle;

pub fn native() -> WebCrypto {
    let subtle = NativeSubtle::new().unwrap();
    WebCrypto::probe(&subtle.globals())
}

pub fn hex(hex: &str) -> Vec<u8> {
    webcrypto_encoding::bytes_from_hex(hex.as_bytes()).unwrap()
}

pub fn rsa_key() -> (rsa::RsaPrivateKey, RsaPrivateKey) {
    let native = rsa::RsaPrivateKey::new(&mut rand::thread_rng(), 1024).unwrap();
    let public = RsaPublicKey::new(native.n().to_bytes_be(), native.e().to_bytes_be());
    let key = RsaPrivateKey::new(public, native.d().to_bytes_be());
    (native, key)
}

pub fn p256_key() -> (p256::SecretKey, EcPrivateKey) {
    let secret = p256::SecretKey::random(&mut rand::rngs::OsRng);
    let point = secret.public_key().to_encoded_point(false);
    let public = EcPublicKey::new(
        NamedCurve::P256,
        point.x().unwrap().to_vec(),
        point.y().unwrap().to_vec(),
    );
    let key = EcPrivateKey::new(public, secret.to_bytes().to_vec());
    (secret, key)
}

pub fn p384_key() -> EcPrivateKey {
    let secret = p384::SecretKey::random(&mut rand::rngs::OsRng);
    let point = secret.public_key().to_encoded_point(false);
    let public = EcPublicKey::new(
        NamedCurve::P384,
        point.x().unwrap().to_vec(),
        point.y().unwrap().to_vec(),
    );
    EcPrivateKey::new(public, secret.to_bytes().to_vec())
}
