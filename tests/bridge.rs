// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
mod common;

use std::sync::Arc;

use webcrypto::{Bridge, Error, WebCrypto};
use webcrypto_host::{CryptoRoot, Globals, Object, Value};
use webcrypto_logging::MinimalTracer;
use webcrypto_native::{hash_bytes, NativeSubtle};

#[test]
fn unknown_method_fails_without_blocking() {
    let crypto = common::native();
    assert_eq!(
        crypto.bridge().invoke("deriveBits", vec![]),
        Err(Error::MethodUnavailable("deriveBits".to_string()))
    );
}

#[test]
fn missing_bindings_make_every_operation_unavailable() {
    let crypto = WebCrypto::probe(&Globals::new());
    assert_eq!(crypto.sum256(b"x"), Err(Error::ProviderUnavailable));
    let (_, key) = common::p256_key();
    assert_eq!(
        crypto.sign_ecdsa(&key, b"x"),
        Err(Error::ProviderUnavailable)
    );
}

#[test]
fn probes_alternate_bindings() {
    let subtle = Arc::new(NativeSubtle::new().unwrap());
    let globals = Globals::new().with_root(
        "msCrypto",
        CryptoRoot::new().with_interface("webkitSubtle", subtle),
    );
    let crypto = WebCrypto::probe(&globals);
    assert_eq!(
        crypto.sum256(b"abc").unwrap(),
        hash_bytes(webcrypto::HashAlgorithm::Sha256, b"abc")
    );
}

#[test]
fn provider_rejections_keep_their_name() {
    let crypto = common::native();
    let err = crypto
        .bridge()
        .invoke(
            "digest",
            vec![Value::from(Object::new().with("name", "MD5")), Value::from(&b"x"[..])],
        )
        .unwrap_err();
    assert_eq!(err.name(), Some("NotSupportedError"));
}

#[test]
fn concurrent_operations_are_independent() {
    let crypto = common::native();
    let handles: Vec<_> = (0..8u8)
        .map(|i| {
            let crypto = crypto.clone();
            std::thread::spawn(move || {
                let key = [i; 16];
                let ciphertext = crypto.encrypt_gcm(&key, &[i; 12], &[i; 33], None).unwrap();
                crypto.decrypt_gcm(&key, &[i; 12], &ciphertext, None).unwrap()
            })
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), vec![i as u8; 33]);
    }
}

#[tokio::test]
async fn blocking_operations_on_current_thread_runtime_fail() {
    let crypto = common::native();
    assert_eq!(
        crypto.sum256(b"abc"),
        Err(Error::BlockingInRuntime("digest".to_string()))
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn blocking_operations_on_multi_thread_runtime() {
    let crypto = common::native();
    assert_eq!(
        crypto.sum256(b"abc").unwrap(),
        hash_bytes(webcrypto::HashAlgorithm::Sha256, b"abc")
    );
    let (_, key) = common::p256_key();
    let signature = crypto.sign_ecdsa(&key, b"message").unwrap();
    crypto.verify_ecdsa(&key.public, &signature, b"message").unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn invoke_async_inside_a_runtime() {
    let _ = MinimalTracer::register();
    let subtle = NativeSubtle::with_handle(tokio::runtime::Handle::current());
    let bridge = Bridge::probe(&subtle.globals());
    let digest = bridge
        .invoke_async(
            "digest",
            vec![Value::from("SHA-1"), Value::from(&b"hello world"[..])],
        )
        .await
        .unwrap();
    assert_eq!(
        digest.as_bytes().map(webcrypto_encoding::bytes_to_hex_string),
        Some("2aae6c35c94fcfb415dbe95f408b9ce91ee846ed".to_string())
    );
}
