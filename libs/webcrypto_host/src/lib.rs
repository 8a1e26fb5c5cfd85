// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
pub mod algorithm;
mod crypto_key;
pub mod exception;
mod globals;
pub mod macros;
mod promise;
mod value;

pub use crypto_key::CryptoKey;
pub use exception::Exception;
pub use globals::{CryptoRoot, Globals};
pub use promise::{Promise, Resolver, Settled};
pub use value::{FromValue, Object, Value};

/// An asynchronous SubtleCrypto-style interface.
///
/// Method names and argument order follow WebCrypto:
/// `importKey(format, keyData, algorithm, extractable, usages)`,
/// `encrypt(algorithm, key, data)`, `decrypt(algorithm, key, data)`,
/// `sign(algorithm, key, data)`, `verify(algorithm, key, signature, data)`
/// and `digest(algorithm, data)`.
pub trait SubtleCrypto: Send + Sync {
    /// Starts `method` and returns its pending completion, or `None` when the
    /// interface does not expose `method`.
    fn call(&self, method: &str, args: Vec<Value>) -> Option<Promise>;
}
