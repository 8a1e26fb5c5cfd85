// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use std::{fmt, sync::Arc};

use crate::{
    algorithm::{KeyType, KeyUsage},
    value::Object,
};

/// Opaque key handle produced by a provider's `importKey`.
///
/// The handle bytes belong to the provider that created the key (raw secret,
/// PKCS#1 DER, PKCS#8 DER or SEC1 point) and are never exposed through
/// `Debug`. Clones share the same handle.
#[derive(Clone)]
pub struct CryptoKey {
    inner: Arc<Inner>,
}

struct Inner {
    key_type: KeyType,
    extractable: bool,
    algorithm: Object,
    usages: Vec<KeyUsage>,
    handle: Box<[u8]>,
}

impl CryptoKey {
    pub fn new(
        key_type: KeyType,
        extractable: bool,
        algorithm: Object,
        usages: Vec<KeyUsage>,
        handle: impl Into<Box<[u8]>>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                key_type,
                extractable,
                algorithm,
                usages,
                handle: handle.into(),
            }),
        }
    }

    pub fn key_type(&self) -> KeyType {
        self.inner.key_type
    }

    pub fn extractable(&self) -> bool {
        self.inner.extractable
    }

    pub fn algorithm(&self) -> &Object {
        &self.inner.algorithm
    }

    pub fn usages(&self) -> &[KeyUsage] {
        &self.inner.usages
    }

    pub fn allows(&self, usage: KeyUsage) -> bool {
        self.inner.usages.contains(&usage)
    }

    pub fn handle(&self) -> &[u8] {
        &self.inner.handle
    }
}

impl PartialEq for CryptoKey {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for CryptoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CryptoKey")
            .field("type", &self.inner.key_type)
            .field("extractable", &self.inner.extractable)
            .field("algorithm", &self.inner.algorithm)
            .field("usages", &self.inner.usages)
            .finish_non_exhaustive()
    }
}
