// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use std::{collections::HashMap, sync::Arc};

use crate::SubtleCrypto;

/// Named global bindings a host exposes, e.g. `crypto` or `msCrypto`.
#[derive(Default, Clone)]
pub struct Globals {
    roots: HashMap<String, CryptoRoot>,
}

/// A crypto root object and its named sub-interfaces, e.g. `subtle` or
/// `webkitSubtle`.
#[derive(Default, Clone)]
pub struct CryptoRoot {
    interfaces: HashMap<String, Arc<dyn SubtleCrypto>>,
}

impl Globals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(mut self, name: &str, root: CryptoRoot) -> Self {
        self.roots.insert(name.to_string(), root);
        self
    }

    pub fn get(&self, name: &str) -> Option<&CryptoRoot> {
        self.roots.get(name)
    }
}

impl CryptoRoot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_interface(mut self, name: &str, subtle: Arc<dyn SubtleCrypto>) -> Self {
        self.interfaces.insert(name.to_string(), subtle);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn SubtleCrypto>> {
        self.interfaces.get(name)
    }
}
