// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use std::sync::Arc;

use tokio::runtime::{Handle, RuntimeFlavor};
use tracing::{debug, trace};
use webcrypto_host::{Globals, Promise, SubtleCrypto, Value};

use crate::error::{Error, Result};

const CRYPTO_ROOTS: [&str; 2] = ["crypto", "msCrypto"];
const SUBTLE_INTERFACES: [&str; 2] = ["subtle", "webkitSubtle"];

/// Turns the provider's promise-based completion into a plain result.
///
/// A bridge is resolved once, usually by [`Bridge::probe`], and then passed to
/// everything that talks to the provider. Cloning shares the provider handle.
#[derive(Clone)]
pub struct Bridge {
    subtle: Option<Arc<dyn SubtleCrypto>>,
}

impl Bridge {
    pub fn new(subtle: Arc<dyn SubtleCrypto>) -> Self {
        Self {
            subtle: Some(subtle),
        }
    }

    /// Resolves the provider from `crypto` or `msCrypto`, then `subtle` or
    /// `webkitSubtle` on that root. When nothing is found the bridge is still
    /// built, and every invocation fails with [`Error::ProviderUnavailable`].
    pub fn probe(globals: &Globals) -> Self {
        let found = CRYPTO_ROOTS.iter().find_map(|root_name| {
            globals.get(root_name).map(|root| {
                let subtle = SUBTLE_INTERFACES.iter().find_map(|interface| {
                    root.get(interface).map(|subtle| (*interface, subtle.clone()))
                });
                (*root_name, subtle)
            })
        });
        match found {
            Some((root, Some((interface, subtle)))) => {
                debug!(root, interface, "Resolved SubtleCrypto provider");
                Self::new(subtle)
            },
            Some((root, None)) => {
                debug!(root, "Crypto root has no SubtleCrypto interface");
                Self::unavailable()
            },
            None => {
                debug!("No crypto root found");
                Self::unavailable()
            },
        }
    }

    pub fn unavailable() -> Self {
        Self { subtle: None }
    }

    pub fn is_available(&self) -> bool {
        self.subtle.is_some()
    }

    /// Calls `method` and blocks the current thread until the provider
    /// settles.
    ///
    /// There is no timeout: a provider that never settles blocks forever.
    ///
    /// On a worker of a multi-thread tokio runtime the wait goes through
    /// [`tokio::task::block_in_place`]. On a current-thread runtime nothing
    /// is sent to the provider and [`Error::BlockingInRuntime`] is returned;
    /// use [`Bridge::invoke_async`] there.
    pub fn invoke(&self, method: &str, args: Vec<Value>) -> Result<Value> {
        let in_runtime = match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => true,
            Ok(_) => {
                debug!(method, "Refusing to block a current-thread runtime");
                return Err(Error::BlockingInRuntime(method.to_string()));
            },
            Err(_) => false,
        };
        let promise = self.start(method, args)?;
        let settled = if in_runtime {
            tokio::task::block_in_place(|| promise.wait())
        } else {
            promise.wait()
        };
        settle(method, settled)
    }

    pub async fn invoke_async(&self, method: &str, args: Vec<Value>) -> Result<Value> {
        let promise = self.start(method, args)?;
        settle(method, promise.await)
    }

    fn start(&self, method: &str, args: Vec<Value>) -> Result<Promise> {
        let subtle = self.subtle.as_ref().ok_or(Error::ProviderUnavailable)?;
        trace!(method, "Invoking");
        subtle
            .call(method, args)
            .ok_or_else(|| Error::MethodUnavailable(method.to_string()))
    }
}

fn settle(method: &str, settled: webcrypto_host::Settled) -> Result<Value> {
    settled.map_err(|exception| {
        debug!(method, %exception, "Rejected");
        Error::from(exception)
    })
}
