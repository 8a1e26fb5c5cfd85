// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
mod aes_variants;
mod args;
mod digest;
mod encryption;
mod import_key;
mod key_algorithm;
mod sign;

use std::{env, io, sync::Arc};

use once_cell::sync::Lazy;
use tokio::runtime::{Builder, Handle, Runtime};
use tracing::{trace, warn};
use webcrypto_host::{CryptoRoot, Globals, Promise, Settled, SubtleCrypto, Value};

use crate::args::Args;

pub use crate::digest::hash_bytes;

pub const ENV_WEBCRYPTO_WORKER_THREADS: &str = "WEBCRYPTO_WORKER_THREADS";

pub const DEFAULT_WORKER_THREADS: usize = 2;

pub fn get_worker_threads() -> usize {
    let worker_threads: usize = env::var(ENV_WEBCRYPTO_WORKER_THREADS)
        .map(|threads| threads.parse().unwrap_or(DEFAULT_WORKER_THREADS))
        .unwrap_or(DEFAULT_WORKER_THREADS);
    if worker_threads == 0 {
        warn!(
            r#""{}" must be at least 1, using {}"#,
            ENV_WEBCRYPTO_WORKER_THREADS, DEFAULT_WORKER_THREADS
        );
        return DEFAULT_WORKER_THREADS;
    }
    worker_threads
}

static RUNTIME: Lazy<io::Result<Runtime>> = Lazy::new(|| {
    Builder::new_multi_thread()
        .worker_threads(get_worker_threads())
        .thread_name("webcrypto-native")
        .build()
});

type Operation = fn(Args) -> Settled;

/// Asynchronous SubtleCrypto provider backed by RustCrypto and ring.
///
/// Every call returns immediately with a pending [`Promise`]; the work runs on
/// the blocking pool of a tokio runtime and settles the promise exactly once.
#[derive(Clone)]
pub struct NativeSubtle {
    handle: Handle,
}

impl NativeSubtle {
    /// Provider running on a process-wide runtime started on first use.
    pub fn new() -> io::Result<Self> {
        match &*RUNTIME {
            Ok(runtime) => Ok(Self::with_handle(runtime.handle().clone())),
            Err(e) => Err(io::Error::new(e.kind(), e.to_string())),
        }
    }

    pub fn with_handle(handle: Handle) -> Self {
        Self { handle }
    }

    /// Bindings exposing this provider as `crypto.subtle`.
    pub fn globals(&self) -> Globals {
        Globals::new().with_root(
            "crypto",
            CryptoRoot::new().with_interface("subtle", Arc::new(self.clone())),
        )
    }
}

impl SubtleCrypto for NativeSubtle {
    fn call(&self, method: &str, args: Vec<Value>) -> Option<Promise> {
        let operation: Operation = match method {
            "importKey" => import_key::import_key,
            "encrypt" => encryption::encrypt,
            "decrypt" => encryption::decrypt,
            "sign" => sign::sign,
            "verify" => sign::verify,
            "digest" => digest::digest,
            _ => return None,
        };
        trace!(method, args = args.len(), "Dispatching");

        let (resolver, promise) = Promise::pending();
        let method = method.to_string();
        self.handle.spawn_blocking(move || {
            let settled = operation(Args::new(args));
            if let Err(err) = &settled {
                trace!(method = %method, %err, "Rejecting");
            }
            resolver.settle(settled);
        });
        Some(promise)
    }
}
