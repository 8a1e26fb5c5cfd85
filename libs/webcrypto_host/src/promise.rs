// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use tokio::sync::oneshot;

use crate::{exception::Exception, value::Value};

pub type Settled = Result<Value, Exception>;

/// Pending completion of one provider call.
///
/// A promise has exactly two terminal states, fulfilled with a [`Value`] or
/// rejected with an [`Exception`], and is settled through its paired
/// [`Resolver`]. It can be awaited, or waited on from synchronous code with
/// [`Promise::wait`].
#[derive(Debug)]
pub struct Promise {
    rx: oneshot::Receiver<Settled>,
}

/// Settling side of a [`Promise`]. Every settling method consumes the
/// resolver, so a promise settles at most once.
#[derive(Debug)]
pub struct Resolver {
    tx: oneshot::Sender<Settled>,
}

impl Promise {
    pub fn pending() -> (Resolver, Promise) {
        let (tx, rx) = oneshot::channel();
        (Resolver { tx }, Promise { rx })
    }

    pub fn resolved(value: Value) -> Promise {
        let (resolver, promise) = Self::pending();
        resolver.resolve(value);
        promise
    }

    pub fn rejected(exception: Exception) -> Promise {
        let (resolver, promise) = Self::pending();
        resolver.reject(exception);
        promise
    }

    /// Blocks the current thread until the promise settles.
    ///
    /// # Panics
    ///
    /// Panics when called from within an asynchronous execution context;
    /// await the promise there instead.
    pub fn wait(self) -> Settled {
        self.rx.blocking_recv().unwrap_or_else(|_| Err(abandoned()))
    }
}

impl Future for Promise {
    type Output = Settled;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|settled| settled.unwrap_or_else(|_| Err(abandoned())))
    }
}

impl Resolver {
    pub fn resolve(self, value: Value) {
        self.settle(Ok(value))
    }

    pub fn reject(self, exception: Exception) {
        self.settle(Err(exception))
    }

    pub fn settle(self, settled: Settled) {
        // The caller may have stopped waiting; nobody is left to notify.
        if self.tx.send(settled).is_err() {
            tracing::trace!("Promise dropped before it was settled");
        }
    }
}

fn abandoned() -> Exception {
    Exception::abort("provider dropped the operation without settling it")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wait_returns_fulfilled_value() {
        let promise = Promise::resolved(Value::Bool(true));
        assert_eq!(promise.wait().unwrap(), Value::Bool(true));
    }

    #[test]
    fn wait_returns_rejection() {
        let promise = Promise::rejected(Exception::operation(""));
        assert_eq!(promise.wait().unwrap_err().name(), "OperationError");
    }

    #[test]
    fn dropped_resolver_rejects_with_abort() {
        let (resolver, promise) = Promise::pending();
        drop(resolver);
        assert_eq!(promise.wait().unwrap_err().name(), "AbortError");
    }

    #[test]
    fn settles_from_another_thread() {
        let (resolver, promise) = Promise::pending();
        let handle = std::thread::spawn(move || {
            std::thread::sleep(std::time::Duration::from_millis(10));
            resolver.resolve(Value::from("done"));
        });
        assert_eq!(promise.wait().unwrap(), Value::from("done"));
        handle.join().unwrap();
    }

    #[tokio::test]
    async fn can_be_awaited() {
        let (resolver, promise) = Promise::pending();
        tokio::spawn(async move {
            resolver.resolve(Value::Bytes(vec![1, 2, 3]));
        });
        assert_eq!(promise.await.unwrap(), Value::Bytes(vec![1, 2, 3]));
    }
}
