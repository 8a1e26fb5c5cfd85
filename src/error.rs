// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use std::fmt;

use webcrypto_host::Exception;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No crypto root or SubtleCrypto interface was found when probing.
    ProviderUnavailable,
    /// A blocking call was made on a current-thread async runtime, where
    /// waiting for the provider would stall the runtime that settles it.
    BlockingInRuntime(String),
    /// The provider does not expose the named method.
    MethodUnavailable(String),
    /// The provider rejected the operation.
    ProviderError { name: String, message: String },
    /// A DER signature could not be decoded.
    SignatureDecode(String),
    /// The provider completed verification and reported the signature invalid.
    VerificationFailed,
    /// Key material that cannot be described to the provider.
    InvalidKeyMaterial(String),
    /// The provider resolved with a value of the wrong kind.
    UnexpectedValue {
        method: String,
        expected: &'static str,
    },
}

impl Error {
    /// Provider error name (e.g. `OperationError`) for rejections.
    pub fn name(&self) -> Option<&str> {
        match self {
            Error::ProviderError { name, .. } => Some(name),
            _ => None,
        }
    }
}

impl From<Exception> for Error {
    fn from(exception: Exception) -> Self {
        Error::ProviderError {
            name: exception.name().to_string(),
            message: exception.message().to_string(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ProviderUnavailable => write!(f, "SubtleCrypto provider unavailable"),
            Error::BlockingInRuntime(method) => write!(
                f,
                "'{}' cannot block inside a current-thread async runtime, use invoke_async",
                method
            ),
            Error::MethodUnavailable(method) => {
                write!(f, "SubtleCrypto method '{}' unavailable", method)
            },
            Error::ProviderError { name, message } if message.is_empty() => write!(f, "{}", name),
            Error::ProviderError { name, message } => write!(f, "{}: {}", name, message),
            Error::SignatureDecode(reason) => write!(f, "Invalid signature encoding: {}", reason),
            Error::VerificationFailed => write!(f, "Verification failed"),
            Error::InvalidKeyMaterial(reason) => write!(f, "Invalid key material: {}", reason),
            Error::UnexpectedValue { method, expected } => {
                write!(f, "'{}' resolved with an unexpected value, expected {}", method, expected)
            },
        }
    }
}

impl std::error::Error for Error {}
