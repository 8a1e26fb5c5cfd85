// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use std::fmt;

pub const OPERATION_ERROR: &str = "OperationError";
pub const DATA_ERROR: &str = "DataError";
pub const INVALID_ACCESS_ERROR: &str = "InvalidAccessError";
pub const NOT_SUPPORTED_ERROR: &str = "NotSupportedError";
pub const SYNTAX_ERROR: &str = "SyntaxError";
pub const TYPE_ERROR: &str = "TypeError";
pub const ABORT_ERROR: &str = "AbortError";

/// Failure value a provider rejects with. `name` follows the DOMException
/// names used by WebCrypto.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exception {
    name: String,
    message: String,
}

impl Exception {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn operation(message: impl Into<String>) -> Self {
        Self::new(OPERATION_ERROR, message)
    }

    pub fn data(message: impl Into<String>) -> Self {
        Self::new(DATA_ERROR, message)
    }

    pub fn invalid_access(message: impl Into<String>) -> Self {
        Self::new(INVALID_ACCESS_ERROR, message)
    }

    pub fn not_supported(message: impl Into<String>) -> Self {
        Self::new(NOT_SUPPORTED_ERROR, message)
    }

    pub fn syntax(message: impl Into<String>) -> Self {
        Self::new(SYNTAX_ERROR, message)
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new(TYPE_ERROR, message)
    }

    pub fn abort(message: impl Into<String>) -> Self {
        Self::new(ABORT_ERROR, message)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}: {}", self.name, self.message)
        }
    }
}

impl std::error::Error for Exception {}
