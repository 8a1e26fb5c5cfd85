// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use std::mem;

use webcrypto_host::{CryptoKey, Exception, FromValue, Object, Value};

/// Positional arguments of one provider call.
pub struct Args {
    values: Vec<Value>,
}

impl Args {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    fn take(&mut self, index: usize) -> Value {
        self.values
            .get_mut(index)
            .map(mem::take)
            .unwrap_or_default()
    }

    pub fn get<V: FromValue>(&mut self, index: usize, name: &str) -> Result<V, Exception> {
        let value = self.take(index);
        if value.is_nullish() {
            return Err(Exception::type_error(["'", name, "' argument required"].concat()));
        }
        V::from_value(&value)
            .map_err(|err| Exception::type_error([name, ": ", err.message()].concat()))
    }

    pub fn bytes(&mut self, index: usize, name: &str) -> Result<Vec<u8>, Exception> {
        match self.take(index) {
            Value::Bytes(bytes) => Ok(bytes),
            other => Err(Exception::type_error(
                [name, ": expected ArrayBuffer, found ", other.type_name()].concat(),
            )),
        }
    }

    pub fn key(&mut self, index: usize) -> Result<CryptoKey, Exception> {
        self.get(index, "key")
    }

    /// Normalizes an algorithm identifier, either a bare name or a dictionary
    /// with a `name` member, into its name and parameters.
    pub fn algorithm(&mut self, index: usize) -> Result<(String, Object), Exception> {
        match self.take(index) {
            Value::String(name) => Ok((name, Object::new())),
            Value::Object(params) => {
                let name: String = params.get_required("name", "algorithm")?;
                Ok((name, params))
            },
            other => Err(Exception::type_error(
                ["algorithm: expected string or object, found ", other.type_name()].concat(),
            )),
        }
    }

    pub fn raw(&mut self, index: usize) -> Value {
        self.take(index)
    }
}
