// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use std::collections::{btree_map, BTreeMap};

use crate::{crypto_key::CryptoKey, exception::Exception};

/// JSON-like value exchanged with a provider: algorithm dictionaries, JWK
/// objects, byte buffers, key handles and results.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Bytes(Vec<u8>),
    Array(Vec<Value>),
    Object(Object),
    Key(CryptoKey),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Bytes(_) => "ArrayBuffer",
            Value::Array(_) => "Array",
            Value::Object(_) => "object",
            Value::Key(_) => "CryptoKey",
        }
    }

    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_key(&self) -> Option<&CryptoKey> {
        match self {
            Value::Key(k) => Some(k),
            _ => None,
        }
    }

    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn into_key(self) -> Option<CryptoKey> {
        match self {
            Value::Key(k) => Some(k),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(value as f64)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::Number(value as f64)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Bytes(value.to_vec())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::Array(value.into_iter().map(Into::into).collect())
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Value::Object(value)
    }
}

impl From<CryptoKey> for Value {
    fn from(value: CryptoKey) -> Self {
        Value::Key(value)
    }
}

/// String-keyed dictionary, the shape of algorithm parameters and JWKs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object(BTreeMap<String, Value>);

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Object::set`].
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reads `key`, treating `undefined` and `null` as absent.
    pub fn get_optional<V: FromValue>(&self, key: &str) -> Result<Option<V>, Exception> {
        match self.0.get(key) {
            Some(value) if !value.is_nullish() => V::from_value(value)
                .map(Some)
                .map_err(|err| Exception::type_error([key, ": ", err.message()].concat())),
            _ => Ok(None),
        }
    }

    pub fn get_required<V: FromValue>(
        &self,
        key: &str,
        object_name: &'static str,
    ) -> Result<V, Exception> {
        self.get_optional(key)?.ok_or_else(|| {
            Exception::type_error([object_name, " '", key, "' property required"].concat())
        })
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Conversion out of a borrowed [`Value`], failing with a `TypeError`.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self, Exception>;
}

fn unexpected<T>(expected: &str, value: &Value) -> Result<T, Exception> {
    Err(Exception::type_error(
        ["expected ", expected, ", found ", value.type_name()].concat(),
    ))
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self, Exception> {
        Ok(value.clone())
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self, Exception> {
        match value {
            Value::Bool(b) => Ok(*b),
            _ => unexpected("boolean", value),
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self, Exception> {
        match value {
            Value::String(s) => Ok(s.clone()),
            _ => unexpected("string", value),
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self, Exception> {
        match value {
            Value::Number(n) => Ok(*n),
            _ => unexpected("number", value),
        }
    }
}

impl FromValue for u32 {
    fn from_value(value: &Value) -> Result<Self, Exception> {
        match value {
            Value::Number(n) if n.fract() == 0.0 && *n >= 0.0 && *n <= u32::MAX as f64 => {
                Ok(*n as u32)
            },
            _ => unexpected("unsigned integer", value),
        }
    }
}

impl FromValue for usize {
    fn from_value(value: &Value) -> Result<Self, Exception> {
        u32::from_value(value).map(|n| n as usize)
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: &Value) -> Result<Self, Exception> {
        match value {
            Value::Bytes(b) => Ok(b.clone()),
            _ => unexpected("ArrayBuffer", value),
        }
    }
}

impl FromValue for Vec<String> {
    fn from_value(value: &Value) -> Result<Self, Exception> {
        match value {
            Value::Array(items) => items.iter().map(String::from_value).collect(),
            _ => unexpected("Array", value),
        }
    }
}

impl FromValue for Object {
    fn from_value(value: &Value) -> Result<Self, Exception> {
        match value {
            Value::Object(o) => Ok(o.clone()),
            _ => unexpected("object", value),
        }
    }
}

impl FromValue for CryptoKey {
    fn from_value(value: &Value) -> Result<Self, Exception> {
        match value {
            Value::Key(k) => Ok(k.clone()),
            _ => unexpected("CryptoKey", value),
        }
    }
}
