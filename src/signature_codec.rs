// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Conversion between the fixed-width `r || s` ECDSA signature a provider
//! produces and the DER `SEQUENCE { INTEGER r, INTEGER s }` encoding.
//!
//! `order` is the byte length of the curve's field prime; each fixed-width
//! component occupies exactly `order` bytes.

use der::{asn1::UintRef, Decode, Encode, Sequence};

use crate::error::{Error, Result};

#[derive(Sequence)]
struct EcdsaSigValue<'a> {
    r: UintRef<'a>,
    s: UintRef<'a>,
}

/// Splits a fixed-width signature into its `r` and `s` halves.
pub fn split_fixed(signature: &[u8], order: usize) -> Result<(&[u8], &[u8])> {
    if order == 0 || signature.len() != 2 * order {
        return Err(Error::SignatureDecode(format!(
            "expected {} signature bytes, found {}",
            2 * order,
            signature.len()
        )));
    }
    Ok(signature.split_at(order))
}

/// Left-pads `r` and `s` to `order` bytes each and concatenates them.
/// Leading zero bytes beyond `order` are dropped; a component whose
/// significant bytes exceed `order` is rejected.
pub fn pad_components(r: &[u8], s: &[u8], order: usize) -> Result<Vec<u8>> {
    let mut fixed = Vec::with_capacity(2 * order);
    for (name, component) in [("r", r), ("s", s)] {
        let component = strip_leading_zeros(component);
        if component.len() > order {
            return Err(Error::SignatureDecode(format!(
                "'{}' is {} bytes, longer than the curve order length {}",
                name,
                component.len(),
                order
            )));
        }
        fixed.resize(fixed.len() + order - component.len(), 0);
        fixed.extend_from_slice(component);
    }
    Ok(fixed)
}

pub fn encode_der(r: &[u8], s: &[u8]) -> Result<Vec<u8>> {
    let signature = EcdsaSigValue {
        r: uint(r)?,
        s: uint(s)?,
    };
    signature
        .to_der()
        .map_err(|e| Error::SignatureDecode(e.to_string()))
}

/// Decodes a DER signature into its minimal big-endian `r` and `s`.
pub fn decode_der(der: &[u8]) -> Result<(Vec<u8>, Vec<u8>)> {
    let signature =
        EcdsaSigValue::from_der(der).map_err(|e| Error::SignatureDecode(e.to_string()))?;
    Ok((
        strip_leading_zeros(signature.r.as_bytes()).to_vec(),
        strip_leading_zeros(signature.s.as_bytes()).to_vec(),
    ))
}

pub fn fixed_to_der(signature: &[u8], order: usize) -> Result<Vec<u8>> {
    let (r, s) = split_fixed(signature, order)?;
    encode_der(r, s)
}

pub fn der_to_fixed(der: &[u8], order: usize) -> Result<Vec<u8>> {
    let (r, s) = decode_der(der)?;
    pad_components(&r, &s, order)
}

fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}

fn uint(bytes: &[u8]) -> Result<UintRef<'_>> {
    let bytes = match strip_leading_zeros(bytes) {
        [] => &[0u8][..],
        stripped => stripped,
    };
    UintRef::new(bytes).map_err(|e| Error::SignatureDecode(e.to_string()))
}
