// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use ring::digest::{self, Algorithm};
use webcrypto_host::{algorithm::HashAlgorithm, Exception, Settled, Value};

use crate::args::Args;

fn ring_algorithm(hash: HashAlgorithm) -> &'static Algorithm {
    match hash {
        HashAlgorithm::Sha1 => &digest::SHA1_FOR_LEGACY_USE_ONLY,
        HashAlgorithm::Sha256 => &digest::SHA256,
        HashAlgorithm::Sha384 => &digest::SHA384,
        HashAlgorithm::Sha512 => &digest::SHA512,
    }
}

pub fn hash_bytes(hash: HashAlgorithm, data: &[u8]) -> Vec<u8> {
    digest::digest(ring_algorithm(hash), data).as_ref().to_vec()
}

pub fn digest(mut args: Args) -> Settled {
    let (name, _) = args.algorithm(0)?;
    let hash = HashAlgorithm::try_from(name.as_str()).map_err(Exception::not_supported)?;
    let data = args.bytes(1, "data")?;
    Ok(Value::Bytes(hash_bytes(hash, &data)))
}
