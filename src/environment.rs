// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use std::env;

use tracing::warn;

//rsa
pub const ENV_WEBCRYPTO_PSS_SALT_LENGTH: &str = "WEBCRYPTO_PSS_SALT_LENGTH";

/// SHA-256 output size.
pub const DEFAULT_PSS_SALT_LENGTH: usize = 32;

/// Salt length of providers that always salt PSS with 128 bytes.
pub const LEGACY_PSS_SALT_LENGTH: usize = 128;

pub fn get_pss_salt_length() -> usize {
    let salt_length: usize = env::var(ENV_WEBCRYPTO_PSS_SALT_LENGTH)
        .map(|length| length.parse().unwrap_or(DEFAULT_PSS_SALT_LENGTH))
        .unwrap_or(DEFAULT_PSS_SALT_LENGTH);
    if salt_length > LEGACY_PSS_SALT_LENGTH {
        warn!(
            r#""{}" exceeds {} bytes, signing fails for keys too small to fit the salt"#,
            ENV_WEBCRYPTO_PSS_SALT_LENGTH, LEGACY_PSS_SALT_LENGTH
        )
    }
    salt_length
}
