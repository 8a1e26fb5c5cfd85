// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! AES cipher variants keyed by key length (and nonce length for GCM).

use aes::{
    cipher::{
        block_padding::{Pkcs7, UnpadError},
        BlockDecryptMut, BlockEncryptMut, InvalidLength, KeyIvInit,
    },
    Aes128, Aes192, Aes256,
};
use aes_gcm::{
    aead::{
        consts::{U12, U16},
        generic_array::GenericArray,
        Aead, KeyInit, Payload,
    },
    AesGcm,
};

pub enum AesCbcEncVariant {
    Aes128(cbc::Encryptor<Aes128>),
    Aes192(cbc::Encryptor<Aes192>),
    Aes256(cbc::Encryptor<Aes256>),
}

impl AesCbcEncVariant {
    pub fn new(key_len: u16, key: &[u8], iv: &[u8]) -> Result<Self, InvalidLength> {
        let variant: AesCbcEncVariant = match key_len {
            128 => Self::Aes128(cbc::Encryptor::new_from_slices(key, iv)?),
            192 => Self::Aes192(cbc::Encryptor::new_from_slices(key, iv)?),
            256 => Self::Aes256(cbc::Encryptor::new_from_slices(key, iv)?),
            _ => return Err(InvalidLength),
        };

        Ok(variant)
    }

    pub fn encrypt(self, data: &[u8]) -> Vec<u8> {
        match self {
            Self::Aes128(v) => v.encrypt_padded_vec_mut::<Pkcs7>(data),
            Self::Aes192(v) => v.encrypt_padded_vec_mut::<Pkcs7>(data),
            Self::Aes256(v) => v.encrypt_padded_vec_mut::<Pkcs7>(data),
        }
    }
}

pub enum AesCbcDecVariant {
    Aes128(cbc::Decryptor<Aes128>),
    Aes192(cbc::Decryptor<Aes192>),
    Aes256(cbc::Decryptor<Aes256>),
}

impl AesCbcDecVariant {
    pub fn new(key_len: u16, key: &[u8], iv: &[u8]) -> Result<Self, InvalidLength> {
        let variant: AesCbcDecVariant = match key_len {
            128 => Self::Aes128(cbc::Decryptor::new_from_slices(key, iv)?),
            192 => Self::Aes192(cbc::Decryptor::new_from_slices(key, iv)?),
            256 => Self::Aes256(cbc::Decryptor::new_from_slices(key, iv)?),
            _ => return Err(InvalidLength),
        };

        Ok(variant)
    }

    pub fn decrypt(self, data: &[u8]) -> Result<Vec<u8>, UnpadError> {
        Ok(match self {
            Self::Aes128(v) => v.decrypt_padded_vec_mut::<Pkcs7>(data)?,
            Self::Aes192(v) => v.decrypt_padded_vec_mut::<Pkcs7>(data)?,
            Self::Aes256(v) => v.decrypt_padded_vec_mut::<Pkcs7>(data)?,
        })
    }
}

/// AES-GCM with a 128-bit tag and a 96-bit or 128-bit nonce.
pub enum AesGcmVariant {
    Aes128Nonce96(AesGcm<Aes128, U12>),
    Aes192Nonce96(AesGcm<Aes192, U12>),
    Aes256Nonce96(AesGcm<Aes256, U12>),
    Aes128Nonce128(AesGcm<Aes128, U16>),
    Aes192Nonce128(AesGcm<Aes192, U16>),
    Aes256Nonce128(AesGcm<Aes256, U16>),
}

impl AesGcmVariant {
    pub fn new(key_len: u16, nonce_len: usize, key: &[u8]) -> Result<Self, InvalidLength> {
        let variant = match (key_len, nonce_len) {
            (128, 12) => Self::Aes128Nonce96(AesGcm::new_from_slice(key)?),
            (192, 12) => Self::Aes192Nonce96(AesGcm::new_from_slice(key)?),
            (256, 12) => Self::Aes256Nonce96(AesGcm::new_from_slice(key)?),
            (128, 16) => Self::Aes128Nonce128(AesGcm::new_from_slice(key)?),
            (192, 16) => Self::Aes192Nonce128(AesGcm::new_from_slice(key)?),
            (256, 16) => Self::Aes256Nonce128(AesGcm::new_from_slice(key)?),
            _ => return Err(InvalidLength),
        };

        Ok(variant)
    }

    fn nonce_len(&self) -> usize {
        match self {
            Self::Aes128Nonce96(_) | Self::Aes192Nonce96(_) | Self::Aes256Nonce96(_) => 12,
            Self::Aes128Nonce128(_) | Self::Aes192Nonce128(_) | Self::Aes256Nonce128(_) => 16,
        }
    }

    pub fn encrypt(&self, nonce: &[u8], msg: &[u8], aad: &[u8]) -> Result<Vec<u8>, aes_gcm::Error> {
        if nonce.len() != self.nonce_len() {
            return Err(aes_gcm::Error);
        }
        let plaintext = Payload { msg, aad };
        match self {
            Self::Aes128Nonce96(v) => v.encrypt(GenericArray::from_slice(nonce), plaintext),
            Self::Aes192Nonce96(v) => v.encrypt(GenericArray::from_slice(nonce), plaintext),
            Self::Aes256Nonce96(v) => v.encrypt(GenericArray::from_slice(nonce), plaintext),
            Self::Aes128Nonce128(v) => v.encrypt(GenericArray::from_slice(nonce), plaintext),
            Self::Aes192Nonce128(v) => v.encrypt(GenericArray::from_slice(nonce), plaintext),
            Self::Aes256Nonce128(v) => v.encrypt(GenericArray::from_slice(nonce), plaintext),
        }
    }

    pub fn decrypt(&self, nonce: &[u8], msg: &[u8], aad: &[u8]) -> Result<Vec<u8>, aes_gcm::Error> {
        if nonce.len() != self.nonce_len() {
            return Err(aes_gcm::Error);
        }
        let ciphertext = Payload { msg, aad };
        match self {
            Self::Aes128Nonce96(v) => v.decrypt(GenericArray::from_slice(nonce), ciphertext),
            Self::Aes192Nonce96(v) => v.decrypt(GenericArray::from_slice(nonce), ciphertext),
            Self::Aes256Nonce96(v) => v.decrypt(GenericArray::from_slice(nonce), ciphertext),
            Self::Aes128Nonce128(v) => v.decrypt(GenericArray::from_slice(nonce), ciphertext),
            Self::Aes192Nonce128(v) => v.decrypt(GenericArray::from_slice(nonce), ciphertext),
            Self::Aes256Nonce128(v) => v.decrypt(GenericArray::from_slice(nonce), ciphertext),
        }
    }
}
