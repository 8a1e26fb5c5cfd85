// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use webcrypto_host::{
    algorithm::{AlgorithmName, HashAlgorithm, KeyUsage},
    CryptoKey, Value,
};

use crate::{
    algorithm::AlgorithmSpec,
    error::{Error, Result},
    key::{KeyMaterial, RsaPrivateKey, RsaPublicKey},
    WebCrypto,
};

/// Hash bound to every imported RSA key.
const RSA_HASH: HashAlgorithm = HashAlgorithm::Sha256;

impl WebCrypto {
    /// RSASSA-PKCS1-v1_5 over SHA-256.
    pub fn sign_pkcs1(&self, key: &RsaPrivateKey, data: &[u8]) -> Result<Vec<u8>> {
        let algorithm = AlgorithmSpec::named(AlgorithmName::RsassaPkcs1v15);
        self.rsa_sign(KeyMaterial::RsaPrivate(key), &algorithm, data)
    }

    pub fn verify_pkcs1(&self, key: &RsaPublicKey, signature: &[u8], data: &[u8]) -> Result<()> {
        let algorithm = AlgorithmSpec::named(AlgorithmName::RsassaPkcs1v15);
        self.rsa_verify(KeyMaterial::RsaPublic(key), &algorithm, signature, data)
    }

    /// RSA-PSS over SHA-256 with [`WebCrypto::pss_salt_length`] bytes of salt.
    pub fn sign_pss(&self, key: &RsaPrivateKey, data: &[u8]) -> Result<Vec<u8>> {
        let algorithm = AlgorithmSpec::rsa_pss(self.pss_salt_length);
        self.rsa_sign(KeyMaterial::RsaPrivate(key), &algorithm, data)
    }

    pub fn verify_pss(&self, key: &RsaPublicKey, signature: &[u8], data: &[u8]) -> Result<()> {
        let algorithm = AlgorithmSpec::rsa_pss(self.pss_salt_length);
        self.rsa_verify(KeyMaterial::RsaPublic(key), &algorithm, signature, data)
    }

    /// RSA-OAEP with SHA-256 and an optional label.
    pub fn encrypt_oaep(
        &self,
        key: &RsaPublicKey,
        plaintext: &[u8],
        label: Option<&[u8]>,
    ) -> Result<Vec<u8>> {
        let key = self.import_rsa(
            KeyMaterial::RsaPublic(key),
            AlgorithmName::RsaOaep,
            KeyUsage::Encrypt,
        )?;
        self.call_bytes(
            "encrypt",
            vec![
                Value::from(&AlgorithmSpec::rsa_oaep(label)),
                Value::from(key),
                Value::from(plaintext),
            ],
        )
    }

    pub fn decrypt_oaep(
        &self,
        key: &RsaPrivateKey,
        ciphertext: &[u8],
        label: Option<&[u8]>,
    ) -> Result<Vec<u8>> {
        let key = self.import_rsa(
            KeyMaterial::RsaPrivate(key),
            AlgorithmName::RsaOaep,
            KeyUsage::Decrypt,
        )?;
        self.call_bytes(
            "decrypt",
            vec![
                Value::from(&AlgorithmSpec::rsa_oaep(label)),
                Value::from(key),
                Value::from(ciphertext),
            ],
        )
    }

    fn rsa_sign(
        &self,
        material: KeyMaterial<'_>,
        algorithm: &AlgorithmSpec,
        data: &[u8],
    ) -> Result<Vec<u8>> {
        let key = self.import_rsa(material, rsa_name(algorithm)?, KeyUsage::Sign)?;
        self.call_bytes(
            "sign",
            vec![Value::from(algorithm), Value::from(key), Value::from(data)],
        )
    }

    fn rsa_verify(
        &self,
        material: KeyMaterial<'_>,
        algorithm: &AlgorithmSpec,
        signature: &[u8],
        data: &[u8],
    ) -> Result<()> {
        let key = self.import_rsa(material, rsa_name(algorithm)?, KeyUsage::Verify)?;
        self.call_verify(vec![
            Value::from(algorithm),
            Value::from(key),
            Value::from(signature),
            Value::from(data),
        ])
    }

    fn import_rsa(
        &self,
        material: KeyMaterial<'_>,
        name: AlgorithmName,
        usage: KeyUsage,
    ) -> Result<CryptoKey> {
        self.import(material, &AlgorithmSpec::rsa_import(name, RSA_HASH), usage)
    }
}

fn rsa_name(algorithm: &AlgorithmSpec) -> Result<AlgorithmName> {
    AlgorithmName::try_from(algorithm.name).map_err(Error::InvalidKeyMaterial)
}

#[cfg(test)]
mod tests {
    use webcrypto_host::Object;

    use super::*;
    use crate::tests::{fake_provider, methods};

    fn private_key() -> RsaPrivateKey {
        RsaPrivateKey::new(
            RsaPublicKey::new(vec![0xc5; 128], vec![1, 0, 1]),
            vec![0x42; 128],
        )
    }

    fn imported_jwk(call: &(String, Vec<Value>)) -> &Object {
        assert_eq!(call.0, "importKey");
        call.1[1].as_object().unwrap()
    }

    #[test]
    fn pkcs1_sign_then_verify() {
        let (subtle, crypto) = fake_provider(Value::Bytes(vec![9; 128]));
        let key = private_key();
        let signature = crypto.sign_pkcs1(&key, b"msg").unwrap();
        assert_eq!(signature, vec![9; 128]);

        let (subtle_verify, crypto) = fake_provider(Value::Bool(true));
        crypto.verify_pkcs1(&key.public, &signature, b"msg").unwrap();

        assert_eq!(methods(&subtle), vec!["importKey(sign)", "sign"]);
        assert_eq!(methods(&subtle_verify), vec!["importKey(verify)", "verify"]);

        let calls = subtle.calls();
        let jwk = imported_jwk(&calls[0]);
        assert_eq!(jwk.get("alg"), Some(&Value::from("RS256")));
        assert!(jwk.contains_key("d"));
        assert_eq!(
            calls[0].1[2],
            Value::from(
                Object::new()
                    .with("name", "RSASSA-PKCS1-v1_5")
                    .with("hash", Object::new().with("name", "SHA-256"))
            )
        );

        let calls = subtle_verify.calls();
        assert!(!imported_jwk(&calls[0]).contains_key("d"));
        assert_eq!(calls[1].1[2], Value::Bytes(vec![9; 128]));
        assert_eq!(calls[1].1[3], Value::Bytes(b"msg".to_vec()));
    }

    #[test]
    fn provider_false_is_verification_failure() {
        let (_, crypto) = fake_provider(Value::Bool(false));
        assert_eq!(
            crypto.verify_pss(&private_key().public, &[0; 128], b"msg"),
            Err(Error::VerificationFailed)
        );
    }

    #[test]
    fn pss_uses_configured_salt_length() {
        let (subtle, crypto) = fake_provider(Value::Bytes(vec![]));
        let crypto = crypto.with_pss_salt_length(20);
        crypto.sign_pss(&private_key(), b"msg").unwrap();

        let calls = subtle.calls();
        assert_eq!(imported_jwk(&calls[0]).get("alg"), Some(&Value::from("PS256")));
        let algorithm = calls[1].1[0].as_object().unwrap();
        assert_eq!(algorithm.get("name"), Some(&Value::from("RSA-PSS")));
        assert_eq!(algorithm.get("saltLength"), Some(&Value::from(20usize)));
    }

    #[test]
    fn oaep_passes_label_and_minimal_usages() {
        let (subtle, crypto) = fake_provider(Value::Bytes(vec![]));
        let key = private_key();
        crypto
            .encrypt_oaep(&key.public, b"secret", Some(&b"label"[..]))
            .unwrap();
        crypto.decrypt_oaep(&key, &[0; 128], None).unwrap();
        assert_eq!(
            methods(&subtle),
            vec![
                "importKey(encrypt)",
                "encrypt",
                "importKey(decrypt)",
                "decrypt"
            ]
        );

        let calls = subtle.calls();
        assert_eq!(
            imported_jwk(&calls[0]).get("alg"),
            Some(&Value::from("RSA-OAEP-256"))
        );
        let encrypt = calls[1].1[0].as_object().unwrap();
        assert_eq!(encrypt.get("label"), Some(&Value::Bytes(b"label".to_vec())));
        let decrypt = calls[3].1[0].as_object().unwrap();
        assert!(!decrypt.contains_key("label"));
    }

    #[test]
    fn zero_modulus_never_reaches_the_provider() {
        let (subtle, crypto) = fake_provider(Value::Bool(true));
        let key = RsaPublicKey::new(vec![0, 0], vec![1, 0, 1]);
        assert!(matches!(
            crypto.verify_pkcs1(&key, &[0], b"msg"),
            Err(Error::InvalidKeyMaterial(_))
        ));
        assert!(subtle.calls().is_empty());
    }
}
