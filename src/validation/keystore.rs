//! Provides a reference [`LocalKeystore`] which implements the [`KeyProvider`] trait
use std::collections::BTreeMap;

use crate::{
    JwtError,
    crypto::DecodingKey,
    header::Header,
    validation::KeyProvider,
};

/// In-memory [`KeyProvider`] implementation that determines key
/// association via the `kid` JWT header parameter.
///
/// Tokens without a `kid` never resolve a key.
#[derive(Debug, Default)]
pub struct LocalKeystore {
    keystore: BTreeMap<String, DecodingKey>,
}
impl LocalKeystore {
    /// Instantiates a new, empty [`LocalKeystore`]
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            keystore: BTreeMap::new(),
        }
    }

    /// Adds a [`DecodingKey`] to the [`LocalKeystore`] instance, replacing any
    /// key previously stored under `key_id`
    pub fn add_key(&mut self, key_id: impl Into<String>, key: DecodingKey) {
        self.keystore.insert(key_id.into(), key);
    }

    /// Removes a [`DecodingKey`] from the [`LocalKeystore`] instance
    pub fn remove_key(&mut self, key_id: impl AsRef<str>) {
        self.keystore.remove(key_id.as_ref());
    }

    /// Number of stored keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.keystore.len()
    }

    /// Returns `true` if no keys are stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keystore.is_empty()
    }
}

impl KeyProvider for LocalKeystore {
    fn resolve_key(&self, header: &Header) -> Result<&DecodingKey, JwtError> {
        header
            .kid()
            .and_then(|kid| self.keystore.get(kid))
            .ok_or(JwtError::VerificationKeyNotFound)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use aws_lc_rs::signature::{
        Ed25519KeyPair,
        KeyPair,
    };

    use crate::{
        Algorithm,
        AlgorithmFamily,
        crypto::DecodingKey,
        error::JwtError,
        header::Header,
        validation::{
            KeyProvider,
            keystore::LocalKeystore,
        },
    };

    fn header(kid: &str) -> Header {
        Header::new(Algorithm::HS256).with_kid(kid)
    }

    #[test]
    fn test_local_keystore() {
        let key_a = DecodingKey::from_secret(b"a").unwrap();
        let pair = Ed25519KeyPair::generate().unwrap();
        let key_b = DecodingKey::from_ed25519_public_key(pair.public_key()).unwrap();

        let mut key_provider = LocalKeystore::empty();
        assert!(key_provider.is_empty());
        key_provider.add_key("key_a", key_a);
        key_provider.add_key("key_b", key_b);
        assert_eq!(key_provider.len(), 2);

        let key_a = key_provider.resolve_key(&header("key_a")).unwrap();
        let key_b = key_provider.resolve_key(&header("key_b")).unwrap();

        assert_eq!(key_a.family(), AlgorithmFamily::Hmac);
        assert_eq!(key_b.family(), AlgorithmFamily::EdDsa);

        key_provider.remove_key("key_b");

        let err = key_provider.resolve_key(&header("key_b")).unwrap_err();
        assert_eq!(err, JwtError::VerificationKeyNotFound);
    }

    #[test]
    fn missing_kid_not_found() {
        let mut key_provider = LocalKeystore::default();
        key_provider.add_key("", DecodingKey::from_secret(b"a").unwrap());
        let err = key_provider
            .resolve_key(&Header::new(Algorithm::HS256))
            .unwrap_err();
        assert_eq!(err, JwtError::VerificationKeyNotFound);
    }
}
