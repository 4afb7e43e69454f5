//! Provides JWT validation functionality
pub mod keystore;

pub(crate) mod validator;

pub use options::ValidationOptions;
pub use pipeline::{
    Verifier,
    VerifierBuilder,
};
pub use validator::{
    ClaimValidator,
    TokenValidator,
};

mod options;
mod pipeline;

use crate::{
    JwtError,
    crypto::DecodingKey,
    header::Header,
};

/// A [`KeyProvider`] which, given an unverified JWT's header, can determine
/// the appropriate key to attempt verification with or otherwise return an error.
///
/// The resolved key is only trusted for the algorithm family it was created
/// for; a token whose `alg` belongs to another family is still rejected with
/// [`JwtError::InvalidDecodingKey`].
pub trait KeyProvider {
    /// Attempt to resolve the key to be used for JWT signature verification.
    ///
    /// # Errors
    ///
    /// - [`JwtError::VerificationKeyNotFound`] when the appropriate key is not available
    fn resolve_key(&self, header: &Header) -> Result<&DecodingKey, JwtError>;
}

/// A single [`DecodingKey`] unconditionally provides itself
impl KeyProvider for DecodingKey {
    fn resolve_key(&self, _: &Header) -> Result<&DecodingKey, JwtError> {
        Ok(self)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::KeyProvider;
    use crate::{
        Algorithm,
        crypto::DecodingKey,
        header::Header,
    };

    #[test]
    fn decoding_key_provides_itself() {
        let key = DecodingKey::from_secret(b"secret").unwrap();
        let resolved = key
            .resolve_key(&Header::new(Algorithm::HS256).with_kid("ignored"))
            .unwrap();
        assert!(std::ptr::eq(resolved, &key));
    }
}
