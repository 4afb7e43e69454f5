use std::collections::{
    BTreeSet,
    HashSet,
};

use serde::Deserialize;

use crate::claims::RegisteredClaim;

/// Policy applied while decoding a JWT.
///
/// Built in code from [`ValidationOptions::default`] with the chained `with_*`
/// setters, or deserialized from configuration. Missing fields in a
/// configuration document keep their defaults:
///
/// | option | default |
/// |---|---|
/// | `required_claims` | none |
/// | `leeway` | `0` seconds |
/// | `validate_exp` / `validate_nbf` | `true` |
/// | `validate_iat` | `false` |
/// | `audience` / `issuer` / `subject` | not checked |
/// | `max_token_size` | unlimited |
///
/// Signature verification can only be disabled in code, through
/// [`ValidationOptions::insecure_disable_signature_verification`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationOptions {
    required_claims: BTreeSet<RegisteredClaim>,
    leeway: u64,
    validate_exp: bool,
    validate_nbf: bool,
    validate_iat: bool,
    audience: Option<HashSet<String>>,
    issuer: Option<HashSet<String>>,
    subject: Option<HashSet<String>>,
    max_token_size: Option<usize>,
    #[serde(skip)]
    insecure_skip_signature: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            required_claims: BTreeSet::new(),
            leeway: 0,
            validate_exp: true,
            validate_nbf: true,
            validate_iat: false,
            audience: None,
            issuer: None,
            subject: None,
            max_token_size: None,
            insecure_skip_signature: false,
        }
    }
}

impl ValidationOptions {
    /// Rejects tokens missing any of `claims` with [`JwtError::MissingClaim`].
    /// Requiring a claim also forces its check to run when that check is
    /// otherwise conditional on presence.
    ///
    /// [`JwtError::MissingClaim`]: crate::JwtError::MissingClaim
    #[must_use]
    pub fn with_required_claims(
        mut self,
        claims: impl IntoIterator<Item = RegisteredClaim>,
    ) -> Self {
        self.required_claims.extend(claims);
        self
    }

    /// Clock-skew tolerance, in seconds, applied to `exp`, `nbf` and `iat`
    #[must_use]
    pub const fn with_leeway(mut self, seconds: u64) -> Self {
        self.leeway = seconds;
        self
    }

    /// Enables or disables the `exp` check (enabled by default)
    #[must_use]
    pub const fn with_exp_validation(mut self, enabled: bool) -> Self {
        self.validate_exp = enabled;
        self
    }

    /// Enables or disables the `nbf` check (enabled by default)
    #[must_use]
    pub const fn with_nbf_validation(mut self, enabled: bool) -> Self {
        self.validate_nbf = enabled;
        self
    }

    /// Enables or disables rejecting `iat` values in the future (disabled by default)
    #[must_use]
    pub const fn with_iat_validation(mut self, enabled: bool) -> Self {
        self.validate_iat = enabled;
        self
    }

    /// Accepts only tokens whose `aud` contains at least one of `audience`
    #[must_use]
    pub fn with_audience(mut self, audience: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.audience
            .get_or_insert_with(HashSet::new)
            .extend(audience.into_iter().map(Into::into));
        self
    }

    /// Accepts only tokens whose `iss` is one of `issuer`
    #[must_use]
    pub fn with_issuer(mut self, issuer: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.issuer
            .get_or_insert_with(HashSet::new)
            .extend(issuer.into_iter().map(Into::into));
        self
    }

    /// Accepts only tokens whose `sub` is one of `subject`
    #[must_use]
    pub fn with_subject(mut self, subject: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.subject
            .get_or_insert_with(HashSet::new)
            .extend(subject.into_iter().map(Into::into));
        self
    }

    /// Caps accepted JWT size to `size_limit` bytes
    ///
    /// JWTs above this size are rejected with [`JwtError::OverSizeThreshold`]
    /// before any parsing.
    ///
    /// [`JwtError::OverSizeThreshold`]: crate::JwtError::OverSizeThreshold
    #[must_use]
    pub const fn with_max_size(mut self, size_limit: usize) -> Self {
        self.max_token_size = Some(size_limit);
        self
    }

    /// Disables signature verification entirely.
    ///
    /// DANGER: a token decoded with these options may have been forged by
    /// anyone. Use this only to inspect a token whose key is unavailable,
    /// never to make an authorization decision. Claim checks still run.
    #[must_use]
    pub const fn insecure_disable_signature_verification(mut self) -> Self {
        self.insecure_skip_signature = true;
        self
    }

    /// Returns `true` if signature verification is disabled
    #[must_use]
    pub const fn insecure_skip_signature(&self) -> bool {
        self.insecure_skip_signature
    }

    /// Leeway in seconds
    #[must_use]
    pub const fn leeway(&self) -> u64 {
        self.leeway
    }

    /// Configured size limit, if any
    #[must_use]
    pub const fn max_token_size(&self) -> Option<usize> {
        self.max_token_size
    }

    pub(crate) const fn required_claims(&self) -> &BTreeSet<RegisteredClaim> {
        &self.required_claims
    }

    pub(crate) fn is_required(&self, claim: RegisteredClaim) -> bool {
        self.required_claims.contains(&claim)
    }

    pub(crate) const fn validate_exp(&self) -> bool {
        self.validate_exp
    }

    pub(crate) const fn validate_nbf(&self) -> bool {
        self.validate_nbf
    }

    pub(crate) const fn validate_iat(&self) -> bool {
        self.validate_iat
    }

    pub(crate) const fn audience(&self) -> Option<&HashSet<String>> {
        self.audience.as_ref()
    }

    pub(crate) const fn issuer(&self) -> Option<&HashSet<String>> {
        self.issuer.as_ref()
    }

    pub(crate) const fn subject(&self) -> Option<&HashSet<String>> {
        self.subject.as_ref()
    }
}
