// JUSTIFICATION: using `pub(crate)` makes it immediately obvious that an item
// is not exposed via the public API.
#![allow(clippy::redundant_pub_crate)]
use std::{
    collections::HashSet,
    time::{
        SystemTime,
        UNIX_EPOCH,
    },
};

use crate::{
    JwtError,
    claims::{
        RegisteredClaim,
        RegisteredClaims,
    },
    header::Header,
    validation::ValidationOptions,
};

/// Trait for implementing custom token validator layers
///
/// Custom validators run after signature verification and after the
/// registered-claim checks of [`ValidationOptions`], in the order they were
/// added to the [`Verifier`].
///
/// # Example Implementation
///
/// ```rust
/// use jwtgate::{
///     Header,
///     JwtError,
///     validation::TokenValidator,
/// };
///
/// #[derive(serde::Deserialize)]
/// struct Claims {
///     scope: Vec<String>,
/// }
///
/// struct ScopeValidator {
///     required: &'static str,
/// }
/// impl TokenValidator<Claims> for ScopeValidator {
///     fn validate(&self, _: &Header, claims: &Claims) -> Result<(), JwtError> {
///         if claims.scope.iter().any(|s| s == self.required) {
///             Ok(())
///         } else {
///             Err(JwtError::CustomValidationError("missing required scope"))
///         }
///     }
/// }
/// ```
///
/// [`Verifier`]: crate::validation::Verifier
pub trait TokenValidator<C: ?Sized> {
    /// Given the `header` and `claims` for a JWT, perform some validation step.
    ///
    /// # Errors
    ///
    /// This method MUST return a [`JwtError`] if the JWT `header` and/or `claims`
    /// do not pass the validation step performed by this [`TokenValidator`]
    /// implementation.
    fn validate(&self, header: &Header, claims: &C) -> Result<(), JwtError>;
}

impl<C, F> TokenValidator<C> for F
where
    C: ?Sized,
    F: Fn(&Header, &C) -> Result<(), JwtError>,
{
    fn validate(&self, header: &Header, claims: &C) -> Result<(), JwtError> {
        self(header, claims)
    }
}

/// Registered-claim policy checks driven by [`ValidationOptions`].
///
/// Checks fail fast in a fixed order, so the error returned for a token that
/// violates several policies is always the first of:
///
/// 1. [`JwtError::MissingClaim`] for the first missing required claim
///    (in `exp`, `nbf`, `iat`, `aud`, `iss`, `sub` order)
/// 2. [`JwtError::TokenExpired`]
/// 3. [`JwtError::TokenNotYetValid`]
/// 4. [`JwtError::IssuedInFuture`]
/// 5. [`JwtError::InvalidIssuer`]
/// 6. [`JwtError::InvalidSubject`]
/// 7. [`JwtError::InvalidAudience`]
///
/// Time checks only run when the claim is present (absence is governed by
/// `required_claims`).
pub struct ClaimValidator<'a> {
    options: &'a ValidationOptions,
}

impl<'a> ClaimValidator<'a> {
    /// Creates a validator applying `options`
    #[must_use]
    pub const fn new(options: &'a ValidationOptions) -> Self {
        Self { options }
    }

    /// Validates `claims` against the current system time.
    ///
    /// # Errors
    ///
    /// The first policy violation, see [`ClaimValidator`].
    pub fn validate(&self, claims: &RegisteredClaims) -> Result<(), JwtError> {
        self.validate_at(claims, now())
    }

    /// Validates `claims` as of `now`, in seconds since the Unix epoch.
    ///
    /// # Errors
    ///
    /// The first policy violation, see [`ClaimValidator`].
    pub fn validate_at(&self, claims: &RegisteredClaims, now: i64) -> Result<(), JwtError> {
        for &claim in self.options.required_claims() {
            if !claims.contains(claim) {
                return Err(JwtError::MissingClaim(claim));
            }
        }

        let leeway = i64::try_from(self.options.leeway()).unwrap_or(i64::MAX);

        if let Some(exp) = claims.exp()
            && (self.options.validate_exp() || self.options.is_required(RegisteredClaim::Exp))
            && now > exp.saturating_add(leeway)
        {
            return Err(JwtError::TokenExpired);
        }

        if let Some(nbf) = claims.nbf()
            && (self.options.validate_nbf() || self.options.is_required(RegisteredClaim::Nbf))
            && now < nbf.saturating_sub(leeway)
        {
            return Err(JwtError::TokenNotYetValid);
        }

        if let Some(iat) = claims.iat()
            && (self.options.validate_iat() || self.options.is_required(RegisteredClaim::Iat))
            && iat > now.saturating_add(leeway)
        {
            return Err(JwtError::IssuedInFuture);
        }

        if let Some(issuers) = self.options.issuer()
            && !one_of(claims.iss(), issuers)
        {
            return Err(JwtError::InvalidIssuer);
        }

        if let Some(subjects) = self.options.subject()
            && !one_of(claims.sub(), subjects)
        {
            return Err(JwtError::InvalidSubject);
        }

        if let Some(audience) = self.options.audience()
            && !claims.aud().any(|aud| audience.contains(aud))
        {
            return Err(JwtError::InvalidAudience);
        }

        Ok(())
    }
}

fn one_of(value: Option<&str>, accepted: &HashSet<String>) -> bool {
    value.is_some_and(|value| accepted.contains(value))
}

pub(crate) fn now() -> i64 {
    // SAFETY: system time should never be before the unix epoch, and at second-precision,
    // an i64 will not wrap around for a few hundred billion years
    #[allow(clippy::expect_used)]
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock is set before the unix epoch")
        .as_secs()
        .cast_signed()
}
