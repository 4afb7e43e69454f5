mod rfc7519;
pub use rfc7519::{
    RegisteredClaim,
    RegisteredClaims,
};
