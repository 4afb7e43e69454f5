//! Verification keys and per-algorithm signature verification, backed by [`aws-lc-rs`]
//!
//! [`aws-lc-rs`]: aws_lc_rs

mod key;
mod verify;

pub use key::DecodingKey;
pub use verify::verify;
