//! # Error Taxonomy
//!
//! Every failure in this crate maps to exactly one of four kinds. The set is
//! closed on purpose: callers fund Bitcoin addresses with the output of this
//! library, and the only safe reaction to *any* error here is "do not proceed
//! with this address". A closed enum lets route handlers match exhaustively
//! instead of sniffing error messages.
//!
//! All errors are terminal for the derivation call that produced them.
//! Retrying a pure deterministic function on the same input never changes
//! the outcome, so there is no retryable variant and never will be.

use thiserror::Error;

/// Errors that can occur while decoding a root key, deriving a child key,
/// or encoding an address.
#[derive(Debug, Error)]
pub enum KdfError {
    /// The root public key string is malformed or names a curve other than
    /// secp256k1.
    #[error("invalid root key: {0}")]
    InvalidKeyFormat(String),

    /// A hex-encoded point has the wrong length, contains non-hex characters,
    /// or its coordinates do not lie on the secp256k1 curve.
    #[error("invalid point encoding: {0}")]
    InvalidPointEncoding(String),

    /// The elliptic-curve computation collapsed to the point at infinity.
    ///
    /// Astronomically unlikely with honest inputs, but it must surface as an
    /// error rather than be coerced into a zero-looking point that would
    /// encode into a valid-looking, unspendable address.
    #[error("derivation produced the point at infinity")]
    DerivationFailed,

    /// The chain selector does not match any supported encoder, or no
    /// selector was provided and no default is configured.
    #[error("unsupported chain: {0}")]
    UnsupportedChain(String),
}
