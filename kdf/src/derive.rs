//! # Child Key Derivation
//!
//! The heart of the crate: turn `(parent point, signer id, path)` into a
//! child public key, deterministically, with no private key anywhere in the
//! process.
//!
//! The scheme is additive key derivation. A scalar `epsilon` is computed as
//! the SHA3-256 digest of a domain-separated preimage built from the signer
//! id and path, reduced mod the secp256k1 group order. The child point is
//! then `parent + epsilon * G`. The MPC signers perform the mirrored
//! adjustment on their key shares at signing time, so a signature requested
//! under the same `(signer, path)` pair verifies against exactly this child
//! key. Any deviation here, a different prefix, a different separator, a
//! different hash, derives a key the signers cannot sign for.
//!
//! ## Preimage format
//!
//! ```text
//! "near-mpc-recovery v0.1.0 epsilon derivation:" + signer_id + "," + path
//! ```
//!
//! Signer id and path are concatenated verbatim. No trimming, no case
//! folding, no unicode normalization: `"bitcoin-1"` and `"bitcoin-1 "` are
//! different children by design, because the on-chain contract treats its
//! path strings as opaque bytes too. Note the comma is a plain separator,
//! not an escape scheme, so `("a,b", "c")` and `("a", "b,c")` build the same
//! preimage. Callers that control both fields must not rely on the pair
//! boundary for uniqueness.

use k256::elliptic_curve::group::Group;
use k256::elliptic_curve::ops::Reduce;
use k256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use k256::{AffinePoint, EncodedPoint, FieldBytes, ProjectivePoint, Scalar, U256};
use sha3::{Digest, Sha3_256};

use crate::error::KdfError;
use crate::root_key::UncompressedPoint;

/// Domain separator fixed by the deployed MPC service. Changing any byte of
/// this string severs compatibility with every address already derived.
pub const EPSILON_DERIVATION_PREFIX: &str = "near-mpc-recovery v0.1.0 epsilon derivation:";

/// Compute the epsilon scalar for a `(signer_id, path)` pair.
///
/// SHA3-256 over the domain-separated preimage, interpreted as a big-endian
/// integer and reduced mod the secp256k1 group order. Pure and total: every
/// input pair has a scalar.
pub fn epsilon_scalar(signer_id: &str, path: &str) -> Scalar {
    let mut hasher = Sha3_256::new();
    hasher.update(EPSILON_DERIVATION_PREFIX.as_bytes());
    hasher.update(signer_id.as_bytes());
    hasher.update(b",");
    hasher.update(path.as_bytes());
    let digest = hasher.finalize();
    <Scalar as Reduce<U256>>::reduce_bytes(&digest)
}

/// Derive the child public key `parent + epsilon(signer_id, path) * G`.
///
/// The parent's coordinates are validated to lie on the secp256k1 curve
/// while reconstructing the group element; off-curve input is
/// [`KdfError::InvalidPointEncoding`]. The child is on the curve by
/// construction. Should the addition collapse to the point at infinity
/// (possible only if epsilon happens to be the negation of the parent's
/// discrete log), the call fails with [`KdfError::DerivationFailed`] instead
/// of encoding a degenerate point.
pub fn derive_child_public_key(
    parent: &UncompressedPoint,
    signer_id: &str,
    path: &str,
) -> Result<UncompressedPoint, KdfError> {
    let x = FieldBytes::from(parent.x_bytes());
    let y = FieldBytes::from(parent.y_bytes());
    let encoded = EncodedPoint::from_affine_coordinates(&x, &y, false);
    let parent_point = Option::<AffinePoint>::from(AffinePoint::from_encoded_point(&encoded))
        .ok_or_else(|| {
            KdfError::InvalidPointEncoding(
                "coordinates do not lie on the secp256k1 curve".to_string(),
            )
        })?;

    let epsilon = epsilon_scalar(signer_id, path);
    let child = ProjectivePoint::from(parent_point) + ProjectivePoint::GENERATOR * epsilon;
    if bool::from(child.is_identity()) {
        return Err(KdfError::DerivationFailed);
    }

    let child_encoded = child.to_affine().to_encoded_point(false);
    UncompressedPoint::from_slice(child_encoded.as_bytes())
}

/// Hex-string form of [`derive_child_public_key`], mirroring the upstream
/// contract: input is a 130-character `04`-prefixed hex point (characters
/// 2..66 are X, 66.. are Y), output is the same shape.
pub fn derive_child_public_key_hex(
    parent_hex: &str,
    signer_id: &str,
    path: &str,
) -> Result<String, KdfError> {
    let parent = UncompressedPoint::from_hex(parent_hex)?;
    Ok(derive_child_public_key(&parent, signer_id, path)?.to_hex())
}
