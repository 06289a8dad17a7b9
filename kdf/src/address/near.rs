//! # NEAR Implicit Account Encoding
//!
//! The odd one out: instead of hashing the child key into an address on the
//! child key's own curve, this encoder manufactures a whole ed25519 keypair
//! deterministically from the child key and uses *that* keypair's public key
//! as the account id.
//!
//! ```text
//! entropy   = SHA256(uncompressed_point_65_bytes)
//! mnemonic  = BIP-39(entropy)                      // 24 words
//! seed      = PBKDF2(mnemonic, "")                 // standard BIP-39 seed
//! key       = SLIP-0010 ed25519 at m/44'/397'/0'   // NEAR's wallet path
//! account   = lowercase hex of the ed25519 public key
//! ```
//!
//! The crate also returns the base58-tagged secp256k1 label of the child key
//! and the ed25519 secret key, because the claim flow needs all three: the
//! label to request MPC signatures, the account id to receive, the secret to
//! add an access key.
//!
//! The detour through a mnemonic looks redundant (hash to seed directly and
//! you would still get a deterministic keypair) but it is what the deployed
//! wallet tooling does, and the account ids minted by it are already on
//! chain. Compatibility wins.

use bip39::Mnemonic;
use ed25519_dalek::SigningKey;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256, Sha512};

use crate::root_key::UncompressedPoint;

type HmacSha512 = Hmac<Sha512>;

/// NEAR's wallet derivation path, m/44'/397'/0'. SLIP-0010 ed25519
/// derivation hardens every step, so only the indices are listed.
const NEAR_DERIVATION_PATH: [u32; 3] = [44, 397, 0];

/// SLIP-0010 master-key salt for the ed25519 curve.
const ED25519_CURVE_SALT: &[u8] = b"ed25519 seed";

/// The three credentials of a freshly derived implicit account.
#[derive(Clone, serde::Serialize)]
pub struct NearImplicitAccount {
    /// 64 lowercase hex characters: the ed25519 public key, which *is* the
    /// account id on NEAR.
    pub account_id: String,

    /// `"secp256k1:<base58>"` label of the child key the account descends
    /// from, in the format the MPC contract expects in signature requests.
    pub secp_public_key: String,

    /// `"ed25519:<base58>"` of the 64-byte keypair (seed || public). Grants
    /// full control of the implicit account. Handle accordingly.
    pub secret_key: String,
}

impl std::fmt::Debug for NearImplicitAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The secret key never goes through Debug, and therefore never
        // through log formatting either.
        f.debug_struct("NearImplicitAccount")
            .field("account_id", &self.account_id)
            .field("secp_public_key", &self.secp_public_key)
            .field("secret_key", &"ed25519:<redacted>")
            .finish()
    }
}

/// Derive the implicit account for a child public key.
pub fn implicit_account(point: &UncompressedPoint) -> NearImplicitAccount {
    let secp_public_key = format!(
        "secp256k1:{}",
        bs58::encode(point.coordinates()).into_string()
    );

    let entropy: [u8; 32] = Sha256::digest(point.as_bytes()).into();
    // 32 bytes of entropy is a valid BIP-39 size by construction.
    let mnemonic = Mnemonic::from_entropy(&entropy).expect("32-byte entropy is always valid");
    let seed = mnemonic.to_seed("");

    let key = slip10_ed25519(&seed, &NEAR_DERIVATION_PATH);
    let signing_key = SigningKey::from_bytes(&key);
    let public_key = signing_key.verifying_key();

    NearImplicitAccount {
        account_id: hex::encode(public_key.as_bytes()),
        secp_public_key,
        secret_key: format!(
            "ed25519:{}",
            bs58::encode(signing_key.to_keypair_bytes()).into_string()
        ),
    }
}

/// SLIP-0010 hierarchical derivation for ed25519.
///
/// Master key material is `HMAC-SHA512("ed25519 seed", seed)`; each child is
/// `HMAC-SHA512(chain_code, 0x00 || key || be32(index | 0x80000000))`. Every
/// index is hardened because ed25519 has no meaningful non-hardened
/// derivation.
fn slip10_ed25519(seed: &[u8], path: &[u32]) -> [u8; 32] {
    let mut mac =
        HmacSha512::new_from_slice(ED25519_CURVE_SALT).expect("hmac accepts any key length");
    mac.update(seed);
    let digest = mac.finalize().into_bytes();

    let mut key = [0u8; 32];
    let mut chain_code = [0u8; 32];
    key.copy_from_slice(&digest[..32]);
    chain_code.copy_from_slice(&digest[32..]);

    for &index in path {
        let hardened = index | 0x8000_0000;
        let mut mac =
            HmacSha512::new_from_slice(&chain_code).expect("hmac accepts any key length");
        mac.update(&[0u8]);
        mac.update(&key);
        mac.update(&hardened.to_be_bytes());
        let digest = mac.finalize().into_bytes();
        key.copy_from_slice(&digest[..32]);
        chain_code.copy_from_slice(&digest[32..]);
    }

    key
}
