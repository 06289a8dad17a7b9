//! # Derivation Orchestration
//!
//! The single entry point the rest of the system calls. Route handlers,
//! campaign scripts, and the claim flow all funnel through
//! [`generate_address`]: decode the root key, derive the child, encode for
//! the requested chain, hand everything back.
//!
//! There is no cache and no retry. The function is pure, so calling it again
//! with the same inputs yields the same bytes; if it errored once it will
//! error forever, and the caller must not fund anything. It is safe to run
//! any number of derivations concurrently since no call shares state with
//! another.

use serde::Serialize;
use tracing::debug;

use crate::address::{bitcoin, evm, near};
use crate::chain::Chain;
use crate::config::KdfConfig;
use crate::derive::derive_child_public_key;
use crate::error::KdfError;
use crate::root_key::decode_root_public_key;

/// One derivation request.
///
/// `signer_id` and `path` are opaque bytes to this crate; the contract layer
/// sends values like `"bitcoin-drop,1712345678"` and the exact string,
/// whitespace and all, is what determines the child key.
#[derive(Debug, Clone, Copy)]
pub struct AddressRequest<'a> {
    /// Encoded MPC root public key, e.g. `"secp256k1:4NfTiv3U..."`.
    pub root_public_key: &'a str,

    /// Account that will request MPC signatures for the derived key.
    pub signer_id: &'a str,

    /// Derivation path label. May be empty.
    pub path: &'a str,

    /// Target encoding. `None` falls back to
    /// [`KdfConfig::default_chain`]; if that is also `None` the request
    /// fails rather than guessing.
    pub chain: Option<Chain>,
}

/// The outcome of a derivation: an address plus the child key it encodes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedAddress {
    /// Chain-specific address string.
    pub address: String,

    /// The child public key as 130-character `04`-prefixed hex. Returned on
    /// every branch so callers can submit signature requests later without
    /// re-deriving.
    pub public_key: String,

    /// NEAR branch only: the `"secp256k1:"`-tagged label of the child key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub near_secp_public_key: Option<String>,

    /// NEAR branch only: the ed25519 secret controlling the implicit
    /// account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub near_implicit_secret_key: Option<String>,
}

/// Derive an address for `(root key, signer, path)` on the requested chain.
///
/// Deterministic and stateless: byte-identical inputs produce byte-identical
/// output, which is the property the whole funding scheme rests on.
pub fn generate_address(
    config: &KdfConfig,
    request: &AddressRequest<'_>,
) -> Result<DerivedAddress, KdfError> {
    let chain = request
        .chain
        .or(config.default_chain)
        .ok_or_else(|| {
            KdfError::UnsupportedChain(
                "no chain selector provided and no default configured".to_string(),
            )
        })?;

    debug!(
        signer_id = request.signer_id,
        path = request.path,
        chain = %chain,
        network = %config.network,
        "deriving chain-signature address"
    );

    let parent = decode_root_public_key(request.root_public_key, config)?;
    let child = derive_child_public_key(&parent, request.signer_id, request.path)?;
    let public_key = child.to_hex();

    let derived = match chain {
        Chain::Evm => DerivedAddress {
            address: evm::evm_address(&child),
            public_key,
            near_secp_public_key: None,
            near_implicit_secret_key: None,
        },
        Chain::Bitcoin => DerivedAddress {
            address: bitcoin::p2pkh_address(&child, bitcoin::p2pkh_version(config.network)),
            public_key,
            near_secp_public_key: None,
            near_implicit_secret_key: None,
        },
        Chain::Dogecoin => DerivedAddress {
            address: bitcoin::p2pkh_address(&child, bitcoin::VERSION_DOGECOIN),
            public_key,
            near_secp_public_key: None,
            near_implicit_secret_key: None,
        },
        Chain::NearImplicit => {
            let account = near::implicit_account(&child);
            DerivedAddress {
                address: account.account_id,
                public_key,
                near_secp_public_key: Some(account.secp_public_key),
                near_implicit_secret_key: Some(account.secret_key),
            }
        }
    };

    Ok(derived)
}
