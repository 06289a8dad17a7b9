//! # Derivation Configuration
//!
//! Everything environment-shaped that the encoders are forbidden from
//! reading themselves lives here and is passed in explicitly. Request
//! handlers build one [`KdfConfig`] at startup from their own configuration
//! source and hand it to every [`generate_address`](crate::generate_address)
//! call; the core never touches `std::env`.
//!
//! The two compatibility switches exist because stored data in the wild was
//! produced by a looser decoder. New deployments should run strict; the
//! compat constructor is for operators who must keep resolving addresses
//! minted by the old stack.

use serde::{Deserialize, Serialize};

use crate::chain::{Chain, Network};

/// Caller-supplied knobs for a derivation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfConfig {
    /// Which Bitcoin-family network the P2PKH version byte targets.
    pub network: Network,

    /// Accept a colon-less root key string as raw X||Y hex.
    ///
    /// The upstream MPC tooling sometimes hands out root keys without the
    /// `secp256k1:` tag. With this switch off (the default), such strings
    /// are rejected as [`KdfError::InvalidKeyFormat`](crate::KdfError).
    pub accept_raw_hex_root_keys: bool,

    /// Chain encoder to use when a request omits the selector.
    ///
    /// `None` makes the selector mandatory, which is what new callers
    /// should want. A silent default is a footgun: an omitted selector
    /// yielding an EVM address when the caller expected Bitcoin means
    /// funds sent to an address nobody is watching.
    pub default_chain: Option<Chain>,
}

impl Default for KdfConfig {
    /// Strict mainnet configuration: tagged root keys only, selector
    /// mandatory.
    fn default() -> Self {
        Self {
            network: Network::Mainnet,
            accept_raw_hex_root_keys: false,
            default_chain: None,
        }
    }
}

impl KdfConfig {
    /// Strict configuration for the given network.
    pub fn strict(network: Network) -> Self {
        Self {
            network,
            ..Self::default()
        }
    }

    /// The behavior of the original serverless deployment: testnet, raw-hex
    /// root keys accepted, and an omitted chain selector defaulting to EVM.
    ///
    /// Use only when compatibility with addresses already funded under the
    /// old rules is required.
    pub fn upstream_compat() -> Self {
        Self {
            network: Network::Testnet,
            accept_raw_hex_root_keys: true,
            default_chain: Some(Chain::Evm),
        }
    }
}
