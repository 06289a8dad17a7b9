//! # Chain Targets & Networks
//!
//! The derivation engine computes one child public key; what happens next
//! depends on which chain the caller wants an address for. `Chain` selects
//! the encoder, `Network` selects the version byte for the Bitcoin family.
//!
//! Upstream, the Bitcoin selector came in two spellings (`btc` for mainnet,
//! `bitcoin` for testnet) and then both resolved the version byte from an
//! ambient `NETWORK_ID` environment variable anyway. Here the two spellings
//! parse to a single [`Chain::Bitcoin`] and the network is an explicit field
//! of [`KdfConfig`](crate::config::KdfConfig), threaded from configuration at
//! the boundary. Encoders never read the environment.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::KdfError;

/// Which address encoding to apply to a derived child public key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    /// Keccak-256 of the raw point, low 20 bytes, `0x`-prefixed hex.
    Evm,

    /// Legacy P2PKH Base58Check. Accepts both the `btc` and `bitcoin`
    /// selector spellings; the version byte comes from [`Network`].
    #[serde(alias = "btc")]
    Bitcoin,

    /// Same P2PKH pipeline as Bitcoin with the Dogecoin version byte.
    Dogecoin,

    /// NEAR implicit account derived from the child key's SHA-256 digest.
    #[serde(rename = "near")]
    NearImplicit,
}

impl Chain {
    /// Canonical lowercase selector, matching what the route handlers accept.
    pub fn as_str(&self) -> &'static str {
        match self {
            Chain::Evm => "evm",
            Chain::Bitcoin => "bitcoin",
            Chain::Dogecoin => "dogecoin",
            Chain::NearImplicit => "near",
        }
    }
}

impl FromStr for Chain {
    type Err = KdfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "evm" => Ok(Chain::Evm),
            "btc" | "bitcoin" => Ok(Chain::Bitcoin),
            "dogecoin" => Ok(Chain::Dogecoin),
            "near" => Ok(Chain::NearImplicit),
            other => Err(KdfError::UnsupportedChain(other.to_string())),
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bitcoin-family network selector.
///
/// This is caller-supplied configuration, not something inferred from the
/// key. A child key is network-agnostic; only its encoding differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => f.write_str("mainnet"),
            Network::Testnet => f.write_str("testnet"),
        }
    }
}
