//! # Bitcoin-Family P2PKH Encoding
//!
//! Legacy pay-to-public-key-hash addresses:
//!
//! ```text
//! payload  = version_byte || RIPEMD160(SHA256(uncompressed_point_65_bytes))
//! address  = Base58(payload || SHA256(SHA256(payload))[..4])
//! ```
//!
//! Two details are load-bearing and differ from what a generic Bitcoin
//! library would do by default:
//!
//! - The hash160 is computed over the **uncompressed** 65-byte key, prefix
//!   included. Compressed-key P2PKH (the modern default) produces a
//!   different address; the MPC signing flow spends from the uncompressed
//!   one.
//! - The version byte is an explicit argument resolved from caller
//!   configuration. The encoder has no opinion about which network it is on.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

use crate::chain::Network;
use crate::root_key::UncompressedPoint;

/// Bitcoin mainnet P2PKH version byte. Addresses start with `1`.
pub const VERSION_P2PKH_MAINNET: u8 = 0x00;

/// Bitcoin testnet P2PKH version byte. Addresses start with `m` or `n`.
pub const VERSION_P2PKH_TESTNET: u8 = 0x6f;

/// Dogecoin P2PKH version byte used by the drop campaigns.
///
/// This is the testnet byte and it is pinned unconditionally, like the
/// deployment this crate replaces. Mainnet Dogecoin (`0x1e`) was never
/// wired up; see DESIGN.md before changing this.
pub const VERSION_DOGECOIN: u8 = 0x71;

/// Checksum length appended by Base58Check.
const CHECKSUM_LEN: usize = 4;

/// Resolve the Bitcoin P2PKH version byte for a network.
pub fn p2pkh_version(network: Network) -> u8 {
    match network {
        Network::Mainnet => VERSION_P2PKH_MAINNET,
        Network::Testnet => VERSION_P2PKH_TESTNET,
    }
}

/// Encode a child public key as a legacy P2PKH address under the given
/// version byte.
pub fn p2pkh_address(point: &UncompressedPoint, version: u8) -> String {
    let sha = Sha256::digest(point.as_bytes());
    let hash160 = Ripemd160::digest(sha);

    let mut payload = Vec::with_capacity(1 + hash160.len());
    payload.push(version);
    payload.extend_from_slice(&hash160);
    base58check_encode(&payload)
}

/// Base58Check: append the first four bytes of the double-SHA256 of the
/// payload, then Base58-encode the whole thing.
pub fn base58check_encode(payload: &[u8]) -> String {
    let checksum = double_sha256(payload);
    let mut data = Vec::with_capacity(payload.len() + CHECKSUM_LEN);
    data.extend_from_slice(payload);
    data.extend_from_slice(&checksum[..CHECKSUM_LEN]);
    bs58::encode(data).into_string()
}

/// Decode a Base58Check string, verifying the checksum.
///
/// Returns the payload (version byte included, checksum stripped), or `None`
/// if the string is not Base58, too short, or fails the checksum. This is a
/// validation helper for callers and tests; a failed decode carries no more
/// information worth distinguishing.
pub fn base58check_decode(address: &str) -> Option<Vec<u8>> {
    let data = bs58::decode(address).into_vec().ok()?;
    if data.len() < CHECKSUM_LEN + 1 {
        return None;
    }
    let (payload, checksum) = data.split_at(data.len() - CHECKSUM_LEN);
    let expected = double_sha256(payload);
    if checksum != &expected[..CHECKSUM_LEN] {
        return None;
    }
    Some(payload.to_vec())
}

fn double_sha256(data: &[u8]) -> [u8; 32] {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);
    second.into()
}
