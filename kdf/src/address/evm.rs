//! # EVM Address Encoding
//!
//! The standard Ethereum construction: Keccak-256 over the 64 coordinate
//! bytes (the `0x04` prefix is excluded), keep the low 20 bytes, hex-encode
//! with a `0x` prefix.
//!
//! Output is plain lowercase hex with no EIP-55 checksum casing, matching
//! what the funding contract and explorers were given historically. Mixed
//! casing would compare unequal as a string against stored addresses.

use sha3::{Digest, Keccak256};

use crate::root_key::UncompressedPoint;

/// Length of the address payload taken from the tail of the Keccak digest.
const ADDRESS_LEN: usize = 20;

/// Encode a child public key as a `0x`-prefixed EVM address.
pub fn evm_address(point: &UncompressedPoint) -> String {
    let digest = Keccak256::digest(point.coordinates());
    format!("0x{}", hex::encode(&digest[digest.len() - ADDRESS_LEN..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_shape_is_0x_plus_40_hex() {
        let point = UncompressedPoint::from_coordinates([0x11; 32], [0x22; 32]);
        let addr = evm_address(&point);
        assert_eq!(addr.len(), 42);
        assert!(addr.starts_with("0x"));
        assert!(addr[2..].chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(addr, addr.to_lowercase());
    }

    #[test]
    fn known_vector_from_the_generator_point() {
        // secp256k1 generator coordinates, keccak'd: the canonical
        // "address of G" that several toolchains use as a smoke test.
        let x = hex::decode("79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798")
            .unwrap();
        let y = hex::decode("483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8")
            .unwrap();
        let mut xb = [0u8; 32];
        let mut yb = [0u8; 32];
        xb.copy_from_slice(&x);
        yb.copy_from_slice(&y);
        let point = UncompressedPoint::from_coordinates(xb, yb);
        assert_eq!(
            evm_address(&point),
            "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf"
        );
    }

    #[test]
    fn prefix_byte_is_excluded_from_the_hash() {
        // Hashing all 65 bytes is a classic implementation bug; it yields a
        // different (wrong) address. Pin the distinction.
        let point = UncompressedPoint::from_coordinates([0x33; 32], [0x44; 32]);
        let with_prefix = Keccak256::digest(point.as_bytes());
        let without_prefix = Keccak256::digest(point.coordinates());
        assert_ne!(with_prefix, without_prefix);
        assert!(evm_address(&point).ends_with(&hex::encode(&without_prefix[12..])));
    }

    #[test]
    fn distinct_points_give_distinct_addresses() {
        let a = UncompressedPoint::from_coordinates([0x01; 32], [0x02; 32]);
        let b = UncompressedPoint::from_coordinates([0x01; 32], [0x03; 32]);
        assert_ne!(evm_address(&a), evm_address(&b));
    }
}
