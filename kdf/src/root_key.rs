//! # Root Public Key Decoding
//!
//! The MPC service publishes one root public key as a string of the form
//! `"secp256k1:<base58-payload>"`. The payload is **not** a SEC1 compressed
//! point: it is the raw 64-byte X||Y coordinate pair with the `0x04` prefix
//! stripped, base58-encoded with the Bitcoin alphabet and no checksum. This
//! module reverses exactly that convention, byte for byte.
//!
//! Do not "fix" this to standard SEC1 decoding. A decoder that guesses
//! differently derives a different parent point, which derives a different
//! child key, which derives a Bitcoin address nobody controls. The funds
//! sent there are gone.

use std::fmt;

use crate::config::KdfConfig;
use crate::error::KdfError;

/// The only curve tag this crate will ever accept.
pub const SECP256K1_TAG: &str = "secp256k1";

/// Length of the base58 payload once decoded: X||Y without the SEC1 prefix.
pub const RAW_COORDINATES_LEN: usize = 64;

/// Length of a full uncompressed SEC1 point: `0x04` prefix plus X||Y.
pub const UNCOMPRESSED_POINT_LEN: usize = 65;

/// A secp256k1 point in uncompressed SEC1 form: `0x04 || X || Y`.
///
/// This is the working representation shared by the derivation step and
/// every address encoder. Coordinates are fixed-width 32-byte big-endian
/// field elements, so hex serialization is always exactly 130 characters;
/// left-zero-padding can never be dropped because it was never applied as
/// string formatting in the first place.
///
/// Construction does not verify curve membership. The derivation step does
/// that when it reconstructs the point for arithmetic; the encoders are pure
/// byte pipelines and hash whatever they are given, matching the upstream
/// contract.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct UncompressedPoint {
    bytes: [u8; UNCOMPRESSED_POINT_LEN],
}

impl UncompressedPoint {
    /// Assemble a point from raw 32-byte coordinates.
    pub fn from_coordinates(x: [u8; 32], y: [u8; 32]) -> Self {
        let mut bytes = [0u8; UNCOMPRESSED_POINT_LEN];
        bytes[0] = 0x04;
        bytes[1..33].copy_from_slice(&x);
        bytes[33..].copy_from_slice(&y);
        Self { bytes }
    }

    /// Parse a 130-character `04`-prefixed hex string.
    ///
    /// This mirrors the wire contract of the derivation API: characters
    /// 2..66 are X, characters 66.. are Y.
    pub fn from_hex(s: &str) -> Result<Self, KdfError> {
        if s.len() != 2 * UNCOMPRESSED_POINT_LEN {
            return Err(KdfError::InvalidPointEncoding(format!(
                "expected {} hex characters, got {}",
                2 * UNCOMPRESSED_POINT_LEN,
                s.len()
            )));
        }
        let decoded = hex::decode(s)
            .map_err(|e| KdfError::InvalidPointEncoding(format!("not valid hex: {e}")))?;
        Self::from_slice(&decoded)
    }

    /// Parse a 65-byte SEC1 uncompressed encoding.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, KdfError> {
        if bytes.len() != UNCOMPRESSED_POINT_LEN {
            return Err(KdfError::InvalidPointEncoding(format!(
                "expected {UNCOMPRESSED_POINT_LEN} bytes, got {}",
                bytes.len()
            )));
        }
        if bytes[0] != 0x04 {
            return Err(KdfError::InvalidPointEncoding(format!(
                "expected uncompressed SEC1 prefix 0x04, got 0x{:02x}",
                bytes[0]
            )));
        }
        let mut out = [0u8; UNCOMPRESSED_POINT_LEN];
        out.copy_from_slice(bytes);
        Ok(Self { bytes: out })
    }

    /// The full 65-byte encoding, prefix included.
    pub fn as_bytes(&self) -> &[u8; UNCOMPRESSED_POINT_LEN] {
        &self.bytes
    }

    /// The 64 coordinate bytes after the prefix. This is what the EVM
    /// encoder hashes and what the NEAR secp label encodes.
    pub fn coordinates(&self) -> &[u8] {
        &self.bytes[1..]
    }

    /// The X coordinate, 32 bytes big-endian.
    pub fn x_bytes(&self) -> [u8; 32] {
        let mut x = [0u8; 32];
        x.copy_from_slice(&self.bytes[1..33]);
        x
    }

    /// The Y coordinate, 32 bytes big-endian.
    pub fn y_bytes(&self) -> [u8; 32] {
        let mut y = [0u8; 32];
        y.copy_from_slice(&self.bytes[33..]);
        y
    }

    /// Lowercase hex, always exactly 130 characters starting with `04`.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

impl fmt::Display for UncompressedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for UncompressedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UncompressedPoint(04{}..)", &self.to_hex()[2..18])
    }
}

/// Decode an MPC root public key string into its uncompressed point.
///
/// Accepts `"secp256k1:<base58>"` where the payload decodes to exactly 64
/// bytes. When [`KdfConfig::accept_raw_hex_root_keys`] is set, a colon-less
/// string of 128 hex characters is accepted as the raw X||Y pair directly;
/// otherwise a missing separator is an error.
///
/// Everything malformed lands on [`KdfError::InvalidKeyFormat`]: wrong curve
/// tag, extra separators, bad base58, wrong payload length.
pub fn decode_root_public_key(
    encoded: &str,
    config: &KdfConfig,
) -> Result<UncompressedPoint, KdfError> {
    let parts: Vec<&str> = encoded.split(':').collect();
    match parts.as_slice() {
        [raw] => decode_raw_hex_fallback(raw, config),
        [curve, payload] => {
            if *curve != SECP256K1_TAG {
                return Err(KdfError::InvalidKeyFormat(format!(
                    "unsupported curve tag '{curve}', expected '{SECP256K1_TAG}'"
                )));
            }
            let decoded = bs58::decode(payload)
                .into_vec()
                .map_err(|e| KdfError::InvalidKeyFormat(format!("bad base58 payload: {e}")))?;
            if decoded.len() != RAW_COORDINATES_LEN {
                return Err(KdfError::InvalidKeyFormat(format!(
                    "payload decodes to {} bytes, expected {RAW_COORDINATES_LEN}",
                    decoded.len()
                )));
            }
            let mut x = [0u8; 32];
            let mut y = [0u8; 32];
            x.copy_from_slice(&decoded[..32]);
            y.copy_from_slice(&decoded[32..]);
            Ok(UncompressedPoint::from_coordinates(x, y))
        }
        _ => Err(KdfError::InvalidKeyFormat(
            "expected exactly one ':' separating curve tag and payload".to_string(),
        )),
    }
}

fn decode_raw_hex_fallback(raw: &str, config: &KdfConfig) -> Result<UncompressedPoint, KdfError> {
    if !config.accept_raw_hex_root_keys {
        return Err(KdfError::InvalidKeyFormat(
            "missing 'curve:payload' separator (raw-hex fallback is disabled)".to_string(),
        ));
    }
    if raw.len() != 2 * RAW_COORDINATES_LEN {
        return Err(KdfError::InvalidKeyFormat(format!(
            "raw hex root key must be {} characters of X||Y, got {}",
            2 * RAW_COORDINATES_LEN,
            raw.len()
        )));
    }
    let decoded = hex::decode(raw)
        .map_err(|e| KdfError::InvalidKeyFormat(format!("raw root key is not valid hex: {e}")))?;
    let mut x = [0u8; 32];
    let mut y = [0u8; 32];
    x.copy_from_slice(&decoded[..32]);
    y.copy_from_slice(&decoded[32..]);
    Ok(UncompressedPoint::from_coordinates(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::Network;

    /// The testnet MPC root key the campaign scripts run against.
    const MPC_ROOT_KEY: &str =
        "secp256k1:4NfTiv3UsGahebgTaHyD9vF8KYKMBnfd6kh94mK6xv8fGBiJB8TBtFMP5WWXz6B89Ac1fbpzPwAvoyQebemHFwx3";

    fn strict() -> KdfConfig {
        KdfConfig::strict(Network::Testnet)
    }

    #[test]
    fn decodes_a_tagged_root_key() {
        let point = decode_root_public_key(MPC_ROOT_KEY, &strict()).unwrap();
        let hex_point = point.to_hex();
        assert_eq!(hex_point.len(), 130);
        assert!(hex_point.starts_with("04"));
    }

    #[test]
    fn decoding_is_deterministic() {
        let a = decode_root_public_key(MPC_ROOT_KEY, &strict()).unwrap();
        let b = decode_root_public_key(MPC_ROOT_KEY, &strict()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_wrong_curve_tag() {
        let err = decode_root_public_key("ed25519:abc", &strict()).unwrap_err();
        assert!(matches!(err, KdfError::InvalidKeyFormat(_)));
        assert!(err.to_string().contains("ed25519"));
    }

    #[test]
    fn rejects_extra_separators() {
        let err = decode_root_public_key("secp256k1:a:b", &strict()).unwrap_err();
        assert!(matches!(err, KdfError::InvalidKeyFormat(_)));
    }

    #[test]
    fn rejects_bad_base58() {
        // '0', 'I', 'O', 'l' are not in the Bitcoin base58 alphabet.
        let err = decode_root_public_key("secp256k1:0OIl", &strict()).unwrap_err();
        assert!(matches!(err, KdfError::InvalidKeyFormat(_)));
    }

    #[test]
    fn rejects_wrong_payload_length() {
        // base58 of fewer than 64 bytes.
        let short = bs58::encode([1u8; 32]).into_string();
        let err =
            decode_root_public_key(&format!("secp256k1:{short}"), &strict()).unwrap_err();
        assert!(matches!(err, KdfError::InvalidKeyFormat(_)));
    }

    #[test]
    fn colonless_key_is_rejected_when_fallback_is_off() {
        let raw = "11".repeat(64);
        let err = decode_root_public_key(&raw, &strict()).unwrap_err();
        assert!(matches!(err, KdfError::InvalidKeyFormat(_)));
    }

    #[test]
    fn colonless_key_is_accepted_when_fallback_is_on() {
        let config = KdfConfig {
            accept_raw_hex_root_keys: true,
            ..strict()
        };
        let raw = "11".repeat(64);
        let point = decode_root_public_key(&raw, &config).unwrap();
        assert_eq!(point.to_hex(), format!("04{raw}"));
    }

    #[test]
    fn fallback_still_rejects_non_hex_and_bad_lengths() {
        let config = KdfConfig {
            accept_raw_hex_root_keys: true,
            ..strict()
        };
        assert!(decode_root_public_key(&"zz".repeat(64), &config).is_err());
        assert!(decode_root_public_key(&"11".repeat(63), &config).is_err());
    }

    #[test]
    fn hex_roundtrip_preserves_all_bytes() {
        let point = UncompressedPoint::from_coordinates([0xAB; 32], [0xCD; 32]);
        let recovered = UncompressedPoint::from_hex(&point.to_hex()).unwrap();
        assert_eq!(point, recovered);
        assert_eq!(recovered.x_bytes(), [0xAB; 32]);
        assert_eq!(recovered.y_bytes(), [0xCD; 32]);
    }

    #[test]
    fn from_hex_rejects_wrong_length_and_prefix() {
        assert!(matches!(
            UncompressedPoint::from_hex("0401").unwrap_err(),
            KdfError::InvalidPointEncoding(_)
        ));
        let wrong_prefix = format!("05{}", "11".repeat(64));
        assert!(matches!(
            UncompressedPoint::from_hex(&wrong_prefix).unwrap_err(),
            KdfError::InvalidPointEncoding(_)
        ));
    }

    #[test]
    fn leading_zero_coordinates_survive_hex_serialization() {
        // Fixed-width coordinates make the 130-character invariant
        // structural. A Y coordinate with leading zero bytes must not
        // shorten the string.
        let mut y = [0u8; 32];
        y[31] = 0x01;
        let point = UncompressedPoint::from_coordinates([0x7F; 32], y);
        let hex_point = point.to_hex();
        assert_eq!(hex_point.len(), 130);
        assert!(hex_point[66..].starts_with("00000000"));
    }

    #[test]
    fn debug_output_is_truncated() {
        let point = UncompressedPoint::from_coordinates([0x11; 32], [0x22; 32]);
        let debug = format!("{point:?}");
        assert!(debug.starts_with("UncompressedPoint(04"));
        assert!(debug.len() < 40);
    }
}
