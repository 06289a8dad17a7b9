//! # SatSlinger KDF — Chain-Signature Address Derivation
//!
//! SatSlinger tips Bitcoin to people who post about Bitcoin. The tipping
//! funds sit on addresses nobody holds a private key for: every address is
//! derived from a single MPC-controlled root public key, and spending
//! happens through threshold signatures requested on-chain. This crate is
//! the derivation core that makes that work, and it is the one part of the
//! system where a bug does not produce an error message, it produces a
//! valid-looking Bitcoin address whose funds are unrecoverable.
//!
//! ## What it does
//!
//! Given `(root public key, signer id, path, chain)`:
//!
//! 1. [`root_key`] decodes the MPC root key string into an uncompressed
//!    secp256k1 point, preserving the upstream's non-SEC1 byte convention
//!    exactly.
//! 2. [`derive`] computes `child = parent + SHA3-256(domain || signer ||
//!    "," || path) * G`. Deterministic, additive, no private keys involved.
//! 3. [`address`] encodes the child point for the requested chain: EVM
//!    keccak addresses, legacy Bitcoin/Dogecoin P2PKH, or a NEAR implicit
//!    account.
//!
//! [`generate_address`] wires the three steps together and is the only call
//! most consumers need.
//!
//! ## Design ground rules
//!
//! - **Determinism is the contract.** Same inputs, same address, forever.
//!   No randomness, no I/O, no clock.
//! - **No ambient configuration.** Network selection and compatibility
//!   fallbacks arrive in a [`KdfConfig`] built by the caller. Nothing in
//!   this crate reads an environment variable.
//! - **Errors are terminal.** The four-kind [`KdfError`] taxonomy is closed;
//!   every error means "do not fund, do not claim, do not guess".
//! - **No input normalization.** Signer ids and paths are hashed verbatim.
//!   Two strings differing by one space derive two different keys, and that
//!   is a feature the on-chain contract relies on.
//!
//! ## Example
//!
//! ```
//! use satslinger_kdf::{generate_address, AddressRequest, Chain, KdfConfig, Network};
//!
//! let config = KdfConfig::strict(Network::Testnet);
//! let derived = generate_address(
//!     &config,
//!     &AddressRequest {
//!         root_public_key: "secp256k1:4NfTiv3UsGahebgTaHyD9vF8KYKMBnfd6kh94mK6xv8fGBiJB8TBtFMP5WWXz6B89Ac1fbpzPwAvoyQebemHFwx3",
//!         signer_id: "example.testnet",
//!         path: "bitcoin-1",
//!         chain: Some(Chain::Bitcoin),
//!     },
//! )
//! .unwrap();
//!
//! // Legacy testnet P2PKH.
//! assert!(derived.address.starts_with('m') || derived.address.starts_with('n'));
//! assert_eq!(derived.public_key.len(), 130);
//! ```

pub mod address;
pub mod chain;
pub mod config;
pub mod derive;
pub mod engine;
pub mod error;
pub mod root_key;

pub use chain::{Chain, Network};
pub use config::KdfConfig;
pub use engine::{generate_address, AddressRequest, DerivedAddress};
pub use error::KdfError;
pub use root_key::UncompressedPoint;
