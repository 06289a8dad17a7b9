//! # Chain Address Encoders
//!
//! One module per target encoding. Every encoder consumes the same 65-byte
//! uncompressed child key and is a pure function of its input; network
//! selection arrives as an explicit argument, never from the environment.
//!
//! The encoders do not re-validate curve membership. By the time a point
//! reaches them it came out of [`derive`](crate::derive), which only emits
//! points produced by group arithmetic.

pub mod bitcoin;
pub mod evm;
pub mod near;
