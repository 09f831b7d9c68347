// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # NTB Protocol Core Library
//!
//! Canonical transaction payloads for the NEAR ledger: an exact decimal
//! big integer engine for balances, a Borsh codec that turns structured
//! values into the one byte string a signer will accept, and the
//! transaction schema built on both.
//!
//! ## Architecture
//!
//! - **bignum**: Arbitrary-precision signed decimal integers. Karatsuba
//!   multiplication, long division, modular powers, byte conversions.
//! - **codec**: Borsh encoder and bounds-checked decoder, driven by the
//!   `BorshEncode`/`BorshDecode` traits and a closed set of value kinds.
//! - **transaction**: Actions, keys, amounts, the fluent builder and the
//!   signing glue over an external `Signer`.
//! - **transport**: Interfaces for the RPC node and the hardware wallet,
//!   plus the access-key query the build step needs.
//! - **logging**: `tracing` subscriber setup for embedding binaries.
//! - **config**: Protocol constants and network endpoints.
//!
//! ## Design Philosophy
//!
//! 1. No floating point anywhere near an amount.
//! 2. One value, one encoding. If two encoders disagree, one of them is wrong.
//! 3. Malformed input is an error at the point it is found, never a default.
//! 4. The crate never signs, hashes or sends. It prepares bytes.

pub mod bignum;
pub mod codec;
pub mod config;
pub mod logging;
pub mod transaction;
pub mod transport;
