//! # Protocol Configuration & Constants
//!
//! Every magic number the codec, the big integer engine and the transaction
//! layer depend on lives here. If you're hardcoding one of these somewhere
//! else, move it here.
//!
//! Most of these are fixed by the ledger's wire format. Changing one doesn't
//! make a "new configuration", it makes transactions nobody will accept.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Amounts
// ---------------------------------------------------------------------------

/// 1 NEAR = 10^24 yoctoNEAR. Human-entered amounts are scaled by this many
/// decimal places before they go anywhere near a transaction.
pub const NEAR_NOMINATION_EXP: usize = 24;

/// Balances travel as unsigned 128-bit little-endian integers.
pub const BALANCE_BYTE_WIDTH: usize = 16;

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// Ed25519 public key length in bytes.
pub const ED25519_KEY_SIZE: usize = 32;

/// Ed25519 signature length. Always 64 bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// Recent block hash carried by every transaction for replay protection.
pub const BLOCK_HASH_LENGTH: usize = 32;

/// BIP-32 path of the account key on a hardware wallet (coin type 397).
pub const NEAR_DERIVATION_PATH: &str = "44'/397'/0'/0'/1'";

/// Textual prefix of an Ed25519 public key, as in `ed25519:<base58>`.
pub const ED25519_KEY_PREFIX: &str = "ed25519";

// ---------------------------------------------------------------------------
// Big Integer Engine
// ---------------------------------------------------------------------------

/// Below this many digits on both sides, multiplication goes through native
/// `u128` instead of Karatsuba. Two 9-digit factors stay under 10^18, far
/// inside `u128`. Must stay in `2..=20`.
pub const MUL_FAST_PATH_DIGITS: usize = 10;

/// Below this many digits on both sides, division and remainder use native
/// `u64` arithmetic. 18 digits is the most that always fits an `i64` too.
pub const DIV_FAST_PATH_DIGITS: usize = 19;

// ---------------------------------------------------------------------------
// Codec
// ---------------------------------------------------------------------------

/// Largest string byte length or sequence element count the `u32` prefix can
/// describe.
pub const MAX_LENGTH_PREFIX: usize = u32::MAX as usize;

// ---------------------------------------------------------------------------
// Networks
// ---------------------------------------------------------------------------

/// The public networks a transaction can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Where mistakes are free.
    #[default]
    Testnet,
    /// Where they are not.
    Mainnet,
}

impl Network {
    /// Network identifier as used in endpoint names and explorers.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Testnet => "testnet",
            Self::Mainnet => "mainnet",
        }
    }

    /// Public JSON-RPC endpoint for this network.
    pub fn rpc_endpoint(&self) -> String {
        format!("https://rpc.{}.near.org", self.id())
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "testnet" => Ok(Self::Testnet),
            "mainnet" => Ok(Self::Mainnet),
            other => Err(format!("unknown network: {other}")),
        }
    }
}
