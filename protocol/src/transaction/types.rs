//! The ledger's transaction vocabulary: actions, keys, access keys and
//! signatures.
//!
//! Every type here has a fixed Borsh layout. Field order and alternative
//! order are part of the wire contract, so reordering anything in this file
//! produces payloads the ledger will reject.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::{TransactionError, TransactionResult};
use crate::bignum::BigInteger;
use crate::config::{BLOCK_HASH_LENGTH, ED25519_KEY_PREFIX, ED25519_KEY_SIZE, SIGNATURE_LENGTH};

// ---------------------------------------------------------------------------
// KeyType
// ---------------------------------------------------------------------------

/// Curve of a key or signature. Encoded as a single ordinal byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum KeyType {
    #[default]
    Ed25519,
}

crate::impl_borsh_enum!(KeyType { 0 => Ed25519 });

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ed25519 => f.write_str(ED25519_KEY_PREFIX),
        }
    }
}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

/// A public key, tagged with its curve.
///
/// Textual form is `ed25519:<base58>`, the form RPC queries and wallets use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PublicKey {
    Ed25519([u8; ED25519_KEY_SIZE]),
}

crate::impl_borsh_variant!(PublicKey { 0 => Ed25519(key) });

impl PublicKey {
    pub fn key_type(&self) -> KeyType {
        match self {
            Self::Ed25519(_) => KeyType::Ed25519,
        }
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; ED25519_KEY_SIZE] {
        match self {
            Self::Ed25519(bytes) => bytes,
        }
    }

    /// Implicit account ID: the lowercase hex of the key bytes.
    pub fn implicit_account_id(&self) -> String {
        hex::encode(self.as_bytes())
    }
}

impl From<[u8; ED25519_KEY_SIZE]> for PublicKey {
    fn from(bytes: [u8; ED25519_KEY_SIZE]) -> Self {
        Self::Ed25519(bytes)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            self.key_type(),
            bs58::encode(self.as_bytes()).into_string()
        )
    }
}

impl FromStr for PublicKey {
    type Err = TransactionError;

    /// Accepts `ed25519:<base58>` or bare base58, which defaults to Ed25519.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let encoded = match s.split_once(':') {
            Some((prefix, rest)) if prefix.eq_ignore_ascii_case(ED25519_KEY_PREFIX) => rest,
            Some((prefix, _)) => {
                return Err(TransactionError::InvalidEncoding {
                    what: "public key",
                    reason: format!("unknown key type {prefix:?}"),
                })
            }
            None => s,
        };
        Ok(Self::Ed25519(decode_base58_array(encoded, "public key")?))
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

/// A detached signature over a transaction's Borsh bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature {
    pub key_type: KeyType,
    pub data: [u8; SIGNATURE_LENGTH],
}

crate::impl_borsh_record!(Signature { key_type, data });

impl Signature {
    pub fn ed25519(data: [u8; SIGNATURE_LENGTH]) -> Self {
        Self {
            key_type: KeyType::Ed25519,
            data,
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.key_type, bs58::encode(self.data).into_string())
    }
}

// ---------------------------------------------------------------------------
// Access keys
// ---------------------------------------------------------------------------

/// Restrictions of a function-call access key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCallPermission {
    /// Remaining gas allowance in yoctoNEAR. `None` means unlimited.
    pub allowance: Option<BigInteger>,
    /// The only contract this key may call.
    pub receiver_id: String,
    /// Methods it may call. Empty means any method.
    pub method_names: Vec<String>,
}

crate::impl_borsh_record!(FunctionCallPermission {
    allowance,
    receiver_id,
    method_names,
});

/// What an access key is allowed to do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessKeyPermission {
    FunctionCall(FunctionCallPermission),
    FullAccess,
}

crate::impl_borsh_variant!(AccessKeyPermission {
    0 => FunctionCall(permission),
    1 => FullAccess,
});

/// An access key as attached by an `AddKey` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessKey {
    pub nonce: u64,
    pub permission: AccessKeyPermission,
}

crate::impl_borsh_record!(AccessKey { nonce, permission });

impl AccessKey {
    pub fn full_access() -> Self {
        Self {
            nonce: 0,
            permission: AccessKeyPermission::FullAccess,
        }
    }

    pub fn function_call(permission: FunctionCallPermission) -> Self {
        Self {
            nonce: 0,
            permission: AccessKeyPermission::FunctionCall(permission),
        }
    }
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// One operation inside a transaction. A transaction applies its actions in
/// order, atomically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    CreateAccount,
    DeployContract {
        code: Vec<u8>,
    },
    FunctionCall {
        method_name: String,
        args: Vec<u8>,
        gas: u64,
        deposit: BigInteger,
    },
    Transfer {
        deposit: BigInteger,
    },
    Stake {
        stake: BigInteger,
        public_key: PublicKey,
    },
    AddKey {
        public_key: PublicKey,
        access_key: AccessKey,
    },
    DeleteKey {
        public_key: PublicKey,
    },
    DeleteAccount {
        beneficiary_id: String,
    },
}

crate::impl_borsh_variant!(Action {
    0 => CreateAccount,
    1 => DeployContract { code },
    2 => FunctionCall { method_name, args, gas, deposit },
    3 => Transfer { deposit },
    4 => Stake { stake, public_key },
    5 => AddKey { public_key, access_key },
    6 => DeleteKey { public_key },
    7 => DeleteAccount { beneficiary_id },
});

impl Action {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateAccount => "CreateAccount",
            Self::DeployContract { .. } => "DeployContract",
            Self::FunctionCall { .. } => "FunctionCall",
            Self::Transfer { .. } => "Transfer",
            Self::Stake { .. } => "Stake",
            Self::AddKey { .. } => "AddKey",
            Self::DeleteKey { .. } => "DeleteKey",
            Self::DeleteAccount { .. } => "DeleteAccount",
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Decodes a base58 block hash as returned by RPC.
pub fn parse_block_hash(text: &str) -> TransactionResult<[u8; BLOCK_HASH_LENGTH]> {
    decode_base58_array(text, "block hash")
}

fn decode_base58_array<const N: usize>(text: &str, what: &'static str) -> TransactionResult<[u8; N]> {
    let bytes = bs58::decode(text)
        .into_vec()
        .map_err(|e| TransactionError::InvalidEncoding {
            what,
            reason: e.to_string(),
        })?;
    let found = bytes.len();
    bytes
        .try_into()
        .map_err(|_| TransactionError::InvalidEncoding {
            what,
            reason: format!("expected {N} bytes, got {found}"),
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{from_slice, to_vec};

    fn sample_key() -> PublicKey {
        PublicKey::Ed25519([7u8; 32])
    }

    #[test]
    fn public_key_wire_form_is_tag_then_bytes() {
        let bytes = to_vec(&sample_key()).unwrap();
        assert_eq!(bytes.len(), 33);
        assert_eq!(bytes[0], 0);
        assert!(bytes[1..].iter().all(|&b| b == 7));
    }

    #[test]
    fn public_key_text_round_trip() {
        let key = sample_key();
        let text = key.to_string();
        assert!(text.starts_with("ed25519:"));
        assert_eq!(text.parse::<PublicKey>().unwrap(), key);

        let bare = text.trim_start_matches("ed25519:");
        assert_eq!(bare.parse::<PublicKey>().unwrap(), key);
    }

    #[test]
    fn public_key_text_rejects_garbage() {
        assert!(matches!(
            "secp256k1:abc".parse::<PublicKey>(),
            Err(TransactionError::InvalidEncoding { what: "public key", .. })
        ));
        assert!("ed25519:0OIl".parse::<PublicKey>().is_err(), "not base58");
        assert!("ed25519:2g".parse::<PublicKey>().is_err(), "too short");
    }

    #[test]
    fn public_key_serde_uses_text_form() {
        let key = sample_key();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, format!("\"{key}\""));
        let back: PublicKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }

    #[test]
    fn implicit_account_is_hex() {
        assert_eq!(sample_key().implicit_account_id(), "07".repeat(32));
    }

    #[test]
    fn signature_layout() {
        let signature = Signature::ed25519([1u8; 64]);
        let bytes = to_vec(&signature).unwrap();
        assert_eq!(bytes.len(), 65);
        assert_eq!(bytes[0], 0, "key type ordinal");
        assert_eq!(from_slice::<Signature>(&bytes).unwrap(), signature);
    }

    #[test]
    fn transfer_action_layout() {
        let action = Action::Transfer {
            deposit: BigInteger::from(1u64),
        };
        let mut expected = vec![3];
        expected.extend_from_slice(&1u128.to_le_bytes());
        assert_eq!(to_vec(&action).unwrap(), expected);
    }

    #[test]
    fn function_call_action_layout() {
        let action = Action::FunctionCall {
            method_name: "go".into(),
            args: b"{}".to_vec(),
            gas: 30_000_000_000_000,
            deposit: BigInteger::zero(),
        };
        let bytes = to_vec(&action).unwrap();

        let mut expected = vec![2];
        expected.extend_from_slice(&[2, 0, 0, 0, b'g', b'o']);
        expected.extend_from_slice(&[2, 0, 0, 0, b'{', b'}']);
        expected.extend_from_slice(&30_000_000_000_000u64.to_le_bytes());
        expected.extend_from_slice(&[0u8; 16]);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn every_action_round_trips() {
        let actions = vec![
            Action::CreateAccount,
            Action::DeployContract { code: vec![0, 97, 115, 109] },
            Action::Stake {
                stake: BigInteger::from(5u64),
                public_key: sample_key(),
            },
            Action::AddKey {
                public_key: sample_key(),
                access_key: AccessKey::function_call(FunctionCallPermission {
                    allowance: Some(BigInteger::from(250u64)),
                    receiver_id: "app.near".into(),
                    method_names: vec!["vote".into()],
                }),
            },
            Action::AddKey {
                public_key: sample_key(),
                access_key: AccessKey::full_access(),
            },
            Action::DeleteKey {
                public_key: sample_key(),
            },
            Action::DeleteAccount {
                beneficiary_id: "bob.near".into(),
            },
        ];
        let bytes = to_vec(&actions).unwrap();
        assert_eq!(from_slice::<Vec<Action>>(&bytes).unwrap(), actions);
    }

    #[test]
    fn access_key_layouts() {
        assert_eq!(
            to_vec(&AccessKey::full_access()).unwrap(),
            vec![0, 0, 0, 0, 0, 0, 0, 0, 1]
        );

        let unlimited = AccessKey::function_call(FunctionCallPermission {
            allowance: None,
            receiver_id: "a".into(),
            method_names: vec![],
        });
        assert_eq!(
            to_vec(&unlimited).unwrap(),
            vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, b'a', 0, 0, 0, 0]
        );
    }

    #[test]
    fn block_hash_parsing() {
        let hash = [0xabu8; 32];
        let text = bs58::encode(hash).into_string();
        assert_eq!(parse_block_hash(&text).unwrap(), hash);
        assert!(parse_block_hash("11").is_err());
    }

    #[test]
    fn action_names() {
        assert_eq!(Action::CreateAccount.name(), "CreateAccount");
        assert_eq!(
            Action::DeleteAccount {
                beneficiary_id: String::new()
            }
            .name(),
            "DeleteAccount"
        );
    }
}
