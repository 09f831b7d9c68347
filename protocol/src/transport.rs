//! # External Transports
//!
//! The crate never opens a socket or a USB handle. It talks to the outside
//! world through two traits that embedders implement:
//!
//! - [`RpcTransport`] for JSON-RPC against a node
//!   (see [`Network::rpc_endpoint`](crate::config::Network::rpc_endpoint));
//! - [`HardwareTransport`] for APDU-style exchanges with a hardware wallet.
//!
//! On top of those sit the few queries the transaction flow needs and a
//! [`LedgerSigner`] that signs through the device.

use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

use crate::config::{ED25519_KEY_SIZE, SIGNATURE_LENGTH};
use crate::transaction::{
    parse_block_hash, AccessKeyPermission, PublicKey, Signer, TransactionError, TransactionResult,
};

/// Errors from a transport or from interpreting its response.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The transport could not deliver the request.
    #[error("transport unavailable: {0}")]
    Unavailable(String),

    /// The node answered with a JSON-RPC error object.
    #[error("rpc error: {0}")]
    Rpc(Value),

    /// The device answered with a non-success status word.
    #[error("device returned status {0:#06x}")]
    DeviceStatus(u16),

    /// The response did not have the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The key's nonce is already `u64::MAX`; no further transaction can
    /// be signed with it.
    #[error("access key nonce {0} cannot be incremented")]
    NonceExhausted(u64),

    /// A derivation path string could not be parsed.
    #[error("invalid bip32 path: {0}")]
    InvalidPath(String),

    #[error(transparent)]
    Transaction(#[from] TransactionError),
}

/// Result alias for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// JSON-RPC client for a node.
pub trait RpcTransport {
    /// Calls `method` with `params` and returns the `result` member.
    fn call(&self, method: &str, params: &Value) -> TransportResult<Value>;
}

/// Hardware wallet channel.
pub trait HardwareTransport {
    /// Sends one command with its payload and returns the status word and
    /// response data.
    fn exchange(&self, command: u8, payload: &[u8]) -> TransportResult<(u16, Vec<u8>)>;
}

/// Status word of a successful device exchange.
pub const DEVICE_STATUS_OK: u16 = 0x9000;

// ---------------------------------------------------------------------------
// Access key query
// ---------------------------------------------------------------------------

/// What a node reports about one access key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessKeyView {
    /// Nonce of the last transaction signed with this key.
    pub nonce: u64,
    pub permission: AccessKeyPermission,
    /// Block the answer was computed at, usable as a transaction block hash.
    pub block_hash: [u8; 32],
}

impl AccessKeyView {
    /// Nonce to put in the next transaction.
    ///
    /// # Errors
    ///
    /// [`TransportError::NonceExhausted`] if the reported nonce is
    /// `u64::MAX`.
    pub fn next_nonce(&self) -> TransportResult<u64> {
        self.nonce
            .checked_add(1)
            .ok_or(TransportError::NonceExhausted(self.nonce))
    }

    pub fn is_full_access(&self) -> bool {
        self.permission == AccessKeyPermission::FullAccess
    }
}

#[derive(Deserialize)]
struct RawAccessKeyView {
    nonce: u64,
    permission: AccessKeyPermission,
    block_hash: String,
}

/// Parameters of the `query` call for `view_access_key` at final finality.
pub fn view_access_key_params(account_id: &str, public_key: &PublicKey) -> Value {
    json!({
        "request_type": "view_access_key",
        "finality": "final",
        "account_id": account_id,
        "public_key": public_key.to_string(),
    })
}

/// Fetches nonce, permission and a recent block hash for an access key.
pub fn fetch_access_key(
    rpc: &dyn RpcTransport,
    account_id: &str,
    public_key: &PublicKey,
) -> TransportResult<AccessKeyView> {
    let params = view_access_key_params(account_id, public_key);
    let result = rpc.call("query", &params)?;
    if let Some(error) = result.get("error") {
        return Err(TransportError::Rpc(error.clone()));
    }

    let raw: RawAccessKeyView = serde_json::from_value(result)
        .map_err(|e| TransportError::MalformedResponse(e.to_string()))?;
    let view = AccessKeyView {
        nonce: raw.nonce,
        permission: raw.permission,
        block_hash: parse_block_hash(&raw.block_hash)?,
    };

    debug!(account_id, nonce = view.nonce, "fetched access key");
    Ok(view)
}

// ---------------------------------------------------------------------------
// Hardware wallet helpers
// ---------------------------------------------------------------------------

const HARDENED_FLAG: u32 = 0x8000_0000;

/// Serializes a BIP-32 path such as `44'/397'/0'/0'/1'` to big-endian `u32`
/// components, optionally preceded by a one-byte component count.
pub fn bip32_path_to_bytes(path: &str, prepend_length: bool) -> TransportResult<Vec<u8>> {
    let lowered = path.to_ascii_lowercase();
    let trimmed = lowered.strip_prefix("m/").unwrap_or(&lowered);
    let parts: Vec<&str> = trimmed.split('/').collect();
    let count = u8::try_from(parts.len())
        .map_err(|_| TransportError::InvalidPath(format!("{} components", parts.len())))?;

    let mut bytes = Vec::with_capacity(parts.len() * 4 + 1);
    if prepend_length {
        bytes.push(count);
    }
    for part in parts {
        let (digits, hardened) = match part.strip_suffix('\'') {
            Some(digits) => (digits, true),
            None => (part, false),
        };
        let index: u32 = digits
            .parse()
            .map_err(|_| TransportError::InvalidPath(path.to_string()))?;
        if index >= HARDENED_FLAG {
            return Err(TransportError::InvalidPath(path.to_string()));
        }
        let index = if hardened { index | HARDENED_FLAG } else { index };
        bytes.extend_from_slice(&index.to_be_bytes());
    }
    Ok(bytes)
}

/// Checks a device reply and returns its data.
pub fn expect_device_ok((status, data): (u16, Vec<u8>)) -> TransportResult<Vec<u8>> {
    match status {
        DEVICE_STATUS_OK => Ok(data),
        other => Err(TransportError::DeviceStatus(other)),
    }
}

// ---------------------------------------------------------------------------
// Ledger signer
// ---------------------------------------------------------------------------

/// Command byte asking the NEAR app for the public key at a path.
pub const INS_GET_PUBLIC_KEY: u8 = 0x04;

/// Command byte asking the NEAR app to sign a payload.
pub const INS_SIGN: u8 = 0x02;

/// A [`Signer`] backed by the NEAR app on a hardware wallet.
///
/// The public key is read once at connect time. The device hashes the
/// payload itself, so `sign` forwards the raw transaction bytes.
pub struct LedgerSigner<T: HardwareTransport> {
    transport: T,
    path: Vec<u8>,
    public_key: [u8; ED25519_KEY_SIZE],
}

impl<T: HardwareTransport> LedgerSigner<T> {
    /// Opens a signer for the key at `derivation_path`, for example
    /// [`NEAR_DERIVATION_PATH`](crate::config::NEAR_DERIVATION_PATH).
    pub fn connect(transport: T, derivation_path: &str) -> TransportResult<Self> {
        let path = bip32_path_to_bytes(derivation_path, false)?;
        let data = expect_device_ok(transport.exchange(INS_GET_PUBLIC_KEY, &path)?)?;
        let public_key: [u8; ED25519_KEY_SIZE] = data
            .as_slice()
            .try_into()
            .map_err(|_| TransportError::MalformedResponse(format!("{}-byte public key", data.len())))?;

        debug!(derivation_path, "connected to hardware signer");
        Ok(Self {
            transport,
            path,
            public_key,
        })
    }
}

impl<T: HardwareTransport> Signer for LedgerSigner<T> {
    fn public_key(&self) -> [u8; ED25519_KEY_SIZE] {
        self.public_key
    }

    fn sign(&self, message: &[u8]) -> TransactionResult<[u8; SIGNATURE_LENGTH]> {
        let mut payload = Vec::with_capacity(self.path.len() + message.len());
        payload.extend_from_slice(&self.path);
        payload.extend_from_slice(message);

        let data = self
            .transport
            .exchange(INS_SIGN, &payload)
            .and_then(expect_device_ok)
            .map_err(|e| TransactionError::Signing(e.to_string()))?;
        data.as_slice()
            .try_into()
            .map_err(|_| TransactionError::Signing(format!("{}-byte signature", data.len())))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
