//! Transaction signing through an external [`Signer`].
//!
//! The signing primitive itself lives outside this crate (a local Ed25519
//! key, a hardware wallet, a remote service). This module only feeds it the
//! canonical bytes and assembles the [`SignedTransaction`] that goes on the
//! wire.

use tracing::debug;

use super::builder::Transaction;
use super::error::{TransactionError, TransactionResult};
use super::types::{PublicKey, Signature};
use crate::config::{ED25519_KEY_SIZE, SIGNATURE_LENGTH};

/// Anything that can produce Ed25519 signatures for one key.
///
/// Whether the message is hashed before signing is the implementation's
/// business; the ledger expects the signature over the SHA-256 of the
/// transaction bytes.
pub trait Signer {
    /// The key this signer signs with.
    fn public_key(&self) -> [u8; ED25519_KEY_SIZE];

    /// Signs `message`.
    fn sign(&self, message: &[u8]) -> TransactionResult<[u8; SIGNATURE_LENGTH]>;
}

/// A transaction together with its signature, ready to broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub transaction: Transaction,
    pub signature: Signature,
}

crate::impl_borsh_record!(SignedTransaction {
    transaction,
    signature,
});

impl SignedTransaction {
    /// Borsh bytes of the transaction followed by the signature.
    pub fn to_bytes(&self) -> TransactionResult<Vec<u8>> {
        Ok(crate::codec::to_vec(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> TransactionResult<Self> {
        Ok(crate::codec::from_slice(bytes)?)
    }
}

/// Signs `tx` with `signer`.
///
/// # Errors
///
/// - [`TransactionError::KeyMismatch`] if the signer's key is not the key
///   named in the transaction.
/// - [`TransactionError::Codec`] if the transaction cannot be encoded.
/// - Whatever the signer reports.
pub fn sign_transaction(tx: Transaction, signer: &dyn Signer) -> TransactionResult<SignedTransaction> {
    let signer_key = PublicKey::Ed25519(signer.public_key());
    if signer_key != tx.public_key {
        return Err(TransactionError::KeyMismatch {
            expected: tx.public_key.to_string(),
            signer: signer_key.to_string(),
        });
    }

    let signable = tx.signable_bytes()?;
    let signature = Signature::ed25519(signer.sign(&signable)?);

    debug!(
        signer_id = %tx.signer_id,
        nonce = tx.nonce,
        bytes = signable.len(),
        "signed transaction"
    );

    Ok(SignedTransaction {
        transaction: tx,
        signature,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
