//! Transaction construction via the builder pattern.
//!
//! The [`TransactionBuilder`] collects the header fields and the action list,
//! and `.build()` refuses to produce a [`Transaction`] until every required
//! field is present. The builder does not sign; that happens in
//! [`super::signing`], so construction stays testable without key material.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::amount::NearAmount;
use super::error::{TransactionError, TransactionResult};
use super::types::{AccessKey, Action, PublicKey};
use crate::config::BLOCK_HASH_LENGTH;

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// An unsigned ledger transaction.
///
/// # Canonical Byte Format
///
/// [`Transaction::signable_bytes`] is the Borsh encoding of the fields in
/// declaration order: `signer_id`, `public_key`, `nonce`, `receiver_id`,
/// `block_hash`, `actions`. The signer hashes and signs exactly these bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Account paying for and authorizing the transaction.
    pub signer_id: String,

    /// Access key of `signer_id` that will sign.
    pub public_key: PublicKey,

    /// Must exceed the access key's current nonce.
    pub nonce: u64,

    /// Account the actions apply to.
    pub receiver_id: String,

    /// Hash of a recent block. Bounds the transaction's validity window.
    pub block_hash: [u8; BLOCK_HASH_LENGTH],

    /// Applied in order, all or nothing.
    pub actions: Vec<Action>,
}

crate::impl_borsh_record!(Transaction {
    signer_id,
    public_key,
    nonce,
    receiver_id,
    block_hash,
    actions,
});

impl Transaction {
    /// Returns the canonical Borsh encoding used for signing.
    ///
    /// # Errors
    ///
    /// Fails only if an amount does not fit the `u128` wire width or a field
    /// exceeds the `u32` length prefix.
    pub fn signable_bytes(&self) -> TransactionResult<Vec<u8>> {
        Ok(crate::codec::to_vec(self)?)
    }

    /// Decodes a transaction from its Borsh bytes.
    pub fn from_bytes(bytes: &[u8]) -> TransactionResult<Self> {
        Ok(crate::codec::from_slice(bytes)?)
    }
}

// ---------------------------------------------------------------------------
// TransactionBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Transaction`] values.
///
/// # Usage
///
/// ```rust
/// use ntb_protocol::transaction::{NearAmount, PublicKey, TransactionBuilder};
///
/// let tx = TransactionBuilder::new("alice.near")
///     .public_key(PublicKey::Ed25519([1; 32]))
///     .nonce(7)
///     .receiver("bob.near")
///     .block_hash([2; 32])
///     .transfer(NearAmount::from(1u64))
///     .build()
///     .unwrap();
///
/// assert_eq!(tx.actions.len(), 1);
/// ```
///
/// `nonce` defaults to 0 and the action list may be empty; `public_key`,
/// `receiver` and `block_hash` are required.
#[derive(Debug, Clone, Default)]
pub struct TransactionBuilder {
    signer_id: String,
    public_key: Option<PublicKey>,
    nonce: u64,
    receiver_id: Option<String>,
    block_hash: Option<[u8; BLOCK_HASH_LENGTH]>,
    actions: Vec<Action>,
}

impl TransactionBuilder {
    /// Creates a builder for transactions signed by `signer_id`.
    pub fn new(signer_id: &str) -> Self {
        Self {
            signer_id: signer_id.to_string(),
            ..Self::default()
        }
    }

    /// Sets the signing access key.
    pub fn public_key(mut self, public_key: PublicKey) -> Self {
        self.public_key = Some(public_key);
        self
    }

    /// Sets the nonce. Callers usually pass the access key's nonce plus one.
    pub fn nonce(mut self, nonce: u64) -> Self {
        self.nonce = nonce;
        self
    }

    /// Sets the receiving account.
    pub fn receiver(mut self, receiver_id: &str) -> Self {
        self.receiver_id = Some(receiver_id.to_string());
        self
    }

    /// Sets the recent block hash.
    pub fn block_hash(mut self, block_hash: [u8; BLOCK_HASH_LENGTH]) -> Self {
        self.block_hash = Some(block_hash);
        self
    }

    /// Appends one action.
    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Appends several actions, in iteration order.
    pub fn actions(mut self, actions: impl IntoIterator<Item = Action>) -> Self {
        self.actions.extend(actions);
        self
    }

    /// Appends a `Transfer` of `amount` to the receiver.
    pub fn transfer(self, amount: NearAmount) -> Self {
        self.action(Action::Transfer {
            deposit: amount.into_yocto(),
        })
    }

    /// Appends a `FunctionCall` on the receiver contract.
    pub fn function_call(self, method_name: &str, args: Vec<u8>, gas: u64, deposit: NearAmount) -> Self {
        self.action(Action::FunctionCall {
            method_name: method_name.to_string(),
            args,
            gas,
            deposit: deposit.into_yocto(),
        })
    }

    /// Appends `CreateAccount`.
    pub fn create_account(self) -> Self {
        self.action(Action::CreateAccount)
    }

    /// Appends `AddKey`.
    pub fn add_key(self, public_key: PublicKey, access_key: AccessKey) -> Self {
        self.action(Action::AddKey {
            public_key,
            access_key,
        })
    }

    /// Appends `DeleteAccount`, sending the remaining balance to `beneficiary_id`.
    pub fn delete_account(self, beneficiary_id: &str) -> Self {
        self.action(Action::DeleteAccount {
            beneficiary_id: beneficiary_id.to_string(),
        })
    }

    /// Consumes the builder and produces an unsigned [`Transaction`].
    ///
    /// # Errors
    ///
    /// [`TransactionError::MissingField`] naming the first unset required
    /// field.
    pub fn build(self) -> TransactionResult<Transaction> {
        let public_key = self
            .public_key
            .ok_or(TransactionError::MissingField("public_key"))?;
        let receiver_id = self
            .receiver_id
            .ok_or(TransactionError::MissingField("receiver_id"))?;
        let block_hash = self
            .block_hash
            .ok_or(TransactionError::MissingField("block_hash"))?;

        debug!(
            signer_id = %self.signer_id,
            receiver_id = %receiver_id,
            nonce = self.nonce,
            actions = self.actions.len(),
            "built transaction"
        );

        Ok(Transaction {
            signer_id: self.signer_id,
            public_key,
            nonce: self.nonce,
            receiver_id,
            block_hash,
            actions: self.actions,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
