//! # Transaction Module
//!
//! The ledger's transaction schema, amount parsing, construction and
//! signing. Everything here ends in one place: the Borsh bytes a signer
//! signs and an RPC node accepts.
//!
//! ## Architecture
//!
//! ```text
//! types.rs   : Actions, public keys, access keys, signatures
//! amount.rs  : NEAR amount parsing and the NearAmount wrapper
//! builder.rs : Transaction and the fluent TransactionBuilder
//! signing.rs : Signer trait, SignedTransaction, sign_transaction
//! error.rs   : TransactionError
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Query**: Fetch the access key nonce and a recent block hash
//!    (see [`crate::transport::fetch_access_key`]).
//! 2. **Build**: Assemble the header and actions with [`TransactionBuilder`].
//! 3. **Sign**: Call [`sign_transaction`] with a [`Signer`].
//! 4. **Broadcast**: Send [`SignedTransaction::to_bytes`] to an RPC node.

pub mod amount;
pub mod builder;
pub mod error;
pub mod signing;
pub mod types;

pub use amount::{cleanup_amount, parse_near_amount, NearAmount};
pub use builder::{Transaction, TransactionBuilder};
pub use error::{TransactionError, TransactionResult};
pub use signing::{sign_transaction, SignedTransaction, Signer};
pub use types::{
    parse_block_hash, AccessKey, AccessKeyPermission, Action, FunctionCallPermission, KeyType,
    PublicKey, Signature,
};
