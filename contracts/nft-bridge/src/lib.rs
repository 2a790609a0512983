//! NFT Bridge Contract - Cross-Chain NFT Bridging for TerraClassic
//!
//! Moves non-fungible tokens between TerraClassic and a foreign chain whose
//! events are proven by an external light-client prover.
//!
//! # Outgoing Flow
//! 1. A home token is locked into custody (`LockTokens` or `SendNft` to the
//!    bridge); the foreign chain mints its bridged copy
//! 2. A bridged token is burned (`WithdrawTokens`); the foreign chain
//!    releases the original
//!
//! # Incoming Flow
//! 1. A relayer submits a proof of a foreign `Locked`, `Withdraw` or
//!    `MetadataLog` event with `FinalizeInbound`
//! 2. The prover checks it, the replay guard consumes its fingerprint and the
//!    event is applied (mint, unlock or metadata update) in one transaction
//!
//! # Security
//! - Every proof is accepted at most once
//! - Role-based access control (admin, whitelisted relayers, operators)
//! - Upgrade proxy with a per-version initializer guard
//! - Global and withdrawal-only pause flags

pub mod access;
pub mod address_codec;
pub mod codec;
pub mod contract;
pub mod custody;
pub mod error;
mod execute;
pub mod hash;
pub mod logic;
pub mod msg;
pub mod proof;
pub mod proxy;
mod query;
pub mod registry;
pub mod replay;
pub mod state;

pub use crate::codec::{decode_event, encode_event, DecodedEvent, EventSchema, ProofEnvelope};
pub use crate::error::ContractError;
pub use crate::hash::{envelope_fingerprint, keccak256, proof_fingerprint};
