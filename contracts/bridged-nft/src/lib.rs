//! Bridged NFT - token contract for collections bridged in from the foreign chain
//!
//! One instance is deployed by the NFT bridge per foreign collection. The
//! bridge is the minter: it mints when a lock on the foreign chain is proven
//! and burns when a holder withdraws back. Holders transfer, send and approve
//! like any other NFT.

pub mod contract;
pub mod error;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;
