//! Common - Shared Interfaces for the NFT Bridge Contracts
//!
//! This package provides the message types spoken between the bridge,
//! the bridged token contracts it deploys, home-chain collections and the
//! external proof verifier.

pub mod nft;
pub mod prover;

pub use nft::{
    BridgedNftInstantiateMsg, NftExecuteMsg, NftQueryMsg, NftReceiveMsg, NftReceiverExecuteMsg,
};
pub use prover::{ProverQueryMsg, VerifyProofResponse};
