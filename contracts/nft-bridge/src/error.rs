//! Error types for the NFT bridge contract

use cosmwasm_std::StdError;
use thiserror::Error;

use crate::codec::DecodeError;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: only {role} can perform this action")]
    Unauthorized { role: String },

    #[error("Cannot remove last admin")]
    CannotRemoveLastAdmin,

    #[error("Caller does not own token {token_id}")]
    NotTokenOwner { token_id: String },

    // ========================================================================
    // Proxy Errors
    // ========================================================================

    #[error("Already initialized: logic version {version}")]
    AlreadyInitialized { version: u32 },

    #[error("Bridge logic is not initialized")]
    NotInitialized,

    #[error("Logic unavailable: {reason}")]
    LogicUnavailable { reason: String },

    // ========================================================================
    // Pause Errors
    // ========================================================================

    #[error("Bridge is paused")]
    BridgePaused,

    #[error("Withdrawals are paused")]
    WithdrawalsPaused,

    // ========================================================================
    // Proof Errors
    // ========================================================================

    #[error("Proof invalid: rejected by prover")]
    ProofInvalid,

    #[error("Proof invalid: unexpected emitter {got}, expected {expected}")]
    UnexpectedEmitter { expected: String, got: String },

    #[error("Proof invalid: block height {height} is below minimum {min_height}")]
    ProofTooOld { height: u64, min_height: u64 },

    #[error("Replay rejected: proof {fingerprint} already consumed")]
    ReplayRejected { fingerprint: String },

    // ========================================================================
    // Registry Errors
    // ========================================================================

    #[error("Collection not deployed: {collection_id}")]
    NotDeployed { collection_id: String },

    #[error("Collection already deployed: {collection_id}")]
    AlreadyDeployed { collection_id: String },

    #[error("Invalid collection id: {reason}")]
    InvalidCollectionId { reason: String },

    #[error("Deployment reply did not contain a contract address")]
    DeploymentAddressMissing,

    #[error("Unknown reply id: {id}")]
    UnknownReplyId { id: u64 },

    // ========================================================================
    // Custody Errors
    // ========================================================================

    #[error("Token {token_id} of {collection} is already in custody")]
    AlreadyInCustody { collection: String, token_id: String },

    #[error("Token {token_id} of {collection} is not in custody")]
    NotInCustody { collection: String, token_id: String },

    #[error("Unknown home token key: {key}")]
    UnknownHomeToken { key: String },

    #[error("Bridged tokens cannot be locked; withdraw them instead")]
    CannotLockBridgedToken,

    // ========================================================================
    // Validation Errors
    // ========================================================================

    #[error("Invalid remote account: {account}")]
    InvalidRemoteAccount { account: String },

    #[error("Invalid token id: {token_id}")]
    InvalidTokenId { token_id: String },

    #[error("No token ids given")]
    EmptyTokenIds,

    #[error("Funds sent but no fee collector is configured")]
    UnexpectedFunds,
}

impl ContractError {
    pub fn unauthorized(role: &str) -> Self {
        ContractError::Unauthorized {
            role: role.to_string(),
        }
    }
}
