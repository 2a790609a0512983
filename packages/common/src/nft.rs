//! NFT interface shared by the bridge, bridged collections and home collections.
//!
//! The bridge only relies on the subset defined here: ownership queries,
//! transfers (plain and send-and-call), minting and burning by the minter,
//! and display metadata updates.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary};

// ============================================================================
// Instantiate
// ============================================================================

/// Instantiate message for a bridged collection contract
#[cw_serde]
pub struct BridgedNftInstantiateMsg {
    /// Display name of the collection
    pub name: String,
    /// Ticker-like symbol
    pub symbol: String,
    /// Optional icon (data URI or URL)
    pub icon: Option<String>,
    /// Optional base URI prepended by front ends to token URIs
    pub base_uri: Option<String>,
    /// Identifier of the collection on the foreign chain
    pub collection_id: String,
    /// Address allowed to mint, burn and update metadata
    pub minter: String,
}

// ============================================================================
// Execute
// ============================================================================

#[cw_serde]
pub enum NftExecuteMsg {
    /// Transfer a token to a new owner (owner or approved spender)
    TransferNft { recipient: String, token_id: String },

    /// Transfer a token to a contract and invoke its `ReceiveNft` hook
    SendNft {
        contract: String,
        token_id: String,
        msg: Binary,
    },

    /// Allow `spender` to transfer the token
    Approve { spender: String, token_id: String },

    /// Remove a previously granted approval
    Revoke { spender: String, token_id: String },

    /// Mint a new token (minter only)
    Mint {
        token_id: String,
        owner: String,
        token_uri: Option<String>,
    },

    /// Destroy a token (minter only)
    Burn { token_id: String },

    /// Replace collection display metadata (minter only)
    UpdateMetadata {
        name: String,
        symbol: String,
        icon: Option<String>,
        base_uri: Option<String>,
    },
}

/// Payload delivered to a contract receiving a token through `SendNft`
#[cw_serde]
pub struct NftReceiveMsg {
    /// Previous owner of the token
    pub sender: String,
    pub token_id: String,
    pub msg: Binary,
}

/// Wrapper used by the sending collection when calling the receiver
#[cw_serde]
pub enum NftReceiverExecuteMsg {
    ReceiveNft(NftReceiveMsg),
}

// ============================================================================
// Query
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum NftQueryMsg {
    #[returns(OwnerOfResponse)]
    OwnerOf { token_id: String },

    #[returns(NftInfoResponse)]
    NftInfo { token_id: String },

    #[returns(BalanceResponse)]
    Balance { owner: String },

    #[returns(CollectionInfoResponse)]
    CollectionInfo {},

    #[returns(MinterResponse)]
    Minter {},
}

#[cw_serde]
pub struct OwnerOfResponse {
    pub owner: Addr,
    pub approvals: Vec<Addr>,
}

#[cw_serde]
pub struct NftInfoResponse {
    pub token_uri: Option<String>,
}

#[cw_serde]
pub struct BalanceResponse {
    pub count: u64,
}

#[cw_serde]
pub struct CollectionInfoResponse {
    pub name: String,
    pub symbol: String,
    pub icon: Option<String>,
    pub base_uri: Option<String>,
    pub collection_id: String,
}

#[cw_serde]
pub struct MinterResponse {
    pub minter: Addr,
}
