//! Message types for the bridged NFT contract
//!
//! The wire types live in `common::nft` so the bridge can speak them too.

use cosmwasm_schema::cw_serde;

pub use common::nft::{
    BalanceResponse, BridgedNftInstantiateMsg as InstantiateMsg, CollectionInfoResponse,
    MinterResponse, NftExecuteMsg as ExecuteMsg, NftInfoResponse, NftQueryMsg as QueryMsg,
    OwnerOfResponse,
};

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}
