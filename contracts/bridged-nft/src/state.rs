use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};

pub const CONTRACT_NAME: &str = "crates.io:bridged-nft";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Collection display metadata
#[cw_serde]
pub struct CollectionInfo {
    pub name: String,
    pub symbol: String,
    pub icon: Option<String>,
    pub base_uri: Option<String>,
    /// Identifier of the collection on the foreign chain
    pub collection_id: String,
}

#[cw_serde]
pub struct TokenInfo {
    pub owner: Addr,
    /// Spenders allowed to transfer this token; cleared on every transfer
    pub approvals: Vec<Addr>,
    pub token_uri: Option<String>,
}

pub const COLLECTION: Item<CollectionInfo> = Item::new("collection");

pub const MINTER: Item<Addr> = Item::new("minter");

/// token_id => token
pub const TOKENS: Map<&str, TokenInfo> = Map::new("tokens");

/// owner => number of tokens held
pub const BALANCES: Map<&Addr, u64> = Map::new("balances");
