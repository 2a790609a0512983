//! State definitions for the NFT bridge contract
//!
//! Configuration and counters live here. Replay, registry, custody, role and
//! proxy state are owned by their modules and only reachable through the
//! checked operations those modules expose.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::Item;

use crate::codec::EventSchema;

// ============================================================================
// Core Configuration
// ============================================================================

/// Bridge configuration, written by the bridge logic initializer
#[cw_serde]
pub struct Config {
    /// Proof verifier contract
    pub prover: Addr,
    /// Foreign-chain locker account; emits `Locked` events
    pub remote_locker: String,
    /// Foreign-chain factory account; emits `Withdraw` events
    pub remote_factory: String,
    /// Foreign-chain metadata logger account; emits `MetadataLog` events
    pub remote_metadata: String,
    /// Proofs from blocks below this height are refused
    pub min_block_acceptance_height: u64,
    /// Code id of the bridged NFT contract deployed per collection
    pub bridged_nft_code_id: u64,
    /// Bech32 prefix of local accounts
    pub account_prefix: String,
    /// Receives relayer fees attached to outbound transfers
    pub fee_collector: Option<Addr>,
    /// When set, only whitelisted relayers may finalize inbound proofs
    pub restrict_relayers: bool,
    /// Whether the bridge is currently paused
    pub paused: bool,
    /// Whether inbound withdrawals (unlocks) are paused
    pub withdrawals_paused: bool,
}

impl Config {
    /// Foreign account expected to have emitted events of `schema`
    pub fn emitter_for(&self, schema: EventSchema) -> &str {
        match schema {
            EventSchema::Locked => &self.remote_locker,
            EventSchema::Withdraw => &self.remote_factory,
            EventSchema::MetadataLog => &self.remote_metadata,
        }
    }
}

/// Bridge statistics
#[cw_serde]
#[derive(Default)]
pub struct Stats {
    /// Home tokens moved into custody
    pub total_locked: u64,
    /// Home tokens released from custody
    pub total_unlocked: u64,
    /// Bridged tokens minted from proven foreign locks
    pub total_minted: u64,
    /// Bridged tokens burned for withdrawal to the foreign chain
    pub total_burned: u64,
    /// Metadata updates applied from proofs or by admin
    pub total_metadata_updates: u64,
}

pub const CONFIG: Item<Config> = Item::new("config");

pub const STATS: Item<Stats> = Item::new("stats");

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:nft-bridge";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default page size for enumeration queries
pub const DEFAULT_LIMIT: u32 = 10;

/// Maximum page size for enumeration queries
pub const MAX_LIMIT: u32 = 30;
