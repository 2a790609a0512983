//! Message types for the NFT bridge contract
//!
//! The contract is an upgrade proxy: instantiate installs the first admin and
//! selects a logic implementation, proxy and role messages are handled by the
//! entry object, and all other execute messages are forwarded to the current
//! logic.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary};

use common::nft::NftReceiveMsg;

pub use crate::access::Role;
pub use crate::codec::EventSchema;
pub use crate::custody::LockRecord;
pub use crate::registry::BridgedCollection;

// ============================================================================
// Instantiate & Migrate
// ============================================================================

/// Logic implementations the proxy can forward to
#[cw_serde]
#[derive(Copy, Eq)]
pub enum LogicId {
    /// The bridge state machine
    Bridge,
    /// Rejects every forwarded call; used while operating on the bridge
    Maintenance,
}

impl LogicId {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicId::Bridge => "bridge",
            LogicId::Maintenance => "maintenance",
        }
    }
}

/// Instantiate message (proxy constructor)
#[cw_serde]
pub struct InstantiateMsg {
    /// Bootstrap admin
    pub admin: String,
    /// Initial logic implementation
    pub logic: LogicId,
    /// Initializer data for `logic`; when present the initializer runs
    /// in the same transaction
    pub data: Option<Binary>,
}

/// Initializer data of the bridge logic
#[cw_serde]
pub struct BridgeInitMsg {
    /// Proof verifier contract
    pub prover: String,
    /// Foreign-chain locker account
    pub remote_locker: String,
    /// Foreign-chain factory account
    pub remote_factory: String,
    /// Foreign-chain metadata logger account
    pub remote_metadata: String,
    /// Proofs from blocks below this height are refused
    pub min_block_acceptance_height: u64,
    /// Code id of the bridged NFT contract
    pub bridged_nft_code_id: u64,
    /// Bech32 prefix of local accounts (e.g. "terra")
    pub account_prefix: String,
    /// Optional relayer fee collector
    pub fee_collector: Option<String>,
    /// Restrict inbound finalization to whitelisted relayers
    pub restrict_relayers: bool,
}

/// Initializer data of the maintenance logic
#[cw_serde]
pub struct MaintenanceInitMsg {
    /// Reported to callers while maintenance is active
    pub reason: String,
}

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

// ============================================================================
// Execute Messages
// ============================================================================

#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Proxy (handled by the entry object)
    // ========================================================================
    /// Run the current logic's initializer (admin only, once per version)
    Initialize { data: Binary },

    /// Swap the logic implementation (admin only)
    UpgradeTo { logic: LogicId },

    /// Swap the logic implementation and run its initializer atomically
    /// (admin only)
    UpgradeToAndCall { logic: LogicId, data: Binary },

    /// Add an address to a role (admin only)
    GrantRole { role: Role, address: String },

    /// Remove an address from a role (admin only)
    RevokeRole { role: Role, address: String },

    // ========================================================================
    // Outbound
    // ========================================================================
    /// Lock a home token sent through the home collection's `SendNft`.
    /// The calling collection must hold the operator role.
    ReceiveNft(NftReceiveMsg),

    /// Lock approved home tokens. Attached funds are forwarded to the fee
    /// collector as the relayer fee.
    LockTokens {
        collection: String,
        token_ids: Vec<String>,
        remote_recipient: String,
    },

    /// Burn bridged tokens so the foreign chain releases the originals.
    /// Attached funds are forwarded to the fee collector.
    WithdrawTokens {
        collection_id: String,
        token_ids: Vec<String>,
        remote_recipient: String,
    },

    /// Publish a home collection's metadata so the foreign chain can prove
    /// it and update the collection's bridged copy.
    LogMetadata { collection: String },

    // ========================================================================
    // Inbound
    // ========================================================================
    /// Verify a foreign event proof and apply it exactly once
    FinalizeInbound {
        schema: EventSchema,
        proof: Binary,
        min_finality: u64,
    },

    // ========================================================================
    // Registry (admin only)
    // ========================================================================
    DeployCollection {
        collection_id: String,
        name: String,
        symbol: String,
        icon: Option<String>,
        base_uri: Option<String>,
    },

    UpdateCollectionMetadata {
        collection_id: String,
        name: String,
        symbol: String,
        icon: Option<String>,
        base_uri: Option<String>,
    },

    // ========================================================================
    // Admin Operations
    // ========================================================================
    SetWithdrawalsPaused { paused: bool },

    Pause {},

    Unpause {},

    UpdateConfig {
        prover: Option<String>,
        remote_locker: Option<String>,
        remote_factory: Option<String>,
        remote_metadata: Option<String>,
        min_block_acceptance_height: Option<u64>,
        bridged_nft_code_id: Option<u64>,
        fee_collector: Option<String>,
        restrict_relayers: Option<bool>,
    },
}

/// Payload of `ReceiveNft`
#[cw_serde]
pub enum ReceiveMsg {
    Lock { remote_recipient: String },
}

// ============================================================================
// Query Messages
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Returns the proxy state
    #[returns(ProxyResponse)]
    Proxy {},

    #[returns(HasRoleResponse)]
    HasRole { role: Role, address: String },

    #[returns(RoleMembersResponse)]
    RoleMembers {
        role: Role,
        start_after: Option<String>,
        limit: Option<u32>,
    },

    /// Returns bridge configuration
    #[returns(ConfigResponse)]
    Config {},

    /// Returns bridge statistics
    #[returns(StatsResponse)]
    Stats {},

    /// Returns a deployed collection
    #[returns(BridgedCollection)]
    Collection { collection_id: String },

    /// Returns deployed collections
    #[returns(CollectionsResponse)]
    Collections {
        start_after: Option<String>,
        limit: Option<u32>,
    },

    /// Whether a fingerprint has been consumed
    #[returns(ProofConsumedResponse)]
    ProofConsumed { fingerprint: Binary },

    /// Fingerprint a proof blob would consume
    #[returns(ProofFingerprintResponse)]
    ProofFingerprint { proof: Binary },

    /// Custody record of a home token
    #[returns(CustodyResponse)]
    Custody { collection: String, token_id: String },

    /// Home-token key of a home collection
    #[returns(HomeTokenResponse)]
    HomeToken { collection: String },
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct ProxyResponse {
    pub logic: LogicId,
    pub initialized: bool,
    pub version: u32,
    /// Number of addresses holding the admin role
    pub admins: u32,
}

#[cw_serde]
pub struct HasRoleResponse {
    pub has_role: bool,
}

#[cw_serde]
pub struct RoleMembersResponse {
    pub members: Vec<Addr>,
}

#[cw_serde]
pub struct ConfigResponse {
    pub prover: Addr,
    pub remote_locker: String,
    pub remote_factory: String,
    pub remote_metadata: String,
    pub min_block_acceptance_height: u64,
    pub bridged_nft_code_id: u64,
    pub account_prefix: String,
    pub fee_collector: Option<Addr>,
    pub restrict_relayers: bool,
    pub paused: bool,
    pub withdrawals_paused: bool,
}

#[cw_serde]
pub struct StatsResponse {
    pub total_locked: u64,
    pub total_unlocked: u64,
    pub total_minted: u64,
    pub total_burned: u64,
    pub total_metadata_updates: u64,
}

#[cw_serde]
pub struct CollectionsResponse {
    pub collections: Vec<BridgedCollection>,
}

#[cw_serde]
pub struct ProofConsumedResponse {
    pub consumed: bool,
    /// Block height of consumption
    pub consumed_at: Option<u64>,
}

#[cw_serde]
pub struct ProofFingerprintResponse {
    pub fingerprint: Binary,
}

#[cw_serde]
pub struct CustodyResponse {
    pub record: Option<LockRecord>,
}

#[cw_serde]
pub struct HomeTokenResponse {
    /// 20-byte key used by the foreign chain
    pub key: Binary,
    /// Whether the collection has been locked from or logged at least once
    pub registered: bool,
}
