//! Query handlers for the NFT bridge contract.

use cosmwasm_std::{Binary, Deps, StdError, StdResult};

use crate::access::{self, Role};
use crate::codec::ProofEnvelope;
use crate::custody;
use crate::hash::{envelope_fingerprint, home_token_key};
use crate::msg::{
    BridgedCollection, CollectionsResponse, ConfigResponse, CustodyResponse, HasRoleResponse,
    HomeTokenResponse, ProofConsumedResponse, ProofFingerprintResponse, ProxyResponse,
    RoleMembersResponse, StatsResponse,
};
use crate::proxy;
use crate::registry;
use crate::replay;
use crate::state::{CONFIG, DEFAULT_LIMIT, MAX_LIMIT, STATS};

fn page_limit(limit: Option<u32>) -> usize {
    limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize
}

// ============================================================================
// Proxy & Roles
// ============================================================================

pub fn query_proxy(deps: Deps) -> StdResult<ProxyResponse> {
    let state = proxy::load(deps.storage)?;
    Ok(ProxyResponse {
        logic: state.logic,
        initialized: state.initialized,
        version: state.version,
        admins: access::admin_count(deps.storage)?,
    })
}

pub fn query_has_role(deps: Deps, role: Role, address: String) -> StdResult<HasRoleResponse> {
    let addr = deps.api.addr_validate(&address)?;
    Ok(HasRoleResponse {
        has_role: access::has_role(deps.storage, role, &addr)?,
    })
}

pub fn query_role_members(
    deps: Deps,
    role: Role,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<RoleMembersResponse> {
    let start = start_after
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;
    let members = access::members(deps.storage, role, start.as_ref(), page_limit(limit))?;
    Ok(RoleMembersResponse { members })
}

// ============================================================================
// Core Queries
// ============================================================================

/// Query bridge configuration.
pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        prover: config.prover,
        remote_locker: config.remote_locker,
        remote_factory: config.remote_factory,
        remote_metadata: config.remote_metadata,
        min_block_acceptance_height: config.min_block_acceptance_height,
        bridged_nft_code_id: config.bridged_nft_code_id,
        account_prefix: config.account_prefix,
        fee_collector: config.fee_collector,
        restrict_relayers: config.restrict_relayers,
        paused: config.paused,
        withdrawals_paused: config.withdrawals_paused,
    })
}

/// Query bridge statistics.
pub fn query_stats(deps: Deps) -> StdResult<StatsResponse> {
    let stats = STATS.may_load(deps.storage)?.unwrap_or_default();
    Ok(StatsResponse {
        total_locked: stats.total_locked,
        total_unlocked: stats.total_unlocked,
        total_minted: stats.total_minted,
        total_burned: stats.total_burned,
        total_metadata_updates: stats.total_metadata_updates,
    })
}

// ============================================================================
// Registry
// ============================================================================

pub fn query_collection(deps: Deps, collection_id: String) -> StdResult<BridgedCollection> {
    registry::load(deps.storage, &collection_id).map_err(|e| StdError::generic_err(e.to_string()))
}

pub fn query_collections(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<CollectionsResponse> {
    let collections = registry::range(deps.storage, start_after.as_deref(), page_limit(limit))?;
    Ok(CollectionsResponse { collections })
}

// ============================================================================
// Proofs
// ============================================================================

pub fn query_proof_consumed(deps: Deps, fingerprint: Binary) -> StdResult<ProofConsumedResponse> {
    let consumed_at = replay::consumed_at(deps.storage, fingerprint.as_slice())?;
    Ok(ProofConsumedResponse {
        consumed: consumed_at.is_some(),
        consumed_at,
    })
}

/// Fingerprint a proof blob would consume, without verifying it.
pub fn query_proof_fingerprint(proof: Binary) -> StdResult<ProofFingerprintResponse> {
    let envelope = ProofEnvelope::decode(proof.as_slice())
        .map_err(|e| StdError::generic_err(format!("Decode error: {}", e)))?;
    Ok(ProofFingerprintResponse {
        fingerprint: Binary::from(envelope_fingerprint(&envelope).to_vec()),
    })
}

// ============================================================================
// Custody
// ============================================================================

pub fn query_custody(deps: Deps, collection: String, token_id: String) -> StdResult<CustodyResponse> {
    let collection = deps.api.addr_validate(&collection)?;
    Ok(CustodyResponse {
        record: custody::load_lock(deps.storage, &collection, &token_id)?,
    })
}

pub fn query_home_token(deps: Deps, collection: String) -> StdResult<HomeTokenResponse> {
    let collection = deps.api.addr_validate(&collection)?;
    let key = home_token_key(&collection);
    Ok(HomeTokenResponse {
        registered: custody::home_token(deps.storage, &key)?.is_some(),
        key: Binary::from(key.to_vec()),
    })
}
