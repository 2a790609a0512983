//! Admin operations handlers.
//!
//! This module handles:
//! - Pause/unpause of the whole bridge
//! - Pausing inbound and outbound withdrawals only
//! - Configuration updates

use cosmwasm_std::{DepsMut, MessageInfo, Response};

use super::load_config;
use crate::access;
use crate::address_codec::is_valid_remote_account;
use crate::error::ContractError;
use crate::state::CONFIG;

// ============================================================================
// Pause/Unpause
// ============================================================================

/// Pause the bridge (stops locks, withdrawals, finalization and deployments).
pub fn execute_pause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let mut config = load_config(deps.storage)?;
    access::ensure_admin(deps.storage, &info.sender)?;

    config.paused = true;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "pause")
        .add_attribute("sender", info.sender))
}

/// Unpause the bridge.
pub fn execute_unpause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let mut config = load_config(deps.storage)?;
    access::ensure_admin(deps.storage, &info.sender)?;

    config.paused = false;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "unpause")
        .add_attribute("sender", info.sender))
}

pub fn execute_set_withdrawals_paused(
    deps: DepsMut,
    info: MessageInfo,
    paused: bool,
) -> Result<Response, ContractError> {
    let mut config = load_config(deps.storage)?;
    access::ensure_admin(deps.storage, &info.sender)?;

    config.withdrawals_paused = paused;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_withdrawals_paused")
        .add_attribute("sender", info.sender)
        .add_attribute("paused", paused.to_string()))
}

// ============================================================================
// Configuration
// ============================================================================

fn validated_account(account: String) -> Result<String, ContractError> {
    if !is_valid_remote_account(&account) {
        return Err(ContractError::InvalidRemoteAccount { account });
    }
    Ok(account)
}

/// Update bridge configuration. An empty `fee_collector` clears it.
#[allow(clippy::too_many_arguments)]
pub fn execute_update_config(
    deps: DepsMut,
    info: MessageInfo,
    prover: Option<String>,
    remote_locker: Option<String>,
    remote_factory: Option<String>,
    remote_metadata: Option<String>,
    min_block_acceptance_height: Option<u64>,
    bridged_nft_code_id: Option<u64>,
    fee_collector: Option<String>,
    restrict_relayers: Option<bool>,
) -> Result<Response, ContractError> {
    let mut config = load_config(deps.storage)?;
    access::ensure_admin(deps.storage, &info.sender)?;

    if let Some(prover) = prover {
        config.prover = deps.api.addr_validate(&prover)?;
    }
    if let Some(account) = remote_locker {
        config.remote_locker = validated_account(account)?;
    }
    if let Some(account) = remote_factory {
        config.remote_factory = validated_account(account)?;
    }
    if let Some(account) = remote_metadata {
        config.remote_metadata = validated_account(account)?;
    }
    if let Some(height) = min_block_acceptance_height {
        config.min_block_acceptance_height = height;
    }
    if let Some(code_id) = bridged_nft_code_id {
        config.bridged_nft_code_id = code_id;
    }
    if let Some(collector) = fee_collector {
        config.fee_collector = if collector.is_empty() {
            None
        } else {
            Some(deps.api.addr_validate(&collector)?)
        };
    }
    if let Some(restrict) = restrict_relayers {
        config.restrict_relayers = restrict;
    }

    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "update_config")
        .add_attribute("sender", info.sender)
        .add_attribute("prover", config.prover)
        .add_attribute(
            "min_block_acceptance_height",
            config.min_block_acceptance_height.to_string(),
        )
        .add_attribute("restrict_relayers", config.restrict_relayers.to_string()))
}
