//! Outgoing transfer handlers (lock and withdraw).
//!
//! Home tokens leave by being locked into custody; the foreign chain mints
//! their bridged copies once it sees the lock. Bridged tokens leave by being
//! burned; the foreign chain releases the originals. Home collection metadata
//! is published with `LogMetadata` for the foreign chain to mirror.

use cosmwasm_std::{
    from_json, to_json_binary, Addr, CosmosMsg, DepsMut, Env, MessageInfo, Response, Storage,
    WasmMsg,
};

use common::nft::{
    CollectionInfoResponse, NftExecuteMsg, NftQueryMsg, NftReceiveMsg, OwnerOfResponse,
};

use super::{canonical_token_id, collect_fee, load_config, validate_remote_recipient};
use crate::access::{self, Role};
use crate::codec::ADDRESS_LEN;
use crate::custody::{self, LockRecord};
use crate::error::ContractError;
use crate::hash::bytes_to_hex;
use crate::msg::ReceiveMsg;
use crate::registry;
use crate::state::STATS;

/// Register the home token and move `token_id` into custody.
fn lock_in_custody(
    storage: &mut dyn Storage,
    env: &Env,
    collection: &Addr,
    owner: &Addr,
    token_id: &str,
    remote_recipient: &str,
) -> Result<[u8; ADDRESS_LEN], ContractError> {
    let key = custody::register_home_token(storage, collection)?;
    custody::lock(
        storage,
        collection,
        token_id,
        &LockRecord {
            owner: owner.clone(),
            remote_recipient: remote_recipient.to_string(),
            locked_at: env.block.height,
        },
    )?;
    Ok(key)
}

fn ensure_home_collection(storage: &dyn Storage, collection: &Addr) -> Result<(), ContractError> {
    if registry::collection_of(storage, collection)?.is_some() {
        return Err(ContractError::CannotLockBridgedToken);
    }
    Ok(())
}

/// Lock a token the home collection has already transferred to the bridge.
///
/// Called by the collection from `SendNft`; the collection must hold the
/// operator role.
pub fn execute_receive_nft(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    receive_msg: NftReceiveMsg,
) -> Result<Response, ContractError> {
    let config = load_config(deps.storage)?;

    if config.paused {
        return Err(ContractError::BridgePaused);
    }

    let collection = info.sender;
    access::ensure_role(deps.storage, Role::Operator, &collection)?;
    ensure_home_collection(deps.storage, &collection)?;

    let owner = deps.api.addr_validate(&receive_msg.sender)?;
    let token_id = receive_msg.token_id;
    canonical_token_id(&token_id)?;

    let ReceiveMsg::Lock { remote_recipient } = from_json(&receive_msg.msg)?;
    validate_remote_recipient(&remote_recipient)?;

    let key = lock_in_custody(
        deps.storage,
        &env,
        &collection,
        &owner,
        &token_id,
        &remote_recipient,
    )?;

    let mut stats = STATS.load(deps.storage)?;
    stats.total_locked += 1;
    STATS.save(deps.storage, &stats)?;

    Ok(Response::new()
        .add_attribute("method", "lock")
        .add_attribute("collection", collection)
        .add_attribute("home_token", bytes_to_hex(&key))
        .add_attribute("sender", owner)
        .add_attribute("token_ids", token_id)
        .add_attribute("remote_recipient", remote_recipient))
}

/// Lock home tokens the bridge has been approved to transfer.
pub fn execute_lock_tokens(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    collection: String,
    token_ids: Vec<String>,
    remote_recipient: String,
) -> Result<Response, ContractError> {
    let config = load_config(deps.storage)?;

    if config.paused {
        return Err(ContractError::BridgePaused);
    }

    if token_ids.is_empty() {
        return Err(ContractError::EmptyTokenIds);
    }

    let collection = deps.api.addr_validate(&collection)?;
    ensure_home_collection(deps.storage, &collection)?;
    validate_remote_recipient(&remote_recipient)?;

    let (fee_msg, fee) = collect_fee(&config, &info)?;

    let mut messages: Vec<CosmosMsg> = Vec::with_capacity(token_ids.len() + 1);
    let mut key = [0u8; ADDRESS_LEN];
    for token_id in &token_ids {
        canonical_token_id(token_id)?;

        let owner: OwnerOfResponse = deps.querier.query_wasm_smart(
            &collection,
            &NftQueryMsg::OwnerOf {
                token_id: token_id.clone(),
            },
        )?;
        if owner.owner != info.sender {
            return Err(ContractError::NotTokenOwner {
                token_id: token_id.clone(),
            });
        }

        key = lock_in_custody(
            deps.storage,
            &env,
            &collection,
            &info.sender,
            token_id,
            &remote_recipient,
        )?;

        messages.push(CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: collection.to_string(),
            msg: to_json_binary(&NftExecuteMsg::TransferNft {
                recipient: env.contract.address.to_string(),
                token_id: token_id.clone(),
            })?,
            funds: vec![],
        }));
    }
    messages.extend(fee_msg);

    let mut stats = STATS.load(deps.storage)?;
    stats.total_locked += token_ids.len() as u64;
    STATS.save(deps.storage, &stats)?;

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("method", "lock")
        .add_attribute("collection", collection)
        .add_attribute("home_token", bytes_to_hex(&key))
        .add_attribute("sender", info.sender)
        .add_attribute("token_ids", token_ids.join(","))
        .add_attribute("remote_recipient", remote_recipient)
        .add_attribute("fee", fee))
}

/// Burn bridged tokens for release on the foreign chain.
pub fn execute_withdraw_tokens(
    deps: DepsMut,
    info: MessageInfo,
    collection_id: String,
    token_ids: Vec<String>,
    remote_recipient: String,
) -> Result<Response, ContractError> {
    let config = load_config(deps.storage)?;

    if config.paused {
        return Err(ContractError::BridgePaused);
    }
    if config.withdrawals_paused {
        return Err(ContractError::WithdrawalsPaused);
    }

    if token_ids.is_empty() {
        return Err(ContractError::EmptyTokenIds);
    }

    let record = registry::load(deps.storage, &collection_id)?;
    validate_remote_recipient(&remote_recipient)?;

    let (fee_msg, fee) = collect_fee(&config, &info)?;

    let mut messages: Vec<CosmosMsg> = Vec::with_capacity(token_ids.len() + 1);
    for token_id in &token_ids {
        canonical_token_id(token_id)?;

        let owner: OwnerOfResponse = deps.querier.query_wasm_smart(
            &record.contract,
            &NftQueryMsg::OwnerOf {
                token_id: token_id.clone(),
            },
        )?;
        if owner.owner != info.sender {
            return Err(ContractError::NotTokenOwner {
                token_id: token_id.clone(),
            });
        }

        messages.push(CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: record.contract.to_string(),
            msg: to_json_binary(&NftExecuteMsg::Burn {
                token_id: token_id.clone(),
            })?,
            funds: vec![],
        }));
    }
    messages.extend(fee_msg);

    let mut stats = STATS.load(deps.storage)?;
    stats.total_burned += token_ids.len() as u64;
    STATS.save(deps.storage, &stats)?;

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("method", "withdraw")
        .add_attribute("collection_id", collection_id)
        .add_attribute("contract", record.contract)
        .add_attribute("sender", info.sender)
        .add_attribute("token_ids", token_ids.join(","))
        .add_attribute("remote_recipient", remote_recipient)
        .add_attribute("fee", fee))
}

/// Publish the current metadata of a home collection.
///
/// The attributes are the record the foreign chain proves to update the
/// bridged copy; anyone may emit it.
pub fn execute_log_metadata(
    deps: DepsMut,
    info: MessageInfo,
    collection: String,
) -> Result<Response, ContractError> {
    let config = load_config(deps.storage)?;

    if config.paused {
        return Err(ContractError::BridgePaused);
    }

    let collection = deps.api.addr_validate(&collection)?;
    ensure_home_collection(deps.storage, &collection)?;

    let info_res: CollectionInfoResponse = deps
        .querier
        .query_wasm_smart(&collection, &NftQueryMsg::CollectionInfo {})?;
    let key = custody::register_home_token(deps.storage, &collection)?;

    Ok(Response::new()
        .add_attribute("method", "log_metadata")
        .add_attribute("collection", collection)
        .add_attribute("home_token", bytes_to_hex(&key))
        .add_attribute("name", info_res.name)
        .add_attribute("symbol", info_res.symbol)
        .add_attribute("icon", info_res.icon.unwrap_or_default())
        .add_attribute("base_uri", info_res.base_uri.unwrap_or_default())
        .add_attribute("sender", info.sender))
}
