//! Bridged collection factory.
//!
//! Each foreign collection gets one bridged NFT contract, instantiated with
//! the bridge as its minter. The registry record is written when the
//! instantiate reply arrives, so a failed instantiation leaves no record.

use cosmwasm_std::{
    to_json_binary, CosmosMsg, DepsMut, Env, MessageInfo, Reply, Response, StdError, SubMsg,
    WasmMsg,
};

use common::nft::{BridgedNftInstantiateMsg, NftExecuteMsg};

use super::load_config;
use crate::access;
use crate::error::ContractError;
use crate::registry::{self, PendingDeployment};
use crate::state::STATS;

/// Reply id of the bridged NFT instantiation
pub const DEPLOY_REPLY_ID: u64 = 1;

/// Deploy the bridged contract for `collection_id` (admin only).
#[allow(clippy::too_many_arguments)]
pub fn execute_deploy_collection(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    collection_id: String,
    name: String,
    symbol: String,
    icon: Option<String>,
    base_uri: Option<String>,
) -> Result<Response, ContractError> {
    let config = load_config(deps.storage)?;
    access::ensure_admin(deps.storage, &info.sender)?;

    if config.paused {
        return Err(ContractError::BridgePaused);
    }

    let pending = PendingDeployment {
        collection_id,
        name,
        symbol,
        icon,
        base_uri,
    };
    registry::begin_deployment(deps.storage, &pending)?;

    let instantiate = WasmMsg::Instantiate {
        admin: Some(env.contract.address.to_string()),
        code_id: config.bridged_nft_code_id,
        msg: to_json_binary(&BridgedNftInstantiateMsg {
            name: pending.name,
            symbol: pending.symbol,
            icon: pending.icon,
            base_uri: pending.base_uri,
            collection_id: pending.collection_id.clone(),
            minter: env.contract.address.to_string(),
        })?,
        funds: vec![],
        label: format!("bridged-nft {}", pending.collection_id),
    };

    Ok(Response::new()
        .add_submessage(SubMsg::reply_on_success(instantiate, DEPLOY_REPLY_ID))
        .add_attribute("method", "deploy_collection")
        .add_attribute("sender", info.sender)
        .add_attribute("collection_id", pending.collection_id)
        .add_attribute("code_id", config.bridged_nft_code_id.to_string()))
}

/// Record the deployed contract address.
pub fn handle_deploy_reply(
    deps: DepsMut,
    env: Env,
    reply: Reply,
) -> Result<Response, ContractError> {
    let res = reply.result.into_result().map_err(StdError::generic_err)?;

    let address = res
        .events
        .iter()
        .filter(|event| event.ty == "instantiate")
        .flat_map(|event| event.attributes.iter())
        .find(|attr| attr.key == "_contract_address")
        .map(|attr| attr.value.clone())
        .ok_or(ContractError::DeploymentAddressMissing)?;
    let contract = deps.api.addr_validate(&address)?;

    let record = registry::complete_deployment(deps.storage, contract, env.block.height)?;

    Ok(Response::new()
        .add_attribute("method", "deploy_collection_reply")
        .add_attribute("collection_id", record.collection_id)
        .add_attribute("contract", record.contract))
}

/// Replace a bridged collection's metadata (admin only).
#[allow(clippy::too_many_arguments)]
pub fn execute_update_collection_metadata(
    deps: DepsMut,
    info: MessageInfo,
    collection_id: String,
    name: String,
    symbol: String,
    icon: Option<String>,
    base_uri: Option<String>,
) -> Result<Response, ContractError> {
    load_config(deps.storage)?;
    access::ensure_admin(deps.storage, &info.sender)?;

    let record =
        registry::update_metadata(deps.storage, &collection_id, name, symbol, icon, base_uri)?;

    let update = CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: record.contract.to_string(),
        msg: to_json_binary(&NftExecuteMsg::UpdateMetadata {
            name: record.name.clone(),
            symbol: record.symbol.clone(),
            icon: record.icon.clone(),
            base_uri: record.base_uri.clone(),
        })?,
        funds: vec![],
    });

    let mut stats = STATS.load(deps.storage)?;
    stats.total_metadata_updates += 1;
    STATS.save(deps.storage, &stats)?;

    Ok(Response::new()
        .add_message(update)
        .add_attribute("method", "update_collection_metadata")
        .add_attribute("sender", info.sender)
        .add_attribute("collection_id", record.collection_id)
        .add_attribute("contract", record.contract))
}
