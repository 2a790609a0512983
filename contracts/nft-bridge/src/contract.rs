//! NFT Bridge Contract - Entry Points
//!
//! The entry object is an upgrade proxy. Proxy and role messages are handled
//! here; every other execute message is forwarded to the current logic.
//! The implementation is modularized into:
//! - `proxy` / `logic` - upgradeable dispatch
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdResult,
};
use cw2::set_contract_version;

use crate::access;
use crate::error::ContractError;
use crate::execute::{
    execute_grant_role, execute_revoke_role, handle_deploy_reply, DEPLOY_REPLY_ID,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::proxy;
use crate::query::{
    query_collection, query_collections, query_config, query_custody, query_has_role,
    query_home_token, query_proof_consumed, query_proof_fingerprint, query_proxy,
    query_role_members, query_stats,
};
use crate::state::{CONTRACT_NAME, CONTRACT_VERSION};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let admin = deps.api.addr_validate(&msg.admin)?;
    access::bootstrap(deps.storage, &admin)?;

    let state = proxy::install(deps.storage, msg.logic)?;

    let res = Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("admin", admin)
        .add_attribute("logic", msg.logic.as_str())
        .add_attribute("version", state.version.to_string());

    match msg.data {
        Some(data) => {
            let init = proxy::run_initializer(deps, &env, &data)?;
            Ok(proxy::merge(res, init))
        }
        None => Ok(res),
    }
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Proxy
        ExecuteMsg::Initialize { data } => proxy::execute_initialize(deps, env, info, data),
        ExecuteMsg::UpgradeTo { logic } => proxy::execute_upgrade_to(deps, info, logic),
        ExecuteMsg::UpgradeToAndCall { logic, data } => {
            proxy::execute_upgrade_to_and_call(deps, env, info, logic, data)
        }

        // Roles
        ExecuteMsg::GrantRole { role, address } => execute_grant_role(deps, info, role, address),
        ExecuteMsg::RevokeRole { role, address } => {
            execute_revoke_role(deps, info, role, address)
        }

        msg => proxy::forward(deps, env, info, msg),
    }
}

// ============================================================================
// Reply
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, env: Env, reply: Reply) -> Result<Response, ContractError> {
    match reply.id {
        DEPLOY_REPLY_ID => handle_deploy_reply(deps, env, reply),
        id => Err(ContractError::UnknownReplyId { id }),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Proxy {} => to_json_binary(&query_proxy(deps)?),
        QueryMsg::HasRole { role, address } => {
            to_json_binary(&query_has_role(deps, role, address)?)
        }
        QueryMsg::RoleMembers {
            role,
            start_after,
            limit,
        } => to_json_binary(&query_role_members(deps, role, start_after, limit)?),
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Stats {} => to_json_binary(&query_stats(deps)?),
        QueryMsg::Collection { collection_id } => {
            to_json_binary(&query_collection(deps, collection_id)?)
        }
        QueryMsg::Collections { start_after, limit } => {
            to_json_binary(&query_collections(deps, start_after, limit)?)
        }
        QueryMsg::ProofConsumed { fingerprint } => {
            to_json_binary(&query_proof_consumed(deps, fingerprint)?)
        }
        QueryMsg::ProofFingerprint { proof } => to_json_binary(&query_proof_fingerprint(proof)?),
        QueryMsg::Custody {
            collection,
            token_id,
        } => to_json_binary(&query_custody(deps, collection, token_id)?),
        QueryMsg::HomeToken { collection } => {
            to_json_binary(&query_home_token(deps, collection)?)
        }
    }
}

// ============================================================================
// Migrate
// ============================================================================

/// Chain-level code migration. Logic swaps go through `UpgradeTo`; this only
/// refreshes the cw2 version.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
