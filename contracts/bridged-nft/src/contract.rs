use cosmwasm_std::{
    entry_point, to_json_binary, Addr, Binary, CosmosMsg, Deps, DepsMut, Env, MessageInfo,
    Response, StdResult, Storage, WasmMsg,
};
use cw2::set_contract_version;

use common::nft::{NftReceiveMsg, NftReceiverExecuteMsg};

use crate::error::ContractError;
use crate::msg::{
    BalanceResponse, CollectionInfoResponse, ExecuteMsg, InstantiateMsg, MigrateMsg,
    MinterResponse, NftInfoResponse, OwnerOfResponse, QueryMsg,
};
use crate::state::{
    CollectionInfo, TokenInfo, BALANCES, COLLECTION, CONTRACT_NAME, CONTRACT_VERSION, MINTER,
    TOKENS,
};

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let minter = deps.api.addr_validate(&msg.minter)?;
    MINTER.save(deps.storage, &minter)?;

    COLLECTION.save(
        deps.storage,
        &CollectionInfo {
            name: msg.name.clone(),
            symbol: msg.symbol.clone(),
            icon: msg.icon,
            base_uri: msg.base_uri,
            collection_id: msg.collection_id.clone(),
        },
    )?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("minter", minter)
        .add_attribute("collection_id", msg.collection_id)
        .add_attribute("name", msg.name)
        .add_attribute("symbol", msg.symbol))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::TransferNft {
            recipient,
            token_id,
        } => execute_transfer(deps, info, recipient, token_id),
        ExecuteMsg::SendNft {
            contract,
            token_id,
            msg,
        } => execute_send(deps, info, contract, token_id, msg),
        ExecuteMsg::Approve { spender, token_id } => execute_approve(deps, info, spender, token_id),
        ExecuteMsg::Revoke { spender, token_id } => execute_revoke(deps, info, spender, token_id),
        ExecuteMsg::Mint {
            token_id,
            owner,
            token_uri,
        } => execute_mint(deps, info, token_id, owner, token_uri),
        ExecuteMsg::Burn { token_id } => execute_burn(deps, info, token_id),
        ExecuteMsg::UpdateMetadata {
            name,
            symbol,
            icon,
            base_uri,
        } => execute_update_metadata(deps, info, name, symbol, icon, base_uri),
    }
}

// ============================================================================
// Holder operations
// ============================================================================

fn execute_transfer(
    deps: DepsMut,
    info: MessageInfo,
    recipient: String,
    token_id: String,
) -> Result<Response, ContractError> {
    let recipient = deps.api.addr_validate(&recipient)?;
    move_token(deps.storage, &info.sender, &recipient, &token_id)?;

    Ok(Response::new()
        .add_attribute("action", "transfer_nft")
        .add_attribute("sender", info.sender)
        .add_attribute("recipient", recipient)
        .add_attribute("token_id", token_id))
}

fn execute_send(
    deps: DepsMut,
    info: MessageInfo,
    contract: String,
    token_id: String,
    msg: Binary,
) -> Result<Response, ContractError> {
    let contract = deps.api.addr_validate(&contract)?;
    move_token(deps.storage, &info.sender, &contract, &token_id)?;

    let callback = CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: contract.to_string(),
        msg: to_json_binary(&NftReceiverExecuteMsg::ReceiveNft(NftReceiveMsg {
            sender: info.sender.to_string(),
            token_id: token_id.clone(),
            msg,
        }))?,
        funds: vec![],
    });

    Ok(Response::new()
        .add_message(callback)
        .add_attribute("action", "send_nft")
        .add_attribute("sender", info.sender)
        .add_attribute("recipient", contract)
        .add_attribute("token_id", token_id))
}

fn execute_approve(
    deps: DepsMut,
    info: MessageInfo,
    spender: String,
    token_id: String,
) -> Result<Response, ContractError> {
    let spender = deps.api.addr_validate(&spender)?;
    let mut token = load_token(deps.storage, &token_id)?;
    if token.owner != info.sender {
        return Err(ContractError::NotOwnerOrApproved { token_id });
    }

    if !token.approvals.contains(&spender) {
        token.approvals.push(spender.clone());
        TOKENS.save(deps.storage, &token_id, &token)?;
    }

    Ok(Response::new()
        .add_attribute("action", "approve")
        .add_attribute("owner", info.sender)
        .add_attribute("spender", spender)
        .add_attribute("token_id", token_id))
}

fn execute_revoke(
    deps: DepsMut,
    info: MessageInfo,
    spender: String,
    token_id: String,
) -> Result<Response, ContractError> {
    let spender = deps.api.addr_validate(&spender)?;
    let mut token = load_token(deps.storage, &token_id)?;
    if token.owner != info.sender {
        return Err(ContractError::NotOwnerOrApproved { token_id });
    }

    token.approvals.retain(|a| *a != spender);
    TOKENS.save(deps.storage, &token_id, &token)?;

    Ok(Response::new()
        .add_attribute("action", "revoke")
        .add_attribute("owner", info.sender)
        .add_attribute("spender", spender)
        .add_attribute("token_id", token_id))
}

// ============================================================================
// Minter operations
// ============================================================================

fn ensure_minter(storage: &dyn Storage, sender: &Addr) -> Result<(), ContractError> {
    let minter = MINTER.load(storage)?;
    if *sender != minter {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

fn execute_mint(
    deps: DepsMut,
    info: MessageInfo,
    token_id: String,
    owner: String,
    token_uri: Option<String>,
) -> Result<Response, ContractError> {
    ensure_minter(deps.storage, &info.sender)?;
    let owner = deps.api.addr_validate(&owner)?;

    if TOKENS.has(deps.storage, &token_id) {
        return Err(ContractError::TokenExists { token_id });
    }

    TOKENS.save(
        deps.storage,
        &token_id,
        &TokenInfo {
            owner: owner.clone(),
            approvals: vec![],
            token_uri,
        },
    )?;
    increment_balance(deps.storage, &owner)?;

    Ok(Response::new()
        .add_attribute("action", "mint")
        .add_attribute("owner", owner)
        .add_attribute("token_id", token_id))
}

fn execute_burn(
    deps: DepsMut,
    info: MessageInfo,
    token_id: String,
) -> Result<Response, ContractError> {
    ensure_minter(deps.storage, &info.sender)?;
    let token = load_token(deps.storage, &token_id)?;

    TOKENS.remove(deps.storage, &token_id);
    decrement_balance(deps.storage, &token.owner)?;

    Ok(Response::new()
        .add_attribute("action", "burn")
        .add_attribute("owner", token.owner)
        .add_attribute("token_id", token_id))
}

fn execute_update_metadata(
    deps: DepsMut,
    info: MessageInfo,
    name: String,
    symbol: String,
    icon: Option<String>,
    base_uri: Option<String>,
) -> Result<Response, ContractError> {
    ensure_minter(deps.storage, &info.sender)?;

    let mut collection = COLLECTION.load(deps.storage)?;
    collection.name = name;
    collection.symbol = symbol;
    collection.icon = icon;
    collection.base_uri = base_uri;
    COLLECTION.save(deps.storage, &collection)?;

    Ok(Response::new()
        .add_attribute("action", "update_metadata")
        .add_attribute("name", collection.name)
        .add_attribute("symbol", collection.symbol))
}

// ============================================================================
// Helpers
// ============================================================================

fn load_token(storage: &dyn Storage, token_id: &str) -> Result<TokenInfo, ContractError> {
    TOKENS
        .may_load(storage, token_id)?
        .ok_or_else(|| ContractError::TokenNotFound {
            token_id: token_id.to_string(),
        })
}

/// Move a token to `recipient` if `sender` owns it or is approved for it.
fn move_token(
    storage: &mut dyn Storage,
    sender: &Addr,
    recipient: &Addr,
    token_id: &str,
) -> Result<(), ContractError> {
    let mut token = load_token(storage, token_id)?;
    if token.owner != *sender && !token.approvals.contains(sender) {
        return Err(ContractError::NotOwnerOrApproved {
            token_id: token_id.to_string(),
        });
    }

    decrement_balance(storage, &token.owner)?;
    increment_balance(storage, recipient)?;

    token.owner = recipient.clone();
    token.approvals.clear();
    TOKENS.save(storage, token_id, &token)?;
    Ok(())
}

fn increment_balance(storage: &mut dyn Storage, owner: &Addr) -> StdResult<()> {
    let count = BALANCES.may_load(storage, owner)?.unwrap_or(0);
    BALANCES.save(storage, owner, &(count + 1))
}

fn decrement_balance(storage: &mut dyn Storage, owner: &Addr) -> StdResult<()> {
    let count = BALANCES.may_load(storage, owner)?.unwrap_or(0);
    if count <= 1 {
        BALANCES.remove(storage, owner);
        Ok(())
    } else {
        BALANCES.save(storage, owner, &(count - 1))
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::OwnerOf { token_id } => to_json_binary(&query_owner_of(deps, token_id)?),
        QueryMsg::NftInfo { token_id } => to_json_binary(&query_nft_info(deps, token_id)?),
        QueryMsg::Balance { owner } => to_json_binary(&query_balance(deps, owner)?),
        QueryMsg::CollectionInfo {} => to_json_binary(&query_collection_info(deps)?),
        QueryMsg::Minter {} => to_json_binary(&MinterResponse {
            minter: MINTER.load(deps.storage)?,
        }),
    }
}

fn query_owner_of(deps: Deps, token_id: String) -> StdResult<OwnerOfResponse> {
    let token = TOKENS.load(deps.storage, &token_id)?;
    Ok(OwnerOfResponse {
        owner: token.owner,
        approvals: token.approvals,
    })
}

fn query_nft_info(deps: Deps, token_id: String) -> StdResult<NftInfoResponse> {
    let token = TOKENS.load(deps.storage, &token_id)?;
    Ok(NftInfoResponse {
        token_uri: token.token_uri,
    })
}

fn query_balance(deps: Deps, owner: String) -> StdResult<BalanceResponse> {
    let owner = deps.api.addr_validate(&owner)?;
    let count = BALANCES.may_load(deps.storage, &owner)?.unwrap_or(0);
    Ok(BalanceResponse { count })
}

fn query_collection_info(deps: Deps) -> StdResult<CollectionInfoResponse> {
    let collection = COLLECTION.load(deps.storage)?;
    Ok(CollectionInfoResponse {
        name: collection.name,
        symbol: collection.symbol,
        icon: collection.icon,
        base_uri: collection.base_uri,
        collection_id: collection.collection_id,
    })
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
