//! Upgrade proxy
//!
//! The contract address and storage are stable; the behaviour behind them is
//! selected by a [`LogicId`]. Execute messages the entry object does not
//! handle itself are forwarded to the current [`Logic`].
//!
//! Each logic version has its own initialized flag. An upgrade bumps the
//! version and clears the flag, so the new logic's initializer may run once.
//! The flag is checked and set here, before the initializer runs, so a logic
//! implementation cannot forget the guard.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Binary, DepsMut, Env, MessageInfo, Response, StdResult, Storage};
use cw_storage_plus::Item;

use crate::access;
use crate::error::ContractError;
use crate::logic::{BridgeLogic, MaintenanceLogic};
use crate::msg::{ExecuteMsg, LogicId};

#[cw_serde]
pub struct ProxyState {
    /// Logic implementation calls are forwarded to
    pub logic: LogicId,
    /// Whether the current version's initializer has run
    pub initialized: bool,
    /// Incremented on every upgrade, starting at 1
    pub version: u32,
}

const PROXY: Item<ProxyState> = Item::new("proxy");

/// Behaviour the proxy can forward to
pub trait Logic {
    /// One-time setup of this logic version
    fn initialize(&self, deps: DepsMut, env: &Env, data: &Binary)
        -> Result<Response, ContractError>;

    /// Handle a forwarded execute message
    fn execute(
        &self,
        deps: DepsMut,
        env: Env,
        info: MessageInfo,
        msg: ExecuteMsg,
    ) -> Result<Response, ContractError>;
}

pub fn resolve(logic: LogicId) -> &'static dyn Logic {
    match logic {
        LogicId::Bridge => &BridgeLogic,
        LogicId::Maintenance => &MaintenanceLogic,
    }
}

/// Install the first logic version. Called once by instantiate.
pub fn install(storage: &mut dyn Storage, logic: LogicId) -> StdResult<ProxyState> {
    let state = ProxyState {
        logic,
        initialized: false,
        version: 1,
    };
    PROXY.save(storage, &state)?;
    Ok(state)
}

pub fn load(storage: &dyn Storage) -> StdResult<ProxyState> {
    PROXY.load(storage)
}

/// Run the current logic's initializer once per version.
pub fn run_initializer(
    deps: DepsMut,
    env: &Env,
    data: &Binary,
) -> Result<Response, ContractError> {
    let mut state = PROXY.load(deps.storage)?;
    if state.initialized {
        return Err(ContractError::AlreadyInitialized {
            version: state.version,
        });
    }
    state.initialized = true;
    PROXY.save(deps.storage, &state)?;

    resolve(state.logic).initialize(deps, env, data)
}

/// Forward an execute message to the current logic.
pub fn forward(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    let state = PROXY.load(deps.storage)?;
    resolve(state.logic).execute(deps, env, info, msg)
}

fn swap(storage: &mut dyn Storage, logic: LogicId) -> StdResult<ProxyState> {
    let mut state = PROXY.load(storage)?;
    state.logic = logic;
    state.initialized = false;
    state.version += 1;
    PROXY.save(storage, &state)?;
    Ok(state)
}

/// Append the messages and attributes of `inner` to `outer`.
pub fn merge(outer: Response, inner: Response) -> Response {
    outer
        .add_submessages(inner.messages)
        .add_attributes(inner.attributes)
        .add_events(inner.events)
}

// ============================================================================
// Entry handlers
// ============================================================================

pub fn execute_initialize(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    data: Binary,
) -> Result<Response, ContractError> {
    access::ensure_admin(deps.storage, &info.sender)?;

    let version = PROXY.load(deps.storage)?.version;
    let res = run_initializer(deps, &env, &data)?;

    Ok(merge(
        Response::new()
            .add_attribute("method", "initialize")
            .add_attribute("sender", info.sender)
            .add_attribute("version", version.to_string()),
        res,
    ))
}

pub fn execute_upgrade_to(
    deps: DepsMut,
    info: MessageInfo,
    logic: LogicId,
) -> Result<Response, ContractError> {
    access::ensure_admin(deps.storage, &info.sender)?;

    let state = swap(deps.storage, logic)?;

    Ok(Response::new()
        .add_attribute("method", "upgrade_to")
        .add_attribute("sender", info.sender)
        .add_attribute("logic", logic.as_str())
        .add_attribute("version", state.version.to_string()))
}

/// Swap and initialize in one transaction; a failing initializer reverts the
/// swap as well.
pub fn execute_upgrade_to_and_call(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    logic: LogicId,
    data: Binary,
) -> Result<Response, ContractError> {
    access::ensure_admin(deps.storage, &info.sender)?;

    let state = swap(deps.storage, logic)?;
    let res = run_initializer(deps, &env, &data)?;

    Ok(merge(
        Response::new()
            .add_attribute("method", "upgrade_to_and_call")
            .add_attribute("sender", info.sender)
            .add_attribute("logic", logic.as_str())
            .add_attribute("version", state.version.to_string()),
        res,
    ))
}
