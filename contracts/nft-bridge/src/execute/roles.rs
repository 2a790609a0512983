//! Role grants and revocations.

use cosmwasm_std::{DepsMut, MessageInfo, Response};

use crate::access::{self, Role};
use crate::error::ContractError;

/// Add `address` to `role` (admin only). Granting an existing member is a
/// no-op reported through the `changed` attribute.
pub fn execute_grant_role(
    deps: DepsMut,
    info: MessageInfo,
    role: Role,
    address: String,
) -> Result<Response, ContractError> {
    access::ensure_admin(deps.storage, &info.sender)?;

    let addr = deps.api.addr_validate(&address)?;
    let changed = access::grant(deps.storage, role, &addr)?;

    Ok(Response::new()
        .add_attribute("method", "grant_role")
        .add_attribute("sender", info.sender)
        .add_attribute("role", role.as_str())
        .add_attribute("address", addr)
        .add_attribute("changed", changed.to_string()))
}

/// Remove `address` from `role` (admin only). The last admin cannot be
/// removed.
pub fn execute_revoke_role(
    deps: DepsMut,
    info: MessageInfo,
    role: Role,
    address: String,
) -> Result<Response, ContractError> {
    access::ensure_admin(deps.storage, &info.sender)?;

    let addr = deps.api.addr_validate(&address)?;
    let changed = access::revoke(deps.storage, role, &addr)?;

    Ok(Response::new()
        .add_attribute("method", "revoke_role")
        .add_attribute("sender", info.sender)
        .add_attribute("role", role.as_str())
        .add_attribute("address", addr)
        .add_attribute("changed", changed.to_string()))
}
