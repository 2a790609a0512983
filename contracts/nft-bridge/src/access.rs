//! Role-based access control
//!
//! Three role sets gate the bridge:
//! - `Admin` manages roles, upgrades, deployments, pausing and config
//! - `Whitelist` marks trusted relayers allowed to finalize inbound proofs
//!   when relayer restriction is enabled
//! - `Operator` marks home collections allowed to call the bridge directly
//!   (send-and-call locking)
//!
//! The role map is private to this module. The admin count is maintained
//! alongside it so the last admin can never be removed.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Order, StdResult, Storage};
use cw_storage_plus::{Bound, Item, Map};

use crate::error::ContractError;

#[cw_serde]
#[derive(Copy, Eq)]
pub enum Role {
    Admin,
    Whitelist,
    Operator,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Whitelist => "whitelist",
            Role::Operator => "operator",
        }
    }
}

/// (role, address) => member
const ROLES: Map<(&str, &Addr), bool> = Map::new("roles");

/// Number of addresses holding the admin role
const ADMIN_COUNT: Item<u32> = Item::new("admin_count");

/// Install the first admin. Called once by the proxy constructor.
pub fn bootstrap(storage: &mut dyn Storage, admin: &Addr) -> StdResult<()> {
    ROLES.save(storage, (Role::Admin.as_str(), admin), &true)?;
    ADMIN_COUNT.save(storage, &1)
}

pub fn has_role(storage: &dyn Storage, role: Role, addr: &Addr) -> StdResult<bool> {
    Ok(ROLES
        .may_load(storage, (role.as_str(), addr))?
        .unwrap_or(false))
}

pub fn ensure_role(storage: &dyn Storage, role: Role, addr: &Addr) -> Result<(), ContractError> {
    if !has_role(storage, role, addr)? {
        return Err(ContractError::unauthorized(role.as_str()));
    }
    Ok(())
}

pub fn ensure_admin(storage: &dyn Storage, addr: &Addr) -> Result<(), ContractError> {
    ensure_role(storage, Role::Admin, addr)
}

/// Add `addr` to `role`. Returns false if it was already a member.
pub fn grant(storage: &mut dyn Storage, role: Role, addr: &Addr) -> StdResult<bool> {
    if has_role(storage, role, addr)? {
        return Ok(false);
    }
    ROLES.save(storage, (role.as_str(), addr), &true)?;
    if role == Role::Admin {
        let count = ADMIN_COUNT.load(storage)?;
        ADMIN_COUNT.save(storage, &(count + 1))?;
    }
    Ok(true)
}

/// Remove `addr` from `role`. Returns false if it was not a member.
pub fn revoke(storage: &mut dyn Storage, role: Role, addr: &Addr) -> Result<bool, ContractError> {
    if !has_role(storage, role, addr)? {
        return Ok(false);
    }
    if role == Role::Admin {
        let count = ADMIN_COUNT.load(storage)?;
        if count <= 1 {
            return Err(ContractError::CannotRemoveLastAdmin);
        }
        ADMIN_COUNT.save(storage, &(count - 1))?;
    }
    ROLES.remove(storage, (role.as_str(), addr));
    Ok(true)
}

pub fn admin_count(storage: &dyn Storage) -> StdResult<u32> {
    ADMIN_COUNT.load(storage)
}

/// Members of `role` in address order, paginated
pub fn members(
    storage: &dyn Storage,
    role: Role,
    start_after: Option<&Addr>,
    limit: usize,
) -> StdResult<Vec<Addr>> {
    let start = start_after.map(Bound::exclusive);
    ROLES
        .prefix(role.as_str())
        .keys(storage, start, None, Order::Ascending)
        .take(limit)
        .collect()
}
