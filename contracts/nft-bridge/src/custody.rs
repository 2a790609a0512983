//! Custody of home-collection tokens
//!
//! A home token is in custody from the moment it is locked for the foreign
//! chain until a proven `Withdraw` event releases it. The foreign chain names
//! home collections by their 20-byte home-token key, registered here on first
//! lock and never removed.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, StdResult, Storage};
use cw_storage_plus::Map;

use crate::codec::ADDRESS_LEN;
use crate::error::ContractError;
use crate::hash::{bytes_to_hex, home_token_key};

#[cw_serde]
pub struct LockRecord {
    /// Owner the token was locked by
    pub owner: Addr,
    /// Foreign account the token was bridged to
    pub remote_recipient: String,
    /// Block height of the lock
    pub locked_at: u64,
}

/// home-token key => home collection contract
const HOME_TOKENS: Map<&[u8], Addr> = Map::new("home_tokens");

/// (home collection, token_id) => lock
const CUSTODY: Map<(&Addr, &str), LockRecord> = Map::new("custody");

/// Register `contract` under its home-token key and return the key.
pub fn register_home_token(
    storage: &mut dyn Storage,
    contract: &Addr,
) -> StdResult<[u8; ADDRESS_LEN]> {
    let key = home_token_key(contract);
    if !HOME_TOKENS.has(storage, &key) {
        HOME_TOKENS.save(storage, &key, contract)?;
    }
    Ok(key)
}

pub fn home_token(storage: &dyn Storage, key: &[u8]) -> StdResult<Option<Addr>> {
    HOME_TOKENS.may_load(storage, key)
}

/// Home collection named by a foreign `Withdraw` event
pub fn resolve_home_token(
    storage: &dyn Storage,
    key: &[u8; ADDRESS_LEN],
) -> Result<Addr, ContractError> {
    home_token(storage, key)?.ok_or_else(|| ContractError::UnknownHomeToken {
        key: bytes_to_hex(key),
    })
}

pub fn lock(
    storage: &mut dyn Storage,
    contract: &Addr,
    token_id: &str,
    record: &LockRecord,
) -> Result<(), ContractError> {
    if CUSTODY.has(storage, (contract, token_id)) {
        return Err(ContractError::AlreadyInCustody {
            collection: contract.to_string(),
            token_id: token_id.to_string(),
        });
    }
    CUSTODY.save(storage, (contract, token_id), record)?;
    Ok(())
}

pub fn release(
    storage: &mut dyn Storage,
    contract: &Addr,
    token_id: &str,
) -> Result<LockRecord, ContractError> {
    let record = CUSTODY
        .may_load(storage, (contract, token_id))?
        .ok_or_else(|| ContractError::NotInCustody {
            collection: contract.to_string(),
            token_id: token_id.to_string(),
        })?;
    CUSTODY.remove(storage, (contract, token_id));
    Ok(record)
}

pub fn load_lock(
    storage: &dyn Storage,
    contract: &Addr,
    token_id: &str,
) -> StdResult<Option<LockRecord>> {
    CUSTODY.may_load(storage, (contract, token_id))
}
