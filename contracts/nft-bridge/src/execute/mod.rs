//! Execute handlers for the NFT bridge.
//!
//! Handlers are organized by category:
//! - `outgoing` - ReceiveNft, LockTokens and WithdrawTokens
//! - `inbound` - FinalizeInbound (proof verification and event application)
//! - `factory` - collection deployment and metadata
//! - `admin` - pause flags and configuration
//! - `roles` - role grants and revocations (handled by the proxy entry)

mod admin;
mod factory;
mod inbound;
mod outgoing;
mod roles;

pub use admin::*;
pub use factory::*;
pub use inbound::*;
pub use outgoing::*;
pub use roles::*;

use cosmwasm_std::{Addr, Api, BankMsg, CosmosMsg, MessageInfo, StdResult, Storage, Uint256};

use crate::address_codec::{encode_bech32_address, is_valid_remote_account};
use crate::codec::{parse_token_id, ADDRESS_LEN};
use crate::error::ContractError;
use crate::state::{Config, CONFIG};

/// Bridge configuration; missing until the bridge logic is initialized.
pub fn load_config(storage: &dyn Storage) -> Result<Config, ContractError> {
    CONFIG
        .may_load(storage)?
        .ok_or(ContractError::NotInitialized)
}

/// Forward attached funds to the fee collector.
///
/// Returns the bank message (if any) and the fee as an attribute value.
fn collect_fee(
    config: &Config,
    info: &MessageInfo,
) -> Result<(Option<CosmosMsg>, String), ContractError> {
    if info.funds.is_empty() {
        return Ok((None, String::new()));
    }
    let collector = config
        .fee_collector
        .as_ref()
        .ok_or(ContractError::UnexpectedFunds)?;

    let fee = info
        .funds
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(",");
    let msg = CosmosMsg::Bank(BankMsg::Send {
        to_address: collector.to_string(),
        amount: info.funds.clone(),
    });
    Ok((Some(msg), fee))
}

fn validate_remote_recipient(account: &str) -> Result<(), ContractError> {
    if !is_valid_remote_account(account) {
        return Err(ContractError::InvalidRemoteAccount {
            account: account.to_string(),
        });
    }
    Ok(())
}

/// Token ids crossing the bridge are canonical decimal u256 values.
fn canonical_token_id(token_id: &str) -> Result<Uint256, ContractError> {
    let value = parse_token_id(token_id.as_bytes()).map_err(|_| ContractError::InvalidTokenId {
        token_id: token_id.to_string(),
    })?;
    if value.to_string() != token_id {
        return Err(ContractError::InvalidTokenId {
            token_id: token_id.to_string(),
        });
    }
    Ok(value)
}

/// Local account named by 20 raw bytes in a foreign event
fn local_account(api: &dyn Api, raw: &[u8; ADDRESS_LEN], prefix: &str) -> StdResult<Addr> {
    let encoded = encode_bech32_address(raw, prefix)?;
    api.addr_validate(&encoded)
}
