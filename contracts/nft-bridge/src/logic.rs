//! Logic implementations behind the proxy
//!
//! - [`BridgeLogic`] is the bridge state machine
//! - [`MaintenanceLogic`] rejects every forwarded call with the reason given
//!   to its initializer

use cosmwasm_std::{from_json, Binary, DepsMut, Env, MessageInfo, Response, StdError};
use cw_storage_plus::Map;

use crate::address_codec::is_valid_remote_account;
use crate::error::ContractError;
use crate::execute::{
    execute_deploy_collection, execute_finalize_inbound, execute_lock_tokens, execute_log_metadata,
    execute_pause, execute_receive_nft, execute_set_withdrawals_paused, execute_unpause,
    execute_update_collection_metadata, execute_update_config, execute_withdraw_tokens,
    load_config,
};
use crate::msg::{BridgeInitMsg, ExecuteMsg, MaintenanceInitMsg};
use crate::proof::ContractProver;
use crate::proxy::{self, Logic};
use crate::state::{Config, Stats, CONFIG, STATS};

/// proxy version => reason given to that version's initializer
const MAINTENANCE_REASON: Map<u32, String> = Map::new("maintenance_reason");

pub struct BridgeLogic;

pub struct MaintenanceLogic;

impl Logic for BridgeLogic {
    fn initialize(
        &self,
        deps: DepsMut,
        _env: &Env,
        data: &Binary,
    ) -> Result<Response, ContractError> {
        let msg: BridgeInitMsg = from_json(data)?;

        let prover = deps.api.addr_validate(&msg.prover)?;
        let fee_collector = msg
            .fee_collector
            .map(|addr| deps.api.addr_validate(&addr))
            .transpose()?;

        for account in [&msg.remote_locker, &msg.remote_factory, &msg.remote_metadata] {
            if !is_valid_remote_account(account) {
                return Err(ContractError::InvalidRemoteAccount {
                    account: account.clone(),
                });
            }
        }
        if msg.account_prefix.is_empty() {
            return Err(StdError::generic_err("account_prefix must not be empty").into());
        }

        // Pause flags survive re-initialization after an upgrade
        let (paused, withdrawals_paused) = CONFIG
            .may_load(deps.storage)?
            .map(|c| (c.paused, c.withdrawals_paused))
            .unwrap_or((false, false));

        let config = Config {
            prover,
            remote_locker: msg.remote_locker,
            remote_factory: msg.remote_factory,
            remote_metadata: msg.remote_metadata,
            min_block_acceptance_height: msg.min_block_acceptance_height,
            bridged_nft_code_id: msg.bridged_nft_code_id,
            account_prefix: msg.account_prefix,
            fee_collector,
            restrict_relayers: msg.restrict_relayers,
            paused,
            withdrawals_paused,
        };
        CONFIG.save(deps.storage, &config)?;

        if STATS.may_load(deps.storage)?.is_none() {
            STATS.save(deps.storage, &Stats::default())?;
        }

        Ok(Response::new()
            .add_attribute("logic", "bridge")
            .add_attribute("prover", config.prover)
            .add_attribute("remote_locker", config.remote_locker)
            .add_attribute("remote_factory", config.remote_factory)
            .add_attribute("remote_metadata", config.remote_metadata)
            .add_attribute(
                "min_block_acceptance_height",
                config.min_block_acceptance_height.to_string(),
            ))
    }

    fn execute(
        &self,
        deps: DepsMut,
        env: Env,
        info: MessageInfo,
        msg: ExecuteMsg,
    ) -> Result<Response, ContractError> {
        match msg {
            // Outbound
            ExecuteMsg::ReceiveNft(receive_msg) => {
                execute_receive_nft(deps, env, info, receive_msg)
            }
            ExecuteMsg::LockTokens {
                collection,
                token_ids,
                remote_recipient,
            } => execute_lock_tokens(deps, env, info, collection, token_ids, remote_recipient),
            ExecuteMsg::WithdrawTokens {
                collection_id,
                token_ids,
                remote_recipient,
            } => execute_withdraw_tokens(deps, info, collection_id, token_ids, remote_recipient),
            ExecuteMsg::LogMetadata { collection } => execute_log_metadata(deps, info, collection),

            // Inbound
            ExecuteMsg::FinalizeInbound {
                schema,
                proof,
                min_finality,
            } => {
                let config = load_config(deps.storage)?;
                let prover = ContractProver::new(deps.querier, config.prover.clone());
                execute_finalize_inbound(deps, env, info, &prover, schema, proof, min_finality)
            }

            // Registry
            ExecuteMsg::DeployCollection {
                collection_id,
                name,
                symbol,
                icon,
                base_uri,
            } => execute_deploy_collection(
                deps,
                env,
                info,
                collection_id,
                name,
                symbol,
                icon,
                base_uri,
            ),
            ExecuteMsg::UpdateCollectionMetadata {
                collection_id,
                name,
                symbol,
                icon,
                base_uri,
            } => execute_update_collection_metadata(
                deps,
                info,
                collection_id,
                name,
                symbol,
                icon,
                base_uri,
            ),

            // Admin
            ExecuteMsg::SetWithdrawalsPaused { paused } => {
                execute_set_withdrawals_paused(deps, info, paused)
            }
            ExecuteMsg::Pause {} => execute_pause(deps, info),
            ExecuteMsg::Unpause {} => execute_unpause(deps, info),
            ExecuteMsg::UpdateConfig {
                prover,
                remote_locker,
                remote_factory,
                remote_metadata,
                min_block_acceptance_height,
                bridged_nft_code_id,
                fee_collector,
                restrict_relayers,
            } => execute_update_config(
                deps,
                info,
                prover,
                remote_locker,
                remote_factory,
                remote_metadata,
                min_block_acceptance_height,
                bridged_nft_code_id,
                fee_collector,
                restrict_relayers,
            ),

            ExecuteMsg::Initialize { .. }
            | ExecuteMsg::UpgradeTo { .. }
            | ExecuteMsg::UpgradeToAndCall { .. }
            | ExecuteMsg::GrantRole { .. }
            | ExecuteMsg::RevokeRole { .. } => Err(StdError::generic_err(
                "proxy message cannot be forwarded to logic",
            )
            .into()),
        }
    }
}

impl Logic for MaintenanceLogic {
    fn initialize(
        &self,
        deps: DepsMut,
        _env: &Env,
        data: &Binary,
    ) -> Result<Response, ContractError> {
        let msg: MaintenanceInitMsg = from_json(data)?;
        let version = proxy::load(deps.storage)?.version;
        MAINTENANCE_REASON.save(deps.storage, version, &msg.reason)?;

        Ok(Response::new()
            .add_attribute("logic", "maintenance")
            .add_attribute("reason", msg.reason))
    }

    fn execute(
        &self,
        deps: DepsMut,
        _env: Env,
        _info: MessageInfo,
        _msg: ExecuteMsg,
    ) -> Result<Response, ContractError> {
        let version = proxy::load(deps.storage)?.version;
        let reason = MAINTENANCE_REASON
            .may_load(deps.storage, version)?
            .unwrap_or_else(|| "maintenance".to_string());
        Err(ContractError::LogicUnavailable { reason })
    }
}
