//! Inbound finalization.
//!
//! A relayer submits a proof of a foreign event. The proof is verified,
//! decoded, consumed and applied in one transaction: any failure reverts all
//! of it, including the consumption, so a proof rejected for a recoverable
//! reason (prover not yet final, collection not yet deployed) may be
//! submitted again later.

use cosmwasm_std::{
    to_json_binary, Binary, CosmosMsg, DepsMut, Env, MessageInfo, Response, WasmMsg,
};

use common::nft::NftExecuteMsg;

use super::{load_config, local_account};
use crate::access::{self, Role};
use crate::codec::{
    decode_event, DecodedEvent, EventSchema, LockedEvent, MetadataLogEvent, WithdrawEvent,
};
use crate::custody;
use crate::error::ContractError;
use crate::hash::bytes_to_hex;
use crate::proof::{verify_proof, Prover};
use crate::registry::{self, non_empty};
use crate::replay;
use crate::state::{Config, STATS};

/// Verify a foreign event proof and apply the event.
pub fn execute_finalize_inbound(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    prover: &dyn Prover,
    schema: EventSchema,
    proof: Binary,
    min_finality: u64,
) -> Result<Response, ContractError> {
    let config = load_config(deps.storage)?;

    if config.paused {
        return Err(ContractError::BridgePaused);
    }
    if config.restrict_relayers {
        access::ensure_role(deps.storage, Role::Whitelist, &info.sender)?;
    }
    if schema == EventSchema::Withdraw && config.withdrawals_paused {
        return Err(ContractError::WithdrawalsPaused);
    }

    let verified = verify_proof(
        prover,
        proof.as_slice(),
        min_finality,
        config.emitter_for(schema),
        config.min_block_acceptance_height,
    )?;
    let event = decode_event(&verified.envelope.log, schema)?;

    replay::consume(deps.storage, &verified.fingerprint, env.block.height)?;

    let res = Response::new()
        .add_attribute("method", "finalize_inbound")
        .add_attribute("schema", schema.as_str())
        .add_attribute("fingerprint", bytes_to_hex(&verified.fingerprint))
        .add_attribute("block_height", verified.envelope.block_height.to_string())
        .add_attribute("relayer", info.sender);

    match event {
        DecodedEvent::Locked(event) => apply_locked(deps, &config, event, res),
        DecodedEvent::Withdraw(event) => apply_withdraw(deps, &config, event, res),
        DecodedEvent::MetadataLog(event) => apply_metadata(deps, event, res),
    }
}

/// Mint the bridged copy of a token locked on the foreign chain.
fn apply_locked(
    deps: DepsMut,
    config: &Config,
    event: LockedEvent,
    res: Response,
) -> Result<Response, ContractError> {
    let record = registry::load(deps.storage, &event.collection_id)?;
    let recipient = local_account(deps.api, &event.recipient, &config.account_prefix)?;
    let token_id = event.token_id.to_string();

    let mint = CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: record.contract.to_string(),
        msg: to_json_binary(&NftExecuteMsg::Mint {
            token_id: token_id.clone(),
            owner: recipient.to_string(),
            token_uri: non_empty(event.token_uri),
        })?,
        funds: vec![],
    });

    let mut stats = STATS.load(deps.storage)?;
    stats.total_minted += 1;
    STATS.save(deps.storage, &stats)?;

    Ok(res
        .add_message(mint)
        .add_attribute("applied", "mint")
        .add_attribute("collection_id", record.collection_id)
        .add_attribute("contract", record.contract)
        .add_attribute("recipient", recipient)
        .add_attribute("token_id", token_id))
}

/// Release a home token whose bridged copy was burned on the foreign chain.
fn apply_withdraw(
    deps: DepsMut,
    config: &Config,
    event: WithdrawEvent,
    res: Response,
) -> Result<Response, ContractError> {
    let collection = custody::resolve_home_token(deps.storage, &event.token)?;
    let token_id = event.token_id.to_string();
    let lock = custody::release(deps.storage, &collection, &token_id)?;
    let recipient = local_account(deps.api, &event.recipient, &config.account_prefix)?;

    let transfer = CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: collection.to_string(),
        msg: to_json_binary(&NftExecuteMsg::TransferNft {
            recipient: recipient.to_string(),
            token_id: token_id.clone(),
        })?,
        funds: vec![],
    });

    let mut stats = STATS.load(deps.storage)?;
    stats.total_unlocked += 1;
    STATS.save(deps.storage, &stats)?;

    Ok(res
        .add_message(transfer)
        .add_attribute("applied", "unlock")
        .add_attribute("collection", collection)
        .add_attribute("recipient", recipient)
        .add_attribute("token_id", token_id)
        .add_attribute("locked_by", lock.owner))
}

/// Replace the metadata of a bridged collection.
fn apply_metadata(
    deps: DepsMut,
    event: MetadataLogEvent,
    res: Response,
) -> Result<Response, ContractError> {
    let record = registry::update_metadata(
        deps.storage,
        &event.collection_id,
        event.name,
        event.symbol,
        non_empty(event.icon),
        non_empty(event.base_uri),
    )?;

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

    Ok(res
        .add_message(update)
        .add_attribute("applied", "update_metadata")
        .add_attribute("collection_id", record.collection_id)
        .add_attribute("contract", record.contract))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::{
        mock_dependencies, mock_env, mock_info, MockApi, MockQuerier, MockStorage,
    };
    use cosmwasm_std::{Addr, OwnedDeps, StdResult, Uint256};

    use crate::codec::{encode_event, ProofEnvelope};
    use crate::registry::PendingDeployment;
    use crate::state::{Stats, CONFIG};

    struct FixedProver(bool);

    impl Prover for FixedProver {
        fn verify(&self, _proof: &[u8], _min_finality: u64) -> StdResult<bool> {
            Ok(self.0)
        }
    }

    fn config() -> Config {
        Config {
            prover: Addr::unchecked("prover"),
            remote_locker: "locker.near".to_string(),
            remote_factory: "factory.near".to_string(),
            remote_metadata: "metadata.near".to_string(),
            min_block_acceptance_height: 0,
            bridged_nft_code_id: 1,
            account_prefix: "terra".to_string(),
            fee_collector: None,
            restrict_relayers: false,
            paused: false,
            withdrawals_paused: false,
        }
    }

    fn locked_proof(collection_id: &str, token_id: u64) -> Binary {
        let log = encode_event(&DecodedEvent::Locked(LockedEvent {
            recipient: [0x11; 20],
            collection_id: collection_id.to_string(),
            token_id: Uint256::from(token_id),
            token_uri: "tokenuri".to_string(),
        }));
        Binary::from(
            ProofEnvelope {
                block_height: 10,
                log_index: 0,
                emitter: "locker.near".to_string(),
                log,
                proof: vec![1, 2, 3],
            }
            .encode(),
        )
    }

    fn setup() -> OwnedDeps<MockStorage, MockApi, MockQuerier> {
        let mut deps = mock_dependencies();
        CONFIG.save(deps.as_mut().storage, &config()).unwrap();
        STATS.save(deps.as_mut().storage, &Stats::default()).unwrap();
        registry::begin_deployment(
            deps.as_mut().storage,
            &PendingDeployment {
                collection_id: "NFT".to_string(),
                name: "Bridged".to_string(),
                symbol: "BNFT".to_string(),
                icon: None,
                base_uri: None,
            },
        )
        .unwrap();
        registry::complete_deployment(deps.as_mut().storage, Addr::unchecked("bridged"), 1)
            .unwrap();
        deps
    }

    #[test]
    fn test_locked_event_mints_once() {
        let mut deps = setup();
        let proof = locked_proof("NFT", 22);

        let res = execute_finalize_inbound(
            deps.as_mut(),
            mock_env(),
            mock_info("relayer", &[]),
            &FixedProver(true),
            EventSchema::Locked,
            proof.clone(),
            10,
        )
        .unwrap();
        assert_eq!(res.messages.len(), 1);
        assert!(res
            .attributes
            .iter()
            .any(|a| a.key == "token_id" && a.value == "22"));
        assert_eq!(STATS.load(deps.as_ref().storage).unwrap().total_minted, 1);

        let err = execute_finalize_inbound(
            deps.as_mut(),
            mock_env(),
            mock_info("relayer", &[]),
            &FixedProver(true),
            EventSchema::Locked,
            proof,
            10,
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::ReplayRejected { .. }));
    }

    #[test]
    fn test_rejected_proof_is_not_consumed() {
        let mut deps = setup();
        let proof = locked_proof("NFT", 1);

        let err = execute_finalize_inbound(
            deps.as_mut(),
            mock_env(),
            mock_info("relayer", &[]),
            &FixedProver(false),
            EventSchema::Locked,
            proof.clone(),
            10,
        )
        .unwrap_err();
        assert_eq!(err, ContractError::ProofInvalid);

        execute_finalize_inbound(
            deps.as_mut(),
            mock_env(),
            mock_info("relayer", &[]),
            &FixedProver(true),
            EventSchema::Locked,
            proof,
            10,
        )
        .unwrap();
    }

    #[test]
    fn test_schema_selects_emitter() {
        let mut deps = setup();
        // A Locked log emitted by the locker cannot be finalized as metadata
        let err = execute_finalize_inbound(
            deps.as_mut(),
            mock_env(),
            mock_info("relayer", &[]),
            &FixedProver(true),
            EventSchema::MetadataLog,
            locked_proof("NFT", 1),
            10,
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::UnexpectedEmitter { .. }));
    }

    #[test]
    fn test_restricted_relayers() {
        let mut deps = setup();
        CONFIG
            .update(deps.as_mut().storage, |mut c| -> StdResult<_> {
                c.restrict_relayers = true;
                Ok(c)
            })
            .unwrap();

        let err = execute_finalize_inbound(
            deps.as_mut(),
            mock_env(),
            mock_info("relayer", &[]),
            &FixedProver(true),
            EventSchema::Locked,
            locked_proof("NFT", 1),
            10,
        )
        .unwrap_err();
        assert_eq!(err, ContractError::unauthorized("whitelist"));

        access::bootstrap(deps.as_mut().storage, &Addr::unchecked("admin")).unwrap();
        access::grant(deps.as_mut().storage, Role::Whitelist, &Addr::unchecked("relayer")).unwrap();
        execute_finalize_inbound(
            deps.as_mut(),
            mock_env(),
            mock_info("relayer", &[]),
            &FixedProver(true),
            EventSchema::Locked,
            locked_proof("NFT", 1),
            10,
        )
        .unwrap();
    }
}
