//! Shared cw-multi-test harness for the NFT bridge tests.
//!
//! Deploys a scripted prover, one home collection (a plain NFT contract the
//! admin mints into) and the bridge behind its proxy, initialized with the
//! bridge logic.

#![allow(dead_code)]

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    coins, to_json_binary, Addr, Binary, Deps, DepsMut, Empty, Env, MessageInfo, Response,
    StdResult, Uint256,
};
use cw_multi_test::{App, AppResponse, ContractWrapper, Executor};
use cw_storage_plus::Item;

use common::nft::{
    BalanceResponse, BridgedNftInstantiateMsg, CollectionInfoResponse, NftExecuteMsg, NftInfoResponse,
    NftQueryMsg, OwnerOfResponse,
};
use common::prover::{ProverQueryMsg, VerifyProofResponse};
use nft_bridge::address_codec::encode_bech32_address;
use nft_bridge::codec::{
    encode_event, DecodedEvent, EventSchema, LockedEvent, MetadataLogEvent, ProofEnvelope,
    WithdrawEvent,
};
use nft_bridge::msg::{
    BridgeInitMsg, ExecuteMsg, InstantiateMsg, LogicId, QueryMsg, StatsResponse,
};

pub const REMOTE_LOCKER: &str = "locker.near";
pub const REMOTE_FACTORY: &str = "factory.near";
pub const REMOTE_METADATA: &str = "metadata.near";
pub const MIN_BLOCK_HEIGHT: u64 = 100;
pub const MIN_FINALITY: u64 = 10;

/// Raw 20-byte accounts used inside foreign events
pub const USER_RAW: [u8; 20] = [0x11; 20];
pub const OTHER_RAW: [u8; 20] = [0x22; 20];

// ============================================================================
// Scripted prover contract
// ============================================================================

#[cw_serde]
pub struct ProverInstantiateMsg {
    pub valid: bool,
}

#[cw_serde]
pub enum ProverExecuteMsg {
    SetVerdict { valid: bool },
}

const VERDICT: Item<bool> = Item::new("verdict");

fn prover_instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: ProverInstantiateMsg,
) -> StdResult<Response> {
    VERDICT.save(deps.storage, &msg.valid)?;
    Ok(Response::new())
}

fn prover_execute(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: ProverExecuteMsg,
) -> StdResult<Response> {
    match msg {
        ProverExecuteMsg::SetVerdict { valid } => VERDICT.save(deps.storage, &valid)?,
    }
    Ok(Response::new())
}

fn prover_query(deps: Deps, _env: Env, msg: ProverQueryMsg) -> StdResult<Binary> {
    match msg {
        ProverQueryMsg::VerifyProof { .. } => to_json_binary(&VerifyProofResponse {
            valid: VERDICT.load(deps.storage)?,
        }),
    }
}

// ============================================================================
// Contract wrappers
// ============================================================================

fn contract_bridge() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        nft_bridge::contract::execute,
        nft_bridge::contract::instantiate,
        nft_bridge::contract::query,
    )
    .with_reply(nft_bridge::contract::reply);
    Box::new(contract)
}

fn contract_bridged_nft() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        bridged_nft::contract::execute,
        bridged_nft::contract::instantiate,
        bridged_nft::contract::query,
    );
    Box::new(contract)
}

fn contract_prover() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(prover_execute, prover_instantiate, prover_query);
    Box::new(contract)
}

// ============================================================================
// Suite
// ============================================================================

pub struct Suite {
    pub app: App,
    pub admin: Addr,
    /// Local account of `USER_RAW`
    pub user: Addr,
    /// Local account of `OTHER_RAW`
    pub other: Addr,
    pub relayer: Addr,
    pub prover: Addr,
    /// Home collection; the admin is its minter
    pub home: Addr,
    pub bridge: Addr,
    pub nft_code_id: u64,
    pub bridge_code_id: u64,
}

pub fn local_account(raw: &[u8; 20]) -> Addr {
    Addr::unchecked(encode_bech32_address(raw, "terra").unwrap())
}

pub fn bridge_init_msg(prover: &Addr, nft_code_id: u64) -> BridgeInitMsg {
    BridgeInitMsg {
        prover: prover.to_string(),
        remote_locker: REMOTE_LOCKER.to_string(),
        remote_factory: REMOTE_FACTORY.to_string(),
        remote_metadata: REMOTE_METADATA.to_string(),
        min_block_acceptance_height: MIN_BLOCK_HEIGHT,
        bridged_nft_code_id: nft_code_id,
        account_prefix: "terra".to_string(),
        fee_collector: None,
        restrict_relayers: false,
    }
}

impl Suite {
    pub fn new() -> Self {
        Self::with_init(true)
    }

    /// Set up the suite; without `initialize` the proxy is left
    /// uninitialized.
    pub fn with_init(initialize: bool) -> Self {
        let mut app = App::default();

        let admin = Addr::unchecked("terra1admin");
        let relayer = Addr::unchecked("terra1relayer");
        let user = local_account(&USER_RAW);
        let other = local_account(&OTHER_RAW);

        app.init_modules(|router, _, storage| {
            router
                .bank
                .init_balance(storage, &user, coins(1_000_000, "uluna"))
                .unwrap();
        });

        let prover_code_id = app.store_code(contract_prover());
        let nft_code_id = app.store_code(contract_bridged_nft());
        let bridge_code_id = app.store_code(contract_bridge());

        let prover = app
            .instantiate_contract(
                prover_code_id,
                admin.clone(),
                &ProverInstantiateMsg { valid: true },
                &[],
                "prover",
                None,
            )
            .unwrap();

        let home = app
            .instantiate_contract(
                nft_code_id,
                admin.clone(),
                &BridgedNftInstantiateMsg {
                    name: "Home Apes".to_string(),
                    symbol: "HAPE".to_string(),
                    icon: None,
                    base_uri: None,
                    collection_id: "home".to_string(),
                    minter: admin.to_string(),
                },
                &[],
                "home-collection",
                None,
            )
            .unwrap();

        let data = if initialize {
            Some(to_json_binary(&bridge_init_msg(&prover, nft_code_id)).unwrap())
        } else {
            None
        };
        let bridge = app
            .instantiate_contract(
                bridge_code_id,
                admin.clone(),
                &InstantiateMsg {
                    admin: admin.to_string(),
                    logic: LogicId::Bridge,
                    data,
                },
                &[],
                "nft-bridge",
                Some(admin.to_string()),
            )
            .unwrap();

        Suite {
            app,
            admin,
            user,
            other,
            relayer,
            prover,
            home,
            bridge,
            nft_code_id,
            bridge_code_id,
        }
    }

    /// Execute on the bridge, returning the root cause on failure.
    pub fn execute(&mut self, sender: &Addr, msg: &ExecuteMsg) -> Result<AppResponse, String> {
        self.execute_with_funds(sender, msg, &[])
    }

    pub fn execute_with_funds(
        &mut self,
        sender: &Addr,
        msg: &ExecuteMsg,
        funds: &[cosmwasm_std::Coin],
    ) -> Result<AppResponse, String> {
        self.app
            .execute_contract(sender.clone(), self.bridge.clone(), msg, funds)
            .map_err(|e| e.root_cause().to_string())
    }

    pub fn query<T: serde::de::DeserializeOwned>(&self, msg: &QueryMsg) -> T {
        self.app.wrap().query_wasm_smart(&self.bridge, msg).unwrap()
    }

    pub fn stats(&self) -> StatsResponse {
        self.query(&QueryMsg::Stats {})
    }

    pub fn set_verdict(&mut self, valid: bool) {
        self.app
            .execute_contract(
                self.admin.clone(),
                self.prover.clone(),
                &ProverExecuteMsg::SetVerdict { valid },
                &[],
            )
            .unwrap();
    }

    // ------------------------------------------------------------------------
    // Home collection
    // ------------------------------------------------------------------------

    pub fn mint_home(&mut self, token_id: &str, owner: &Addr) {
        self.app
            .execute_contract(
                self.admin.clone(),
                self.home.clone(),
                &NftExecuteMsg::Mint {
                    token_id: token_id.to_string(),
                    owner: owner.to_string(),
                    token_uri: None,
                },
                &[],
            )
            .unwrap();
    }

    pub fn approve_bridge(&mut self, collection: &Addr, owner: &Addr, token_id: &str) {
        self.app
            .execute_contract(
                owner.clone(),
                collection.clone(),
                &NftExecuteMsg::Approve {
                    spender: self.bridge.to_string(),
                    token_id: token_id.to_string(),
                },
                &[],
            )
            .unwrap();
    }

    /// Mint `token_id` to the user, approve the bridge and lock it.
    pub fn lock_home(&mut self, token_id: &str) {
        let user = self.user.clone();
        let home = self.home.clone();
        self.mint_home(token_id, &user);
        self.approve_bridge(&home, &user, token_id);
        self.execute(
            &user,
            &ExecuteMsg::LockTokens {
                collection: home.to_string(),
                token_ids: vec![token_id.to_string()],
                remote_recipient: "alice.near".to_string(),
            },
        )
        .unwrap();
    }

    // ------------------------------------------------------------------------
    // NFT queries
    // ------------------------------------------------------------------------

    pub fn owner_of(&self, collection: &Addr, token_id: &str) -> Option<Addr> {
        self.app
            .wrap()
            .query_wasm_smart::<OwnerOfResponse>(
                collection,
                &NftQueryMsg::OwnerOf {
                    token_id: token_id.to_string(),
                },
            )
            .ok()
            .map(|res| res.owner)
    }

    pub fn balance(&self, collection: &Addr, owner: &Addr) -> u64 {
        let res: BalanceResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                collection,
                &NftQueryMsg::Balance {
                    owner: owner.to_string(),
                },
            )
            .unwrap();
        res.count
    }

    pub fn token_uri(&self, collection: &Addr, token_id: &str) -> Option<String> {
        let res: NftInfoResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                collection,
                &NftQueryMsg::NftInfo {
                    token_id: token_id.to_string(),
                },
            )
            .unwrap();
        res.token_uri
    }

    pub fn collection_info(&self, collection: &Addr) -> CollectionInfoResponse {
        self.app
            .wrap()
            .query_wasm_smart(collection, &NftQueryMsg::CollectionInfo {})
            .unwrap()
    }

    // ------------------------------------------------------------------------
    // Registry & inbound
    // ------------------------------------------------------------------------

    /// Deploy the bridged contract for `collection_id` and return its address.
    pub fn deploy(&mut self, collection_id: &str) -> Addr {
        let admin = self.admin.clone();
        self.execute(
            &admin,
            &ExecuteMsg::DeployCollection {
                collection_id: collection_id.to_string(),
                name: "Bridged Apes".to_string(),
                symbol: "BAPE".to_string(),
                icon: None,
                base_uri: None,
            },
        )
        .unwrap();
        let record: nft_bridge::msg::BridgedCollection = self.query(&QueryMsg::Collection {
            collection_id: collection_id.to_string(),
        });
        record.contract
    }

    pub fn finalize(&mut self, schema: EventSchema, proof: &Binary) -> Result<AppResponse, String> {
        let relayer = self.relayer.clone();
        self.execute(
            &relayer,
            &ExecuteMsg::FinalizeInbound {
                schema,
                proof: proof.clone(),
                min_finality: MIN_FINALITY,
            },
        )
    }
}

// ============================================================================
// Proof builders
// ============================================================================

pub fn envelope(emitter: &str, block_height: u64, log_index: u32, event: &DecodedEvent) -> Binary {
    Binary::from(
        ProofEnvelope {
            block_height,
            log_index,
            emitter: emitter.to_string(),
            log: encode_event(event),
            proof: vec![0xAB; 16],
        }
        .encode(),
    )
}

pub fn locked_proof(collection_id: &str, token_id: u64, recipient: [u8; 20], log_index: u32) -> Binary {
    envelope(
        REMOTE_LOCKER,
        MIN_BLOCK_HEIGHT + 1,
        log_index,
        &DecodedEvent::Locked(LockedEvent {
            recipient,
            collection_id: collection_id.to_string(),
            token_id: Uint256::from(token_id),
            token_uri: "tokenuri".to_string(),
        }),
    )
}

pub fn withdraw_proof(token: [u8; 20], token_id: u64, recipient: [u8; 20], log_index: u32) -> Binary {
    envelope(
        REMOTE_FACTORY,
        MIN_BLOCK_HEIGHT + 1,
        log_index,
        &DecodedEvent::Withdraw(WithdrawEvent {
            token,
            recipient,
            token_id: Uint256::from(token_id),
        }),
    )
}

pub fn metadata_proof(collection_id: &str, name: &str, symbol: &str, log_index: u32) -> Binary {
    envelope(
        REMOTE_METADATA,
        MIN_BLOCK_HEIGHT + 1,
        log_index,
        &DecodedEvent::MetadataLog(MetadataLogEvent {
            collection_id: collection_id.to_string(),
            name: name.to_string(),
            symbol: symbol.to_string(),
            icon: String::new(),
            base_uri: "ipfs://renamed/".to_string(),
        }),
    )
}
