//! Bridged collection registry and factory tests.

mod support;

use cw_multi_test::Executor;

use common::nft::{MinterResponse, NftExecuteMsg, NftQueryMsg};
use nft_bridge::codec::EventSchema;
use nft_bridge::msg::{BridgedCollection, CollectionsResponse, ExecuteMsg, QueryMsg};
use support::{locked_proof, Suite, USER_RAW};

fn deploy_msg(collection_id: &str) -> ExecuteMsg {
    ExecuteMsg::DeployCollection {
        collection_id: collection_id.to_string(),
        name: "Bridged Apes".to_string(),
        symbol: "BAPE".to_string(),
        icon: Some("ipfs://icon".to_string()),
        base_uri: None,
    }
}

#[test]
fn test_deploy_collection_instantiates_bridged_contract() {
    let mut suite = Suite::new();
    let bridge = suite.bridge.clone();

    let bridged = suite.deploy("NFT");

    let record: BridgedCollection = suite.query(&QueryMsg::Collection {
        collection_id: "NFT".to_string(),
    });
    assert_eq!(record.contract, bridged);
    assert_eq!(record.name, "Bridged Apes");

    let info = suite.collection_info(&bridged);
    assert_eq!(info.collection_id, "NFT");
    assert_eq!(info.symbol, "BAPE");

    let minter: MinterResponse = suite
        .app
        .wrap()
        .query_wasm_smart(&bridged, &NftQueryMsg::Minter {})
        .unwrap();
    assert_eq!(minter.minter, bridge);
}

#[test]
fn test_deploy_twice_fails() {
    let mut suite = Suite::new();
    let admin = suite.admin.clone();
    let first = suite.deploy("NFT");

    let err = suite.execute(&admin, &deploy_msg("NFT")).unwrap_err();
    assert!(err.contains("Collection already deployed: NFT"));

    // Identifiers are case-sensitive
    let lower = suite.deploy("nft");
    assert_ne!(first, lower);
}

#[test]
fn test_deploy_requires_admin_and_valid_id() {
    let mut suite = Suite::new();
    let (admin, user) = (suite.admin.clone(), suite.user.clone());

    let err = suite.execute(&user, &deploy_msg("NFT")).unwrap_err();
    assert!(err.contains("only admin"));

    let err = suite.execute(&admin, &deploy_msg("")).unwrap_err();
    assert!(err.contains("Invalid collection id"));

    suite.execute(&admin, &ExecuteMsg::Pause {}).unwrap();
    let err = suite.execute(&admin, &deploy_msg("NFT")).unwrap_err();
    assert!(err.contains("Bridge is paused"));
}

#[test]
fn test_collections_pagination() {
    let mut suite = Suite::new();
    for id in ["a", "b", "c"] {
        suite.deploy(id);
    }

    let page: CollectionsResponse = suite.query(&QueryMsg::Collections {
        start_after: None,
        limit: Some(2),
    });
    let ids: Vec<_> = page.collections.iter().map(|c| c.collection_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);

    let rest: CollectionsResponse = suite.query(&QueryMsg::Collections {
        start_after: Some("b".to_string()),
        limit: None,
    });
    assert_eq!(rest.collections.len(), 1);
    assert_eq!(rest.collections[0].collection_id, "c");
}

#[test]
fn test_admin_metadata_update() {
    let mut suite = Suite::new();
    let (admin, user) = (suite.admin.clone(), suite.user.clone());
    let bridged = suite.deploy("NFT");

    let update = ExecuteMsg::UpdateCollectionMetadata {
        collection_id: "NFT".to_string(),
        name: "New Name".to_string(),
        symbol: "NEW".to_string(),
        icon: None,
        base_uri: Some("ipfs://new/".to_string()),
    };

    let err = suite.execute(&user, &update).unwrap_err();
    assert!(err.contains("only admin"));

    suite.execute(&admin, &update).unwrap();
    let info = suite.collection_info(&bridged);
    assert_eq!(info.name, "New Name");
    assert_eq!(info.base_uri, Some("ipfs://new/".to_string()));
    assert_eq!(suite.stats().total_metadata_updates, 1);

    let err = suite
        .execute(
            &admin,
            &ExecuteMsg::UpdateCollectionMetadata {
                collection_id: "missing".to_string(),
                name: "x".to_string(),
                symbol: "x".to_string(),
                icon: None,
                base_uri: None,
            },
        )
        .unwrap_err();
    assert!(err.contains("Collection not deployed: missing"));
}

#[test]
fn test_bridged_contract_only_mints_for_bridge() {
    let mut suite = Suite::new();
    let user = suite.user.clone();
    let bridged = suite.deploy("NFT");

    suite
        .finalize(EventSchema::Locked, &locked_proof("NFT", 5, USER_RAW, 0))
        .unwrap();
    assert_eq!(suite.owner_of(&bridged, "5"), Some(user.clone()));

    let err = suite
        .app
        .execute_contract(
            user.clone(),
            bridged,
            &NftExecuteMsg::Mint {
                token_id: "6".to_string(),
                owner: user.to_string(),
                token_uri: None,
            },
            &[],
        )
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("only minter"));
}
