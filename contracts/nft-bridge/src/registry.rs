//! Registry of bridged collections
//!
//! Binds a foreign collection identifier to the bridged NFT contract deployed
//! for it. A record is created exactly once, when the deployment reply
//! arrives, and its contract address is never reassigned. Only the display
//! metadata changes afterwards.
//!
//! Identifiers are opaque, case-sensitive byte strings; lookups are exact.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Order, StdResult, Storage};
use cw_storage_plus::{Bound, Item, Map};

use crate::error::ContractError;

/// Longest accepted collection identifier, in bytes
pub const MAX_COLLECTION_ID_LEN: usize = 128;

#[cw_serde]
pub struct BridgedCollection {
    /// Identifier of the collection on the foreign chain
    pub collection_id: String,
    /// Bridged NFT contract deployed for it
    pub contract: Addr,
    pub name: String,
    pub symbol: String,
    pub icon: Option<String>,
    pub base_uri: Option<String>,
    /// Block height of the deployment
    pub deployed_at: u64,
}

/// Deployment waiting for its instantiate reply
#[cw_serde]
pub struct PendingDeployment {
    pub collection_id: String,
    pub name: String,
    pub symbol: String,
    pub icon: Option<String>,
    pub base_uri: Option<String>,
}

/// collection_id => record
const COLLECTIONS: Map<&str, BridgedCollection> = Map::new("collections");

/// bridged contract => collection_id
const COLLECTION_BY_CONTRACT: Map<&Addr, String> = Map::new("collection_by_contract");

const PENDING_DEPLOYMENT: Item<PendingDeployment> = Item::new("pending_deployment");

/// Map an empty string to `None`; foreign events encode absent values as "".
pub fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

pub fn validate_collection_id(collection_id: &str) -> Result<(), ContractError> {
    if collection_id.is_empty() {
        return Err(ContractError::InvalidCollectionId {
            reason: "empty".to_string(),
        });
    }
    if collection_id.len() > MAX_COLLECTION_ID_LEN {
        return Err(ContractError::InvalidCollectionId {
            reason: format!("longer than {} bytes", MAX_COLLECTION_ID_LEN),
        });
    }
    Ok(())
}

pub fn ensure_not_deployed(storage: &dyn Storage, collection_id: &str) -> Result<(), ContractError> {
    if COLLECTIONS.has(storage, collection_id) {
        return Err(ContractError::AlreadyDeployed {
            collection_id: collection_id.to_string(),
        });
    }
    Ok(())
}

/// Look up a deployed collection.
pub fn load(storage: &dyn Storage, collection_id: &str) -> Result<BridgedCollection, ContractError> {
    COLLECTIONS
        .may_load(storage, collection_id)?
        .ok_or_else(|| ContractError::NotDeployed {
            collection_id: collection_id.to_string(),
        })
}

/// Collection id of a bridged contract, if `contract` is one
pub fn collection_of(storage: &dyn Storage, contract: &Addr) -> StdResult<Option<String>> {
    COLLECTION_BY_CONTRACT.may_load(storage, contract)
}

/// Remember a deployment until its instantiate reply arrives.
pub fn begin_deployment(
    storage: &mut dyn Storage,
    pending: &PendingDeployment,
) -> Result<(), ContractError> {
    validate_collection_id(&pending.collection_id)?;
    ensure_not_deployed(storage, &pending.collection_id)?;
    if let Some(in_flight) = PENDING_DEPLOYMENT.may_load(storage)? {
        return Err(ContractError::AlreadyDeployed {
            collection_id: in_flight.collection_id,
        });
    }
    PENDING_DEPLOYMENT.save(storage, pending)?;
    Ok(())
}

/// Turn the pending deployment into a registry record.
pub fn complete_deployment(
    storage: &mut dyn Storage,
    contract: Addr,
    height: u64,
) -> Result<BridgedCollection, ContractError> {
    let pending = PENDING_DEPLOYMENT.load(storage)?;
    PENDING_DEPLOYMENT.remove(storage);
    ensure_not_deployed(storage, &pending.collection_id)?;

    let record = BridgedCollection {
        collection_id: pending.collection_id,
        contract,
        name: pending.name,
        symbol: pending.symbol,
        icon: pending.icon,
        base_uri: pending.base_uri,
        deployed_at: height,
    };
    COLLECTIONS.save(storage, &record.collection_id, &record)?;
    COLLECTION_BY_CONTRACT.save(storage, &record.contract, &record.collection_id)?;
    Ok(record)
}

/// Replace display metadata of a deployed collection.
pub fn update_metadata(
    storage: &mut dyn Storage,
    collection_id: &str,
    name: String,
    symbol: String,
    icon: Option<String>,
    base_uri: Option<String>,
) -> Result<BridgedCollection, ContractError> {
    let mut record = load(storage, collection_id)?;
    record.name = name;
    record.symbol = symbol;
    record.icon = icon;
    record.base_uri = base_uri;
    COLLECTIONS.save(storage, collection_id, &record)?;
    Ok(record)
}

/// Deployed collections in identifier order, paginated
pub fn range(
    storage: &dyn Storage,
    start_after: Option<&str>,
    limit: usize,
) -> StdResult<Vec<BridgedCollection>> {
    let start = start_after.map(Bound::exclusive);
    COLLECTIONS
        .range(storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(_, record)| record))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::MockStorage;

    fn pending(collection_id: &str) -> PendingDeployment {
        PendingDeployment {
            collection_id: collection_id.to_string(),
            name: "Apes".to_string(),
            symbol: "APE".to_string(),
            icon: None,
            base_uri: None,
        }
    }

    #[test]
    fn test_deploy_once() {
        let mut storage = MockStorage::new();

        begin_deployment(&mut storage, &pending("NFT")).unwrap();
        let record = complete_deployment(&mut storage, Addr::unchecked("contract1"), 10).unwrap();
        assert_eq!(record.contract, Addr::unchecked("contract1"));
        assert_eq!(record.deployed_at, 10);

        assert_eq!(load(&storage, "NFT").unwrap(), record);
        assert_eq!(
            collection_of(&storage, &Addr::unchecked("contract1")).unwrap(),
            Some("NFT".to_string())
        );

        assert_eq!(
            begin_deployment(&mut storage, &pending("NFT")).unwrap_err(),
            ContractError::AlreadyDeployed {
                collection_id: "NFT".to_string()
            }
        );
    }

    #[test]
    fn test_one_deployment_in_flight() {
        let mut storage = MockStorage::new();
        begin_deployment(&mut storage, &pending("NFT")).unwrap();

        assert_eq!(
            begin_deployment(&mut storage, &pending("OTHER")).unwrap_err(),
            ContractError::AlreadyDeployed {
                collection_id: "NFT".to_string()
            }
        );

        complete_deployment(&mut storage, Addr::unchecked("contract1"), 1).unwrap();
        begin_deployment(&mut storage, &pending("OTHER")).unwrap();
    }

    #[test]
    fn test_identifiers_are_case_sensitive() {
        let mut storage = MockStorage::new();
        begin_deployment(&mut storage, &pending("NFT")).unwrap();
        complete_deployment(&mut storage, Addr::unchecked("contract1"), 1).unwrap();

        assert!(matches!(
            load(&storage, "nft"),
            Err(ContractError::NotDeployed { .. })
        ));
        begin_deployment(&mut storage, &pending("nft")).unwrap();
    }

    #[test]
    fn test_invalid_identifiers() {
        let mut storage = MockStorage::new();
        assert!(matches!(
            begin_deployment(&mut storage, &pending("")),
            Err(ContractError::InvalidCollectionId { .. })
        ));
        let long = "x".repeat(MAX_COLLECTION_ID_LEN + 1);
        assert!(matches!(
            begin_deployment(&mut storage, &pending(&long)),
            Err(ContractError::InvalidCollectionId { .. })
        ));
    }

    #[test]
    fn test_update_metadata_requires_record() {
        let mut storage = MockStorage::new();
        let err = update_metadata(
            &mut storage,
            "missing",
            "n".to_string(),
            "s".to_string(),
            None,
            None,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ContractError::NotDeployed {
                collection_id: "missing".to_string()
            }
        );

        begin_deployment(&mut storage, &pending("NFT")).unwrap();
        complete_deployment(&mut storage, Addr::unchecked("contract1"), 1).unwrap();
        let updated = update_metadata(
            &mut storage,
            "NFT",
            "Renamed".to_string(),
            "RN".to_string(),
            Some("icon".to_string()),
            non_empty(String::new()),
        )
        .unwrap();
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.base_uri, None);
        assert_eq!(updated.contract, Addr::unchecked("contract1"));
    }

    #[test]
    fn test_range() {
        let mut storage = MockStorage::new();
        for (i, id) in ["a", "b", "c"].iter().enumerate() {
            begin_deployment(&mut storage, &pending(id)).unwrap();
            complete_deployment(&mut storage, Addr::unchecked(format!("contract{}", i)), 1)
                .unwrap();
        }
        let page = range(&storage, Some("a"), 1).unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].collection_id, "b");
    }
}
