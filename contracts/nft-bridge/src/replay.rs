//! Replay guard over consumed proof fingerprints
//!
//! The consumed set only grows: a fingerprint is recorded with the block
//! height it was consumed at and is never removed.

use cosmwasm_std::{StdResult, Storage};
use cw_storage_plus::Map;

use crate::error::ContractError;
use crate::hash::bytes_to_hex;

/// fingerprint => block height at which it was consumed
const USED_PROOFS: Map<&[u8], u64> = Map::new("used_proofs");

/// Record `fingerprint` as consumed, failing if it already is.
///
/// Check and insert happen in the same call, so within one transaction there
/// is no point at which a second submission could observe it as unused.
pub fn consume(
    storage: &mut dyn Storage,
    fingerprint: &[u8; 32],
    height: u64,
) -> Result<(), ContractError> {
    if USED_PROOFS.has(storage, fingerprint) {
        return Err(ContractError::ReplayRejected {
            fingerprint: bytes_to_hex(fingerprint),
        });
    }
    USED_PROOFS.save(storage, fingerprint, &height)?;
    Ok(())
}

/// Height at which `fingerprint` was consumed, if it was
pub fn consumed_at(storage: &dyn Storage, fingerprint: &[u8]) -> StdResult<Option<u64>> {
    USED_PROOFS.may_load(storage, fingerprint)
}
