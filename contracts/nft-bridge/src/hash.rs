//! Hash computation for proof fingerprints and home-token keys
//!
//! # Proof Fingerprint (32 bytes)
//! ```text
//! keccak256( block_height (u64 LE, 8) || log_index (u32 LE, 4)
//!          || keccak256(emitter) (32) || keccak256(log) (32) )
//! ```
//! The fingerprint identifies the proven event, not the proof path: the
//! light-client proof bytes are left out so that the same event proven
//! twice along different paths is still one fingerprint.
//!
//! # Home-Token Key (20 bytes)
//! The foreign chain names a home collection by the last 20 bytes of
//! `keccak256(contract_address)`.

use cosmwasm_std::Addr;
use tiny_keccak::{Hasher, Keccak};

use crate::codec::{ProofEnvelope, ADDRESS_LEN};

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Fingerprint of a proven event, used as the replay-guard key.
pub fn proof_fingerprint(block_height: u64, log_index: u32, emitter: &str, log: &[u8]) -> [u8; 32] {
    let mut data = [0u8; 8 + 4 + 32 + 32];
    data[0..8].copy_from_slice(&block_height.to_le_bytes());
    data[8..12].copy_from_slice(&log_index.to_le_bytes());
    data[12..44].copy_from_slice(&keccak256(emitter.as_bytes()));
    data[44..76].copy_from_slice(&keccak256(log));
    keccak256(&data)
}

/// Fingerprint of a decoded envelope
pub fn envelope_fingerprint(envelope: &ProofEnvelope) -> [u8; 32] {
    proof_fingerprint(
        envelope.block_height,
        envelope.log_index,
        &envelope.emitter,
        &envelope.log,
    )
}

/// 20-byte key under which the foreign chain refers to a home collection
pub fn home_token_key(contract: &Addr) -> [u8; ADDRESS_LEN] {
    let hash = keccak256(contract.as_bytes());
    let mut key = [0u8; ADDRESS_LEN];
    key.copy_from_slice(&hash[32 - ADDRESS_LEN..]);
    key
}

/// Convert bytes to a 0x-prefixed hex string (for attributes/logging)
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}
