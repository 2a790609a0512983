//! Proof verification
//!
//! The bridge never checks foreign consensus itself. It hands the proof blob
//! to a [`Prover`] and only decides what to do with the verdict. Every call
//! asks the prover again; verdicts are never cached.

use cosmwasm_std::{Addr, Binary, QuerierWrapper, StdResult};

use common::prover::{ProverQueryMsg, VerifyProofResponse};

use crate::codec::ProofEnvelope;
use crate::error::ContractError;
use crate::hash::envelope_fingerprint;

/// Foreign light-client verifier
pub trait Prover {
    /// Whether `proof` is valid and at least `min_finality` blocks deep
    fn verify(&self, proof: &[u8], min_finality: u64) -> StdResult<bool>;
}

/// Prover backed by the configured verifier contract
pub struct ContractProver<'a> {
    querier: QuerierWrapper<'a>,
    contract: Addr,
}

impl<'a> ContractProver<'a> {
    pub fn new(querier: QuerierWrapper<'a>, contract: Addr) -> Self {
        Self { querier, contract }
    }
}

impl Prover for ContractProver<'_> {
    fn verify(&self, proof: &[u8], min_finality: u64) -> StdResult<bool> {
        let res: VerifyProofResponse = self.querier.query_wasm_smart(
            &self.contract,
            &ProverQueryMsg::VerifyProof {
                proof: Binary::from(proof),
                min_finality,
            },
        )?;
        Ok(res.valid)
    }
}

/// A proof the prover accepted
#[derive(Debug)]
pub struct VerifiedProof {
    pub fingerprint: [u8; 32],
    pub envelope: ProofEnvelope,
}

/// Decode and verify a proof blob.
///
/// The envelope must come from `expected_emitter` and from a block at or
/// above `min_block_height` before the prover is consulted.
pub fn verify_proof(
    prover: &dyn Prover,
    blob: &[u8],
    min_finality: u64,
    expected_emitter: &str,
    min_block_height: u64,
) -> Result<VerifiedProof, ContractError> {
    let envelope = ProofEnvelope::decode(blob)?;

    if envelope.emitter != expected_emitter {
        return Err(ContractError::UnexpectedEmitter {
            expected: expected_emitter.to_string(),
            got: envelope.emitter,
        });
    }

    if envelope.block_height < min_block_height {
        return Err(ContractError::ProofTooOld {
            height: envelope.block_height,
            min_height: min_block_height,
        });
    }

    if !prover.verify(blob, min_finality)? {
        return Err(ContractError::ProofInvalid);
    }

    Ok(VerifiedProof {
        fingerprint: envelope_fingerprint(&envelope),
        envelope,
    })
}
