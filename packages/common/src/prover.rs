//! Query interface of the external proof verifier.
//!
//! The verifier is a light-client contract tracking finalized foreign-chain
//! headers. The bridge only asks it for a verdict; it never inspects the
//! light-client proof itself.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Binary;

#[cw_serde]
#[derive(QueryResponses)]
pub enum ProverQueryMsg {
    /// Check that the proof is valid and its block has at least
    /// `min_finality` confirmations
    #[returns(VerifyProofResponse)]
    VerifyProof { proof: Binary, min_finality: u64 },
}

#[cw_serde]
pub struct VerifyProofResponse {
    pub valid: bool,
}
