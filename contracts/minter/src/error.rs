use cosmwasm_std::{StdError, Uint128};
use cw_utils::PaymentError;
use gates::GateError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error(transparent)]
    Gate(#[from] GateError),

    #[error("Payment error")]
    PaymentError(#[from] PaymentError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("No active phase")]
    NoActivePhase {},

    #[error("Not allowlisted")]
    NotAllowlisted {},

    #[error("Max supply exceeded")]
    SupplyExceeded {},

    #[error("Max mint per wallet exceeded")]
    MaxPerWalletExceeded {},

    #[error("Insufficient payment")]
    InsufficientPayment { expected: Uint128, sent: Uint128 },

    #[error("Phase not found")]
    PhaseNotFound {},

    #[error("Nothing to withdraw")]
    NothingToWithdraw {},

    #[error("Token not found")]
    TokenNotFound {},

    #[error("Invalid mint quantity")]
    InvalidMintQuantity {},

    #[error("Phase end time must be after start time")]
    InvalidPhaseWindow {},

    #[error("Per wallet limit cannot be zero")]
    PerWalletLimitZero {},

    #[error("Invalid max supply")]
    InvalidMaxSupply {},

    #[error("Merkle root must be 32 bytes")]
    InvalidMerkleRoot {},
}

impl From<ContractError> for StdError {
    fn from(err: ContractError) -> StdError {
        StdError::generic_err(err.to_string())
    }
}
