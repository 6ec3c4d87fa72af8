use cosmwasm_std::{StdError, Storage};
use cw_storage_plus::Item;
use thiserror::Error;

pub const PAUSED_KEY: &str = "paused";
pub const TRANSFERS_LOCKED_KEY: &str = "transfers_locked";
pub const REVEALED_KEY: &str = "revealed";

#[derive(Error, Debug, PartialEq)]
pub enum GateError {
    #[error(transparent)]
    Std(#[from] StdError),

    #[error("Minting is paused")]
    Paused {},

    #[error("Transfers are locked")]
    TransfersLocked {},
}

/// Global flag state gating minting, transfers/approvals and metadata
/// resolution. The three flags are independent; authorization of the
/// toggles is left to the caller.
pub struct GateState<'a> {
    pub paused: Item<'a, bool>,
    pub transfers_locked: Item<'a, bool>,
    pub revealed: Item<'a, bool>,
}

impl<'a> GateState<'a> {
    pub const fn new() -> Self {
        GateState {
            paused: Item::new(PAUSED_KEY),
            transfers_locked: Item::new(TRANSFERS_LOCKED_KEY),
            revealed: Item::new(REVEALED_KEY),
        }
    }

    /// Launch posture: minting open, transfers frozen, metadata hidden.
    pub fn initialize(&self, storage: &mut dyn Storage) -> Result<(), GateError> {
        self.paused.save(storage, &false)?;
        self.transfers_locked.save(storage, &true)?;
        self.revealed.save(storage, &false)?;
        Ok(())
    }

    /// Errors if minting is paused, does nothing otherwise.
    pub fn error_if_paused(&self, storage: &dyn Storage) -> Result<(), GateError> {
        if self.is_paused(storage)? {
            Err(GateError::Paused {})
        } else {
            Ok(())
        }
    }

    /// Errors if transfers and approval grants are frozen.
    pub fn error_if_transfers_locked(&self, storage: &dyn Storage) -> Result<(), GateError> {
        if self.is_transfers_locked(storage)? {
            Err(GateError::TransfersLocked {})
        } else {
            Ok(())
        }
    }

    pub fn set_paused(&self, storage: &mut dyn Storage, paused: bool) -> Result<(), GateError> {
        self.paused.save(storage, &paused)?;
        Ok(())
    }

    pub fn set_transfers_locked(
        &self,
        storage: &mut dyn Storage,
        locked: bool,
    ) -> Result<(), GateError> {
        self.transfers_locked.save(storage, &locked)?;
        Ok(())
    }

    pub fn set_revealed(&self, storage: &mut dyn Storage, revealed: bool) -> Result<(), GateError> {
        self.revealed.save(storage, &revealed)?;
        Ok(())
    }

    pub fn is_paused(&self, storage: &dyn Storage) -> Result<bool, GateError> {
        Ok(self.paused.load(storage).unwrap_or(false))
    }

    pub fn is_transfers_locked(&self, storage: &dyn Storage) -> Result<bool, GateError> {
        Ok(self.transfers_locked.load(storage).unwrap_or(true))
    }

    pub fn is_revealed(&self, storage: &dyn Storage) -> Result<bool, GateError> {
        Ok(self.revealed.load(storage).unwrap_or(false))
    }
}
