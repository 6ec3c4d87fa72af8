use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Order, StdResult, Storage, Uint128};
use cw_storage_plus::{Item, Map};

use crate::error::ContractError;

pub type PhaseId = u32;

pub const PHASES_KEY: &str = "phases";
pub const PHASE_COUNT_KEY: &str = "phase_count";

#[cw_serde]
pub struct Phase {
    pub name: String,
    /// Unix seconds. Zero means open since genesis.
    pub start_time: u64,
    /// Unix seconds. Zero means open ended.
    pub end_time: u64,
    pub price: Uint128,
    pub per_wallet_limit: u32,
}

impl Phase {
    pub fn is_open(&self, now: u64) -> bool {
        self.start_time <= now && (self.end_time == 0 || now <= self.end_time)
    }

    pub fn check_integrity(&self) -> Result<(), ContractError> {
        if self.per_wallet_limit == 0 {
            return Err(ContractError::PerWalletLimitZero {});
        }
        if self.start_time != 0 && self.end_time != 0 && self.end_time <= self.start_time {
            return Err(ContractError::InvalidPhaseWindow {});
        }
        Ok(())
    }
}

/// A removed phase keeps its slot so ids are never reordered or reused.
#[cw_serde]
pub enum PhaseSlot {
    Present(Phase),
    Removed,
}

pub struct Phases<'a> {
    slots: Map<'a, PhaseId, PhaseSlot>,
    count: Item<'a, u32>,
}

impl<'a> Phases<'a> {
    pub const fn new() -> Self {
        Phases {
            slots: Map::new(PHASES_KEY),
            count: Item::new(PHASE_COUNT_KEY),
        }
    }

    /// Number of ids ever assigned, including removed phases.
    pub fn count(&self, store: &dyn Storage) -> StdResult<u32> {
        Ok(self.count.may_load(store)?.unwrap_or(0))
    }

    pub fn add(&self, store: &mut dyn Storage, phase: &Phase) -> Result<PhaseId, ContractError> {
        phase.check_integrity()?;
        let phase_id = self.count(store)?;
        self.slots
            .save(store, phase_id, &PhaseSlot::Present(phase.clone()))?;
        self.count.save(store, &(phase_id + 1))?;
        Ok(phase_id)
    }

    pub fn load(&self, store: &dyn Storage, phase_id: PhaseId) -> Result<Phase, ContractError> {
        match self.slots.may_load(store, phase_id)? {
            Some(PhaseSlot::Present(phase)) => Ok(phase),
            _ => Err(ContractError::PhaseNotFound {}),
        }
    }

    pub fn update(
        &self,
        store: &mut dyn Storage,
        phase_id: PhaseId,
        phase: &Phase,
    ) -> Result<(), ContractError> {
        phase.check_integrity()?;
        self.load(store, phase_id)?;
        self.slots
            .save(store, phase_id, &PhaseSlot::Present(phase.clone()))?;
        Ok(())
    }

    pub fn remove(&self, store: &mut dyn Storage, phase_id: PhaseId) -> Result<(), ContractError> {
        self.load(store, phase_id)?;
        self.slots.save(store, phase_id, &PhaseSlot::Removed)?;
        Ok(())
    }

    /// Scans phases in creation order and returns the first one whose
    /// window contains `now`. Windows may overlap; the earliest-created
    /// open phase always wins.
    pub fn active(
        &self,
        store: &dyn Storage,
        now: u64,
    ) -> StdResult<Option<(PhaseId, Phase)>> {
        for entry in self.slots.range(store, None, None, Order::Ascending) {
            let (phase_id, slot) = entry?;
            if let PhaseSlot::Present(phase) = slot {
                if phase.is_open(now) {
                    return Ok(Some((phase_id, phase)));
                }
            }
        }
        Ok(None)
    }

    /// All phases still present, in creation order.
    pub fn all(&self, store: &dyn Storage) -> StdResult<Vec<(PhaseId, Phase)>> {
        self.slots
            .range(store, None, None, Order::Ascending)
            .filter_map(|entry| match entry {
                Ok((phase_id, PhaseSlot::Present(phase))) => Ok(Some((phase_id, phase))),
                Ok((_, PhaseSlot::Removed)) => Ok(None),
                Err(err) => Err(err),
            }
            .transpose())
            .collect()
    }
}
