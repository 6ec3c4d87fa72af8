use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, HexBinary, StdResult, Storage};
use cw_storage_plus::Map;

use merkle_proofs::{leaf_hash, verify, Hash};

use crate::error::ContractError;
use crate::phases::PhaseId;

pub const ALLOWLIST_CONFIGS_KEY: &str = "allowlist_configs";
pub const ALLOWLIST_MEMBERS_KEY: &str = "allowlist_members";

#[cw_serde]
#[derive(Default)]
pub struct AllowlistConfig {
    pub enabled: bool,
    pub merkle_root: Option<HexBinary>,
}

/// Per-phase eligibility state: an explicit member set and an optional
/// Merkle root. When the allowlist is disabled every wallet is eligible.
pub struct PhaseAllowlists<'a> {
    configs: Map<'a, PhaseId, AllowlistConfig>,
    members: Map<'a, (PhaseId, Addr), bool>,
}

impl<'a> PhaseAllowlists<'a> {
    pub const fn new() -> Self {
        PhaseAllowlists {
            configs: Map::new(ALLOWLIST_CONFIGS_KEY),
            members: Map::new(ALLOWLIST_MEMBERS_KEY),
        }
    }

    pub fn config(&self, store: &dyn Storage, phase_id: PhaseId) -> StdResult<AllowlistConfig> {
        Ok(self.configs.may_load(store, phase_id)?.unwrap_or_default())
    }

    pub fn set_enabled(
        &self,
        store: &mut dyn Storage,
        phase_id: PhaseId,
        enabled: bool,
    ) -> StdResult<()> {
        let mut config = self.config(store, phase_id)?;
        config.enabled = enabled;
        self.configs.save(store, phase_id, &config)
    }

    /// A root of None or all zero bytes clears proof-based eligibility.
    pub fn set_root(
        &self,
        store: &mut dyn Storage,
        phase_id: PhaseId,
        root: Option<HexBinary>,
    ) -> Result<(), ContractError> {
        let root = match root {
            None => None,
            Some(root) => {
                if root.as_slice().len() != 32 {
                    return Err(ContractError::InvalidMerkleRoot {});
                }
                if root.as_slice().iter().all(|byte| *byte == 0) {
                    None
                } else {
                    Some(root)
                }
            }
        };
        let mut config = self.config(store, phase_id)?;
        config.merkle_root = root;
        self.configs.save(store, phase_id, &config)?;
        Ok(())
    }

    /// Batch add or remove explicit members. Duplicate entries collapse to
    /// a single membership flag.
    pub fn set_members(
        &self,
        store: &mut dyn Storage,
        phase_id: PhaseId,
        wallets: &[Addr],
        allowed: bool,
    ) -> StdResult<()> {
        for wallet in wallets {
            if allowed {
                self.members.save(store, (phase_id, wallet.clone()), &true)?;
            } else {
                self.members.remove(store, (phase_id, wallet.clone()));
            }
        }
        Ok(())
    }

    pub fn is_member(
        &self,
        store: &dyn Storage,
        phase_id: PhaseId,
        wallet: &Addr,
    ) -> StdResult<bool> {
        Ok(self
            .members
            .may_load(store, (phase_id, wallet.clone()))?
            .unwrap_or(false))
    }

    /// Eligibility = disabled OR explicit member OR (root set AND proof
    /// verifies the wallet's leaf against it).
    pub fn is_eligible(
        &self,
        store: &dyn Storage,
        phase_id: PhaseId,
        wallet: &Addr,
        proof: &[HexBinary],
    ) -> Result<bool, ContractError> {
        let config = self.config(store, phase_id)?;
        if !config.enabled {
            return Ok(true);
        }
        if self.is_member(store, phase_id, wallet)? {
            return Ok(true);
        }
        if let Some(root) = config.merkle_root {
            let root: Hash = root.to_array()?;
            let proof = proof
                .iter()
                .map(|element| element.to_array())
                .collect::<StdResult<Vec<Hash>>>()?;
            let leaf = leaf_hash(wallet.as_bytes());
            return Ok(verify(&root, &leaf, &proof));
        }
        Ok(false)
    }
}
