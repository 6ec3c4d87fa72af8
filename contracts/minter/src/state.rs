use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, StdResult, Storage, Uint128};
use cw_storage_plus::{Item, Map};

use crate::error::ContractError;
use crate::phases::PhaseId;

#[cw_serde]
pub struct Config {
    pub admin: Addr,
    pub payment_collector: Addr,
    pub mint_denom: String,
    pub max_supply: u32,
    /// Collection-level default price, superseded by the active phase.
    pub mint_price: Uint128,
    /// Collection-level default limit, superseded by the active phase.
    pub per_wallet_limit: u32,
    pub fee_recipient: Option<Addr>,
    /// Flat amount routed to the fee recipient per mint transaction,
    /// independent of quantity.
    pub launchpad_fee: Uint128,
}

#[cw_serde]
pub struct CollectionDetails {
    pub name: String,
    pub symbol: String,
    pub base_uri: String,
    /// Shared URI every token resolves to until reveal.
    pub placeholder_uri: String,
    pub contract_uri: String,
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const COLLECTION: Item<CollectionDetails> = Item::new("collection");

/// Token ids start at 1 and are never reused, so the last minted id is
/// also the total supply.
pub const LAST_MINTED_TOKEN_ID: Item<u32> = Item::new("last_minted_token_id");

pub const MINT_COUNTS_KEY: &str = "mint_counts";

/// Per-wallet mint counters, keyed by (phase id, wallet). Counters are
/// independent across phases: a wallet's cap starts fresh in every phase.
pub struct MintCounts<'a>(Map<'a, (PhaseId, Addr), u32>);

impl<'a> MintCounts<'a> {
    pub const fn new(storage_key: &'a str) -> Self {
        MintCounts(Map::new(storage_key))
    }

    pub fn count(
        &self,
        store: &dyn Storage,
        phase_id: PhaseId,
        wallet: &Addr,
    ) -> StdResult<u32> {
        Ok(self
            .0
            .may_load(store, (phase_id, wallet.clone()))?
            .unwrap_or(0))
    }

    /// Records `quantity` mints for the wallet within the phase, erroring
    /// without any write when the phase limit would be breached.
    pub fn record(
        &self,
        store: &mut dyn Storage,
        phase_id: PhaseId,
        wallet: &Addr,
        quantity: u32,
        per_wallet_limit: u32,
    ) -> Result<(), ContractError> {
        let minted = self.count(store, phase_id, wallet)?;
        let updated = minted
            .checked_add(quantity)
            .ok_or(ContractError::MaxPerWalletExceeded {})?;
        if updated > per_wallet_limit {
            return Err(ContractError::MaxPerWalletExceeded {});
        }
        self.0.save(store, (phase_id, wallet.clone()), &updated)?;
        Ok(())
    }
}
