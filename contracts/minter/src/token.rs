use cosmwasm_std::{Addr, StdResult, Storage};
use cw_storage_plus::Map;

use crate::error::ContractError;

pub type TokenId = u32;

pub const TOKEN_OWNERS_KEY: &str = "token_owners";
pub const TOKEN_APPROVALS_KEY: &str = "token_approvals";
pub const OPERATOR_APPROVALS_KEY: &str = "operator_approvals";

/// Minimal in-contract token ledger: owner per token plus per-token and
/// operator approvals.
///
/// Approvals are stored unconditionally; the transfer lock hides them from
/// reads instead of erasing them, so unlocking restores whatever was
/// granted before the freeze. Callers pass the lock flag into the read
/// methods.
pub struct TokenLedger<'a> {
    owners: Map<'a, TokenId, Addr>,
    token_approvals: Map<'a, TokenId, Addr>,
    operator_approvals: Map<'a, (Addr, Addr), bool>,
}

impl<'a> TokenLedger<'a> {
    pub const fn new() -> Self {
        TokenLedger {
            owners: Map::new(TOKEN_OWNERS_KEY),
            token_approvals: Map::new(TOKEN_APPROVALS_KEY),
            operator_approvals: Map::new(OPERATOR_APPROVALS_KEY),
        }
    }

    pub fn mint(
        &self,
        store: &mut dyn Storage,
        token_id: TokenId,
        owner: &Addr,
    ) -> StdResult<()> {
        self.owners.save(store, token_id, owner)
    }

    pub fn owner_of(
        &self,
        store: &dyn Storage,
        token_id: TokenId,
    ) -> Result<Addr, ContractError> {
        self.owners
            .may_load(store, token_id)?
            .ok_or(ContractError::TokenNotFound {})
    }

    /// Moves a token, requiring the sender to be the owner, the approved
    /// spender or an approved operator. The per-token approval is
    /// consumed by the transfer.
    pub fn transfer(
        &self,
        store: &mut dyn Storage,
        sender: &Addr,
        recipient: &Addr,
        token_id: TokenId,
    ) -> Result<(), ContractError> {
        let owner = self.owner_of(store, token_id)?;
        let approved_spender = self.token_approvals.may_load(store, token_id)?;
        let is_operator = self
            .operator_approvals
            .may_load(store, (owner.clone(), sender.clone()))?
            .unwrap_or(false);

        if owner != *sender && approved_spender.as_ref() != Some(sender) && !is_operator {
            return Err(ContractError::Unauthorized {});
        }

        self.token_approvals.remove(store, token_id);
        self.owners.save(store, token_id, recipient)?;
        Ok(())
    }

    pub fn approve(
        &self,
        store: &mut dyn Storage,
        sender: &Addr,
        spender: &Addr,
        token_id: TokenId,
    ) -> Result<(), ContractError> {
        self.ensure_can_approve(store, sender, token_id)?;
        self.token_approvals.save(store, token_id, spender)?;
        Ok(())
    }

    pub fn revoke(
        &self,
        store: &mut dyn Storage,
        sender: &Addr,
        token_id: TokenId,
    ) -> Result<(), ContractError> {
        self.ensure_can_approve(store, sender, token_id)?;
        self.token_approvals.remove(store, token_id);
        Ok(())
    }

    pub fn set_operator(
        &self,
        store: &mut dyn Storage,
        owner: &Addr,
        operator: &Addr,
        approved: bool,
    ) -> StdResult<()> {
        if approved {
            self.operator_approvals
                .save(store, (owner.clone(), operator.clone()), &true)
        } else {
            self.operator_approvals
                .remove(store, (owner.clone(), operator.clone()));
            Ok(())
        }
    }

    /// The approved spender for a token. Reports None while transfers are
    /// locked even if an approval is stored.
    pub fn approved(
        &self,
        store: &dyn Storage,
        token_id: TokenId,
        locked: bool,
    ) -> Result<Option<Addr>, ContractError> {
        self.owner_of(store, token_id)?;
        if locked {
            return Ok(None);
        }
        Ok(self.token_approvals.may_load(store, token_id)?)
    }

    /// Operator status, hidden while transfers are locked.
    pub fn is_operator(
        &self,
        store: &dyn Storage,
        owner: &Addr,
        operator: &Addr,
        locked: bool,
    ) -> StdResult<bool> {
        if locked {
            return Ok(false);
        }
        Ok(self
            .operator_approvals
            .may_load(store, (owner.clone(), operator.clone()))?
            .unwrap_or(false))
    }

    fn ensure_can_approve(
        &self,
        store: &dyn Storage,
        sender: &Addr,
        token_id: TokenId,
    ) -> Result<(), ContractError> {
        let owner = self.owner_of(store, token_id)?;
        let is_operator = self
            .operator_approvals
            .may_load(store, (owner.clone(), sender.clone()))?
            .unwrap_or(false);
        if owner != *sender && !is_operator {
            return Err(ContractError::Unauthorized {});
        }
        Ok(())
    }
}
