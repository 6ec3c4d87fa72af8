use cosmwasm_std::{Addr, BankMsg, Coin, CosmosMsg, StdError, Uint128};

use crate::error::ContractError;
use crate::state::{CollectionDetails, Config};
use crate::token::TokenId;

pub fn ensure_admin(config: &Config, sender: &Addr) -> Result<(), ContractError> {
    if *sender != config.admin {
        return Err(ContractError::Unauthorized {});
    }
    Ok(())
}

pub fn token_uri(collection: &CollectionDetails, revealed: bool, token_id: TokenId) -> String {
    if revealed {
        format!("{}{}.json", collection.base_uri, token_id)
    } else {
        collection.placeholder_uri.clone()
    }
}

/// The flat fee actually routed per mint transaction: zero unless both a
/// fee recipient and a nonzero fee are configured.
pub fn fee_portion(config: &Config) -> Uint128 {
    if config.fee_recipient.is_some() {
        config.launchpad_fee
    } else {
        Uint128::zero()
    }
}

pub fn mint_cost(price: Uint128, quantity: u32) -> Result<Uint128, ContractError> {
    price
        .checked_mul(Uint128::from(quantity))
        .map_err(|err| ContractError::Std(StdError::overflow(err)))
}

/// Push-payment settlement for a mint: the launchpad fee to the fee
/// recipient, the full cost to the payment collector. Any overpayment
/// stays on the contract until withdrawn.
pub fn settlement_msgs(config: &Config, cost: Uint128) -> Vec<CosmosMsg> {
    let mut messages: Vec<CosmosMsg> = Vec::new();

    if let Some(fee_recipient) = &config.fee_recipient {
        if !config.launchpad_fee.is_zero() {
            messages.push(
                BankMsg::Send {
                    to_address: fee_recipient.to_string(),
                    amount: vec![Coin {
                        denom: config.mint_denom.clone(),
                        amount: config.launchpad_fee,
                    }],
                }
                .into(),
            );
        }
    }

    if !cost.is_zero() {
        messages.push(
            BankMsg::Send {
                to_address: config.payment_collector.to_string(),
                amount: vec![Coin {
                    denom: config.mint_denom.clone(),
                    amount: cost,
                }],
            }
            .into(),
        );
    }

    messages
}
