use cosmwasm_std::{Addr, Coin, Uint128};
use cw_multi_test::{App, BankSudo, SudoMsg};

use phased_minter::error::ContractError;

pub fn mint_to_address(app: &mut App, to_address: String, amount: Vec<Coin>) {
    app.sudo(SudoMsg::Bank(BankSudo::Mint { to_address, amount }))
        .unwrap();
}

pub fn query_balance(app: &App, address: &Addr, denom: &str) -> Uint128 {
    app.wrap()
        .query_balance(address.to_string(), denom.to_string())
        .unwrap()
        .amount
}

pub fn as_contract_error(err: &anyhow::Error) -> &ContractError {
    err.root_cause().downcast_ref::<ContractError>().unwrap()
}
