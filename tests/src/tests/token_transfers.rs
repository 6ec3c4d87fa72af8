use cosmwasm_std::coin;
use cw_multi_test::Executor;

use gates::GateError;
use phased_minter::error::ContractError;
use phased_minter::msg::{ExecuteMsg, FlagsResponse, QueryMsg};

use crate::helpers::mock_messages::{
    return_minter_instantiate_msg, return_open_phase_msg, DENOM, MINT_PRICE,
};
use crate::helpers::setup::{instantiate_minter, setup};
use crate::helpers::utils::{as_contract_error, mint_to_address};

/// Mints one token to `user` and returns its id.
fn setup_with_token(
    app: &mut cw_multi_test::App,
    code_id: u64,
    admin: &cosmwasm_std::Addr,
    user: &cosmwasm_std::Addr,
) -> cosmwasm_std::Addr {
    let minter = instantiate_minter(app, code_id, admin, &return_minter_instantiate_msg());
    app.execute_contract(admin.clone(), minter.clone(), &return_open_phase_msg(), &[])
        .unwrap();
    mint_to_address(app, user.to_string(), vec![coin(1_000_000, DENOM)]);
    app.execute_contract(
        user.clone(),
        minter.clone(),
        &ExecuteMsg::Mint {
            quantity: 1,
            proof: None,
        },
        &[coin(MINT_PRICE, DENOM)],
    )
    .unwrap();
    minter
}

#[test]
fn transfers_are_locked_at_launch() {
    let res = setup();
    let mut app = res.app;
    let admin = res.test_accounts.admin;
    let user = res.test_accounts.user;
    let other = res.test_accounts.other;

    let minter = setup_with_token(&mut app, res.minter_code_id, &admin, &user);

    let flags: FlagsResponse = app
        .wrap()
        .query_wasm_smart(minter.clone(), &QueryMsg::Flags {})
        .unwrap();
    assert!(flags.transfers_locked);

    let err = app
        .execute_contract(
            user.clone(),
            minter.clone(),
            &ExecuteMsg::TransferToken {
                recipient: other.to_string(),
                token_id: 1,
            },
            &[],
        )
        .unwrap_err();
    assert_eq!(
        as_contract_error(&err),
        &ContractError::Gate(GateError::TransfersLocked {})
    );

    let err = app
        .execute_contract(
            user.clone(),
            minter.clone(),
            &ExecuteMsg::Approve {
                spender: other.to_string(),
                token_id: 1,
            },
            &[],
        )
        .unwrap_err();
    assert_eq!(
        as_contract_error(&err),
        &ContractError::Gate(GateError::TransfersLocked {})
    );

    let err = app
        .execute_contract(
            user.clone(),
            minter,
            &ExecuteMsg::ApproveAll {
                operator: other.to_string(),
            },
            &[],
        )
        .unwrap_err();
    assert_eq!(
        as_contract_error(&err),
        &ContractError::Gate(GateError::TransfersLocked {})
    );
}

#[test]
fn unlocking_enables_transfers() {
    let res = setup();
    let mut app = res.app;
    let admin = res.test_accounts.admin;
    let user = res.test_accounts.user;
    let other = res.test_accounts.other;

    let minter = setup_with_token(&mut app, res.minter_code_id, &admin, &user);

    app.execute_contract(
        admin.clone(),
        minter.clone(),
        &ExecuteMsg::SetTransfersLocked { locked: false },
        &[],
    )
    .unwrap();

    app.execute_contract(
        user.clone(),
        minter.clone(),
        &ExecuteMsg::TransferToken {
            recipient: other.to_string(),
            token_id: 1,
        },
        &[],
    )
    .unwrap();

    let owner: String = app
        .wrap()
        .query_wasm_smart(minter, &QueryMsg::OwnerOf { token_id: 1 })
        .unwrap();
    assert_eq!(owner, other.to_string());
}

#[test]
fn approved_spender_can_transfer() {
    let res = setup();
    let mut app = res.app;
    let admin = res.test_accounts.admin;
    let user = res.test_accounts.user;
    let other = res.test_accounts.other;

    let minter = setup_with_token(&mut app, res.minter_code_id, &admin, &user);
    app.execute_contract(
        admin.clone(),
        minter.clone(),
        &ExecuteMsg::SetTransfersLocked { locked: false },
        &[],
    )
    .unwrap();

    app.execute_contract(
        user.clone(),
        minter.clone(),
        &ExecuteMsg::Approve {
            spender: other.to_string(),
            token_id: 1,
        },
        &[],
    )
    .unwrap();

    let approved: Option<String> = app
        .wrap()
        .query_wasm_smart(minter.clone(), &QueryMsg::Approved { token_id: 1 })
        .unwrap();
    assert_eq!(approved, Some(other.to_string()));

    // The spender moves the token to themselves; the approval is consumed
    app.execute_contract(
        other.clone(),
        minter.clone(),
        &ExecuteMsg::TransferToken {
            recipient: other.to_string(),
            token_id: 1,
        },
        &[],
    )
    .unwrap();

    let owner: String = app
        .wrap()
        .query_wasm_smart(minter.clone(), &QueryMsg::OwnerOf { token_id: 1 })
        .unwrap();
    assert_eq!(owner, other.to_string());

    let approved: Option<String> = app
        .wrap()
        .query_wasm_smart(minter, &QueryMsg::Approved { token_id: 1 })
        .unwrap();
    assert_eq!(approved, None);
}

#[test]
fn stranger_cannot_transfer_someone_elses_token() {
    let res = setup();
    let mut app = res.app;
    let admin = res.test_accounts.admin;
    let user = res.test_accounts.user;
    let other = res.test_accounts.other;

    let minter = setup_with_token(&mut app, res.minter_code_id, &admin, &user);
    app.execute_contract(
        admin.clone(),
        minter.clone(),
        &ExecuteMsg::SetTransfersLocked { locked: false },
        &[],
    )
    .unwrap();

    let err = app
        .execute_contract(
            other.clone(),
            minter,
            &ExecuteMsg::TransferToken {
                recipient: other.to_string(),
                token_id: 1,
            },
            &[],
        )
        .unwrap_err();
    assert_eq!(as_contract_error(&err), &ContractError::Unauthorized {});
}

#[test]
fn relocking_hides_approvals_without_erasing_them() {
    let res = setup();
    let mut app = res.app;
    let admin = res.test_accounts.admin;
    let user = res.test_accounts.user;
    let other = res.test_accounts.other;

    let minter = setup_with_token(&mut app, res.minter_code_id, &admin, &user);
    app.execute_contract(
        admin.clone(),
        minter.clone(),
        &ExecuteMsg::SetTransfersLocked { locked: false },
        &[],
    )
    .unwrap();
    app.execute_contract(
        user.clone(),
        minter.clone(),
        &ExecuteMsg::Approve {
            spender: other.to_string(),
            token_id: 1,
        },
        &[],
    )
    .unwrap();
    app.execute_contract(
        user.clone(),
        minter.clone(),
        &ExecuteMsg::ApproveAll {
            operator: other.to_string(),
        },
        &[],
    )
    .unwrap();

    app.execute_contract(
        admin.clone(),
        minter.clone(),
        &ExecuteMsg::SetTransfersLocked { locked: true },
        &[],
    )
    .unwrap();

    // Locked: the grants read as absent
    let approved: Option<String> = app
        .wrap()
        .query_wasm_smart(minter.clone(), &QueryMsg::Approved { token_id: 1 })
        .unwrap();
    assert_eq!(approved, None);
    let is_operator: bool = app
        .wrap()
        .query_wasm_smart(
            minter.clone(),
            &QueryMsg::IsApprovedForAll {
                owner: user.to_string(),
                operator: other.to_string(),
            },
        )
        .unwrap();
    assert!(!is_operator);

    // Unlocked again: the same grants resurface untouched
    app.execute_contract(
        admin.clone(),
        minter.clone(),
        &ExecuteMsg::SetTransfersLocked { locked: false },
        &[],
    )
    .unwrap();
    let approved: Option<String> = app
        .wrap()
        .query_wasm_smart(minter.clone(), &QueryMsg::Approved { token_id: 1 })
        .unwrap();
    assert_eq!(approved, Some(other.to_string()));
    let is_operator: bool = app
        .wrap()
        .query_wasm_smart(
            minter,
            &QueryMsg::IsApprovedForAll {
                owner: user.to_string(),
                operator: other.to_string(),
            },
        )
        .unwrap();
    assert!(is_operator);
}

#[test]
fn revocation_works_while_locked() {
    let res = setup();
    let mut app = res.app;
    let admin = res.test_accounts.admin;
    let user = res.test_accounts.user;
    let other = res.test_accounts.other;

    let minter = setup_with_token(&mut app, res.minter_code_id, &admin, &user);
    app.execute_contract(
        admin.clone(),
        minter.clone(),
        &ExecuteMsg::SetTransfersLocked { locked: false },
        &[],
    )
    .unwrap();
    app.execute_contract(
        user.clone(),
        minter.clone(),
        &ExecuteMsg::Approve {
            spender: other.to_string(),
            token_id: 1,
        },
        &[],
    )
    .unwrap();
    app.execute_contract(
        admin.clone(),
        minter.clone(),
        &ExecuteMsg::SetTransfersLocked { locked: true },
        &[],
    )
    .unwrap();

    // Pulling a grant back never waits for the lock
    app.execute_contract(
        user.clone(),
        minter.clone(),
        &ExecuteMsg::RevokeApproval { token_id: 1 },
        &[],
    )
    .unwrap();

    app.execute_contract(
        admin.clone(),
        minter.clone(),
        &ExecuteMsg::SetTransfersLocked { locked: false },
        &[],
    )
    .unwrap();
    let approved: Option<String> = app
        .wrap()
        .query_wasm_smart(minter, &QueryMsg::Approved { token_id: 1 })
        .unwrap();
    assert_eq!(approved, None);
}

#[test]
fn token_uri_follows_the_reveal_flag() {
    let res = setup();
    let mut app = res.app;
    let admin = res.test_accounts.admin;
    let user = res.test_accounts.user;

    let minter = setup_with_token(&mut app, res.minter_code_id, &admin, &user);

    let uri: String = app
        .wrap()
        .query_wasm_smart(minter.clone(), &QueryMsg::TokenUri { token_id: 1 })
        .unwrap();
    assert_eq!(uri, "ipfs://hidden.json");

    app.execute_contract(
        admin.clone(),
        minter.clone(),
        &ExecuteMsg::SetRevealed { revealed: true },
        &[],
    )
    .unwrap();

    let uri: String = app
        .wrap()
        .query_wasm_smart(minter.clone(), &QueryMsg::TokenUri { token_id: 1 })
        .unwrap();
    assert_eq!(uri, "ipfs://base/1.json");

    // Unknown ids still error rather than producing a URI
    let err = app
        .wrap()
        .query_wasm_smart::<String>(minter, &QueryMsg::TokenUri { token_id: 99 })
        .unwrap_err();
    assert!(err.to_string().contains("Token not found"));
}
