#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, BankMsg, Binary, Coin, CosmosMsg, Deps, DepsMut, Env, HexBinary, MessageInfo,
    Response, StdError, StdResult, Uint128,
};

use cw2::set_contract_version;
use cw_utils::{may_pay, maybe_addr, nonpayable};
use gates::GateState;

use crate::allowlist::{AllowlistConfig, PhaseAllowlists};
use crate::error::ContractError;
use crate::msg::{
    ActivePhaseResponse, ExecuteMsg, FlagsResponse, InstantiateMsg, QueryMsg, SupplyResponse,
};
use crate::phases::{Phase, PhaseId, Phases};
use crate::state::{
    CollectionDetails, Config, MintCounts, COLLECTION, CONFIG, LAST_MINTED_TOKEN_ID,
    MINT_COUNTS_KEY,
};
use crate::token::{TokenId, TokenLedger};
use crate::utils::{ensure_admin, fee_portion, mint_cost, settlement_msgs, token_uri};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:phased-minter";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

const PHASES: Phases = Phases::new();
const ALLOWLISTS: PhaseAllowlists = PhaseAllowlists::new();
const MINT_COUNTS: MintCounts = MintCounts::new(MINT_COUNTS_KEY);
const TOKENS: TokenLedger = TokenLedger::new();
const GATES: GateState = GateState::new();

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if msg.max_supply == 0 {
        return Err(ContractError::InvalidMaxSupply {});
    }
    if msg.per_wallet_limit == 0 {
        return Err(ContractError::PerWalletLimitZero {});
    }

    let admin = maybe_addr(deps.api, msg.admin.clone())?.unwrap_or(info.sender.clone());
    let payment_collector =
        maybe_addr(deps.api, msg.payment_collector.clone())?.unwrap_or(admin.clone());
    let fee_recipient = maybe_addr(deps.api, msg.fee_recipient.clone())?;

    let config = Config {
        admin,
        payment_collector,
        mint_denom: msg.mint_denom,
        max_supply: msg.max_supply,
        mint_price: msg.mint_price,
        per_wallet_limit: msg.per_wallet_limit,
        fee_recipient,
        launchpad_fee: msg.launchpad_fee.unwrap_or(Uint128::zero()),
    };
    CONFIG.save(deps.storage, &config)?;

    let collection = CollectionDetails {
        name: msg.name,
        symbol: msg.symbol,
        base_uri: msg.base_uri,
        placeholder_uri: msg.placeholder_uri,
        contract_uri: msg.contract_uri,
    };
    COLLECTION.save(deps.storage, &collection)?;

    LAST_MINTED_TOKEN_ID.save(deps.storage, &0)?;
    GATES.initialize(deps.storage)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract_name", CONTRACT_NAME)
        .add_attribute("contract_version", CONTRACT_VERSION))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Mint { quantity, proof } => execute_mint(deps, env, info, quantity, proof),
        ExecuteMsg::AddPhase {
            name,
            start_time,
            end_time,
            price,
            per_wallet_limit,
        } => {
            let phase = Phase {
                name,
                start_time,
                end_time,
                price,
                per_wallet_limit,
            };
            execute_add_phase(deps, info, phase)
        }
        ExecuteMsg::UpdatePhase {
            phase_id,
            name,
            start_time,
            end_time,
            price,
            per_wallet_limit,
        } => {
            let phase = Phase {
                name,
                start_time,
                end_time,
                price,
                per_wallet_limit,
            };
            execute_update_phase(deps, info, phase_id, phase)
        }
        ExecuteMsg::RemovePhase { phase_id } => execute_remove_phase(deps, info, phase_id),
        ExecuteMsg::SetAllowlistEnabled { phase_id, enabled } => {
            execute_set_allowlist_enabled(deps, info, phase_id, enabled)
        }
        ExecuteMsg::SetMerkleRoot { phase_id, root } => {
            execute_set_merkle_root(deps, info, phase_id, root)
        }
        ExecuteMsg::SetAllowlistMembers {
            phase_id,
            wallets,
            allowed,
        } => execute_set_allowlist_members(deps, info, phase_id, wallets, allowed),
        ExecuteMsg::SetBaseUri { base_uri } => execute_set_base_uri(deps, info, base_uri),
        ExecuteMsg::SetRevealed { revealed } => execute_set_revealed(deps, info, revealed),
        ExecuteMsg::SetTransfersLocked { locked } => {
            execute_set_transfers_locked(deps, info, locked)
        }
        ExecuteMsg::SetLaunchpadFee { fee } => execute_set_launchpad_fee(deps, info, fee),
        ExecuteMsg::SetFeeRecipient { recipient } => {
            execute_set_fee_recipient(deps, info, recipient)
        }
        ExecuteMsg::Pause {} => execute_set_paused(deps, info, true),
        ExecuteMsg::Unpause {} => execute_set_paused(deps, info, false),
        ExecuteMsg::Withdraw {} => execute_withdraw(deps, env, info),
        ExecuteMsg::TransferToken {
            recipient,
            token_id,
        } => execute_transfer_token(deps, info, recipient, token_id),
        ExecuteMsg::Approve { spender, token_id } => {
            execute_approve(deps, info, spender, token_id)
        }
        ExecuteMsg::RevokeApproval { token_id } => execute_revoke_approval(deps, info, token_id),
        ExecuteMsg::ApproveAll { operator } => execute_set_operator(deps, info, operator, true),
        ExecuteMsg::RevokeAll { operator } => execute_set_operator(deps, info, operator, false),
    }
}

pub fn execute_mint(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    quantity: u32,
    proof: Option<Vec<HexBinary>>,
) -> Result<Response, ContractError> {
    GATES.error_if_paused(deps.storage)?;

    if quantity == 0 {
        return Err(ContractError::InvalidMintQuantity {});
    }

    let config = CONFIG.load(deps.storage)?;

    let (phase_id, phase) = PHASES
        .active(deps.storage, env.block.time.seconds())?
        .ok_or(ContractError::NoActivePhase {})?;

    let proof = proof.unwrap_or_default();
    if !ALLOWLISTS.is_eligible(deps.storage, phase_id, &info.sender, &proof)? {
        return Err(ContractError::NotAllowlisted {});
    }

    let last_token_id = LAST_MINTED_TOKEN_ID.load(deps.storage)?;
    let new_supply = last_token_id
        .checked_add(quantity)
        .ok_or(ContractError::SupplyExceeded {})?;
    if new_supply > config.max_supply {
        return Err(ContractError::SupplyExceeded {});
    }

    MINT_COUNTS.record(
        deps.storage,
        phase_id,
        &info.sender,
        quantity,
        phase.per_wallet_limit,
    )?;

    let cost = mint_cost(phase.price, quantity)?;
    let required = cost
        .checked_add(fee_portion(&config))
        .map_err(|err| ContractError::Std(StdError::overflow(err)))?;
    let paid = may_pay(&info, &config.mint_denom)?;
    if paid < required {
        return Err(ContractError::InsufficientPayment {
            expected: required,
            sent: paid,
        });
    }

    // Issue sequential token ids starting right after the last one
    let token_ids: Vec<TokenId> = (last_token_id + 1..=new_supply).collect();
    for token_id in &token_ids {
        TOKENS.mint(deps.storage, *token_id, &info.sender)?;
    }
    LAST_MINTED_TOKEN_ID.save(deps.storage, &new_supply)?;

    // Overpayment beyond cost and fee stays on the contract by design
    let messages = settlement_msgs(&config, cost);

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("action", "mint")
        .add_attribute("phase_id", phase_id.to_string())
        .add_attribute("quantity", quantity.to_string())
        .add_attribute(
            "token_ids",
            token_ids
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(","),
        ))
}

pub fn execute_add_phase(
    deps: DepsMut,
    info: MessageInfo,
    phase: Phase,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info.sender)?;

    let phase_id = PHASES.add(deps.storage, &phase)?;

    Ok(Response::new()
        .add_attribute("action", "add_phase")
        .add_attribute("phase_id", phase_id.to_string())
        .add_attribute("name", phase.name))
}

pub fn execute_update_phase(
    deps: DepsMut,
    info: MessageInfo,
    phase_id: PhaseId,
    phase: Phase,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info.sender)?;

    PHASES.update(deps.storage, phase_id, &phase)?;

    Ok(Response::new()
        .add_attribute("action", "update_phase")
        .add_attribute("phase_id", phase_id.to_string()))
}

pub fn execute_remove_phase(
    deps: DepsMut,
    info: MessageInfo,
    phase_id: PhaseId,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info.sender)?;

    PHASES.remove(deps.storage, phase_id)?;

    Ok(Response::new()
        .add_attribute("action", "remove_phase")
        .add_attribute("phase_id", phase_id.to_string()))
}

pub fn execute_set_allowlist_enabled(
    deps: DepsMut,
    info: MessageInfo,
    phase_id: PhaseId,
    enabled: bool,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info.sender)?;

    PHASES.load(deps.storage, phase_id)?;
    ALLOWLISTS.set_enabled(deps.storage, phase_id, enabled)?;

    Ok(Response::new()
        .add_attribute("action", "set_allowlist_enabled")
        .add_attribute("phase_id", phase_id.to_string())
        .add_attribute("enabled", enabled.to_string()))
}

pub fn execute_set_merkle_root(
    deps: DepsMut,
    info: MessageInfo,
    phase_id: PhaseId,
    root: Option<HexBinary>,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info.sender)?;

    PHASES.load(deps.storage, phase_id)?;
    ALLOWLISTS.set_root(deps.storage, phase_id, root)?;

    Ok(Response::new()
        .add_attribute("action", "set_merkle_root")
        .add_attribute("phase_id", phase_id.to_string()))
}

pub fn execute_set_allowlist_members(
    deps: DepsMut,
    info: MessageInfo,
    phase_id: PhaseId,
    wallets: Vec<String>,
    allowed: bool,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info.sender)?;

    PHASES.load(deps.storage, phase_id)?;

    let wallets = wallets
        .iter()
        .map(|wallet| deps.api.addr_validate(wallet))
        .collect::<StdResult<Vec<_>>>()?;
    ALLOWLISTS.set_members(deps.storage, phase_id, &wallets, allowed)?;

    Ok(Response::new()
        .add_attribute("action", "set_allowlist_members")
        .add_attribute("phase_id", phase_id.to_string())
        .add_attribute("wallets", wallets.len().to_string())
        .add_attribute("allowed", allowed.to_string()))
}

pub fn execute_set_base_uri(
    deps: DepsMut,
    info: MessageInfo,
    base_uri: String,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info.sender)?;

    let mut collection = COLLECTION.load(deps.storage)?;
    collection.base_uri = base_uri;
    COLLECTION.save(deps.storage, &collection)?;

    Ok(Response::new().add_attribute("action", "set_base_uri"))
}

pub fn execute_set_revealed(
    deps: DepsMut,
    info: MessageInfo,
    revealed: bool,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info.sender)?;

    GATES.set_revealed(deps.storage, revealed)?;

    Ok(Response::new()
        .add_attribute("action", "set_revealed")
        .add_attribute("revealed", revealed.to_string()))
}

pub fn execute_set_transfers_locked(
    deps: DepsMut,
    info: MessageInfo,
    locked: bool,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info.sender)?;

    GATES.set_transfers_locked(deps.storage, locked)?;

    Ok(Response::new()
        .add_attribute("action", "set_transfers_locked")
        .add_attribute("locked", locked.to_string()))
}

pub fn execute_set_launchpad_fee(
    deps: DepsMut,
    info: MessageInfo,
    fee: Uint128,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let mut config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info.sender)?;

    config.launchpad_fee = fee;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "set_launchpad_fee")
        .add_attribute("fee", fee.to_string()))
}

pub fn execute_set_fee_recipient(
    deps: DepsMut,
    info: MessageInfo,
    recipient: Option<String>,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let mut config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info.sender)?;

    config.fee_recipient = maybe_addr(deps.api, recipient)?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("action", "set_fee_recipient"))
}

pub fn execute_set_paused(
    deps: DepsMut,
    info: MessageInfo,
    paused: bool,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info.sender)?;

    GATES.set_paused(deps.storage, paused)?;

    Ok(Response::new()
        .add_attribute("action", if paused { "pause" } else { "unpause" }))
}

pub fn execute_withdraw(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info.sender)?;

    let balance = deps
        .querier
        .query_balance(env.contract.address, config.mint_denom.clone())?;
    if balance.amount.is_zero() {
        return Err(ContractError::NothingToWithdraw {});
    }

    let withdraw_msg: CosmosMsg = BankMsg::Send {
        to_address: config.payment_collector.to_string(),
        amount: vec![Coin {
            denom: balance.denom,
            amount: balance.amount,
        }],
    }
    .into();

    Ok(Response::new()
        .add_message(withdraw_msg)
        .add_attribute("action", "withdraw")
        .add_attribute("amount", balance.amount.to_string()))
}

pub fn execute_transfer_token(
    deps: DepsMut,
    info: MessageInfo,
    recipient: String,
    token_id: TokenId,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    GATES.error_if_transfers_locked(deps.storage)?;

    let recipient = deps.api.addr_validate(&recipient)?;
    TOKENS.transfer(deps.storage, &info.sender, &recipient, token_id)?;

    Ok(Response::new()
        .add_attribute("action", "transfer_token")
        .add_attribute("token_id", token_id.to_string())
        .add_attribute("recipient", recipient))
}

pub fn execute_approve(
    deps: DepsMut,
    info: MessageInfo,
    spender: String,
    token_id: TokenId,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    GATES.error_if_transfers_locked(deps.storage)?;

    let spender = deps.api.addr_validate(&spender)?;
    TOKENS.approve(deps.storage, &info.sender, &spender, token_id)?;

    Ok(Response::new()
        .add_attribute("action", "approve")
        .add_attribute("token_id", token_id.to_string())
        .add_attribute("spender", spender))
}

pub fn execute_revoke_approval(
    deps: DepsMut,
    info: MessageInfo,
    token_id: TokenId,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    TOKENS.revoke(deps.storage, &info.sender, token_id)?;

    Ok(Response::new()
        .add_attribute("action", "revoke_approval")
        .add_attribute("token_id", token_id.to_string()))
}

pub fn execute_set_operator(
    deps: DepsMut,
    info: MessageInfo,
    operator: String,
    approved: bool,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    if approved {
        GATES.error_if_transfers_locked(deps.storage)?;
    }

    let operator = deps.api.addr_validate(&operator)?;
    TOKENS.set_operator(deps.storage, &info.sender, &operator, approved)?;

    Ok(Response::new()
        .add_attribute("action", if approved { "approve_all" } else { "revoke_all" })
        .add_attribute("operator", operator))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&CONFIG.load(deps.storage)?),
        QueryMsg::Collection {} => to_json_binary(&COLLECTION.load(deps.storage)?),
        QueryMsg::Supply {} => to_json_binary(&query_supply(deps)?),
        QueryMsg::Flags {} => to_json_binary(&query_flags(deps)?),
        QueryMsg::PhaseCount {} => to_json_binary(&PHASES.count(deps.storage)?),
        QueryMsg::Phase { phase_id } => to_json_binary(&query_phase(deps, phase_id)?),
        QueryMsg::Phases {} => to_json_binary(&PHASES.all(deps.storage)?),
        QueryMsg::ActivePhase {} => to_json_binary(&query_active_phase(deps, env)?),
        QueryMsg::AllowlistConfig { phase_id } => {
            to_json_binary(&query_allowlist_config(deps, phase_id)?)
        }
        QueryMsg::AllowlistMember { phase_id, address } => {
            to_json_binary(&query_allowlist_member(deps, phase_id, address)?)
        }
        QueryMsg::IsEligible {
            phase_id,
            address,
            proof,
        } => to_json_binary(&query_is_eligible(deps, phase_id, address, proof)?),
        QueryMsg::MintCount { phase_id, address } => {
            to_json_binary(&query_mint_count(deps, phase_id, address)?)
        }
        QueryMsg::OwnerOf { token_id } => to_json_binary(&query_owner_of(deps, token_id)?),
        QueryMsg::Approved { token_id } => to_json_binary(&query_approved(deps, token_id)?),
        QueryMsg::IsApprovedForAll { owner, operator } => {
            to_json_binary(&query_is_approved_for_all(deps, owner, operator)?)
        }
        QueryMsg::TokenUri { token_id } => to_json_binary(&query_token_uri(deps, token_id)?),
    }
}

fn query_supply(deps: Deps) -> Result<SupplyResponse, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let total_supply = LAST_MINTED_TOKEN_ID.load(deps.storage)?;
    Ok(SupplyResponse {
        total_supply,
        max_supply: config.max_supply,
        next_token_id: total_supply + 1,
    })
}

fn query_flags(deps: Deps) -> Result<FlagsResponse, ContractError> {
    Ok(FlagsResponse {
        paused: GATES.is_paused(deps.storage)?,
        transfers_locked: GATES.is_transfers_locked(deps.storage)?,
        revealed: GATES.is_revealed(deps.storage)?,
    })
}

fn query_phase(deps: Deps, phase_id: PhaseId) -> Result<Phase, ContractError> {
    PHASES.load(deps.storage, phase_id)
}

fn query_active_phase(deps: Deps, env: Env) -> Result<Option<ActivePhaseResponse>, ContractError> {
    let active = PHASES.active(deps.storage, env.block.time.seconds())?;
    Ok(active.map(|(phase_id, phase)| ActivePhaseResponse { phase_id, phase }))
}

fn query_allowlist_config(deps: Deps, phase_id: PhaseId) -> Result<AllowlistConfig, ContractError> {
    PHASES.load(deps.storage, phase_id)?;
    Ok(ALLOWLISTS.config(deps.storage, phase_id)?)
}

fn query_allowlist_member(
    deps: Deps,
    phase_id: PhaseId,
    address: String,
) -> Result<bool, ContractError> {
    let address = deps.api.addr_validate(&address)?;
    PHASES.load(deps.storage, phase_id)?;
    Ok(ALLOWLISTS.is_member(deps.storage, phase_id, &address)?)
}

fn query_is_eligible(
    deps: Deps,
    phase_id: PhaseId,
    address: String,
    proof: Option<Vec<HexBinary>>,
) -> Result<bool, ContractError> {
    let address = deps.api.addr_validate(&address)?;
    PHASES.load(deps.storage, phase_id)?;
    ALLOWLISTS.is_eligible(deps.storage, phase_id, &address, &proof.unwrap_or_default())
}

fn query_mint_count(deps: Deps, phase_id: PhaseId, address: String) -> Result<u32, ContractError> {
    let address = deps.api.addr_validate(&address)?;
    Ok(MINT_COUNTS.count(deps.storage, phase_id, &address)?)
}

fn query_owner_of(deps: Deps, token_id: TokenId) -> Result<String, ContractError> {
    Ok(TOKENS.owner_of(deps.storage, token_id)?.into_string())
}

fn query_approved(deps: Deps, token_id: TokenId) -> Result<Option<String>, ContractError> {
    let locked = GATES.is_transfers_locked(deps.storage)?;
    let approved = TOKENS.approved(deps.storage, token_id, locked)?;
    Ok(approved.map(|spender| spender.into_string()))
}

fn query_is_approved_for_all(
    deps: Deps,
    owner: String,
    operator: String,
) -> Result<bool, ContractError> {
    let owner = deps.api.addr_validate(&owner)?;
    let operator = deps.api.addr_validate(&operator)?;
    let locked = GATES.is_transfers_locked(deps.storage)?;
    Ok(TOKENS.is_operator(deps.storage, &owner, &operator, locked)?)
}

fn query_token_uri(deps: Deps, token_id: TokenId) -> Result<String, ContractError> {
    TOKENS.owner_of(deps.storage, token_id)?;
    let collection = COLLECTION.load(deps.storage)?;
    let revealed = GATES.is_revealed(deps.storage)?;
    Ok(token_uri(&collection, revealed, token_id))
}
