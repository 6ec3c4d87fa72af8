use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{HexBinary, Uint128};

use crate::allowlist::AllowlistConfig;
use crate::phases::{Phase, PhaseId};
use crate::state::{CollectionDetails, Config};
use crate::token::TokenId;

#[cw_serde]
pub struct InstantiateMsg {
    pub name: String,
    pub symbol: String,
    pub max_supply: u32,
    pub mint_denom: String,
    pub mint_price: Uint128,
    pub per_wallet_limit: u32,
    pub base_uri: String,
    pub placeholder_uri: String,
    pub contract_uri: String,
    pub admin: Option<String>,
    pub payment_collector: Option<String>,
    pub fee_recipient: Option<String>,
    pub launchpad_fee: Option<Uint128>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Payable. Must attach at least phase price x quantity, plus the
    /// launchpad fee when a fee recipient is configured.
    Mint {
        quantity: u32,
        proof: Option<Vec<HexBinary>>,
    },
    AddPhase {
        name: String,
        start_time: u64,
        end_time: u64,
        price: Uint128,
        per_wallet_limit: u32,
    },
    UpdatePhase {
        phase_id: PhaseId,
        name: String,
        start_time: u64,
        end_time: u64,
        price: Uint128,
        per_wallet_limit: u32,
    },
    RemovePhase {
        phase_id: PhaseId,
    },
    SetAllowlistEnabled {
        phase_id: PhaseId,
        enabled: bool,
    },
    SetMerkleRoot {
        phase_id: PhaseId,
        root: Option<HexBinary>,
    },
    SetAllowlistMembers {
        phase_id: PhaseId,
        wallets: Vec<String>,
        allowed: bool,
    },
    SetBaseUri {
        base_uri: String,
    },
    SetRevealed {
        revealed: bool,
    },
    SetTransfersLocked {
        locked: bool,
    },
    SetLaunchpadFee {
        fee: Uint128,
    },
    SetFeeRecipient {
        recipient: Option<String>,
    },
    Pause {},
    Unpause {},
    Withdraw {},
    TransferToken {
        recipient: String,
        token_id: TokenId,
    },
    Approve {
        spender: String,
        token_id: TokenId,
    },
    RevokeApproval {
        token_id: TokenId,
    },
    ApproveAll {
        operator: String,
    },
    RevokeAll {
        operator: String,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Config)]
    Config {},

    #[returns(CollectionDetails)]
    Collection {},

    #[returns(SupplyResponse)]
    Supply {},

    #[returns(FlagsResponse)]
    Flags {},

    #[returns(u32)]
    PhaseCount {},

    #[returns(Phase)]
    Phase { phase_id: PhaseId },

    #[returns(Vec<(PhaseId, Phase)>)]
    Phases {},

    #[returns(Option<ActivePhaseResponse>)]
    ActivePhase {},

    #[returns(AllowlistConfig)]
    AllowlistConfig { phase_id: PhaseId },

    #[returns(bool)]
    AllowlistMember { phase_id: PhaseId, address: String },

    #[returns(bool)]
    IsEligible {
        phase_id: PhaseId,
        address: String,
        proof: Option<Vec<HexBinary>>,
    },

    #[returns(u32)]
    MintCount { phase_id: PhaseId, address: String },

    #[returns(String)]
    OwnerOf { token_id: TokenId },

    #[returns(Option<String>)]
    Approved { token_id: TokenId },

    #[returns(bool)]
    IsApprovedForAll { owner: String, operator: String },

    #[returns(String)]
    TokenUri { token_id: TokenId },
}

#[cw_serde]
pub struct SupplyResponse {
    pub total_supply: u32,
    pub max_supply: u32,
    pub next_token_id: u32,
}

#[cw_serde]
pub struct FlagsResponse {
    pub paused: bool,
    pub transfers_locked: bool,
    pub revealed: bool,
}

#[cw_serde]
pub struct ActivePhaseResponse {
    pub phase_id: PhaseId,
    pub phase: Phase,
}
