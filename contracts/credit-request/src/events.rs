//! Event types and topic constants for the credit request contract.
//! Stable event schemas for indexing; `created` is how callers learn a new request id.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

/// Emitted once per successfully created request.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RequestCreatedEvent {
    pub user: Address,
    pub request_id: u64,
    pub amount: i128,
}

/// Emitted when either side records a decision.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DecisionEvent {
    pub user: Address,
    pub request_id: u64,
    pub accepted_amount: i128,
}

/// Emitted when funds are added to the reserve.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositEvent {
    pub from: Address,
    pub amount: i128,
    pub new_reserve: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DelegationEvent {
    pub owner: Address,
    pub delegate: Address,
}

pub fn publish_request_created(env: &Env, event: RequestCreatedEvent) {
    env.events()
        .publish((symbol_short!("credit"), symbol_short!("created")), event);
}

/// Publish a bank or user decision under the given kind (`bank_acc`, `usr_dec`, ...).
pub fn publish_decision(env: &Env, kind: Symbol, event: DecisionEvent) {
    env.events().publish((symbol_short!("credit"), kind), event);
}

pub fn publish_deposit(env: &Env, event: DepositEvent) {
    env.events()
        .publish((symbol_short!("credit"), symbol_short!("deposit")), event);
}

pub fn publish_delegation(env: &Env, granted: bool, event: DelegationEvent) {
    let kind = if granted {
        symbol_short!("dlg_add")
    } else {
        symbol_short!("dlg_rm")
    };
    env.events().publish((symbol_short!("credit"), kind), event);
}
