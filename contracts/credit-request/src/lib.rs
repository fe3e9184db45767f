#![no_std]

//! Credit request contract: users (or their delegates) ask for credit, the bank
//! accepts with a funded amount or declines, and only then may the user accept,
//! which pays the funded amount out of the reserve, or decline.
//!
//! Each request is decided at most once per side:
//!
//! ```text
//! (Unset, Unset) -> (Accepted, Unset) -> (Accepted, Accepted) | (Accepted, Declined)
//!                -> (Declined, Unset)
//! ```
//!
//! Records are never removed. Every entry point validates all of its
//! preconditions before writing, and an `Err` return rolls the invocation back.

mod delegation;
mod events;
mod reserve;
mod storage;
mod types;

use soroban_sdk::{contract, contractimpl, log, symbol_short, Address, Env, Symbol};

use delegation::{authorize_for, Actor};
use events::{publish_decision, publish_request_created, DecisionEvent, RequestCreatedEvent};
pub use types::{ContractError, CreditRequest, Decision, DecisionStatus};

fn require_bank_auth(env: &Env) -> Result<Address, ContractError> {
    let bank = storage::bank(env).ok_or(ContractError::NotInitialized)?;
    bank.require_auth();
    Ok(bank)
}

fn load_existing(env: &Env, user: &Address, request_id: u64) -> Result<CreditRequest, ContractError> {
    if request_id == 0 {
        return Err(ContractError::InvalidArgument);
    }
    storage::load_request(env, user, request_id).ok_or(ContractError::NotFound)
}

fn open_request(
    env: &Env,
    user: &Address,
    amount: i128,
    initiator: &Address,
) -> Result<u64, ContractError> {
    if !storage::is_initialized(env) {
        return Err(ContractError::NotInitialized);
    }
    let actor = authorize_for(env, user, initiator)?;
    if amount <= 0 {
        return Err(ContractError::InvalidArgument);
    }

    let id = storage::next_request_id(env, user)?;
    let request = CreditRequest {
        user: user.clone(),
        id,
        requested_amount: amount,
        accepted_amount: 0,
        bank_status: DecisionStatus::Unset,
        user_status: DecisionStatus::Unset,
        created_at: env.ledger().timestamp(),
    };
    storage::store_request(env, &request);
    storage::bump_instance(env);

    if let Actor::Delegate(delegate) = actor {
        log!(env, "request opened by delegate", delegate);
    }
    log!(env, "request opened", user.clone(), id, amount);
    publish_request_created(
        env,
        RequestCreatedEvent {
            user: user.clone(),
            request_id: id,
            amount,
        },
    );
    Ok(id)
}

fn bank_decide(
    env: &Env,
    user: &Address,
    request_id: u64,
    decision: Decision,
    funded_amount: i128,
) -> Result<(), ContractError> {
    require_bank_auth(env)?;
    if decision == Decision::Accept && funded_amount <= 0 {
        return Err(ContractError::InvalidArgument);
    }
    let mut request = load_existing(env, user, request_id)?;
    if !request.awaiting_bank() {
        return Err(ContractError::IllegalStateTransition);
    }

    if decision == Decision::Accept {
        request.accepted_amount = funded_amount;
    }
    request.bank_status = decision.status();
    storage::store_request(env, &request);

    let kind = match decision {
        Decision::Accept => symbol_short!("bank_acc"),
        Decision::Decline => symbol_short!("bank_dec"),
    };
    publish_decided(env, kind, &request);
    Ok(())
}

fn user_decide(
    env: &Env,
    user: &Address,
    request_id: u64,
    decision: Decision,
    initiator: &Address,
) -> Result<(), ContractError> {
    let actor = authorize_for(env, user, initiator)?;
    let mut request = load_existing(env, user, request_id)?;
    if !request.awaiting_user() {
        return Err(ContractError::IllegalStateTransition);
    }

    // Funds always go to the owning user, whoever is acting.
    if decision == Decision::Accept {
        reserve::pay_out(env, &request.user, request.accepted_amount)?;
    }
    request.user_status = decision.status();
    storage::store_request(env, &request);

    if let Actor::Delegate(delegate) = actor {
        log!(env, "request decided by delegate", delegate);
    }
    let kind = match decision {
        Decision::Accept => symbol_short!("usr_acc"),
        Decision::Decline => symbol_short!("usr_dec"),
    };
    publish_decided(env, kind, &request);
    Ok(())
}

fn publish_decided(env: &Env, kind: Symbol, request: &CreditRequest) {
    log!(env, "request decided", kind.clone(), request.user.clone(), request.id);
    publish_decision(
        env,
        kind,
        DecisionEvent {
            user: request.user.clone(),
            request_id: request.id,
            accepted_amount: request.accepted_amount,
        },
    );
}

#[contract]
pub struct Credit;

#[contractimpl]
impl Credit {
    /// Initialize the contract with the bank authority and the reserve token.
    pub fn init(env: Env, bank: Address, token: Address) -> Result<(), ContractError> {
        if storage::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        storage::set_config(&env, &bank, &token);
        storage::bump_instance(&env);
        Ok(())
    }

    /// Fund the reserve. Anyone may deposit.
    pub fn deposit(env: Env, from: Address, amount: i128) -> Result<(), ContractError> {
        reserve::deposit(&env, &from, amount)?;
        storage::bump_instance(&env);
        Ok(())
    }

    /// Open a request owned by `user`. Returns the assigned request id, which is
    /// also published in the `created` event.
    pub fn create_request(env: Env, user: Address, amount: i128) -> Result<u64, ContractError> {
        open_request(&env, &user, amount, &user)
    }

    /// Open a request for `user` as one of its approved delegates.
    pub fn create_delegate_request(
        env: Env,
        delegate: Address,
        user: Address,
        amount: i128,
    ) -> Result<u64, ContractError> {
        open_request(&env, &user, amount, &delegate)
    }

    /// Accept a request with the amount the bank will fund (bank only).
    pub fn bank_accept(
        env: Env,
        user: Address,
        request_id: u64,
        amount: i128,
    ) -> Result<(), ContractError> {
        bank_decide(&env, &user, request_id, Decision::Accept, amount)
    }

    /// Decline a request (bank only). The accepted amount stays zero.
    pub fn bank_decline(env: Env, user: Address, request_id: u64) -> Result<(), ContractError> {
        bank_decide(&env, &user, request_id, Decision::Decline, 0)
    }

    /// Accept a bank-accepted request; pays the accepted amount to `user`.
    pub fn user_accept(env: Env, user: Address, request_id: u64) -> Result<(), ContractError> {
        user_decide(&env, &user, request_id, Decision::Accept, &user)
    }

    /// Decline a bank-accepted request. No funds move.
    pub fn user_decline(env: Env, user: Address, request_id: u64) -> Result<(), ContractError> {
        user_decide(&env, &user, request_id, Decision::Decline, &user)
    }

    /// Accept on behalf of `user`. The payout still goes to `user`.
    pub fn user_delegate_accept(
        env: Env,
        delegate: Address,
        user: Address,
        request_id: u64,
    ) -> Result<(), ContractError> {
        user_decide(&env, &user, request_id, Decision::Accept, &delegate)
    }

    pub fn user_delegate_decline(
        env: Env,
        delegate: Address,
        user: Address,
        request_id: u64,
    ) -> Result<(), ContractError> {
        user_decide(&env, &user, request_id, Decision::Decline, &delegate)
    }

    /// Authorize `delegate` to create and decide requests for `owner`.
    pub fn grant_delegate(env: Env, owner: Address, delegate: Address) -> Result<(), ContractError> {
        delegation::grant(&env, &owner, &delegate)
    }

    /// Withdraw a delegation. Applies to every later call.
    pub fn revoke_delegate(env: Env, owner: Address, delegate: Address) -> Result<(), ContractError> {
        delegation::revoke(&env, &owner, &delegate)
    }

    pub fn get_request(env: Env, user: Address, request_id: u64) -> Option<CreditRequest> {
        storage::load_request(&env, &user, request_id)
    }

    pub fn is_delegate(env: Env, owner: Address, delegate: Address) -> bool {
        delegation::is_delegate(&env, &owner, &delegate)
    }

    /// Number of requests ever created for `user`; also the latest request id.
    pub fn request_count(env: Env, user: Address) -> u64 {
        storage::request_count(&env, &user)
    }

    /// Accounted reserve balance available for payouts.
    pub fn reserve(env: Env) -> i128 {
        storage::reserve(&env)
    }

    pub fn bank(env: Env) -> Option<Address> {
        storage::bank(&env)
    }

    pub fn token(env: Env) -> Option<Address> {
        storage::token(&env)
    }
}
