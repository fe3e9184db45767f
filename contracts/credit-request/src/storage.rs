//! Ledger storage layout: instance config, the reserve balance, request records
//! and the per-user id counter.

use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::types::{ContractError, CreditRequest};

const DAY_IN_LEDGERS: u32 = 17_280;
/// Extend entries back to this many ledgers once they fall under the threshold.
pub(crate) const BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub(crate) const BUMP_THRESHOLD: u32 = BUMP_AMOUNT - DAY_IN_LEDGERS;

/// Instance storage key for the bank authority.
fn bank_key(env: &Env) -> Symbol {
    Symbol::new(env, "bank")
}

/// Instance storage key for the reserve token address.
fn token_key(env: &Env) -> Symbol {
    Symbol::new(env, "token")
}

/// Instance storage key for the accounted reserve balance.
fn reserve_key(env: &Env) -> Symbol {
    Symbol::new(env, "reserve")
}

fn request_key(user: &Address, id: u64) -> (Symbol, Address, u64) {
    (symbol_short!("REQ"), user.clone(), id)
}

fn counter_key(user: &Address) -> (Symbol, Address) {
    (symbol_short!("REQ_CTR"), user.clone())
}

pub(crate) fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(BUMP_THRESHOLD, BUMP_AMOUNT);
}

pub(crate) fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&bank_key(env))
}

pub(crate) fn set_config(env: &Env, bank: &Address, token: &Address) {
    env.storage().instance().set(&bank_key(env), bank);
    env.storage().instance().set(&token_key(env), token);
    env.storage().instance().set(&reserve_key(env), &0_i128);
}

pub(crate) fn bank(env: &Env) -> Option<Address> {
    env.storage().instance().get(&bank_key(env))
}

pub(crate) fn token(env: &Env) -> Option<Address> {
    env.storage().instance().get(&token_key(env))
}

pub(crate) fn require_token(env: &Env) -> Result<Address, ContractError> {
    token(env).ok_or(ContractError::NotInitialized)
}

pub(crate) fn reserve(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&reserve_key(env))
        .unwrap_or(0)
}

pub(crate) fn set_reserve(env: &Env, balance: i128) {
    env.storage().instance().set(&reserve_key(env), &balance);
}

pub(crate) fn load_request(env: &Env, user: &Address, id: u64) -> Option<CreditRequest> {
    env.storage().persistent().get(&request_key(user, id))
}

pub(crate) fn store_request(env: &Env, request: &CreditRequest) {
    let key = request_key(&request.user, request.id);
    env.storage().persistent().set(&key, request);
    env.storage()
        .persistent()
        .extend_ttl(&key, BUMP_THRESHOLD, BUMP_AMOUNT);
}

pub(crate) fn request_count(env: &Env, user: &Address) -> u64 {
    env.storage()
        .persistent()
        .get(&counter_key(user))
        .unwrap_or(0)
}

/// Allocate the next request id for `user` (1-based, monotonically increasing).
pub(crate) fn next_request_id(env: &Env, user: &Address) -> Result<u64, ContractError> {
    let next = request_count(env, user)
        .checked_add(1)
        .ok_or(ContractError::Overflow)?;
    let key = counter_key(user);
    env.storage().persistent().set(&key, &next);
    env.storage()
        .persistent()
        .extend_ttl(&key, BUMP_THRESHOLD, BUMP_AMOUNT);
    Ok(next)
}
