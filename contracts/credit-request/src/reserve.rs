//! Reserve ledger: the pooled balance payouts are drawn from.
//!
//! The balance is accounted in instance storage and moves only through
//! [`deposit`] and [`pay_out`]. Tokens sent to the contract any other way are
//! not part of the reserve.

use soroban_sdk::{log, token, Address, Env, Symbol};

use crate::events::{publish_deposit, DepositEvent};
use crate::storage;
use crate::types::ContractError;

/// Instance storage key for the payout guard.
fn reentrancy_key(env: &Env) -> Symbol {
    Symbol::new(env, "reentrancy")
}

fn set_reentrancy_guard(env: &Env) -> Result<(), ContractError> {
    let key = reentrancy_key(env);
    let current: bool = env.storage().instance().get(&key).unwrap_or(false);
    if current {
        return Err(ContractError::Reentrancy);
    }
    env.storage().instance().set(&key, &true);
    Ok(())
}

fn clear_reentrancy_guard(env: &Env) {
    env.storage().instance().set(&reentrancy_key(env), &false);
}

/// Move `amount` tokens from `from` into the contract and credit the reserve.
pub(crate) fn deposit(env: &Env, from: &Address, amount: i128) -> Result<i128, ContractError> {
    from.require_auth();
    if amount <= 0 {
        return Err(ContractError::InvalidArgument);
    }
    let token_address = storage::require_token(env)?;
    let new_reserve = storage::reserve(env)
        .checked_add(amount)
        .ok_or(ContractError::Overflow)?;

    storage::set_reserve(env, new_reserve);
    token::Client::new(env, &token_address).transfer(
        from,
        &env.current_contract_address(),
        &amount,
    );

    log!(env, "reserve deposit", from.clone(), amount, new_reserve);
    publish_deposit(
        env,
        DepositEvent {
            from: from.clone(),
            amount,
            new_reserve,
        },
    );
    Ok(new_reserve)
}

/// Debit the reserve by `amount` and transfer it to `to` as one unit.
///
/// Every check runs before the first write. If the token transfer fails the
/// host aborts the invocation and the reserve write is rolled back with it.
pub(crate) fn pay_out(env: &Env, to: &Address, amount: i128) -> Result<i128, ContractError> {
    let token_address = storage::require_token(env)?;
    let remaining = storage::reserve(env)
        .checked_sub(amount)
        .filter(|balance| *balance >= 0)
        .ok_or(ContractError::InsufficientReserve)?;

    set_reentrancy_guard(env)?;
    storage::set_reserve(env, remaining);
    token::Client::new(env, &token_address).transfer(
        &env.current_contract_address(),
        to,
        &amount,
    );
    clear_reentrancy_guard(env);

    log!(env, "reserve payout", to.clone(), amount, remaining);
    Ok(remaining)
}
