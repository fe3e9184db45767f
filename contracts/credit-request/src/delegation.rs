//! Delegation registry: set membership keyed by (owner, delegate), and the
//! per-call resolution of who is acting for a user.

use soroban_sdk::{log, symbol_short, Address, Env, Symbol};

use crate::events::{publish_delegation, DelegationEvent};
use crate::storage::{BUMP_AMOUNT, BUMP_THRESHOLD};
use crate::types::ContractError;

fn delegate_key(owner: &Address, delegate: &Address) -> (Symbol, Address, Address) {
    (symbol_short!("DLG"), owner.clone(), delegate.clone())
}

/// Who is acting on a user's request in the current call.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Actor {
    Owner,
    Delegate(Address),
}

pub(crate) fn is_delegate(env: &Env, owner: &Address, delegate: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&delegate_key(owner, delegate))
}

pub(crate) fn grant(env: &Env, owner: &Address, delegate: &Address) -> Result<(), ContractError> {
    owner.require_auth();
    if owner == delegate {
        return Err(ContractError::InvalidArgument);
    }

    let key = delegate_key(owner, delegate);
    env.storage().persistent().set(&key, &true);
    env.storage()
        .persistent()
        .extend_ttl(&key, BUMP_THRESHOLD, BUMP_AMOUNT);

    log!(env, "delegate granted", owner.clone(), delegate.clone());
    publish_delegation(
        env,
        true,
        DelegationEvent {
            owner: owner.clone(),
            delegate: delegate.clone(),
        },
    );
    Ok(())
}

pub(crate) fn revoke(env: &Env, owner: &Address, delegate: &Address) -> Result<(), ContractError> {
    owner.require_auth();

    // Removing an absent key is a no-op, so revoking twice is fine.
    env.storage()
        .persistent()
        .remove(&delegate_key(owner, delegate));

    log!(env, "delegate revoked", owner.clone(), delegate.clone());
    publish_delegation(
        env,
        false,
        DelegationEvent {
            owner: owner.clone(),
            delegate: delegate.clone(),
        },
    );
    Ok(())
}

/// Require `initiator`'s signature and check it may act for `user`.
///
/// Membership is read at call time, so a revocation applies to every later call.
pub(crate) fn authorize_for(
    env: &Env,
    user: &Address,
    initiator: &Address,
) -> Result<Actor, ContractError> {
    initiator.require_auth();
    if initiator == user {
        return Ok(Actor::Owner);
    }
    if is_delegate(env, user, initiator) {
        return Ok(Actor::Delegate(initiator.clone()));
    }
    Err(ContractError::Unauthorized)
}
