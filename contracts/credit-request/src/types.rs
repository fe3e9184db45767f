//! Core data types for the credit request contract.

use soroban_sdk::{contracttype, Address};

/// Decision recorded on one side of a request.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DecisionStatus {
    Unset = 0,
    Accepted = 1,
    Declined = 2,
}

/// Outcome a caller asks for when deciding a request.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Decision {
    Accept,
    Decline,
}

impl Decision {
    pub fn status(self) -> DecisionStatus {
        match self {
            Decision::Accept => DecisionStatus::Accepted,
            Decision::Decline => DecisionStatus::Declined,
        }
    }
}

#[soroban_sdk::contracterror]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    InvalidArgument = 1,
    NotFound = 2,
    Unauthorized = 3,
    IllegalStateTransition = 4,
    /// Payout exceeds the accounted reserve.
    InsufficientReserve = 5,
    NotInitialized = 6,
    AlreadyInitialized = 7,
    Reentrancy = 8,
    Overflow = 9,
}

/// Stored credit request. Records are kept forever as an audit trail.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CreditRequest {
    pub user: Address,
    /// Unique within `user`'s namespace, starting at 1.
    pub id: u64,
    pub requested_amount: i128,
    /// Zero until the bank accepts, then fixed.
    pub accepted_amount: i128,
    pub bank_status: DecisionStatus,
    pub user_status: DecisionStatus,
    /// Ledger timestamp at creation.
    pub created_at: u64,
}

impl CreditRequest {
    pub fn awaiting_bank(&self) -> bool {
        self.bank_status == DecisionStatus::Unset
    }

    pub fn awaiting_user(&self) -> bool {
        self.bank_status == DecisionStatus::Accepted && self.user_status == DecisionStatus::Unset
    }
}
