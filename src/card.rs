//! Credit card model and settlement rules.
//!
//! Settlement is a pure function of the card's current state: it never mutates
//! the card, it reports the balance the card *would* have if the transaction
//! is accepted. The engine decides what to do with that.

use crate::transaction::{CardDefinition, TxKind};
use std::cmp::Ordering;
use std::fmt;

/// A credit card as defined by an `Add` record.
///
/// # Equality and Ordering
///
/// Two cards are equal when both the holder name and the card number match
/// exactly (case-sensitive). Limit and balance do not take part. Cards order
/// by holder name only, so sorting keeps cards of the same holder in their
/// original relative order.
#[derive(Debug, Clone)]
pub struct Card {
    /// Name of the cardholder, as written in the input.
    pub holder_name: String,

    /// Card number. Only ever checked with Luhn, never parsed as an integer.
    pub number: String,

    /// Credit limit. A charge must keep the balance strictly below it.
    pub limit: i64,

    /// Outstanding balance. Negative when credits exceed charges.
    pub balance: i64,
}

/// Outcome of settling one transaction against one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// The transaction passes every check; the card moves to `new_balance`.
    Accepted { new_balance: i64 },

    /// The transaction is refused and the balance stays as it was.
    Rejected(Rejection),
}

/// Why a transaction was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The card number fails the Luhn checksum.
    InvalidNumber,

    /// A charge would bring the balance to or above the limit.
    OverLimit,

    /// The new balance does not fit in an `i64`.
    Overflow,
}

impl Card {
    /// Creates a new card with a zero balance.
    pub fn new(holder_name: impl Into<String>, number: impl Into<String>, limit: i64) -> Self {
        Card {
            holder_name: holder_name.into(),
            number: number.into(),
            limit,
            balance: 0,
        }
    }

    /// Settles a transaction against this card without modifying it.
    ///
    /// `number_valid` is the Luhn verdict for [`Card::number`]; it is passed in
    /// so the caller decides how a malformed number is treated.
    ///
    /// - `Charge` is accepted when the number is valid and
    ///   `balance + amount < limit`. Reaching the limit exactly is refused.
    /// - `Credit` is accepted whenever the number is valid, whatever the amount.
    pub fn settle(&self, kind: TxKind, amount: i64, number_valid: bool) -> Settlement {
        if !number_valid {
            return Settlement::Rejected(Rejection::InvalidNumber);
        }

        match kind {
            TxKind::Charge => match self.balance.checked_add(amount) {
                Some(new_balance) if new_balance < self.limit => {
                    Settlement::Accepted { new_balance }
                }
                Some(_) => Settlement::Rejected(Rejection::OverLimit),
                None => Settlement::Rejected(Rejection::Overflow),
            },
            TxKind::Credit => match self.balance.checked_sub(amount) {
                Some(new_balance) => Settlement::Accepted { new_balance },
                None => Settlement::Rejected(Rejection::Overflow),
            },
        }
    }
}

impl From<&CardDefinition> for Card {
    fn from(def: &CardDefinition) -> Self {
        Card::new(def.holder_name.as_str(), def.number.as_str(), def.limit)
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.holder_name == other.holder_name && self.number == other.number
    }
}

impl Eq for Card {}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Card {
    fn cmp(&self, other: &Self) -> Ordering {
        self.holder_name.cmp(&other.holder_name)
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::InvalidNumber => write!(f, "card number fails Luhn check"),
            Rejection::OverLimit => write!(f, "charge would reach the credit limit"),
            Rejection::Overflow => write!(f, "balance overflow"),
        }
    }
}
