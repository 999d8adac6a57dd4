//! Record parsing for the batch input format.
//!
//! Each input line is either a card definition or a transaction:
//!
//! ```text
//! Add <holder> <number> $<limit>
//! Charge <holder> $<amount>
//! Credit <holder> $<amount>
//! ```
//!
//! Lines starting with [`SEPARATOR`] only delimit sections of the file and are
//! never parsed.

use crate::error::{ProcessorError, Result};
use log::warn;

/// Marker that opens and closes a block in both the input and the report.
pub const SEPARATOR: &str = "```";

/// Keyword introducing a card definition.
const ADD: &str = "Add";

/// A card definition (`Add` line).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDefinition {
    pub holder_name: String,
    pub number: String,
    pub limit: i64,
}

/// Balance-affecting transaction kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxKind {
    /// Increase the balance, subject to the credit limit.
    Charge,

    /// Decrease the balance. Never limited.
    Credit,
}

/// A charge or credit against the cards of one holder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub kind: TxKind,

    /// Holder name as written; matched against cards ignoring case.
    pub actor_name: String,

    pub amount: i64,
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    CardDefinition(CardDefinition),
    Transaction(Transaction),
}

/// How the parser reacts to a line it cannot understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParsePolicy {
    /// Fail the whole batch on the first bad record.
    #[default]
    Strict,

    /// Log the bad record at warn level and carry on.
    Lenient,
}

/// The records of a batch, split by kind with input order preserved.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ParsedBatch {
    pub cards: Vec<CardDefinition>,
    pub transactions: Vec<Transaction>,
}

impl TxKind {
    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "Charge" => Some(TxKind::Charge),
            "Credit" => Some(TxKind::Credit),
            _ => None,
        }
    }
}

impl Record {
    /// Parses a single non-separator line.
    ///
    /// `line_num` is 1-based and only used for error reporting. Tokens past the
    /// ones a record needs are ignored.
    ///
    /// Returns `Ok(None)` for blank lines.
    pub fn parse(line: &str, line_num: usize) -> Result<Option<Record>> {
        let tokens: Vec<&str> = line.split_whitespace().collect();

        let Some(&keyword) = tokens.first() else {
            return Ok(None);
        };

        if keyword == ADD {
            let [_, holder, number, limit, ..] = tokens.as_slice() else {
                return Err(ProcessorError::malformed(
                    line_num,
                    format!("expected `Add <holder> <number> $<limit>`, got {:?}", line),
                ));
            };
            return Ok(Some(Record::CardDefinition(CardDefinition {
                holder_name: holder.to_string(),
                number: number.to_string(),
                limit: parse_amount(limit, line_num)?,
            })));
        }

        let kind = TxKind::from_keyword(keyword).ok_or_else(|| {
            ProcessorError::malformed(line_num, format!("unknown record type {:?}", keyword))
        })?;

        let [_, actor, amount, ..] = tokens.as_slice() else {
            return Err(ProcessorError::malformed(
                line_num,
                format!("expected `{} <holder> $<amount>`, got {:?}", keyword, line),
            ));
        };

        Ok(Some(Record::Transaction(Transaction {
            kind,
            actor_name: actor.to_string(),
            amount: parse_amount(amount, line_num)?,
        })))
    }
}

impl ParsedBatch {
    /// Parses every line of a batch.
    ///
    /// Separator lines and blank lines are skipped. Under
    /// [`ParsePolicy::Lenient`] malformed lines are logged and dropped;
    /// under [`ParsePolicy::Strict`] the first one aborts the batch.
    pub fn from_lines<I, S>(lines: I, policy: ParsePolicy) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut batch = ParsedBatch::default();

        for (idx, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            let line_num = idx + 1;

            if line.starts_with(SEPARATOR) {
                continue;
            }

            match Record::parse(line, line_num) {
                Ok(Some(Record::CardDefinition(card))) => batch.cards.push(card),
                Ok(Some(Record::Transaction(tx))) => batch.transactions.push(tx),
                Ok(None) => {}
                Err(e) if policy == ParsePolicy::Lenient => {
                    warn!("Skipping line {}: {}", line_num, e);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(batch)
    }
}

/// Parses a currency-prefixed amount such as `$500`.
///
/// The first character is dropped whatever it is; the rest must be an integer.
fn parse_amount(token: &str, line_num: usize) -> Result<i64> {
    let mut chars = token.chars();
    chars.next();
    let digits = chars.as_str();

    digits.parse::<i64>().map_err(|e| {
        ProcessorError::malformed(line_num, format!("invalid amount {:?}: {}", token, e))
    })
}
