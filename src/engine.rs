//! Core transaction engine.
//!
//! A batch goes through three passes: card definitions build the registry,
//! transactions are settled against every matching card, and the matched
//! cards are rendered into the report.

use crate::card::{Card, Settlement};
use crate::error::Result;
use crate::luhn;
use crate::registry::{CardId, CardRegistry};
use crate::report::Report;
use crate::transaction::{ParsePolicy, ParsedBatch, Transaction};
use log::{debug, warn};
use std::io::{BufRead, Write};

/// The credit card processing engine.
///
/// Holds the registry for the lifetime of a run plus the list of cards hit
/// by transactions, one id per transaction-to-card match.
///
/// # Multiple cards per holder
///
/// Transactions name a holder, not a card. When a holder owns several cards
/// the transaction is settled against each of them, and each produces its own
/// match.
pub struct CardProcessor {
    policy: ParsePolicy,

    /// All cards defined so far.
    registry: CardRegistry,

    /// Cards touched by transactions, in application order.
    matched: Vec<CardId>,
}

impl CardProcessor {
    /// Creates an empty processor with [`ParsePolicy::Strict`].
    pub fn new() -> Self {
        CardProcessor {
            policy: ParsePolicy::default(),
            registry: CardRegistry::new(),
            matched: Vec::new(),
        }
    }

    /// Sets how malformed records and card numbers are treated.
    pub fn with_policy(mut self, policy: ParsePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Reads a whole batch from `reader` and processes it.
    ///
    /// The input is fully read before any record is parsed.
    pub fn process_reader<R: BufRead>(&mut self, reader: R) -> Result<()> {
        let lines = reader.lines().collect::<std::io::Result<Vec<String>>>()?;
        self.process_lines(lines)
    }

    /// Processes the lines of a batch.
    pub fn process_lines<I, S>(&mut self, lines: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let batch = ParsedBatch::from_lines(lines, self.policy)?;
        debug!(
            "Parsed {} card definition(s) and {} transaction(s)",
            batch.cards.len(),
            batch.transactions.len()
        );

        for def in &batch.cards {
            self.registry.insert(Card::from(def));
        }

        for tx in &batch.transactions {
            self.apply(tx)?;
        }

        Ok(())
    }

    /// Settles one transaction against every card of its holder.
    ///
    /// Returns the ids of the matched cards, whether or not the settlement
    /// was accepted.
    pub fn apply(&mut self, tx: &Transaction) -> Result<Vec<CardId>> {
        let ids = self.registry.matching(&tx.actor_name).to_vec();

        if ids.is_empty() {
            debug!("No card held by {}, ignoring {:?}", tx.actor_name, tx.kind);
            return Ok(ids);
        }

        for &id in &ids {
            let Some(card) = self.registry.get(id) else {
                continue;
            };

            let number_valid = self.number_valid(card)?;
            match card.settle(tx.kind, tx.amount, number_valid) {
                Settlement::Accepted { new_balance } => {
                    debug!(
                        "{:?} of {} on {}'s card: balance {} -> {}",
                        tx.kind, tx.amount, card.holder_name, card.balance, new_balance
                    );
                    if let Some(card) = self.registry.get_mut(id) {
                        card.balance = new_balance;
                    }
                }
                Settlement::Rejected(reason) => {
                    debug!(
                        "{:?} of {} on {}'s card rejected: {}",
                        tx.kind, tx.amount, card.holder_name, reason
                    );
                }
            }
        }

        self.matched.extend_from_slice(&ids);
        Ok(ids)
    }

    /// Builds the report from the final state of every matched card.
    pub fn report(&self) -> Result<Report> {
        let cards = self.matched.iter().filter_map(|&id| self.registry.get(id));
        Report::build(cards, |card| self.number_valid(card))
    }

    /// Writes the report framed by separator lines.
    pub fn write_output<W: Write>(&self, writer: W) -> Result<()> {
        self.report()?.write_to(writer)
    }

    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    /// Luhn verdict for a card, honouring the parse policy.
    ///
    /// In lenient mode a number with non-digit characters counts as invalid.
    fn number_valid(&self, card: &Card) -> Result<bool> {
        match luhn::is_valid(&card.number) {
            Ok(valid) => Ok(valid),
            Err(e) if self.policy == ParsePolicy::Lenient => {
                warn!("{}'s card: {}", card.holder_name, e);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}

impl Default for CardProcessor {
    fn default() -> Self {
        Self::new()
    }
}
