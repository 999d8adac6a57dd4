//! Final balance report.

use crate::card::Card;
use crate::error::Result;
use crate::transaction::SEPARATOR;
use std::collections::HashSet;
use std::fmt;
use std::io::Write;

/// What the report shows for a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BalanceSummary {
    /// The card number is Luhn-valid; shows the balance.
    Balance(i64),

    /// The card number is not Luhn-valid.
    Error,
}

/// One line of the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub holder_name: String,
    pub summary: BalanceSummary,
}

/// Report lines in output order.
///
/// Built from one card per transaction match, so the same card may be handed
/// in several times. Entries are sorted by holder name (stable) and any card
/// equal to an earlier one, compared by holder name and number, is dropped.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Report {
    entries: Vec<ReportEntry>,
}

impl Report {
    /// Builds the report from matched cards.
    ///
    /// `number_valid` gives the Luhn verdict for a card; it decides between a
    /// balance and `error`.
    pub fn build<'a, I, F>(matched: I, mut number_valid: F) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Card>,
        F: FnMut(&Card) -> Result<bool>,
    {
        let mut cards: Vec<&Card> = matched.into_iter().collect();
        cards.sort();

        let mut seen: HashSet<(&str, &str)> = HashSet::new();
        let mut entries = Vec::with_capacity(cards.len());

        for card in cards {
            if !seen.insert((card.holder_name.as_str(), card.number.as_str())) {
                continue;
            }

            let summary = if number_valid(card)? {
                BalanceSummary::Balance(card.balance)
            } else {
                BalanceSummary::Error
            };

            entries.push(ReportEntry {
                holder_name: card.holder_name.clone(),
                summary,
            });
        }

        Ok(Report { entries })
    }

    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Writes the report framed by separator lines.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        writeln!(writer, "{}", SEPARATOR)?;
        for entry in &self.entries {
            writeln!(writer, "{}", entry)?;
        }
        writeln!(writer, "{}", SEPARATOR)?;
        writer.flush()?;
        Ok(())
    }
}

impl fmt::Display for BalanceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BalanceSummary::Balance(balance) => write!(f, "${}", balance),
            BalanceSummary::Error => write!(f, "error"),
        }
    }
}

impl fmt::Display for ReportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.holder_name, self.summary)
    }
}
