//! # Credit Card Processor
//!
//! Applies a batch of charges and credits to credit cards and reports the
//! final balance of every card the batch touched.
//!
//! ## Design Principles
//!
//! - **Luhn validation**: transactions against a card whose number fails the
//!   checksum are refused, and the card is reported as `error`
//! - **Strict limits**: a charge is accepted only while the balance stays
//!   strictly below the card's limit
//! - **Pure settlement**: settling a transaction computes a new balance without
//!   touching the card; the engine applies it
//! - **Deterministic output**: report sorted by holder name
//!
//! ## Example
//!
//! ```
//! use credit_card_processor::CardProcessor;
//!
//! let input = "Add John 79927398713 $1000\nCharge John $500\n";
//! let mut processor = CardProcessor::new();
//! processor.process_lines(input.lines()).unwrap();
//!
//! let mut output = Vec::new();
//! processor.write_output(&mut output).unwrap();
//! assert_eq!(String::from_utf8(output).unwrap(), "```\nJohn: $500\n```\n");
//! ```

pub mod card;
pub mod engine;
pub mod error;
pub mod luhn;
pub mod registry;
pub mod report;
pub mod transaction;

pub use card::{Card, Rejection, Settlement};
pub use engine::CardProcessor;
pub use error::{ProcessorError, Result};
pub use registry::{CardId, CardRegistry};
pub use report::{BalanceSummary, Report, ReportEntry};
pub use transaction::{CardDefinition, ParsePolicy, ParsedBatch, Record, Transaction, TxKind};
