//! Credit Card Processor CLI
//!
//! Reads a batch of card definitions and transactions and prints the final
//! balance of every card the transactions touched.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- cards.txt
//! cargo run -- --skip-malformed cards.txt
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use credit_card_processor::{CardProcessor, ParsePolicy, ProcessorError, Result};
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

const USAGE: &str = "[*] Please provide input file name
[*] Example
[*] credit-card-processor cards.txt
[*] credit-card-processor --skip-malformed cards.txt";

/// Flag selecting [`ParsePolicy::Lenient`].
const SKIP_MALFORMED: &str = "--skip-malformed";

fn main() {
    env_logger::init();

    match run() {
        Ok(()) => {}
        Err(ProcessorError::MissingArgument) => println!("{}", USAGE),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn run() -> Result<()> {
    let mut policy = ParsePolicy::Strict;
    let mut input_path = None;

    for arg in env::args().skip(1) {
        if arg == SKIP_MALFORMED {
            policy = ParsePolicy::Lenient;
        } else if input_path.is_none() {
            input_path = Some(arg);
        }
    }

    let input_path = input_path.ok_or(ProcessorError::MissingArgument)?;
    println!("File name : {}", input_path);

    let file = File::open(&input_path)?;
    let reader = BufReader::new(file);

    let mut processor = CardProcessor::new().with_policy(policy);
    processor.process_reader(reader)?;

    let stdout = io::stdout();
    let handle = stdout.lock();
    processor.write_output(handle)?;

    Ok(())
}
