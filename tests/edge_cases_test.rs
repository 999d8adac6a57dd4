//! Edge case tests for the credit card processor.
//!
//! Runs whole batches through the library and checks the rendered report.

use credit_card_processor::{CardProcessor, ParsePolicy, ProcessorError};

fn run_batch(input: &str) -> String {
    let mut processor = CardProcessor::new();
    processor.process_lines(input.lines()).unwrap();

    let mut output = Vec::new();
    processor.write_output(&mut output).unwrap();
    String::from_utf8(output).unwrap()
}

/// Report lines between the separators
fn entries(output: &str) -> Vec<String> {
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.first(), Some(&"```"));
    assert_eq!(lines.last(), Some(&"```"));
    lines[1..lines.len() - 1].iter().map(|s| s.to_string()).collect()
}

// ==================== CHARGE EDGE CASES ====================

#[test]
fn test_charge_just_below_limit() {
    let output = run_batch("Add John 79927398713 $1000\nCharge John $999");
    assert_eq!(entries(&output), vec!["John: $999"]);
}

#[test]
fn test_charge_exactly_at_limit_is_rejected() {
    let output = run_batch("Add John 79927398713 $1000\nCharge John $1000");
    assert_eq!(entries(&output), vec!["John: $0"]);
}

#[test]
fn test_charge_after_credit_uses_freed_room() {
    let output = run_batch(
        "Add John 79927398713 $1000\nCharge John $900\nCredit John $500\nCharge John $599",
    );
    assert_eq!(entries(&output), vec!["John: $999"]);
}

#[test]
fn test_zero_limit_rejects_any_charge() {
    let output = run_batch("Add John 79927398713 $0\nCharge John $0");
    assert_eq!(entries(&output), vec!["John: $0"]);
}

// ==================== CREDIT EDGE CASES ====================

#[test]
fn test_credit_without_charges_goes_negative() {
    let output = run_batch("Add John 79927398713 $1000\nCredit John $5000");
    assert_eq!(entries(&output), vec!["John: $-5000"]);
}

#[test]
fn test_negative_credit_is_accepted() {
    let output = run_batch("Add John 79927398713 $1000\nCredit John $-20");
    assert_eq!(entries(&output), vec!["John: $20"]);
}

#[test]
fn test_credit_on_invalid_card_is_ignored() {
    let output = run_batch("Add Jane 1234567890123 $1000\nCredit Jane $5");
    assert_eq!(entries(&output), vec!["Jane: error"]);
}

// ==================== MATCHING & REPORT ====================

#[test]
fn test_unknown_holder_is_ignored() {
    let output = run_batch("Add John 79927398713 $1000\nCharge Nobody $5");
    assert!(entries(&output).is_empty());
}

#[test]
fn test_card_touched_twice_listed_once() {
    let output = run_batch(
        "Add John 79927398713 $1000\nCharge John $5\nCharge john $5\nCredit JOHN $1",
    );
    assert_eq!(entries(&output), vec!["John: $9"]);
}

#[test]
fn test_report_sorted_by_holder() {
    let output = run_batch(
        "Add Zed 79927398713 $100\nAdd Amy 4111111111111111 $100\nAdd Mia 5454545454545454 $100\n\
         Charge Zed $1\nCharge Mia $2\nCharge Amy $3",
    );
    assert_eq!(entries(&output), vec!["Amy: $3", "Mia: $2", "Zed: $1"]);
}

#[test]
fn test_uppercase_sorts_before_lowercase() {
    let output = run_batch(
        "Add bob 79927398713 $100\nAdd Carl 4111111111111111 $100\nCharge bob $1\nCharge Carl $2",
    );
    assert_eq!(entries(&output), vec!["Carl: $2", "bob: $1"]);
}

#[test]
fn test_transactions_before_definitions_still_apply() {
    let output = run_batch("Charge John $5\nAdd John 79927398713 $1000");
    assert_eq!(entries(&output), vec!["John: $5"]);
}

// ==================== INPUT FORMAT ====================

#[test]
fn test_separator_and_blank_lines_are_skipped() {
    let output = run_batch("```\n\nAdd John 79927398713 $1000\n   \n```ignored\nCharge John $5\n```");
    assert_eq!(entries(&output), vec!["John: $5"]);
}

#[test]
fn test_empty_input_gives_empty_report() {
    assert_eq!(run_batch(""), "```\n```\n");
}

#[test]
fn test_malformed_limit_fails_strict_batch() {
    let mut processor = CardProcessor::new();
    let err = processor
        .process_lines("Add John 79927398713 $1k\nCharge John $5".lines())
        .unwrap_err();

    match err {
        ProcessorError::MalformedRecord { line, .. } => assert_eq!(line, 1),
        other => panic!("Expected MalformedRecord, got {:?}", other),
    }
}

#[test]
fn test_lenient_batch_skips_bad_lines() {
    let mut processor = CardProcessor::new().with_policy(ParsePolicy::Lenient);
    processor
        .process_lines(
            "Add John 79927398713 $1k\nAdd John 79927398713 $10\nDeposit John $5\nCharge John\nCharge John $5"
                .lines(),
        )
        .unwrap();

    let mut output = Vec::new();
    processor.write_output(&mut output).unwrap();
    assert_eq!(String::from_utf8(output).unwrap(), "```\nJohn: $5\n```\n");
}
