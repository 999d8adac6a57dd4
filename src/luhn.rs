//! Luhn (mod 10) checksum used to validate card numbers.

use crate::error::{ProcessorError, Result};

/// Returns `true` if `number` passes the Luhn checksum.
///
/// Digits are walked right to left and every second one (starting with the
/// second from the right) is doubled, folding values above 9 back into a
/// single digit. The number is valid when the digit sum is a multiple of 10.
///
/// # Errors
///
/// Returns [`ProcessorError::InvalidCardNumber`] if `number` contains anything
/// other than ASCII decimal digits.
///
/// # Examples
///
/// ```
/// use credit_card_processor::luhn;
///
/// assert!(luhn::is_valid("79927398713").unwrap());
/// assert!(!luhn::is_valid("1234567890123").unwrap());
/// assert!(luhn::is_valid("4111-1111").is_err());
/// ```
pub fn is_valid(number: &str) -> Result<bool> {
    let mut sum = 0u32;

    for (position, c) in number.chars().rev().enumerate() {
        let digit = c.to_digit(10).ok_or_else(|| ProcessorError::InvalidCardNumber {
            number: number.to_string(),
            found: c,
        })?;

        sum += if position % 2 == 1 {
            let doubled = digit * 2;
            if doubled > 9 {
                doubled - 9
            } else {
                doubled
            }
        } else {
            digit
        };
    }

    Ok(sum % 10 == 0)
}
