use std::io;

use anyhow::Context;
use solitaire::card_total;

/// Why a line of user input was rejected.
#[derive(Debug, PartialEq, Eq)]
pub enum InvalidConfig {
    NotAnInteger { token: String },
    NonPositive { value: i64 },
    WrongSum { sum: u64, expected: u32 },
}

impl std::error::Error for InvalidConfig {}

impl std::fmt::Display for InvalidConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidConfig::NotAnInteger { token } => {
                write!(f, "'{}' is not an integer", token)
            }
            InvalidConfig::NonPositive { value } => {
                write!(f, "every pile needs at least one card, got {}", value)
            }
            InvalidConfig::WrongSum { sum, expected } => {
                write!(f, "pile sizes sum to {} instead of {}", sum, expected)
            }
        }
    }
}

/// Parses one line of space-separated pile sizes.
///
/// A single bad token rejects the whole line; nothing parsed before it is
/// kept. Only a list of positive integers summing to `expected_total` is
/// accepted.
pub fn parse_config_line(line: &str, expected_total: u32) -> Result<Vec<u32>, InvalidConfig> {
    let mut piles = Vec::new();
    let mut sum: u64 = 0;
    for token in line.split_whitespace() {
        let value: i64 = token.parse().map_err(|_| InvalidConfig::NotAnInteger {
            token: token.to_owned(),
        })?;
        if value <= 0 {
            return Err(InvalidConfig::NonPositive { value });
        }
        // Saturate so a line of absurdly large values fails the sum check
        // below instead of overflowing the accumulator.
        sum = sum.saturating_add(value as u64);
        piles.push(value as u64);
    }
    if sum != u64::from(expected_total) {
        return Err(InvalidConfig::WrongSum {
            sum,
            expected: expected_total,
        });
    }
    // The sum check caps every element at the card total, so the narrowing
    // cast cannot truncate.
    Ok(piles.into_iter().map(|pile| pile as u32).collect())
}

/// Prompts on stdout and reads lines until the user enters a valid initial
/// configuration.
pub fn collect_initial_config(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    final_piles: u32,
) -> anyhow::Result<Vec<u32>> {
    let expected_total = card_total(final_piles);
    println!("Number of total cards is {}", expected_total);
    println!("You will be entering the initial configuration of the cards (i.e., how many in each pile).");
    println!("Please enter a space-separated list of positive integers followed by newline:");

    loop {
        let line = lines
            .next()
            .context("stdin closed before a valid configuration was entered")??;
        match parse_config_line(&line, expected_total) {
            Ok(piles) => return Ok(piles),
            Err(err) => {
                tracing::debug!(%err, "rejected configuration");
                println!(
                    "ERROR: Each pile must have at least one card and the total number of cards must be {}",
                    expected_total
                );
                println!("Please enter a space-separated list of positive integers followed by newline:");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_valid_list() {
        assert_eq!(parse_config_line("45", 45), Ok(vec![45]));
        assert_eq!(parse_config_line("  20 20  5 ", 45), Ok(vec![20, 20, 5]));
    }

    #[test]
    fn rejects_non_integers() {
        assert_eq!(
            parse_config_line("20 twenty 5", 45),
            Err(InvalidConfig::NotAnInteger {
                token: "twenty".to_owned()
            })
        );
        assert_eq!(
            parse_config_line("4.5", 45),
            Err(InvalidConfig::NotAnInteger {
                token: "4.5".to_owned()
            })
        );
    }

    #[test]
    fn rejects_non_positive_values() {
        assert_eq!(
            parse_config_line("45 0", 45),
            Err(InvalidConfig::NonPositive { value: 0 })
        );
        assert_eq!(
            parse_config_line("50 -5", 45),
            Err(InvalidConfig::NonPositive { value: -5 })
        );
    }

    #[test]
    fn rejects_a_wrong_sum() {
        assert_eq!(
            parse_config_line("40 4", 45),
            Err(InvalidConfig::WrongSum {
                sum: 44,
                expected: 45
            })
        );
        // An empty line sums to zero and is rejected the same way.
        assert_eq!(
            parse_config_line("", 45),
            Err(InvalidConfig::WrongSum {
                sum: 0,
                expected: 45
            })
        );
    }

    #[test]
    fn huge_values_saturate_instead_of_overflowing() {
        assert_eq!(
            parse_config_line(
                "9223372036854775807 9223372036854775807 9223372036854775807",
                45
            ),
            Err(InvalidConfig::WrongSum {
                sum: u64::MAX,
                expected: 45
            })
        );
    }

    #[test]
    fn values_past_the_card_total_fail_the_sum_check() {
        assert_eq!(
            parse_config_line("5000000000", 45),
            Err(InvalidConfig::WrongSum {
                sum: 5_000_000_000,
                expected: 45
            })
        );
    }
}
