//! Field cleanup rules
//!
//! Listing pages decorate their fields: names carry the result's rank, the
//! address ends in a locality/postal fragment, and the phone element starts
//! with label text. These functions strip the decoration off.

use super::PLACEHOLDER;

/// Number of trailing address tokens that belong to the locality/postal code
const ADDRESS_TAIL_TOKENS: usize = 2;

/// Number of leading phone tokens that are label text
const PHONE_LABEL_TOKENS: usize = 2;

/// Removes a purely numeric leading token from a business name
///
/// `"42 Joe's Diner"` becomes `"Joe's Diner"`; names without a rank are
/// returned trimmed but otherwise unchanged. A name that is nothing but a
/// rank collapses to the placeholder.
pub fn strip_rank_prefix(name: &str) -> String {
    let mut tokens = name.split_whitespace();

    match tokens.next() {
        // Ranks are ASCII numerals; other script digits are part of the name
        Some(first) if first.chars().all(|c| c.is_ascii_digit()) => {
            let rest = tokens.collect::<Vec<_>>().join(" ");
            if rest.is_empty() {
                PLACEHOLDER.to_string()
            } else {
                rest
            }
        }
        Some(_) => name.trim().to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

/// Drops the trailing locality/postal tokens from an address
///
/// Addresses with two or fewer tokens are kept as they are.
pub fn truncate_address(address: &str) -> String {
    let address = address.trim();
    let tokens: Vec<&str> = address.split_whitespace().collect();

    if tokens.len() > ADDRESS_TAIL_TOKENS {
        tokens[..tokens.len() - ADDRESS_TAIL_TOKENS].join(" ")
    } else {
        address.to_string()
    }
}

/// Drops the label tokens in front of a phone number
///
/// The remaining tokens are joined with single spaces; an element holding
/// only its label yields an empty string.
pub fn clean_phone(text: &str) -> String {
    text.split_whitespace()
        .skip(PHONE_LABEL_TOKENS)
        .collect::<Vec<_>>()
        .join(" ")
}
