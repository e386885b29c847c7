//! Heuristic vendor-name extraction from bank statement descriptions.
//!
//! Descriptions carry reference codes, banking boilerplate and the merchant name in no fixed
//! order, but the merchant usually sits at the tail. The rules below run in a fixed order and
//! each one short-circuits the rest.

use std::sync::OnceLock;

use regex::Regex;

pub const UNKNOWN_VENDOR: &str = "UNKNOWN";

const PREAUTHORIZED_MARKER: &str = "PREAUTHORIZED DEBIT";

// (substring, vendor label)
const SPECIAL_CASES: &[(&str, &str)] = &[
    ("ATM WITHDRAWAL", "ATM WITHDRAWAL"),
    ("Branch Transaction", "BANK"),
];

const STOPLIST: &[&str] = &[
    "PURCHASE",
    "RETAIL",
    "INTERAC",
    "SALE",
    "POINT",
    "OF",
    "TRANSFER",
    "FUNDS",
    "ELECTRONIC",
    "BANKING",
    "INTERNET",
];

fn alnum_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9]{8,}$").expect("invalid alnum run regex"))
}

fn digit_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]{8,}$").expect("invalid digit run regex"))
}

fn trailing_code_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[#C]?[0-9]*$").expect("invalid trailing code regex"))
}

/// What the tail scan does with a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenAction {
    /// Long reference code: the first one is dropped, the second ends the scan.
    Boundary,
    /// Banking boilerplate: ends the scan.
    Stop,
    Keep,
}

/// Mixed letters and digits, at least 8 long.
fn is_reference_code(token: &str) -> bool {
    alnum_run_re().is_match(token)
        && token.chars().any(|c| c.is_ascii_alphabetic())
        && token.chars().any(|c| c.is_ascii_digit())
}

fn is_long_number(token: &str) -> bool {
    digit_run_re().is_match(token)
}

fn is_boilerplate(token: &str) -> bool {
    let upper = token.to_uppercase();
    STOPLIST.iter().any(|word| *word == upper)
}

// First match wins.
const TOKEN_RULES: &[(fn(&str) -> bool, TokenAction)] = &[
    (is_reference_code, TokenAction::Boundary),
    (is_long_number, TokenAction::Boundary),
    (is_boilerplate, TokenAction::Stop),
];

fn classify_token(token: &str) -> TokenAction {
    TOKEN_RULES
        .iter()
        .find(|(applies, _)| applies(token))
        .map(|(_, action)| *action)
        .unwrap_or(TokenAction::Keep)
}

/// Drop everything up to and including the preauthorized-debit marker.
fn unwrap_preauthorized(description: &str) -> &str {
    match description.find(PREAUTHORIZED_MARKER) {
        Some(idx) => &description[idx + PREAUTHORIZED_MARKER.len()..],
        None => description,
    }
}

fn special_case(description: &str) -> Option<&'static str> {
    SPECIAL_CASES
        .iter()
        .find(|(needle, _)| description.contains(needle))
        .map(|(_, label)| *label)
}

/// Walk tokens right to left, keeping the ones between the tail and the first stop point.
/// Returned tokens keep their left-to-right order.
fn scan_tail(description: &str) -> Vec<&str> {
    let mut kept = Vec::new();
    let mut passed_boundary = false;
    for token in description.split_whitespace().rev() {
        match classify_token(token) {
            TokenAction::Boundary if !passed_boundary => passed_boundary = true,
            TokenAction::Boundary | TokenAction::Stop => break,
            TokenAction::Keep => kept.push(token),
        }
    }
    kept.reverse();
    kept
}

fn starts_uppercase(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

pub fn extract_vendor(description: &str) -> String {
    let description = unwrap_preauthorized(description);
    if let Some(label) = special_case(description) {
        return label.to_string();
    }

    let tokens = scan_tail(description);
    let capitalized: Vec<&str> = tokens.into_iter().filter(|w| starts_uppercase(w)).collect();
    let joined = capitalized.join(" ");
    let stripped = trailing_code_re().replace(&joined, "");
    let vendor = stripped.trim();

    if vendor.is_empty() {
        UNKNOWN_VENDOR.to_string()
    } else {
        vendor.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_description_is_unknown() {
        assert_eq!(extract_vendor(""), UNKNOWN_VENDOR);
        assert_eq!(extract_vendor("   "), UNKNOWN_VENDOR);
    }

    #[test]
    fn test_stoplist_ends_scan() {
        assert_eq!(
            extract_vendor("PURCHASE 1234567A8 RETAIL Garrison Brewin #12"),
            "Garrison Brewin"
        );
        assert_eq!(extract_vendor("Point of Sale Interac Esso"), "Esso");
    }

    #[test]
    fn test_preauthorized_debit_unwrap() {
        assert_eq!(
            extract_vendor("ELECTRONIC FUNDS TRANSFER PREAUTHORIZED DEBIT NETFLIX.COM 8885432397"),
            "NETFLIX.COM"
        );
    }

    #[test]
    fn test_special_cases() {
        assert_eq!(extract_vendor("ABM ATM WITHDRAWAL 00123 Main St"), "ATM WITHDRAWAL");
        assert_eq!(extract_vendor("Branch Transaction SERVICE CHARGE"), "BANK");
        assert_eq!(extract_vendor("PREAUTHORIZED DEBIT ATM WITHDRAWAL"), "ATM WITHDRAWAL");
    }

    #[test]
    fn test_special_cases_are_case_sensitive() {
        assert_eq!(extract_vendor("branch transaction Fee"), "Fee");
    }

    #[test]
    fn test_second_long_code_marks_boundary() {
        assert_eq!(
            extract_vendor("Tim Hortons 12345678 Coffee AB12CD34EF lunch"),
            "Coffee"
        );
        assert_eq!(extract_vendor("Old Vendor 87654321 New Vendor 12345678"), "New Vendor");
    }

    #[test]
    fn test_short_codes_are_kept() {
        // seven characters is below the code length
        assert_eq!(extract_vendor("Sobeys AB1234X"), "Sobeys AB1234X");
        // letters only is not a reference code
        assert_eq!(extract_vendor("DOLLARAMA"), "DOLLARAMA");
    }

    #[test]
    fn test_lowercase_words_filtered() {
        assert_eq!(extract_vendor("Shoppers drug mart 0423"), "Shoppers");
        assert_eq!(extract_vendor("only lowercase words"), UNKNOWN_VENDOR);
        assert_eq!(extract_vendor("McDonald's"), "McDonald's");
    }

    #[test]
    fn test_trailing_codes_stripped() {
        assert_eq!(extract_vendor("Esso C123"), "Esso");
        assert_eq!(extract_vendor("Staples Store#45"), "Staples Store");
    }

    #[test]
    fn test_trailing_capital_c_is_stripped_from_words() {
        assert_eq!(extract_vendor("Acme INC"), "Acme IN");
    }

    #[test]
    fn test_classify_token() {
        assert_eq!(classify_token("1234567A8"), TokenAction::Boundary);
        assert_eq!(classify_token("12345678"), TokenAction::Boundary);
        assert_eq!(classify_token("interac"), TokenAction::Stop);
        assert_eq!(classify_token("ABCDEFGH"), TokenAction::Keep);
        assert_eq!(classify_token("1234567"), TokenAction::Keep);
    }
}
