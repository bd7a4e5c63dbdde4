// src/common/format.rs
//
// Display helpers shared by the settings forms, the booking draft and the CLI.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static email regex"));

// ---
// Contact validation
// ---

/// Empty is accepted: the contact email is optional.
pub fn is_valid_email(email: &str) -> bool {
    email.is_empty() || EMAIL_RE.is_match(email)
}

/// Empty is accepted. Otherwise the digits must be exactly ten.
pub fn is_valid_phone(phone: &str) -> bool {
    phone.is_empty() || unformat_phone(phone).len() == 10
}

// ---
// Phone numbers
// ---

/// Keeps only the ASCII digits.
pub fn unformat_phone(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Progressive `(XXX) XXX-XXXX` formatting, usable while the user is still typing.
/// Digits past the tenth are dropped from the display.
pub fn format_phone(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    let digits = unformat_phone(value);
    match digits.len() {
        0..=3 => digits,
        4..=6 => format!("({}) {}", &digits[..3], &digits[3..]),
        n => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..n.min(10)]),
    }
}

// ---
// Social profiles
// ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialPlatform {
    Instagram,
    Twitter,
    Facebook,
}

impl SocialPlatform {
    pub fn base_url(self) -> &'static str {
        match self {
            SocialPlatform::Instagram => "https://www.instagram.com/",
            SocialPlatform::Twitter => "https://twitter.com/",
            SocialPlatform::Facebook => "https://facebook.com/",
        }
    }
}

/// `@glowgirl` -> `https://www.instagram.com/glowgirl`. Empty handles give an empty URL.
pub fn social_url(handle: &str, platform: SocialPlatform) -> String {
    let trimmed = handle.trim_start_matches(['@', '/']);
    let clean = trimmed.strip_suffix('/').unwrap_or(trimmed);
    if clean.is_empty() {
        String::new()
    } else {
        format!("{}{}", platform.base_url(), clean)
    }
}

/// Inverse of [`social_url`], used to show the bare handle in an input.
pub fn social_handle(url: &str, platform: SocialPlatform) -> String {
    let rest = url.replacen(platform.base_url(), "", 1);
    rest.strip_suffix('/').unwrap_or(&rest).to_string()
}

// ---
// Money
// ---

pub fn format_money(amount: Decimal) -> String {
    format!("${:.2}", amount.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("" => true ; "empty is allowed")]
    #[test_case("owner@glowgirl.com" => true ; "plain address")]
    #[test_case("owner@glowgirl" => false ; "missing dot in domain")]
    #[test_case("owner glowgirl@x.com" => false ; "whitespace")]
    #[test_case("@glowgirl.com" => false ; "missing local part")]
    fn email_validation(input: &str) -> bool {
        is_valid_email(input)
    }

    #[test_case("" => true ; "empty is allowed")]
    #[test_case("5551234567" => true ; "raw digits")]
    #[test_case("(555) 123-4567" => true ; "formatted")]
    #[test_case("555-1234" => false ; "too short")]
    #[test_case("+1 555 123 4567" => false ; "country code makes eleven digits")]
    fn phone_validation(input: &str) -> bool {
        is_valid_phone(input)
    }

    #[test_case("" => "" ; "empty")]
    #[test_case("555" => "555" ; "area code only")]
    #[test_case("55512" => "(555) 12" ; "partial exchange")]
    #[test_case("5551234567" => "(555) 123-4567" ; "complete")]
    #[test_case("(555) 999-0000" => "(555) 999-0000" ; "already formatted")]
    #[test_case("555123456789" => "(555) 123-4567" ; "extra digits dropped")]
    fn phone_formatting(input: &str) -> String {
        format_phone(input)
    }

    #[test]
    fn unformat_keeps_digits_only() {
        assert_eq!(unformat_phone("(555) 999-0000"), "5559990000");
    }

    #[test]
    fn social_url_strips_decorations() {
        assert_eq!(
            social_url("@glowgirl/", SocialPlatform::Instagram),
            "https://www.instagram.com/glowgirl"
        );
        assert_eq!(social_url("", SocialPlatform::Twitter), "");
        assert_eq!(social_url("@", SocialPlatform::Twitter), "");
    }

    #[test]
    fn social_handle_reverses_url() {
        assert_eq!(
            social_handle("https://facebook.com/glowgirl/", SocialPlatform::Facebook),
            "glowgirl"
        );
        assert_eq!(social_handle("", SocialPlatform::Facebook), "");
    }

    #[test]
    fn money_has_two_decimals() {
        assert_eq!(format_money(Decimal::new(4860, 2)), "$48.60");
        assert_eq!(format_money(Decimal::from(45)), "$45.00");
    }
}
