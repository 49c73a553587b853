//! Ready-made extraction patterns.
//!
//! The following patterns are provided:
//! - [`EMAIL`]: matches email addresses.
//! - [`PHONE_NUMBER`]: matches phone numbers, with optional country code
//!   and the usual separator variations.
//!
//! [`resolve`] maps the CLI alias names onto these patterns.

/// Matches email addresses.
pub const EMAIL: &str = r"[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*";

/// Matches phone numbers.
pub const PHONE_NUMBER: &str = r"(?:\+?\d{1,3}[\s-]?)?(?:(?:\(?\d{3}\)?)|(?:\d{3}))(?:[\s.-]?)(?:\d{3})(?:[\s.-]?)(?:\d{4})";

/// Resolves a pattern alias (`email`, `phone`) to its pattern.
pub fn resolve(alias: &str) -> Option<&'static str> {
    match alias {
        "email" => Some(EMAIL),
        "phone" => Some(PHONE_NUMBER),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;
    use rstest::rstest;

    #[rstest]
    #[case("simple@example.com")]
    #[case("first.last+tag@sub.example.org")]
    #[case("user_name@example.co.uk")]
    fn test_email_pattern_matches(#[case] input: &str) {
        let email = Regex::new(EMAIL).unwrap();
        assert_eq!(email.find(input).map(|m| m.as_str()), Some(input));
    }

    #[rstest]
    #[case("(000) 000-0000")]
    #[case("000-000-0000")]
    #[case("000.000.0000")]
    #[case("+1 000 000 0000")]
    fn test_phone_pattern_matches(#[case] input: &str) {
        let phone = Regex::new(PHONE_NUMBER).unwrap();
        assert_eq!(phone.find(input).map(|m| m.as_str()), Some(input));
    }

    #[test]
    fn test_aliases_resolve() {
        assert_eq!(resolve("email"), Some(EMAIL));
        assert_eq!(resolve("phone"), Some(PHONE_NUMBER));
        assert_eq!(resolve("address"), None);
    }
}
