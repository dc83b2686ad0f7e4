//! Validation helpers for the start form.

use validator::{ValidationError, ValidationErrors};

/// Minimum accepted player name length, in characters, after trimming.
pub const NAME_MIN_CHARS: usize = 2;
/// Maximum accepted player name length, in characters, after trimming.
pub const NAME_MAX_CHARS: usize = 30;

/// Whitespace as browsers see it: Unicode whitespace plus the byte-order mark.
pub fn is_form_whitespace(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Strip leading and trailing [`is_form_whitespace`] characters.
pub fn trim_form_input(value: &str) -> &str {
    value.trim_matches(is_form_whitespace)
}

/// Validates that a trimmed player name has 2 to 30 characters.
///
/// # Examples
///
/// ```ignore
/// validate_player_name("Al")   // Ok
/// validate_player_name("A")    // Err - too short
/// ```
pub fn validate_player_name(name: &str) -> Result<(), ValidationError> {
    let length = name.chars().count();
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&length) {
        let mut err = ValidationError::new("name_length");
        err.message = Some("Name must be 2-30 characters.".into());
        return Err(err);
    }
    Ok(())
}

/// Validates the basic `local@domain.tld` email shape.
///
/// Neither part may contain whitespace or `@`, and the domain needs a `.`
/// with at least one character on each side.
pub fn validate_player_email(email: &str) -> Result<(), ValidationError> {
    if is_email_shaped(email) {
        return Ok(());
    }
    let mut err = ValidationError::new("email_format");
    err.message = Some("Enter a valid email (e.g., name@domain.com).".into());
    Err(err)
}

fn is_email_shaped(email: &str) -> bool {
    if email.chars().any(is_form_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(idx, c)| c == '.' && idx > 0 && idx + 1 < domain.len())
}

/// First human-readable message recorded for `field`, if any.
pub fn field_message(errors: &ValidationErrors, field: &str) -> Option<String> {
    errors
        .field_errors()
        .get(field)
        .and_then(|field_errors| field_errors.first())
        .map(|err| {
            err.message
                .as_ref()
                .map(|message| message.to_string())
                .unwrap_or_else(|| err.code.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_validate_player_name_bounds() {
        assert!(validate_player_name("Al").is_ok());
        assert!(validate_player_name(&"x".repeat(30)).is_ok());
        assert!(validate_player_name("A").is_err()); // too short
        assert!(validate_player_name(&"x".repeat(31)).is_err()); // too long
        assert!(validate_player_name("").is_err()); // empty
    }

    #[test]
    fn test_validate_player_name_counts_characters() {
        assert!(validate_player_name("Zoë").is_ok());
        assert!(validate_player_name(&"é".repeat(30)).is_ok());
    }

    #[test]
    fn test_validate_player_email_valid() {
        assert!(validate_player_email("name@domain.com").is_ok());
        assert!(validate_player_email("a@b.c").is_ok());
        assert!(validate_player_email("first.last@sub.domain.org").is_ok());
        assert!(validate_player_email("a@b..c").is_ok());
    }

    #[test]
    fn test_validate_player_email_invalid() {
        assert!(validate_player_email("").is_err());
        assert!(validate_player_email("plain").is_err());
        assert!(validate_player_email("@domain.com").is_err()); // empty local part
        assert!(validate_player_email("name@domain").is_err()); // no dot
        assert!(validate_player_email("name@.com").is_err()); // dot first
        assert!(validate_player_email("name@domain.").is_err()); // dot last
        assert!(validate_player_email("a@b@c.com").is_err()); // second @
        assert!(validate_player_email("na me@domain.com").is_err()); // whitespace
        assert!(validate_player_email("a\u{feff}@b.c").is_err()); // byte-order mark
    }

    #[test]
    fn test_trim_form_input_strips_byte_order_mark() {
        assert_eq!(trim_form_input("\u{feff} Ada \u{feff}"), "Ada");
        assert_eq!(trim_form_input("\u{a0}x\t"), "x");
        assert!(validate_player_name(trim_form_input("\u{feff}A\u{feff}")).is_err());
    }

    #[test]
    fn test_field_message_reads_custom_message() {
        let mut errors = ValidationErrors::new();
        errors.add("name", validate_player_name("x").unwrap_err());
        assert_eq!(
            field_message(&errors, "name").as_deref(),
            Some("Name must be 2-30 characters.")
        );
        assert_eq!(field_message(&errors, "email"), None);
    }

    proptest! {
        #[test]
        fn name_validation_is_deterministic_and_length_driven(name in "\\PC{0,40}") {
            let first = validate_player_name(&name).is_ok();
            let second = validate_player_name(&name).is_ok();
            prop_assert_eq!(first, second);
            let length = name.chars().count();
            prop_assert_eq!(first, (2..=30).contains(&length));
        }

        #[test]
        fn email_validation_matches_shape(
            local in "[a-z0-9._%+-]{1,12}",
            label in "[a-z0-9-]{1,12}",
            tld in "[a-z]{1,6}",
        ) {
            let email = format!("{local}@{label}.{tld}");
            prop_assert!(validate_player_email(&email).is_ok());
            let without_dot = format!("{local}@{label}{tld}");
            prop_assert!(validate_player_email(&without_dot).is_err());
            let spaced = format!("{local} @{label}.{tld}");
            prop_assert!(validate_player_email(&spaced).is_err());
        }
    }
}
