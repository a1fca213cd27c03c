//! Validation of admin form fields.

use std::sync::LazyLock;

use regex::Regex;

static RE_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern is valid")
});

static RE_ABSOLUTE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*://[^/?#\s]+").expect("URL pattern is valid")
});

/// Shortest accepted admin password.
pub const MIN_PASSWORD_LEN: usize = 8;

const PASSWORD_SYMBOLS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Reasons a form field is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("Invalid email address")]
    Email,

    /// Phone numbers need an area code: 10 digits for landlines, 11 for mobiles.
    #[error("Phone number must have 10 or 11 digits, got {0}")]
    Phone(usize),

    #[error("URL must have a scheme and a host")]
    Url,

    #[error("Password must be at least {} characters long", MIN_PASSWORD_LEN)]
    PasswordTooShort,

    #[error("Password must contain {0}")]
    PasswordMissing(&'static str),
}

/// Check an email address against a simple `local@domain.tld` shape.
pub fn validate_email(email: &str) -> Result<(), FieldError> {
    if RE_EMAIL.is_match(email) {
        Ok(())
    } else {
        Err(FieldError::Email)
    }
}

/// Check a Brazilian phone number. Formatting characters are ignored.
pub fn validate_phone(phone: &str) -> Result<(), FieldError> {
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    if (10..=11).contains(&digits) {
        Ok(())
    } else {
        Err(FieldError::Phone(digits))
    }
}

/// Check that a URL is absolute: a scheme followed by `://` and a host.
pub fn validate_url(url: &str) -> Result<(), FieldError> {
    if RE_ABSOLUTE_URL.is_match(url) {
        Ok(())
    } else {
        Err(FieldError::Url)
    }
}

/// Check password strength, reporting the first rule that fails.
pub fn validate_password(password: &str) -> Result<(), FieldError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(FieldError::PasswordTooShort);
    }

    let rules: [(&str, fn(char) -> bool); 4] = [
        ("an uppercase letter", |c| c.is_ascii_uppercase()),
        ("a lowercase letter", |c| c.is_ascii_lowercase()),
        ("a digit", |c| c.is_ascii_digit()),
        ("a symbol", |c| PASSWORD_SYMBOLS.contains(c)),
    ];
    for (requirement, matches) in rules {
        if !password.chars().any(matches) {
            return Err(FieldError::PasswordMissing(requirement));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_emails() {
        assert_eq!(validate_email("contato@netfyber.com.br"), Ok(()));
        assert_eq!(validate_email("suporte+noc@netfyber.example"), Ok(()));
    }

    #[test]
    fn rejects_malformed_emails() {
        for email in ["", "contato", "contato@", "@netfyber.com", "a@b.c", "a b@c.com"] {
            assert_eq!(validate_email(email), Err(FieldError::Email), "{email:?}");
        }
    }

    #[test]
    fn phone_digit_count() {
        assert_eq!(validate_phone("(11) 3333-4444"), Ok(()));
        assert_eq!(validate_phone("+55 (11) 98888-7777"), Err(FieldError::Phone(13)));
        assert_eq!(validate_phone("11 98888-7777"), Ok(()));
        assert_eq!(validate_phone("3333-4444"), Err(FieldError::Phone(8)));
    }

    #[test]
    fn urls_need_scheme_and_host() {
        assert_eq!(validate_url("https://netfyber.example.com/planos"), Ok(()));
        assert_eq!(validate_url("ftp://files.example"), Ok(()));
        assert_eq!(validate_url("netfyber.example.com"), Err(FieldError::Url));
        assert_eq!(validate_url("https://"), Err(FieldError::Url));
        assert_eq!(validate_url("/planos"), Err(FieldError::Url));
    }

    #[test]
    fn password_rules_in_order() {
        assert_eq!(validate_password("Ab1!"), Err(FieldError::PasswordTooShort));
        assert_eq!(
            validate_password("abcdefg1!"),
            Err(FieldError::PasswordMissing("an uppercase letter"))
        );
        assert_eq!(
            validate_password("ABCDEFG1!"),
            Err(FieldError::PasswordMissing("a lowercase letter"))
        );
        assert_eq!(
            validate_password("Abcdefgh!"),
            Err(FieldError::PasswordMissing("a digit"))
        );
        assert_eq!(
            validate_password("Abcdefg12"),
            Err(FieldError::PasswordMissing("a symbol"))
        );
        assert_eq!(validate_password("Fibra2024!"), Ok(()));
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            FieldError::PasswordTooShort.to_string(),
            "Password must be at least 8 characters long"
        );
        assert_eq!(
            FieldError::Phone(7).to_string(),
            "Phone number must have 10 or 11 digits, got 7"
        );
    }
}
