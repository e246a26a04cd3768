use std::fmt;

pub const NAME_MAX_LEN: usize = 100;
pub const CONTACT_MAX_LEN: usize = 255;
pub const PIN_MIN_LEN: usize = 4;
pub const PIN_MAX_LEN: usize = 6;
pub const PHONE_MIN_LEN: usize = 10;
pub const PHONE_MAX_LEN: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult = Result<(), ValidationError>;

pub fn sanitize_string(value: &str) -> String {
    value
        .chars()
        .filter(|ch| !ch.is_control())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn validate_required(field: &'static str, value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }

    Ok(())
}

pub fn validate_max_len(field: &'static str, value: &str, max_len: usize) -> ValidationResult {
    if value.len() > max_len {
        return Err(ValidationError::new(
            field,
            format!("must be at most {} characters", max_len),
        ));
    }

    Ok(())
}

pub fn validate_name(name: &str) -> ValidationResult {
    let name = sanitize_string(name);
    validate_required("name", &name)?;
    validate_max_len("name", &name, NAME_MAX_LEN)?;

    Ok(())
}

pub fn validate_email(email: &str) -> ValidationResult {
    let email = sanitize_string(email);
    validate_required("email", &email)?;
    validate_max_len("email", &email, CONTACT_MAX_LEN)?;

    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();

    if local.is_empty() || domain.is_empty() || !domain.contains('.') || email.contains(' ') {
        return Err(ValidationError::new("email", "must be a valid address"));
    }

    Ok(())
}

pub fn validate_phone(phone: &str) -> ValidationResult {
    let phone = sanitize_string(phone);
    validate_required("phone", &phone)?;

    if !phone.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(ValidationError::new("phone", "must contain only digits"));
    }

    if phone.len() < PHONE_MIN_LEN || phone.len() > PHONE_MAX_LEN {
        return Err(ValidationError::new(
            "phone",
            format!("must be {} to {} digits", PHONE_MIN_LEN, PHONE_MAX_LEN),
        ));
    }

    Ok(())
}

pub fn validate_pin(pin: &str) -> ValidationResult {
    if !pin.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(ValidationError::new("pin", "must contain only digits"));
    }

    if pin.len() < PIN_MIN_LEN || pin.len() > PIN_MAX_LEN {
        return Err(ValidationError::new(
            "pin",
            format!("must be {} to {} digits", PIN_MIN_LEN, PIN_MAX_LEN),
        ));
    }

    Ok(())
}

pub fn validate_positive_amount(amount: i64) -> ValidationResult {
    if amount <= 0 {
        return Err(ValidationError::new("amount", "must be greater than zero"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_required_field() {
        assert!(validate_required("field", "value").is_ok());
        assert!(validate_required("field", "   ").is_err());
    }

    #[test]
    fn validates_max_len() {
        assert!(validate_max_len("field", "abc", 3).is_ok());
        assert!(validate_max_len("field", "abcd", 3).is_err());
    }

    #[test]
    fn sanitizes_string() {
        assert_eq!(sanitize_string("  hello\tworld  "), "hello world");
        assert_eq!(sanitize_string("single"), "single");
        assert_eq!(sanitize_string(" \n "), "");
        assert_eq!(sanitize_string("ab\u{0000}cd\u{0007}"), "abcd");
    }

    #[test]
    fn validates_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("  user@example.com  ").is_ok());
        assert!(validate_email("user@localhost").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("userexample.com").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn validates_phone() {
        assert!(validate_phone("01712345678").is_ok());
        assert!(validate_phone("0171234567").is_ok());
        assert!(validate_phone("017-1234567").is_err());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone(&"1".repeat(16)).is_err());
    }

    #[test]
    fn validates_pin() {
        assert!(validate_pin("1234").is_ok());
        assert!(validate_pin("40585").is_ok());
        assert!(validate_pin("123456").is_ok());
        assert!(validate_pin("123").is_err());
        assert!(validate_pin("1234567").is_err());
        assert!(validate_pin("12a45").is_err());
        assert!(validate_pin("").is_err());
    }

    #[test]
    fn validates_positive_amount() {
        assert!(validate_positive_amount(1).is_ok());
        assert!(validate_positive_amount(0).is_err());
        assert!(validate_positive_amount(-50).is_err());
    }
}
