//! Explicit field validation.
//!
//! Every input type implements [`Validate`]; services run it before any
//! create or update and turn a non-empty result into
//! [`DomainError::Validation`](crate::DomainError::Validation).

use serde::Serialize;

/// A single rejected field, named by its wire name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Boundary validation for incoming records.
pub trait Validate {
    /// Returns every field that violates its constraints. Empty means valid.
    fn validate(&self) -> Vec<FieldError>;
}

/// Length rule for a required text field.
pub(crate) struct TextRule {
    pub field: &'static str,
    pub min: usize,
    pub max: usize,
    pub required_message: &'static str,
    pub size_message: &'static str,
}

impl TextRule {
    /// Pushes at most one error for `value`: blank wins over size.
    pub fn check(&self, value: Option<&str>, errors: &mut Vec<FieldError>) {
        match value {
            Some(v) if !is_blank(v) => {
                let len = v.chars().count();
                if len < self.min || len > self.max {
                    errors.push(FieldError::new(self.field, self.size_message));
                }
            }
            _ => errors.push(FieldError::new(self.field, self.required_message)),
        }
    }
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Loose email shape check: `local@domain.tld`, no whitespace.
pub(crate) fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty() && !host.starts_with('.'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULE: TextRule = TextRule {
        field: "titulo",
        min: 5,
        max: 10,
        required_message: "required",
        size_message: "size",
    };

    fn check(value: Option<&str>) -> Vec<FieldError> {
        let mut errors = Vec::new();
        RULE.check(value, &mut errors);
        errors
    }

    #[test]
    fn test_text_rule_required() {
        assert_eq!(check(None), vec![FieldError::new("titulo", "required")]);
        assert_eq!(check(Some("   ")), vec![FieldError::new("titulo", "required")]);
    }

    #[test]
    fn test_text_rule_bounds_are_inclusive() {
        assert!(check(Some("abcde")).is_empty());
        assert!(check(Some("abcdefghij")).is_empty());
        assert_eq!(check(Some("abcd")), vec![FieldError::new("titulo", "size")]);
        assert_eq!(
            check(Some("abcdefghijk")),
            vec![FieldError::new("titulo", "size")]
        );
    }

    #[test]
    fn test_text_rule_counts_chars_not_bytes() {
        // 5 chars, 10 bytes
        assert!(check(Some("ãéíõú")).is_empty());
    }

    #[test]
    fn test_email_shape() {
        assert!(is_email("root@root.com"));
        assert!(is_email("rafa_lemes@email.com.br"));
        assert!(!is_email("root"));
        assert!(!is_email("@root.com"));
        assert!(!is_email("root@com"));
        assert!(!is_email("ro ot@root.com"));
        assert!(!is_email("a@b@c.com"));
    }
}
